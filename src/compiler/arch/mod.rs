/*!
 Machine level concepts shared by the code generator: the register file and
 the roles its registers play in the calling convention.
 */
pub mod registers;
