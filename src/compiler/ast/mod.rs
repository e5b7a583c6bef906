/*!
 The syntax tree consumed by the semantic passes and the code generator.

 The tree is built once by the external parsing stage (or deserialized from
 JSON/YAML) and is never reshaped afterwards.  The only state the passes write
 into it are the computed-type slots ([`TypeSlot`]) carried by every
 expression, variable designator and type expression: pass 1 fills the type
 expressions, pass 2 fills expressions and variables, and passes 3 and 4 only
 read them.
*/
pub mod build;

mod declaration;
mod expression;
mod identifier;
mod slot;
mod statement;
mod ty;
mod type_expression;

pub use self::declaration::{
    GlobalDeclaration, ParameterDeclaration, ProcedureDeclaration, Program, TypeDeclaration,
    VariableDeclaration,
};
pub use self::expression::{
    ArrayAccess, BinaryExpression, BinaryOperator, Expression, FieldAccess, IntLiteral,
    NamedVariable, UnaryExpression, UnaryOperator, Variable, VariableExpression,
};
pub use self::identifier::Identifier;
pub use self::slot::TypeSlot;
pub use self::statement::{
    AssignStatement, CallStatement, CompoundStatement, IfStatement, Statement, WhileStatement,
};
pub use self::ty::{ArrayType, PrimitiveType, RecordField, RecordType, Type, REFERENCE_BYTE_SIZE};
pub use self::type_expression::{
    ArrayTypeExpression, NamedTypeExpression, RecordTypeExpression, TypeExpression,
};
