/*
 * Handles semantic analysis of a syntax tree.  This is split into two passes:
 * 1. Table building: enters every declaration into the symbol table, resolves
 *    type expressions and checks the entry procedure.
 * 2. Procedure checking: determines the type of every expression and variable
 *    in the procedure bodies and makes sure those types satisfy the typing
 *    rules of statements, operators and calls.
 *
 * Both passes write the types they compute into the slots of the syntax tree.
 */
mod builtins;
mod error;
mod procedure_checker;
mod table_builder;
mod tests;

pub mod symbol_table;

pub use builtins::{is_builtin, BUILTIN_PROCEDURES, INDEX_ERROR_ROUTINE};
pub use error::SemanticError;
pub use procedure_checker::check_procedures;
pub use table_builder::{build_symbol_table, symbol_table_dump, TableBuilder};

use super::CompilerError;

/// Captures the Failure state of any Semantic Analysis operation.
/// Which will, if it fails, result in a [`SemanticError`] wrapped
/// in a [`CompilerError`]
pub type SemanticResult<T> = Result<T, CompilerError<SemanticError>>;
