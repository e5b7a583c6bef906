/*!
 Translates a checked and allocated program into ECO32 assembly.

 By the time code generation runs every user error has been reported, so the
 only failures left are resource limits of the target (the register bank)
 and running the passes out of order.
 */
mod error;
mod generator;

pub use error::CodeGenError;
pub use generator::{generate_code, CodeGenerator};

use super::CompilerError;

pub type CodeGenResult<T> = Result<T, CompilerError<CodeGenError>>;
