use crate::compiler::{ast::Identifier, AtPosition};

/// Failures of code generation.  Anything else that goes wrong after the
/// semantic passes have succeeded is a bug in the compiler and panics.
#[derive(Clone, Debug, PartialEq)]
pub enum CodeGenError {
    RegisterOverflow,
    UnallocatedFrame(Identifier),
}

impl AtPosition for CodeGenError {}

impl std::fmt::Display for CodeGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeGenError::RegisterOverflow => {
                f.write_str("expression is too complicated, ran out of registers")
            }
            CodeGenError::UnallocatedFrame(name) => f.write_fmt(format_args!(
                "stack frame of procedure '{}' has not been allocated",
                name
            )),
        }
    }
}
