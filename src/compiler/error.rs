use super::Position;

/// Represents all errors that are generated from within the Compiler
/// module and its submodules.
///
/// This type captures common metadata which is necessarily present for
/// all errors which are caused by input source code.  E.g. the position
/// that the error occurs at. This also handles formatting all error messages
/// with the universal metadata along with the inner metadata.
///
/// The inner error allows metadata which is specific to a pass within
/// the compiler. E.g., the errors themselves are pass specific and
/// are stored in the `inner` field.
#[derive(Clone, Debug, PartialEq)]
pub struct CompilerError<IE> {
    position: Position,
    inner: IE,
}

impl<IE> CompilerError<IE> {
    pub fn new(position: Position, inner: IE) -> Self {
        CompilerError { position, inner }
    }

    pub fn inner(&self) -> &IE {
        &self.inner
    }

    pub fn into_inner(self) -> IE {
        self.inner
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }
}

impl<IE: std::fmt::Display> std::fmt::Display for CompilerError<IE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("L{}: {}", self.position, self.inner))
    }
}

impl<IE: std::fmt::Display + std::fmt::Debug> std::error::Error for CompilerError<IE> {}

/// Wraps an inner error with the position of the node that caused it.
pub trait AtPosition: Sized {
    fn at(self, position: Position) -> CompilerError<Self> {
        CompilerError::new(position, self)
    }
}
