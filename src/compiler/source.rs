//! Source locations attached to every syntax-tree node by the parsing stage.

use serde::{Deserialize, Serialize};

/// A line and column within the compiled source file.  Both are 1-based when
/// they come from the parser; a `Position` of `0:0` marks a synthesized node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Position {
        Position { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}:{}", self.line, self.column))
    }
}
