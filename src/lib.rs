pub mod cli;
pub mod compiler;

pub use cli::*;
pub use compiler::{allocate_and_generate, build_and_check, compile, CompileError, CompilerError, CompilerOptions, Phase};
