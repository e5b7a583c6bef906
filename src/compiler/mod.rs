/**
 * The compiler takes the syntax tree of an SPL program and converts it into
 * ECO32 assembly language.
 *
 * Compilation runs four passes, strictly in order, over the same tree:
 * 1. Table building: enter every declaration into the symbol table and
 *    resolve every type expression.
 * 2. Procedure checking: compute the type of every expression and variable
 *    in the procedure bodies and enforce the typing rules.
 * 3. Variable allocation: compute the stack frame of every procedure and
 *    assign an offset to every parameter and local variable.
 * 4. Code generation: emit the assembly module.
 *
 * Passes 1 and 2 are the last stages where a User error can occur.  After
 * they succeed the input is considered correct, and any fault found by
 * passes 3 and 4 must come from a bug in the compiler itself.  The policy for
 * those faults is to panic at the point where they are first discovered.
 * The one exception is running out of registers, which is reported as a
 * `CodeGenError` because it depends on the shape of the User's expressions.
 */
pub mod ast;
pub mod codegen;
pub mod eco32;
pub mod memory;
pub mod semantics;

mod arch;
mod error;
mod options;
mod source;

pub use arch::registers::Reg;
pub use error::{AtPosition, CompilerError};
pub use options::{CompilerOptions, Phase};
pub use source::Position;

use ast::Program;
use codegen::{CodeGenError, CodeGenResult};
use eco32::assembly::Line;
use semantics::{symbol_table::SymbolTable, SemanticError, SemanticResult};

/// Runs the two semantic passes over `program` and returns the completed
/// global symbol table.
pub fn build_and_check(program: &Program, options: &CompilerOptions) -> SemanticResult<SymbolTable> {
    let mut table = semantics::build_symbol_table(program, options)?;
    semantics::check_procedures(program, &mut table)?;
    Ok(table)
}

/// Allocates the stack frames of `program` and generates its assembly.  The
/// table must come from [`build_and_check`] over the same program.
pub fn allocate_and_generate(
    program: &Program,
    table: &mut SymbolTable,
    options: &CompilerOptions,
) -> CodeGenResult<Vec<Line>> {
    memory::allocate_variables(program, table, options);
    codegen::generate_code(program, table)
}

/// The first error reported by any pass of [`compile`].
#[derive(Clone, Debug, PartialEq)]
pub enum CompileError {
    Semantic(CompilerError<SemanticError>),
    CodeGen(CompilerError<CodeGenError>),
}

impl From<CompilerError<SemanticError>> for CompileError {
    fn from(e: CompilerError<SemanticError>) -> Self {
        CompileError::Semantic(e)
    }
}

impl From<CompilerError<CodeGenError>> for CompileError {
    fn from(e: CompilerError<CodeGenError>) -> Self {
        CompileError::CodeGen(e)
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Semantic(e) => std::fmt::Display::fmt(e, f),
            CompileError::CodeGen(e) => std::fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for CompileError {}

/// Runs all four passes.
pub fn compile(program: &Program, options: &CompilerOptions) -> Result<Vec<Line>, CompileError> {
    let mut table = build_and_check(program, options)?;
    Ok(allocate_and_generate(program, &mut table, options)?)
}
