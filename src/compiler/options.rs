use super::ast::Identifier;

/// The pass after which compilation stops.  Every pass before it runs too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Build the symbol table.
    Tables,
    /// Check the procedure bodies.
    Semant,
    /// Allocate stack frames.
    Vars,
    /// Generate assembly.
    Codegen,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Codegen
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompilerOptions {
    /// Name of the procedure where execution begins.
    pub entry_point: Identifier,
    pub phase: Phase,
    /// Give procedures that make no calls a frame without saved linkage.
    pub leaf_procedures: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            entry_point: "main".into(),
            phase: Phase::default(),
            leaf_procedures: false,
        }
    }
}

impl CompilerOptions {
    /// True if the passes up to and including `phase` should run.
    pub fn runs(&self, phase: Phase) -> bool {
        phase <= self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompilerOptions::default();
        assert_eq!(options.entry_point, "main");
        assert_eq!(options.phase, Phase::Codegen);
        assert!(!options.leaf_procedures);
    }

    #[test]
    fn test_runs() {
        let options = CompilerOptions {
            phase: Phase::Semant,
            ..CompilerOptions::default()
        };
        assert!(options.runs(Phase::Tables));
        assert!(options.runs(Phase::Semant));
        assert!(!options.runs(Phase::Vars));
        assert!(!options.runs(Phase::Codegen));
    }
}
