use crate::compiler::{
    ast::{Identifier, Type},
    memory::StackLayout,
};

use super::symbol_table::{Entry, ParameterType, ProcedureEntry, SymbolTable, TypeEntry};

/// Procedures provided by the runtime library.  They can be called but are
/// never defined by a program; the code generator imports them by name.
/// Each parameter is an `int`, listed as `(name, is_reference)`.
pub const BUILTIN_PROCEDURES: &[(&str, &[(&str, bool)])] = &[
    ("printi", &[("i", false)]),
    ("printc", &[("i", false)]),
    ("readi", &[("i", true)]),
    ("readc", &[("i", true)]),
    ("exit", &[]),
    ("time", &[("i", true)]),
    ("clearAll", &[("color", false)]),
    ("setPixel", &[("x", false), ("y", false), ("color", false)]),
    (
        "drawLine",
        &[
            ("x1", false),
            ("y1", false),
            ("x2", false),
            ("y2", false),
            ("color", false),
        ],
    ),
    (
        "drawCircle",
        &[("x0", false), ("y0", false), ("radius", false), ("color", false)],
    ),
];

/// Runtime routine that generated code jumps to when an array index is out
/// of bounds.
pub const INDEX_ERROR_ROUTINE: &str = "_indexError";

impl SymbolTable {
    /// Creates a global scope holding the primitive types and the runtime
    /// library procedures.
    pub fn with_builtins() -> SymbolTable {
        let mut table = SymbolTable::new();
        let global = table.global();

        for (name, ty) in [("int", Type::INT), ("bool", Type::BOOL)].iter() {
            table
                .enter(global, (*name).into(), Entry::Type(TypeEntry { ty: ty.clone() }), ())
                .unwrap_or_else(|_| panic!("Builtin type {} declared twice", name));
        }

        for (name, params) in BUILTIN_PROCEDURES {
            let local_scope = table.new_scope(global);
            let entry = Entry::Procedure(ProcedureEntry {
                local_scope,
                parameter_types: builtin_parameters(params),
                stack_layout: StackLayout::new(),
                is_builtin: true,
            });
            table
                .enter(global, Identifier::from(*name), entry, ())
                .unwrap_or_else(|_| panic!("Builtin procedure {} declared twice", name));
        }

        table
    }
}

/// Builtin parameters are all one word wide, so their argument offsets are
/// known without running the allocator.
fn builtin_parameters(params: &[(&str, bool)]) -> Vec<ParameterType> {
    let mut offset = 0;
    params
        .iter()
        .map(|(_, is_reference)| {
            let mut p = ParameterType::new(Type::INT, *is_reference);
            p.offset = Some(offset);
            offset += p.footprint();
            p
        })
        .collect()
}

/// Returns true if `name` is one of the runtime library procedures.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_PROCEDURES.iter().any(|(n, _)| *n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_types_are_declared() {
        let table = SymbolTable::with_builtins();
        let g = table.global();
        for (name, ty) in [("int", Type::INT), ("bool", Type::BOOL)].iter() {
            match table.find(g, &(*name).into()) {
                Some(Entry::Type(t)) => assert_eq!(t.ty, *ty),
                _ => panic!("Expected type entry for {}", name),
            }
        }
    }

    #[test]
    fn test_builtin_signatures() {
        let table = SymbolTable::with_builtins();
        for (name, arity, refs) in [
            ("printi", 1, vec![false]),
            ("readi", 1, vec![true]),
            ("exit", 0, vec![]),
            ("drawLine", 5, vec![false; 5]),
        ]
        .iter()
        {
            let p = table.procedure(&(*name).into()).unwrap();
            assert!(p.is_builtin);
            assert_eq!(p.parameter_types.len(), *arity);
            let actual: Vec<_> = p.parameter_types.iter().map(|p| p.is_reference).collect();
            assert_eq!(actual, *refs);
        }
    }

    #[test]
    fn test_builtin_offsets_are_precomputed() {
        let table = SymbolTable::with_builtins();
        let p = table.procedure(&"drawCircle".into()).unwrap();
        let offsets: Vec<_> = p.parameter_types.iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![Some(0), Some(4), Some(8), Some(12)]);
        assert_eq!(p.argument_footprint(), 16);
    }

    #[test]
    fn test_is_builtin() {
        assert!(is_builtin("printc"));
        assert!(!is_builtin("main"));
    }
}
