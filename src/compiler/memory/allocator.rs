use log::{debug, trace};

use crate::compiler::{
    ast::{ProcedureDeclaration, Program},
    semantics::symbol_table::SymbolTable,
    CompilerOptions,
};

use super::StackLayout;

/**
 Computes the stack layout of every procedure in `program` and assigns a
 frame offset to each parameter and local variable.

 Parameters get non-negative offsets into the argument area, which sits above
 the frame pointer in the caller's outgoing area.  The same offset is written
 to the parameter's local variable entry and to the procedure's signature so
 that callers store arguments exactly where the callee reads them.  Local
 variables get negative offsets below the frame pointer, in declaration order.
*/
pub fn allocate_variables(program: &Program, table: &mut SymbolTable, options: &CompilerOptions) {
    debug!("Start variable allocation");
    for p in program.procedures() {
        allocate_procedure(p, table, options.leaf_procedures);
    }
    debug!("Finished variable allocation");
}

fn allocate_procedure(decl: &ProcedureDeclaration, table: &mut SymbolTable, leaf_procedures: bool) {
    let (local_scope, parameter_offsets, argument_area_size) = {
        let proc = table
            .procedure_mut(&decl.name)
            .unwrap_or_else(|| panic!("Procedure {} is not in the symbol table", decl.name));

        let mut offset = 0;
        let mut offsets = vec![];
        for p in proc.parameter_types.iter_mut() {
            p.offset = Some(offset);
            offsets.push(offset);
            offset += p.footprint();
        }
        (proc.local_scope, offsets, offset)
    };

    for (p, offset) in decl.parameters.iter().zip(parameter_offsets) {
        let entry = table
            .local_variable_mut(local_scope, &p.name)
            .unwrap_or_else(|| panic!("Parameter {} is not in the symbol table", p.name));
        trace!("{}: parameter {} at FP + {}", decl.name, p.name, offset);
        entry.offset = Some(offset);
    }

    let mut local_var_area_size = 0;
    for v in &decl.variables {
        let entry = table
            .local_variable_mut(local_scope, &v.name)
            .unwrap_or_else(|| panic!("Variable {} is not in the symbol table", v.name));
        local_var_area_size += entry.ty.byte_size();
        entry.offset = Some(-local_var_area_size);
        trace!("{}: variable {} at FP - {}", decl.name, v.name, local_var_area_size);
    }

    let mut calls = 0;
    let mut outgoing_area_size = 0;
    for s in &decl.body {
        s.for_each_call(&mut |call| {
            calls += 1;
            let callee = table
                .procedure(&call.procedure)
                .unwrap_or_else(|| panic!("Procedure {} is not in the symbol table", call.procedure));
            outgoing_area_size = outgoing_area_size.max(callee.argument_footprint());
        });
    }

    let layout = StackLayout {
        argument_area_size: Some(argument_area_size),
        local_var_area_size: Some(local_var_area_size),
        outgoing_area_size: Some(outgoing_area_size),
        is_optimized_leaf_procedure: leaf_procedures && calls == 0,
    };
    debug!(
        "{}: arguments {}, locals {}, outgoing {}, leaf {}",
        decl.name,
        argument_area_size,
        local_var_area_size,
        outgoing_area_size,
        layout.is_optimized_leaf_procedure
    );

    if let Some(proc) = table.procedure_mut(&decl.name) {
        proc.stack_layout = layout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{
        ast::{build::*, *},
        semantics::{build_symbol_table, check_procedures, symbol_table::Entry},
    };

    fn allocate(program: &Program, options: &CompilerOptions) -> SymbolTable {
        let mut table = build_symbol_table(program, options).unwrap();
        check_procedures(program, &mut table).unwrap();
        allocate_variables(program, &mut table, options);
        table
    }

    fn variable_offset(table: &SymbolTable, proc: &str, name: &str) -> Option<i32> {
        let scope = table.procedure(&proc.into()).unwrap().local_scope;
        match table.find(scope, &name.into()) {
            Some(Entry::Variable(v)) => v.offset,
            _ => panic!("{} is not a variable of {}", name, proc),
        }
    }

    fn sample() -> Program {
        program(vec![
            type_decl("A", array_type(3, int_type())),
            proc_decl(
                "f",
                vec![
                    param("x", int_type()),
                    ref_param("a", named_type("A")),
                    param("y", named_type("bool")),
                ],
                vec![var_decl("i", int_type()), var_decl("buf", named_type("A"))],
                vec![assign(named("i"), var(named("x")))],
            ),
            proc_decl(
                "main",
                vec![],
                vec![var_decl("v", named_type("A")), var_decl("b", named_type("bool"))],
                vec![
                    call("printi", vec![int(1)]),
                    while_do(
                        var(named("b")),
                        compound(vec![if_then(
                            var(named("b")),
                            call(
                                "f",
                                vec![int(1), var(named("v")), var(named("b"))],
                            ),
                        )]),
                    ),
                    call("exit", vec![]),
                ],
            ),
        ])
    }

    #[test]
    fn test_argument_area() {
        let table = allocate(&sample(), &CompilerOptions::default());
        let f = table.procedure(&"f".into()).unwrap();
        assert_eq!(f.stack_layout.argument_area_size, Some(12));
        let offsets: Vec<_> = f.parameter_types.iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![Some(0), Some(4), Some(8)]);
        for (name, offset) in [("x", 0), ("a", 4), ("y", 8)].iter() {
            assert_eq!(variable_offset(&table, "f", name), Some(*offset));
        }
    }

    #[test]
    fn test_local_area() {
        let table = allocate(&sample(), &CompilerOptions::default());
        let f = table.procedure(&"f".into()).unwrap();
        assert_eq!(f.stack_layout.local_var_area_size, Some(16));
        assert_eq!(variable_offset(&table, "f", "i"), Some(-4));
        assert_eq!(variable_offset(&table, "f", "buf"), Some(-16));
    }

    #[test]
    fn test_outgoing_area_is_max_of_nested_calls() {
        let table = allocate(&sample(), &CompilerOptions::default());
        let main = table.procedure(&"main".into()).unwrap();
        assert_eq!(main.stack_layout.outgoing_area_size, Some(12));
        assert_eq!(main.stack_layout.frame_size(), Some(36));

        let f = table.procedure(&"f".into()).unwrap();
        assert_eq!(f.stack_layout.outgoing_area_size, Some(0));
        assert_eq!(f.stack_layout.frame_size(), Some(24));
    }

    #[test]
    fn test_leaf_optimization() {
        let options = CompilerOptions {
            leaf_procedures: true,
            ..CompilerOptions::default()
        };
        let table = allocate(&sample(), &options);
        let f = table.procedure(&"f".into()).unwrap();
        assert!(f.stack_layout.is_optimized_leaf_procedure);
        assert_eq!(f.stack_layout.frame_size(), Some(16));

        let main = table.procedure(&"main".into()).unwrap();
        assert!(!main.stack_layout.is_optimized_leaf_procedure);

        let table = allocate(&sample(), &CompilerOptions::default());
        assert!(!table.procedure(&"f".into()).unwrap().stack_layout.is_optimized_leaf_procedure);
    }

    #[test]
    fn test_builtins_are_not_allocated() {
        let table = allocate(&sample(), &CompilerOptions::default());
        let printi = table.procedure(&"printi".into()).unwrap();
        assert!(!printi.stack_layout.is_allocated());
        assert_eq!(printi.parameter_types[0].offset, Some(0));
    }
}
