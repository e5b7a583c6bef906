use crate::compiler::{
    ast::{Identifier, ProcedureDeclaration, Program},
    semantics::symbol_table::{Entry, ProcedureEntry, SymbolTable},
};

const CELL_WIDTH: usize = 16;

/// Renders the variable allocation of every procedure in `program` as a
/// summary of the area sizes followed by an ASCII drawing of the frame.
pub fn stack_layout_dump(program: &Program, table: &SymbolTable) -> String {
    let mut out = String::new();
    for p in program.procedures() {
        if let Some(entry) = table.procedure(&p.name) {
            out.push_str(&procedure_layout(p, entry, table));
        }
    }
    out
}

fn show(v: Option<i32>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "NULL".into())
}

fn procedure_layout(decl: &ProcedureDeclaration, entry: &ProcedureEntry, table: &SymbolTable) -> String {
    let layout = &entry.stack_layout;
    let leaf = layout.is_optimized_leaf_procedure;
    let base = if leaf { "SP" } else { "FP" };
    // Leaf frames address their slots from SP, one frame size above FP.
    let bias = if leaf { layout.frame_size().unwrap_or(0) } else { 0 };
    let offset_of = |name: &Identifier| match table.scope(entry.local_scope).get(name) {
        Some(Entry::Variable(v)) => v.offset.map(|o| o + bias),
        _ => None,
    };

    let mut d = Diagram::default();
    d.centered("...");

    let mut params: Vec<_> = decl
        .parameters
        .iter()
        .zip(entry.parameter_types.iter())
        .map(|(p, sig)| (p, offset_of(&p.name), sig.offset.map(|o| o + bias)))
        .collect();
    params.sort_by_key(|(_, local, _)| local.map(|o| -o).unwrap_or(i32::MIN));
    for (p, local, sig) in params {
        let at = if local == sig {
            show(local)
        } else {
            format!("INCONSISTENT({}/{})", show(local), show(sig))
        };
        d.line(&format!("par {}", p.name), &format!("<- {} + {}", base, at));
    }

    if leaf {
        d.separator(Some(&format!("BEGIN <- SP + {}", bias)));
    } else {
        d.separator(Some("BEGIN <- FP"));
    }
    let mut vars: Vec<_> = decl.variables.iter().map(|v| (v, offset_of(&v.name))).collect();
    vars.sort_by_key(|(_, o)| o.map(|o| -o).unwrap_or(0));
    for (v, offset) in &vars {
        let at = if leaf {
            format!("<- SP + {}", show(*offset))
        } else {
            format!("<- FP - {}", show(offset.map(|o| -o)))
        };
        d.line(&format!("var {}", v.name), &at);
    }

    if leaf {
        d.separator(Some("END"));
    } else {
        if !vars.is_empty() {
            d.separator(None);
        }
        d.line("Old FP", &format!("<- SP + {}", show(layout.old_frame_pointer_offset())));
        d.line(
            "Old Return",
            &format!("<- FP - {}", show(layout.old_return_address_offset().map(|o| -o))),
        );
        match layout.outgoing_area_size {
            Some(0) => (),
            Some(size) => {
                d.separator(Some("outgoing area"));
                let args = size / 4;
                for i in 0..args {
                    d.line(
                        &format!("arg {}", args - i),
                        &format!("<- SP + {}", (args - i - 1) * 4),
                    );
                }
            }
            None => {
                d.separator(Some("outgoing area"));
                d.line("UNKNOWN SIZE", "");
            }
        }
        d.separator(Some("END <- SP"));
        d.centered("...");
    }

    let mut out = format!("Variable allocation for procedure '{}':\n", decl.name);
    out.push_str(&format!("  - size of argument area = {}\n", show(layout.argument_area_size)));
    out.push_str(&format!("  - size of localvar area = {}\n", show(layout.local_var_area_size)));
    out.push_str(&format!("  - size of outgoing area = {}\n", show(layout.outgoing_area_size)));
    out.push_str(&format!("  - frame size = {}\n\n", show(layout.frame_size())));
    out.push_str(if leaf {
        "  Stack layout (leaf optimized):\n"
    } else {
        "  Stack layout:\n"
    });
    for row in d.rows {
        out.push_str("    ");
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out.push('\n');
    out
}

#[derive(Default)]
struct Diagram {
    rows: Vec<String>,
}

impl Diagram {
    fn centered(&mut self, text: &str) {
        self.rows
            .push(format!("|{:^width$}|", text, width = CELL_WIDTH));
    }

    fn line(&mut self, cell: &str, note: &str) {
        self.rows
            .push(format!("| {:<width$}| {}", cell, note, width = CELL_WIDTH - 1));
    }

    fn separator(&mut self, note: Option<&str>) {
        let bar = format!("+{}+", "-".repeat(CELL_WIDTH));
        self.rows.push(match note {
            Some(n) => format!("{} {}", bar, n),
            None => bar,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{
        ast::build::*,
        memory::allocate_variables,
        semantics::{build_symbol_table, check_procedures},
        CompilerOptions,
    };

    fn dump(program: &Program, options: &CompilerOptions) -> String {
        let mut table = build_symbol_table(program, options).unwrap();
        check_procedures(program, &mut table).unwrap();
        allocate_variables(program, &mut table, options);
        stack_layout_dump(program, &table)
    }

    fn sample() -> Program {
        program(vec![
            proc_decl(
                "f",
                vec![param("x", int_type()), ref_param("y", int_type())],
                vec![var_decl("i", int_type())],
                vec![],
            ),
            proc_decl(
                "main",
                vec![],
                vec![var_decl("k", int_type())],
                vec![call("f", vec![int(1), var(named("k"))])],
            ),
        ])
    }

    #[test]
    fn test_summary() {
        let text = dump(&sample(), &CompilerOptions::default());
        assert!(text.contains(
            "Variable allocation for procedure 'f':\n  - size of argument area = 8\n  - size of localvar area = 4\n  - size of outgoing area = 0\n  - frame size = 12\n"
        ));
        assert!(text.contains("Variable allocation for procedure 'main':"));
        assert!(text.contains("  - size of outgoing area = 8\n"));
    }

    #[test]
    fn test_frame_rows() {
        let text = dump(&sample(), &CompilerOptions::default());
        assert!(text.contains("| par y          | <- FP + 4"));
        assert!(text.contains("| par x          | <- FP + 0"));
        assert!(text.contains("| var i          | <- FP - 4"));
        assert!(text.contains("| Old FP         | <- SP + 4"));
        assert!(text.contains("| Old Return     | <- FP - 12"));
        assert!(text.contains("| arg 2          | <- SP + 4"));
        assert!(text.contains("| arg 1          | <- SP + 0"));
    }

    #[test]
    fn test_leaf_frame() {
        let options = CompilerOptions {
            leaf_procedures: true,
            ..CompilerOptions::default()
        };
        let text = dump(&sample(), &options);
        assert!(text.contains("  Stack layout (leaf optimized):\n"));
        // f has a 4 byte leaf frame, so every slot sits 4 bytes higher.
        assert!(text.contains("| par y          | <- SP + 8"));
        assert!(text.contains("| par x          | <- SP + 4"));
        assert!(text.contains("+----------------+ BEGIN <- SP + 4"));
        assert!(text.contains("| var i          | <- SP + 0"));
        assert!(text.contains("+----------------+ END\n"));
    }
}
