extern crate log;
extern crate simplelog;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::exit;

use log::info;

use splc::compiler::{
    codegen::generate_code,
    eco32::assembly::{write_lines, Line},
    memory::{allocate_variables, stack_layout_dump},
    semantics::{build_symbol_table, check_procedures, symbol_table_dump},
    Phase,
};
use splc::*;

fn main() {
    let config = configure_cli().get_matches();

    if let Some(level) = get_log_level(&config) {
        configure_logging(level).expect("Failed to configure logger.")
    }

    let input = config
        .value_of("input")
        .expect("Expected an input syntax tree to compile");
    let program = match read_program(Path::new(input)) {
        Ok(program) => program,
        Err(msg) => {
            eprintln!("{}", msg);
            exit(ERR_INPUT_ERROR)
        }
    };
    let options = get_options(&config);

    info!("Building symbol table");
    let mut table = match build_symbol_table(&program, &options) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("{}", e);
            exit(ERR_SEMANTIC_ERROR)
        }
    };
    if !options.runs(Phase::Semant) {
        print!("{}", symbol_table_dump(&program, &table));
        return;
    }

    info!("Checking procedures");
    if let Err(e) = check_procedures(&program, &mut table) {
        eprintln!("{}", e);
        exit(ERR_SEMANTIC_ERROR)
    }
    if !options.runs(Phase::Vars) {
        return;
    }

    info!("Allocating variables");
    allocate_variables(&program, &mut table, &options);
    if !options.runs(Phase::Codegen) {
        print!("{}", stack_layout_dump(&program, &table));
        return;
    }

    info!("Generating code");
    let lines = match generate_code(&program, &table) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("{}", e);
            exit(ERR_CODEGEN_ERROR)
        }
    };

    if let Err(e) = write_output(config.value_of("output"), &lines) {
        eprintln!("Failed to write assembly: {}", e);
        exit(ERR_OUTPUT_ERROR)
    }
}

fn write_output(output: Option<&str>, lines: &[Line]) -> std::io::Result<()> {
    match output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_lines(&mut out, lines)?;
            out.flush()
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_lines(&mut out, lines)
        }
    }
}
