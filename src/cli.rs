use std::path::Path;

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::compiler::{ast::Program, CompilerOptions, Phase};

// Exit Codes for different types of errors
pub const ERR_INPUT_ERROR: i32 = 1;
pub const ERR_SEMANTIC_ERROR: i32 = 2;
pub const ERR_CODEGEN_ERROR: i32 = 3;
pub const ERR_OUTPUT_ERROR: i32 = 4;

pub fn configure_cli() -> clap::App<'static, 'static> {
    App::new("SPL Compiler")
        .version("0.1.0")
        .about("Compiles the syntax tree of an SPL program into ECO32 assembly")
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .required(true)
                .help("Syntax tree to compile, as a .json or .yaml file"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("File the assembly is written to.  Defaults to stdout"),
        )
        .arg(
            Arg::with_name("tables")
                .long("tables")
                .help("Stop after building the symbol table and print it"),
        )
        .arg(
            Arg::with_name("semant")
                .long("semant")
                .help("Stop after checking the procedure bodies"),
        )
        .arg(
            Arg::with_name("vars")
                .long("vars")
                .help("Stop after allocating variables and print the stack layouts"),
        )
        .arg(
            Arg::with_name("leaf")
                .long("leaf")
                .help("Procedures that make no calls get a frame without saved linkage"),
        )
        .arg(
            Arg::with_name("entry")
                .long("entry")
                .takes_value(true)
                .default_value("main")
                .help("Name of the procedure where the program starts"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .takes_value(true)
                .help("Logs the work of each pass to stderr at the given level"),
        )
}

/// The earliest pass requested with a stop flag, or code generation.
pub fn get_phase(args: &ArgMatches) -> Phase {
    if args.is_present("tables") {
        Phase::Tables
    } else if args.is_present("semant") {
        Phase::Semant
    } else if args.is_present("vars") {
        Phase::Vars
    } else {
        Phase::Codegen
    }
}

pub fn get_options(args: &ArgMatches) -> CompilerOptions {
    let mut options = CompilerOptions::default();
    if let Some(entry) = args.value_of("entry") {
        options.entry_point = entry.into();
    }
    options.phase = get_phase(args);
    options.leaf_procedures = args.is_present("leaf");
    options
}

pub fn get_log_level(args: &ArgMatches) -> Option<LevelFilter> {
    match args.value_of("log-level") {
        Some("off") => Some(LevelFilter::Off),
        Some("error") => Some(LevelFilter::Error),
        Some("warn") => Some(LevelFilter::Warn),
        Some("info") => Some(LevelFilter::Info),
        Some("debug") => Some(LevelFilter::Debug),
        Some("trace") => Some(LevelFilter::Trace),
        _ => None,
    }
}

pub fn configure_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
}

/// Reads a syntax tree from `path`.  The extension picks the format: `.yaml`
/// and `.yml` are YAML, anything else is JSON.
pub fn read_program(path: &Path) -> Result<Program, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .map_err(|e| format!("could not parse {}: {}", path.display(), e)),
        _ => serde_json::from_str(&text)
            .map_err(|e| format!("could not parse {}: {}", path.display(), e)),
    }
}
