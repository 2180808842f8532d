//! elow - spreadsheet formulas from the command line

mod config;

use anyhow::{Context, Result, bail};
use config::Config;
use elow_core::{CellRef, Document};
use elow_engine::builtins::BUILTINS;
use elow_engine::engine::format_value;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage: elow [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula and print the result");
    eprintln!("  -s, --set <REF>=<INPUT>   Set a cell before evaluating (can be repeated),");
    eprintln!("                            e.g. --set :0:0=5 --set ':0:1==:0:0*2'");
    eprintln!("      --size <COLS>x<ROWS>  Sheet size (default from config, else 26x100)");
    eprintln!("      --config <FILE>       Load config from FILE");
    eprintln!("      --no-config           Ignore the user config file");
    eprintln!("  -l, --list-functions      List built-in functions");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Without --command, every cell set with --set is printed with its value.");
    eprintln!("Set ELOW_LOG (e.g. ELOW_LOG=debug) to control logging.");
}

#[derive(Debug, Default)]
struct Options {
    command: Option<String>,
    cells: Vec<(CellRef, String)>,
    size: Option<(usize, usize)>,
    config_file: Option<PathBuf>,
    no_config: bool,
    list_functions: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut opts = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => opts.help = true,
            "-l" | "--list-functions" => opts.list_functions = true,
            "--no-config" => opts.no_config = true,
            "-c" | "--command" => {
                i += 1;
                let Some(formula) = args.get(i) else {
                    bail!("--command requires a formula");
                };
                opts.command = Some(formula.clone());
            }
            "-s" | "--set" => {
                i += 1;
                let Some(assignment) = args.get(i) else {
                    bail!("--set requires <REF>=<INPUT>");
                };
                opts.cells.push(parse_assignment(assignment)?);
            }
            "--size" => {
                i += 1;
                let Some(size) = args.get(i) else {
                    bail!("--size requires <COLS>x<ROWS>");
                };
                opts.size = Some(parse_size(size)?);
            }
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    bail!("--config requires a file path");
                };
                opts.config_file = Some(PathBuf::from(path));
            }
            arg => bail!("Unknown argument: {}", arg),
        }
        i += 1;
    }

    Ok(opts)
}

/// `:col:row=input`. The input may itself start with `=` for a formula.
fn parse_assignment(assignment: &str) -> Result<(CellRef, String)> {
    let Some((cell, input)) = assignment.split_once('=') else {
        bail!("Expected <REF>=<INPUT>, got {}", assignment);
    };
    let cell_ref = CellRef::from_str(cell)
        .with_context(|| format!("Invalid cell reference: {} (expected :col:row)", cell))?;
    Ok((cell_ref, input.to_string()))
}

fn parse_size(size: &str) -> Result<(usize, usize)> {
    let parsed = size
        .split_once('x')
        .and_then(|(cols, rows)| Some((cols.parse::<usize>().ok()?, rows.parse::<usize>().ok()?)))
        .filter(|&(cols, rows)| cols > 0 && rows > 0);
    parsed.with_context(|| format!("Invalid size: {} (expected e.g. 10x20)", size))
}

fn init_logging(filter: Option<&str>) {
    let filter = EnvFilter::try_from_env("ELOW_LOG")
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &[String]) -> Result<ExitCode> {
    let opts = parse_args(args)?;
    if opts.help {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }

    let (config, warnings) = match (&opts.config_file, opts.no_config) {
        (Some(path), _) => (config::load_config_file(path)?, Vec::new()),
        (None, true) => (Config::default(), Vec::new()),
        (None, false) => config::load_default_config(),
    };
    init_logging(config.log.filter.as_deref());
    for warning in warnings {
        warn!("{}", warning);
    }

    if opts.list_functions {
        for builtin in BUILTINS {
            println!(
                "{:<8} {:<4} {}",
                builtin.name,
                builtin.arity.to_string(),
                builtin.description
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (cols, rows) = opts.size.unwrap_or((config.sheet.cols, config.sheet.rows));
    let mut doc = Document::new(cols, rows);
    for (cell_ref, input) in &opts.cells {
        doc.set_cell_from_input(*cell_ref, input)
            .with_context(|| format!("Failed to set {}", cell_ref))?;
    }
    doc.end_cycle();

    if let Some(formula) = &opts.command {
        let value = doc.evaluate(formula)?;
        println!("{}", format_value(&value));
        return Ok(if value.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if opts.cells.is_empty() {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }

    for (cell_ref, _) in doc.sheet.cells() {
        println!("{}\t{}", cell_ref, doc.cell_display(&cell_ref));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
