//! # si-calc
//!
//! Command-line calculator for SI quantities.
//!
//! ```text
//! si-calc eval "1.5 k_meter / 60 second"     # 25 m / s
//! si-calc eval "2 ampere * ohm" --json       # {"value":2.0,"dimension":{...}}
//! si-calc units
//! si-calc repl
//! ```

mod parser;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use si_core::units::CATALOG;
use si_core::{DynQuantity, Prefix, UnitError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "si-calc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate dimension-checked SI unit expressions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one expression
    Eval {
        /// Expression, e.g. "1.5 k_meter / 60 second"
        #[arg(value_name = "EXPR")]
        expr: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Digits after the decimal point
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// List the unit catalog
    Units,

    /// List the SI prefixes
    Prefixes,

    /// Read expressions from stdin, one per line
    Repl,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn format_result(quantity: &DynQuantity, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{:.*}", digits, quantity),
        None => quantity.to_string(),
    }
}

fn report(err: &CliError) {
    eprintln!("Error: {}", err);
    if let CliError::Unit(unit_err) = err {
        if let Ok(json) = serde_json::to_string_pretty(unit_err) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
    }
}

fn eval(expr: &str, json: bool, precision: Option<usize>) -> Result<(), CliError> {
    let result = parser::evaluate(expr)?;
    if json {
        println!("{}", result.to_json()?);
    } else {
        println!("{}", format_result(&result, precision));
    }
    Ok(())
}

fn list_units() {
    println!("{:<14} {:<14} {:<28} {}", "LITERAL", "TYPE", "DIMENSION", "SYMBOL");
    for unit in CATALOG {
        println!(
            "{:<14} {:<14} {:<28} {}",
            unit.name,
            unit.type_name,
            unit.dimension.to_string(),
            unit.symbol.unwrap_or("-")
        );
    }
}

fn list_prefixes() {
    println!("{:<8} {:<8} {}", "PREFIX", "SYMBOL", "FACTOR");
    for prefix in Prefix::ALL {
        if prefix == Prefix::Unscaled {
            continue;
        }
        println!("{:<8} {:<8} 1e{}", format!("{:?}", prefix), prefix.symbol(), prefix.exponent());
    }
}

fn repl() -> Result<(), CliError> {
    println!("si-calc {} - enter an expression, or 'quit' to exit", env!("CARGO_PKG_VERSION"));
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line?;
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            _ => {}
        }

        match parser::evaluate(input) {
            Ok(result) => println!("{}", result),
            Err(err) => report(&CliError::Unit(err)),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Eval { expr, json, precision } => eval(&expr, json, precision),
        Commands::Units => {
            list_units();
            Ok(())
        }
        Commands::Prefixes => {
            list_prefixes();
            Ok(())
        }
        Commands::Repl => repl(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
