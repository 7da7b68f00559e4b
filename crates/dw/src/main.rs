//! DW command-line interface.
//!
//! Converts docutils document trees into office documents.

mod commands;
mod error;
mod output;

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::BuildArgs;
use crate::error::CliError;
use crate::output::Output;

/// DW docx writer.
#[derive(Parser)]
#[command(name = "dw")]
#[command(about = "Convert docutils document trees into office documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document tree and save the result.
    Build(BuildArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    if let Err(err) = run(cli) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Build(args) => {
            init_tracing(args.verbose, args.log_file.as_deref())?;
            args.execute()
        }
    }
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<(), CliError> {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.try_init(),
    };
    result.map_err(|e| CliError::Logging(e.to_string()))
}
