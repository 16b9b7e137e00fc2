mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::RunConfig;
use crate::error::CliError;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = RunConfig::from_env(&cli)?;
    init_tracing(&config);

    let summary = commands::run(&config)?;
    output::render(&summary, cli.format, cli.pretty)?;

    if cli.strict && summary.skipped() > 0 {
        return Err(CliError::StrictModeViolation {
            skipped: summary.skipped(),
        });
    }

    Ok(())
}

/// Timestamped events on stderr; `RUST_LOG` takes precedence over the
/// diagnostics toggle.
fn init_tracing(config: &RunConfig) {
    let default_level = if config.diagnostics.is_verbose() {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
