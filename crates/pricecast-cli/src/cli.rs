//! CLI argument definitions for pricecast.
//!
//! # Usage
//!
//! ```bash
//! # Process at most two files per exchange
//! pricecast 2
//!
//! # Trace rejections, anchors and predictions
//! DEBUG_DATA_FLOW=true pricecast 2
//!
//! # Reproducible run with a JSON summary
//! pricecast 3 --seed 42 --format json --pretty
//! ```
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--dataset-dir` | `stock_price_data_files` | Root holding one directory per exchange |
//! | `--results-dir` | `predict_price_data_files` | Where `<stock_id>.csv` files are written |
//! | `--seed` | unseeded | Seed for anchor date sampling |
//! | `--debug` | `false` | Verbose data-flow tracing |
//! | `--format` | `text` | Run summary format (text, json) |
//! | `--pretty` | `false` | Pretty-print JSON summary |
//! | `--strict` | `false` | Fail (exit code 5) if any entry was skipped |

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Sample a random ten-day window from every stock file and extrapolate
/// three more days.
#[derive(Debug, Parser)]
#[command(
    name = "pricecast",
    version,
    about = "Sample stock price windows and extrapolate three days ahead"
)]
pub struct Cli {
    /// Maximum number of files inspected per exchange directory.
    #[arg(value_name = "MAX_FILES", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_files: u64,

    /// Dataset root; each immediate subdirectory is an exchange.
    #[arg(long, value_name = "DIR")]
    pub dataset_dir: Option<PathBuf>,

    /// Results directory; previous files in it are removed on every run.
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Seed for anchor date sampling (overrides PRICECAST_SEED).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable data-flow tracing (same as DEBUG_DATA_FLOW=true).
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Run summary format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print the JSON summary.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Treat skipped entries as a failure (exit code 5).
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
