//! Run configuration resolved from flags, environment and defaults.

use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use pricecast_core::Diagnostics;

use crate::cli::Cli;
use crate::error::CliError;

pub const DEFAULT_DATASET_DIR: &str = "stock_price_data_files";
pub const DEFAULT_RESULTS_DIR: &str = "predict_price_data_files";

pub const DATASET_DIR_ENV: &str = "PRICECAST_DATASET_DIR";
pub const RESULTS_DIR_ENV: &str = "PRICECAST_RESULTS_DIR";
pub const SEED_ENV: &str = "PRICECAST_SEED";
pub const DEBUG_ENV: &str = "DEBUG_DATA_FLOW";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub dataset_dir: PathBuf,
    pub results_dir: PathBuf,
    pub max_files: NonZeroUsize,
    pub seed: Option<u64>,
    pub diagnostics: Diagnostics,
}

impl RunConfig {
    pub fn from_env(cli: &Cli) -> Result<Self, CliError> {
        Self::resolve(cli, |key| env::var(key).ok())
    }

    /// Flags win over environment values, which win over defaults.
    pub fn resolve<F>(cli: &Cli, lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let dataset_dir = cli
            .dataset_dir
            .clone()
            .or_else(|| non_empty(DATASET_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_DIR));
        let results_dir = cli
            .results_dir
            .clone()
            .or_else(|| non_empty(RESULTS_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR));

        let seed = match cli.seed {
            Some(seed) => Some(seed),
            None => non_empty(SEED_ENV)
                .map(|value| {
                    value.trim().parse::<u64>().map_err(|_| {
                        CliError::Config(format!(
                            "{SEED_ENV} must be an unsigned integer, got '{value}'"
                        ))
                    })
                })
                .transpose()?,
        };

        let max_files = usize::try_from(cli.max_files)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| CliError::Config(format!("invalid file cap {}", cli.max_files)))?;

        let debug = cli.debug || lookup(DEBUG_ENV).is_some_and(|value| value == "true");

        Ok(Self {
            dataset_dir,
            results_dir,
            max_files,
            seed,
            diagnostics: Diagnostics::from_flag(debug),
        })
    }
}
