mod predict;

use std::path::PathBuf;

use pricecast_core::RunReport;
use serde::Serialize;

use crate::config::RunConfig;
use crate::error::CliError;

/// What a run did, as rendered on stdout.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub dataset_dir: PathBuf,
    pub results_dir: PathBuf,
    pub max_files: usize,
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub report: RunReport,
}

impl RunSummary {
    pub fn skipped(&self) -> usize {
        self.report.total_skipped()
    }
}

pub fn run(config: &RunConfig) -> Result<RunSummary, CliError> {
    let report = predict::run(config)?;
    Ok(RunSummary {
        dataset_dir: config.dataset_dir.clone(),
        results_dir: config.results_dir.clone(),
        max_files: config.max_files.get(),
        seed: config.seed,
        report,
    })
}
