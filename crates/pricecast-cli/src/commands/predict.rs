use pricecast_core::{predict_and_write, CoreError, DirectoryDataset, ResultsDir, RunReport};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::RunConfig;
use crate::error::CliError;

pub fn run(config: &RunConfig) -> Result<RunReport, CliError> {
    let dataset = DirectoryDataset::open(&config.dataset_dir).map_err(CoreError::from)?;
    let results = ResultsDir::new(&config.results_dir);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::debug!(
        dataset = %config.dataset_dir.display(),
        results = %config.results_dir.display(),
        max_files = config.max_files.get(),
        "starting run"
    );

    let report = predict_and_write(
        &dataset,
        &results,
        config.max_files,
        &mut rng,
        config.diagnostics,
    )?;
    Ok(report)
}
