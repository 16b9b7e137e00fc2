//! Batch orchestration across exchanges.
//!
//! Two entry points:
//!
//! - [`collect_windows`] validates and samples up to `max_files` entries per
//!   exchange and returns the windows with a per-exchange report;
//! - [`predict_and_write`] runs the collection, clears the results directory,
//!   then predicts and persists every window.
//!
//! Every entry taken from an exchange counts toward `max_files`, whether it
//! is sampled or skipped. Only dataset listing and results I/O abort a run.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::dataset::{DatasetEntry, DatasetError, DatasetSource, EntryKind};
use crate::{
    predict, sample_window, CoreError, Diagnostics, Rejection, ResultsDir, Sample, SampleError,
    Series, StockId, TradeDate, Window,
};

/// Why an inspected entry produced no output.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("not a regular file")]
    NotAFile,
    #[error("{message}")]
    Unreadable { message: String },
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error(transparent)]
    Sampling(#[from] SampleError),
    #[error("prediction failed: {message}")]
    Prediction { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub entry: String,
    pub reason: SkipReason,
}

/// Counters and skips for one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeReport {
    pub name: String,
    pub inspected: usize,
    pub sampled: usize,
    pub written: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl ExchangeReport {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            inspected: 0,
            sampled: 0,
            written: 0,
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, entry: &str, reason: SkipReason, diagnostics: Diagnostics) {
        diagnostics.skipped(&self.name, entry, &reason);
        self.skipped.push(SkippedEntry {
            entry: entry.to_owned(),
            reason,
        });
    }
}

/// A window together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledWindow {
    pub exchange: String,
    pub entry: String,
    pub anchor: TradeDate,
    pub window: Window,
}

/// Output of [`collect_windows`].
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub exchanges: Vec<ExchangeReport>,
    pub windows: Vec<SampledWindow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenSeries {
    pub exchange: String,
    pub entry: String,
    pub stock_id: StockId,
    pub path: PathBuf,
}

/// Output of [`predict_and_write`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub exchanges: Vec<ExchangeReport>,
    pub written: Vec<WrittenSeries>,
}

impl RunReport {
    pub fn total_inspected(&self) -> usize {
        self.exchanges.iter().map(|exchange| exchange.inspected).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.exchanges
            .iter()
            .map(|exchange| exchange.skipped.len())
            .sum()
    }
}

/// Validate and sample up to `max_files` entries of every exchange.
pub fn collect_windows<S, R>(
    source: &S,
    max_files: NonZeroUsize,
    rng: &mut R,
    diagnostics: Diagnostics,
) -> Result<Collection, CoreError>
where
    S: DatasetSource + ?Sized,
    R: Rng + ?Sized,
{
    let mut exchanges = Vec::new();
    let mut windows = Vec::new();

    for exchange in source.exchanges()? {
        let mut report = ExchangeReport::new(&exchange.name);

        for entry in exchange.entries.iter().take(max_files.get()) {
            report.inspected += 1;
            match inspect(source, entry, rng)? {
                Ok(sample) => {
                    diagnostics.anchor_sampled(&exchange.name, &entry.name, sample.anchor);
                    report.sampled += 1;
                    windows.push(SampledWindow {
                        exchange: exchange.name.clone(),
                        entry: entry.name.clone(),
                        anchor: sample.anchor,
                        window: sample.window,
                    });
                }
                Err(reason) => report.skip(&entry.name, reason, diagnostics),
            }
        }

        if report.inspected == 0 {
            diagnostics.empty_exchange(&exchange.name);
        }
        exchanges.push(report);
    }

    Ok(Collection { exchanges, windows })
}

/// Collect windows, then replace the results directory contents with one
/// extended series per window.
///
/// Previous results are removed only after collection succeeded, so a
/// missing dataset root leaves them untouched.
pub fn predict_and_write<S, R>(
    source: &S,
    results: &ResultsDir,
    max_files: NonZeroUsize,
    rng: &mut R,
    diagnostics: Diagnostics,
) -> Result<RunReport, CoreError>
where
    S: DatasetSource + ?Sized,
    R: Rng + ?Sized,
{
    let Collection {
        mut exchanges,
        windows,
    } = collect_windows(source, max_files, rng, diagnostics)?;

    results.clear()?;

    let mut written = Vec::with_capacity(windows.len());
    for sampled in windows {
        let Some(report) = exchanges
            .iter_mut()
            .find(|report| report.name == sampled.exchange)
        else {
            continue;
        };

        match predict(&sampled.window) {
            Ok(extended) => {
                let prices = extended.predictions().each_ref().map(|point| point.price);
                diagnostics.predicted(extended.stock_id(), prices);
                let path = results.write(&extended)?;
                report.written += 1;
                written.push(WrittenSeries {
                    exchange: sampled.exchange,
                    entry: sampled.entry,
                    stock_id: extended.stock_id().clone(),
                    path,
                });
            }
            Err(error) => report.skip(
                &sampled.entry,
                SkipReason::Prediction {
                    message: error.to_string(),
                },
                diagnostics,
            ),
        }
    }

    Ok(RunReport { exchanges, written })
}

/// Turn one entry into a sample, or the reason it was skipped.
///
/// The outer error is reserved for failures that must abort the batch.
fn inspect<S, R>(
    source: &S,
    entry: &DatasetEntry,
    rng: &mut R,
) -> Result<Result<Sample, SkipReason>, DatasetError>
where
    S: DatasetSource + ?Sized,
    R: Rng + ?Sized,
{
    if entry.kind != EntryKind::File {
        return Ok(Err(SkipReason::NotAFile));
    }

    let raw = match source.read_table(entry) {
        Ok(raw) => raw,
        Err(error) if error.is_recoverable() => {
            return Ok(Err(SkipReason::Unreadable {
                message: error.to_string(),
            }))
        }
        Err(error) => return Err(error),
    };

    Ok(Series::validate(raw)
        .map_err(SkipReason::from)
        .and_then(|series| sample_window(&series, rng).map_err(SkipReason::from)))
}
