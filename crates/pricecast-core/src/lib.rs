//! # Pricecast Core
//!
//! Window sampling and price extrapolation over per-exchange stock datasets.
//!
//! ## Overview
//!
//! For every dataset table the pipeline:
//!
//! 1. validates the raw rows and sorts them by day-first parsed date ([`series`]);
//! 2. draws a random anchor date and takes the [`WINDOW_LEN`] observations after
//!    it ([`sampler`]);
//! 3. appends [`PREDICTION_STEPS`] extrapolated points ([`predictor`]);
//! 4. writes the extended series to `<stock_id>.csv` ([`output`]).
//!
//! [`batch`] drives this across exchanges with a per-exchange file cap.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`batch`] | Orchestration, per-exchange reports |
//! | [`dataset`] | Dataset source trait and directory-backed implementation |
//! | [`diagnostics`] | Optional data-flow tracing |
//! | [`domain`] | Domain models (StockId, TradeDate, Observation) |
//! | [`error`] | Core error types |
//! | [`output`] | Results directory writer |
//! | [`predictor`] | Three-step extrapolation |
//! | [`sampler`] | Random window selection |
//! | [`series`] | Series validation and normalization |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::num::NonZeroUsize;
//!
//! use pricecast_core::{predict_and_write, Diagnostics, DirectoryDataset, ResultsDir};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = DirectoryDataset::open("stock_price_data_files")?;
//!     let results = ResultsDir::new("predict_price_data_files");
//!     let max_files = NonZeroUsize::new(2).ok_or("cap must be positive")?;
//!
//!     let report = predict_and_write(
//!         &dataset,
//!         &results,
//!         max_files,
//!         &mut rand::thread_rng(),
//!         Diagnostics::Silent,
//!     )?;
//!     println!("wrote {} series", report.written.len());
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod dataset;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod output;
pub mod predictor;
pub mod sampler;
pub mod series;

/// Observations per sampled window.
pub const WINDOW_LEN: usize = 10;

/// Predicted points appended to each window.
pub const PREDICTION_STEPS: usize = 3;

pub use batch::{
    collect_windows, predict_and_write, Collection, ExchangeReport, RunReport, SampledWindow,
    SkipReason, SkippedEntry, WrittenSeries,
};
pub use dataset::{
    DatasetEntry, DatasetError, DatasetSource, DirectoryDataset, EntryKind, Exchange,
};
pub use diagnostics::Diagnostics;
pub use domain::{Observation, PredictedPoint, RawObservation, StockId, TradeDate};
pub use error::{CoreError, ValidationError};
pub use output::{OutputError, ResultsDir};
pub use predictor::{predict, round2, second_highest_price, ExtendedSeries};
pub use sampler::{anchor_span, sample_window, window_after_offset, Sample, SampleError, Window};
pub use series::{Rejection, Series};
