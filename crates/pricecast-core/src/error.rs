use thiserror::Error;

use crate::dataset::DatasetError;
use crate::output::OutputError;

/// Validation and contract errors exposed by `pricecast-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("stock id cannot be empty")]
    EmptyStockId,
    #[error("stock id contains invalid character '{ch}' at index {index}")]
    StockIdInvalidChar { ch: char, index: usize },
    #[error("stock id '{value}' is not a usable file name")]
    StockIdReserved { value: String },

    #[error("date must be day-first (DD-MM-YYYY, DD/MM/YYYY, DD.MM.YYYY) or YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("date '{date}' shifted by {days} day(s) is out of range")]
    DateOutOfRange { date: String, days: i64 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("window must hold exactly {expected} observations, got {actual}")]
    WindowLength { expected: usize, actual: usize },
    #[error("window mixes stock ids '{expected}' and '{found}'")]
    WindowMixedStockIds { expected: String, found: String },
    #[error("window observations must be in chronological order")]
    WindowNotChronological,
}

/// Top-level error type for core operations.
///
/// Only failures that abort a whole run end up here; per-series problems are
/// recorded as skips in the batch report instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Output(#[from] OutputError),
}
