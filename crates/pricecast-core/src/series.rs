//! Series validation and normalization.
//!
//! A [`Series`] can only be built through [`Series::validate`], so everything
//! downstream (sampling, prediction) works on rows that are known to share one
//! stock id, hold at least [`WINDOW_LEN`] observations and be sorted by date.

use serde::Serialize;
use thiserror::Error;

use crate::{Observation, RawObservation, StockId, TradeDate, WINDOW_LEN};

/// Why a raw table was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    #[error("table is empty")]
    Empty,
    #[error("table has {rows} row(s), at least {min} required")]
    TooFewRows { rows: usize, min: usize },
    #[error("row {row} has stock id '{found}', expected '{expected}'")]
    MixedStockIds {
        expected: String,
        found: String,
        row: usize,
    },
    #[error("row {row}: {reason}")]
    InvalidStockId { row: usize, reason: String },
    #[error("row {row} has unparsable date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("row {row} has non-finite price")]
    InvalidPrice { row: usize },
}

/// Chronologically sorted observations of a single stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    stock_id: StockId,
    observations: Vec<Observation>,
}

impl Series {
    /// Validate a raw table and sort it by date.
    ///
    /// Checks run in order: empty, too few rows, mixed stock ids, then
    /// per-row stock id, date and price. The sort is stable, so rows sharing
    /// a date keep their file order.
    pub fn validate(raw: Vec<RawObservation>) -> Result<Self, Rejection> {
        let Some(first) = raw.first() else {
            return Err(Rejection::Empty);
        };
        if raw.len() < WINDOW_LEN {
            return Err(Rejection::TooFewRows {
                rows: raw.len(),
                min: WINDOW_LEN,
            });
        }

        let expected = first.stock_id.clone();
        if let Some((row, mismatch)) = raw
            .iter()
            .enumerate()
            .find(|(_, record)| record.stock_id != expected)
        {
            return Err(Rejection::MixedStockIds {
                expected,
                found: mismatch.stock_id.clone(),
                row,
            });
        }

        let stock_id = StockId::parse(&expected).map_err(|error| Rejection::InvalidStockId {
            row: 0,
            reason: error.to_string(),
        })?;

        let mut observations = Vec::with_capacity(raw.len());
        for (row, record) in raw.into_iter().enumerate() {
            let date = TradeDate::parse_day_first(&record.date).map_err(|_| {
                Rejection::InvalidDate {
                    row,
                    value: record.date.clone(),
                }
            })?;
            if !record.price.is_finite() {
                return Err(Rejection::InvalidPrice { row });
            }
            observations.push(Observation {
                stock_id: stock_id.clone(),
                date,
                price: record.price,
            });
        }

        observations.sort_by_key(|observation| observation.date);

        Ok(Self {
            stock_id,
            observations,
        })
    }

    pub fn stock_id(&self) -> &StockId {
        &self.stock_id
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Date of the oldest observation.
    pub fn earliest(&self) -> TradeDate {
        self.observations[0].date
    }

    /// Date of the last observation that still has a full window after it
    /// (the `WINDOW_LEN`-th from the end).
    pub fn latest_anchorable(&self) -> TradeDate {
        self.observations[self.observations.len() - WINDOW_LEN].date
    }
}

impl TryFrom<Vec<RawObservation>> for Series {
    type Error = Rejection;

    fn try_from(value: Vec<RawObservation>) -> Result<Self, Self::Error> {
        Self::validate(value)
    }
}
