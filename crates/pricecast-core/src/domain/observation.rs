use serde::{Deserialize, Serialize};

use crate::{StockId, TradeDate};

/// One dataset row as read from disk, before any validation.
///
/// Columns are positional: `stock_id, date, price`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawObservation {
    pub stock_id: String,
    pub date: String,
    pub price: f64,
}

impl RawObservation {
    pub fn new(stock_id: impl Into<String>, date: impl Into<String>, price: f64) -> Self {
        Self {
            stock_id: stock_id.into(),
            date: date.into(),
            price,
        }
    }
}

/// A validated price observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub stock_id: StockId,
    pub date: TradeDate,
    pub price: f64,
}

/// A price derived by the predictor rather than observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedPoint {
    pub stock_id: StockId,
    pub date: TradeDate,
    pub price: f64,
}
