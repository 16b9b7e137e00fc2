//! Three-step price extrapolation over a sampled window.
//!
//! Given the last observation `(t_n, v_n)`:
//!
//! | Step | Date | Price |
//! |------|------|-------|
//! | 1 | `t_n + 1` | second entry of the window sorted by price, descending |
//! | 2 | `t_n + 2` | `round2(v1 + (v1 - v_n) / 2)` |
//! | 3 | `t_n + 3` | `round2(v2 + (v2 - v1) / 4)` |

use crate::{
    Observation, PredictedPoint, StockId, TradeDate, ValidationError, Window, PREDICTION_STEPS,
    WINDOW_LEN,
};

/// A window followed by its predicted points.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedSeries {
    window: Window,
    predictions: [PredictedPoint; PREDICTION_STEPS],
}

impl ExtendedSeries {
    pub fn stock_id(&self) -> &StockId {
        self.window.stock_id()
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn predictions(&self) -> &[PredictedPoint; PREDICTION_STEPS] {
        &self.predictions
    }

    /// Total rows, observed plus predicted.
    pub fn len(&self) -> usize {
        self.window.observations().len() + self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All rows in chronological order as `(date, price)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (TradeDate, f64)> + '_ {
        self.window
            .observations()
            .iter()
            .map(|observation| (observation.date, observation.price))
            .chain(self.predictions.iter().map(|point| (point.date, point.price)))
    }
}

/// Round to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Second-ranked price when the window is ordered by price, descending.
///
/// The sort is stable, so a repeated maximum yields the maximum again.
pub fn second_highest_price(observations: &[Observation]) -> Option<f64> {
    let mut prices: Vec<f64> = observations
        .iter()
        .map(|observation| observation.price)
        .collect();
    prices.sort_by(|a, b| b.total_cmp(a));
    prices.get(1).copied()
}

/// Extend a window with three predicted points.
pub fn predict(window: &Window) -> Result<ExtendedSeries, ValidationError> {
    let last = window.last();
    let (t_n, v_n) = (last.date, last.price);

    let v1 = second_highest_price(window.observations()).ok_or(ValidationError::WindowLength {
        expected: WINDOW_LEN,
        actual: window.observations().len(),
    })?;
    let v2 = round2(v1 + (v1 - v_n) / 2.0);
    let v3 = round2(v2 + (v2 - v1) / 4.0);

    let point = |days: i64, price: f64| -> Result<PredictedPoint, ValidationError> {
        Ok(PredictedPoint {
            stock_id: window.stock_id().clone(),
            date: t_n.add_days(days)?,
            price,
        })
    };

    Ok(ExtendedSeries {
        window: window.clone(),
        predictions: [point(1, v1)?, point(2, v2)?, point(3, v3)?],
    })
}
