//! Random window selection.
//!
//! A start date is drawn uniformly from the calendar days between the first
//! observation and the [`WINDOW_LEN`]-th from last. The anchor is the day
//! before it and the window holds the first [`WINDOW_LEN`] observations
//! strictly after the anchor, so a full window always follows it.

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::{Observation, Series, StockId, TradeDate, ValidationError, WINDOW_LEN};

/// Sampling failures that make a validated series unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleError {
    /// Fewer than a full window follows the anchor. Unreachable for a
    /// validated series.
    #[error("only {available} observation(s) after anchor {anchor}, {required} required")]
    InsufficientRows {
        anchor: String,
        available: usize,
        required: usize,
    },
}

/// Exactly [`WINDOW_LEN`] chronologically ordered observations of one stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    stock_id: StockId,
    observations: Vec<Observation>,
}

impl Window {
    /// Build a window from arbitrary observations, checking its invariants.
    pub fn try_from_observations(observations: Vec<Observation>) -> Result<Self, ValidationError> {
        if observations.len() != WINDOW_LEN {
            return Err(ValidationError::WindowLength {
                expected: WINDOW_LEN,
                actual: observations.len(),
            });
        }

        let stock_id = observations[0].stock_id.clone();
        if let Some(other) = observations
            .iter()
            .find(|observation| observation.stock_id != stock_id)
        {
            return Err(ValidationError::WindowMixedStockIds {
                expected: stock_id.to_string(),
                found: other.stock_id.to_string(),
            });
        }

        if observations.windows(2).any(|pair| pair[0].date > pair[1].date) {
            return Err(ValidationError::WindowNotChronological);
        }

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

    /// The most recent observation (`n`-th day).
    pub fn last(&self) -> &Observation {
        &self.observations[WINDOW_LEN - 1]
    }
}

/// A sampled window together with the anchor it was taken after.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub anchor: TradeDate,
    pub window: Window,
}

/// Number of calendar days the anchor may be offset from the first observation.
pub fn anchor_span(series: &Series) -> i64 {
    series.earliest().days_until(series.latest_anchorable())
}

/// Draw an anchor date and take the window that follows it.
pub fn sample_window<R>(series: &Series, rng: &mut R) -> Result<Sample, SampleError>
where
    R: Rng + ?Sized,
{
    let offset = rng.gen_range(0..=anchor_span(series));
    window_after_offset(series, offset)
}

/// Take the window starting on or after `earliest + offset` days.
///
/// `offset` is clamped into the valid range, which makes this the
/// deterministic half of [`sample_window`].
pub fn window_after_offset(series: &Series, offset: i64) -> Result<Sample, SampleError> {
    let offset = offset.clamp(0, anchor_span(series));
    let first_day = series
        .earliest()
        .add_days(offset)
        .unwrap_or_else(|_| series.latest_anchorable());
    let anchor = first_day.add_days(-1).unwrap_or(first_day);

    let rows = series.observations();
    let start = rows.partition_point(|observation| observation.date <= anchor);
    let available = rows.len() - start;
    if available < WINDOW_LEN {
        return Err(SampleError::InsufficientRows {
            anchor: anchor.format_iso(),
            available,
            required: WINDOW_LEN,
        });
    }

    Ok(Sample {
        anchor,
        window: Window {
            stock_id: series.stock_id().clone(),
            observations: rows[start..start + WINDOW_LEN].to_vec(),
        },
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::RawObservation;

    fn series(dates: &[String]) -> Series {
        let raw = dates
            .iter()
            .enumerate()
            .map(|(i, date)| RawObservation::new("ABC", date.as_str(), 10.0 + i as f64))
            .collect();
        Series::validate(raw).expect("valid series")
    }

    fn consecutive_days(count: u32) -> Vec<String> {
        (0..count)
            .map(|i| {
                let date = TradeDate::parse_day_first("01-01-2024")
                    .and_then(|date| date.add_days(i64::from(i)))
                    .expect("in range");
                date.format_iso()
            })
            .collect()
    }

    #[test]
    fn ten_row_series_always_yields_whole_series() {
        let series = series(&consecutive_days(10));
        assert_eq!(anchor_span(&series), 0);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let sample = sample_window(&series, &mut rng).expect("sample");
            assert_eq!(sample.window.observations(), series.observations());
        }
    }

    #[test]
    fn window_starts_strictly_after_anchor() {
        let series = series(&consecutive_days(30));
        let sample = window_after_offset(&series, 4).expect("sample");
        assert_eq!(sample.anchor.format_iso(), "2024-01-04");
        assert_eq!(sample.window.observations()[0].date.format_iso(), "2024-01-05");
        assert_eq!(sample.window.last().date.format_iso(), "2024-01-14");
    }

    #[test]
    fn offset_is_clamped_to_latest_anchorable() {
        let series = series(&consecutive_days(30));
        let sample = window_after_offset(&series, 1_000).expect("sample");
        assert_eq!(sample.anchor.days_until(series.latest_anchorable()), 1);
        assert_eq!(sample.window.observations(), &series.observations()[20..]);
    }

    #[test]
    fn anchor_can_fall_between_sparse_dates() {
        let dates: Vec<String> = (0..12)
            .map(|i| format!("{:02}-02-2024", 1 + i * 2))
            .collect();
        let series = series(&dates);
        // 02-02 is not an observation date; 03-02 is the first after it.
        let sample = window_after_offset(&series, 1).expect("sample");
        assert_eq!(sample.anchor.format_iso(), "2024-02-01");
        assert_eq!(sample.window.observations()[0].date.format_iso(), "2024-02-03");
    }

    #[test]
    fn sampled_windows_hold_invariants() {
        let series = series(&consecutive_days(60));
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let sample = sample_window(&series, &mut rng).expect("sample");
            let rows = sample.window.observations();
            assert_eq!(rows.len(), WINDOW_LEN);
            assert!(rows.iter().all(|row| row.date > sample.anchor));
            assert!(rows.windows(2).all(|pair| pair[0].date <= pair[1].date));
            assert!(sample.anchor < series.latest_anchorable());
            assert!(sample.anchor.days_until(series.earliest()) <= 1);
        }
    }

    #[test]
    fn duplicate_boundary_dates_still_fill_the_window() {
        let mut dates = consecutive_days(12);
        for date in dates.iter_mut().skip(2) {
            *date = String::from("2024-01-03");
        }
        let series = series(&dates);
        let sample = window_after_offset(&series, 2).expect("sample");
        assert_eq!(sample.window.observations(), &series.observations()[2..]);
    }

    #[test]
    fn window_rejects_wrong_length() {
        let series = series(&consecutive_days(12));
        let err = Window::try_from_observations(series.observations().to_vec())
            .expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::WindowLength {
                expected: 10,
                actual: 12
            }
        );
    }
}
