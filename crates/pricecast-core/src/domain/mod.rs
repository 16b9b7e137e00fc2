//! # Domain Models
//!
//! Canonical domain types for pricecast.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StockId`] | Stock identifier, also used as output file stem |
//! | [`TradeDate`] | Day-first parsed calendar date |
//! | [`RawObservation`] | Unvalidated dataset row |
//! | [`Observation`] | Validated price observation |
//! | [`PredictedPoint`] | Extrapolated price point |

mod date;
mod observation;
mod stock_id;

pub use date::TradeDate;
pub use observation::{Observation, PredictedPoint, RawObservation};
pub use stock_id::StockId;
