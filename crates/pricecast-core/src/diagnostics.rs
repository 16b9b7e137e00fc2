//! Optional data-flow tracing.
//!
//! Chosen once at startup and passed by value to the pipeline. When silent,
//! no events are emitted at all, regardless of the installed subscriber.

use std::fmt::Display;

use crate::{StockId, TradeDate, PREDICTION_STEPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diagnostics {
    #[default]
    Silent,
    Verbose,
}

impl Diagnostics {
    pub const fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::Verbose
        } else {
            Self::Silent
        }
    }

    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }

    pub fn skipped(self, exchange: &str, entry: &str, reason: &dyn Display) {
        if self.is_verbose() {
            tracing::info!(exchange, entry, "skipping dataset: {reason}");
        }
    }

    pub fn anchor_sampled(self, exchange: &str, entry: &str, anchor: TradeDate) {
        if self.is_verbose() {
            tracing::info!(exchange, entry, anchor = %anchor, "generated random anchor date");
        }
    }

    pub fn empty_exchange(self, exchange: &str) {
        if self.is_verbose() {
            tracing::info!(exchange, "no dataset found");
        }
    }

    pub fn predicted(self, stock_id: &StockId, prices: [f64; PREDICTION_STEPS]) {
        if self.is_verbose() {
            let [first, second, third] = prices;
            tracing::info!(stock_id = %stock_id, "predicted {first}, {second}, {third}");
        }
    }
}
