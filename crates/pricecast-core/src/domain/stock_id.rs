use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::ValidationError;

/// Stock identifier taken from the first column of a dataset row.
///
/// Identifiers are compared exactly (no case folding) and double as output
/// file names, so path separators and dot-only names are refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct StockId(String);

impl StockId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyStockId);
        }

        for (index, ch) in trimmed.chars().enumerate() {
            let invalid = ch == '/' || ch == '\\' || ch == '\0' || ch.is_control();
            if invalid {
                return Err(ValidationError::StockIdInvalidChar { ch, index });
            }
        }

        if trimmed.chars().all(|ch| ch == '.') {
            return Err(ValidationError::StockIdReserved {
                value: trimmed.to_owned(),
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the results file holding this stock's extended series.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.0)
    }
}

impl Display for StockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StockId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<StockId> for String {
    fn from(value: StockId) -> Self {
        value.0
    }
}
