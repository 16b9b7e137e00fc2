use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::parsing::Parsed;
use time::{Date, Duration};

use crate::ValidationError;

const FULL_YEAR_FORMATS: [&[BorrowedFormatItem<'static>]; 4] = [
    format_description!("[day padding:none]-[month padding:none]-[year]"),
    format_description!("[day padding:none]/[month padding:none]/[year]"),
    format_description!("[day padding:none].[month padding:none].[year]"),
    format_description!("[year]-[month padding:none]-[day padding:none]"),
];

const SHORT_YEAR_FORMATS: [&[BorrowedFormatItem<'static>]; 3] = [
    format_description!("[day padding:none]-[month padding:none]-[year repr:last_two]"),
    format_description!("[day padding:none]/[month padding:none]/[year repr:last_two]"),
    format_description!("[day padding:none].[month padding:none].[year repr:last_two]"),
];

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a daily price observation.
///
/// Parsed day-first from dataset rows, written back as ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    /// Parse a numeric date with the day preceding the month.
    ///
    /// Accepts `-`, `/` and `.` separators, one- or two-digit day and month,
    /// and two- or four-digit years (`23` is read as `2023`). A four-digit
    /// leading component is taken as an ISO `YYYY-MM-DD` date.
    pub fn parse_day_first(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        FULL_YEAR_FORMATS
            .iter()
            .find_map(|format| Date::parse(trimmed, *format).ok())
            .or_else(|| {
                SHORT_YEAR_FORMATS
                    .iter()
                    .find_map(|format| parse_short_year(trimmed, format))
            })
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    /// Shift by a signed number of calendar days.
    pub fn add_days(self, days: i64) -> Result<Self, ValidationError> {
        self.0
            .checked_add(Duration::days(days))
            .map(Self)
            .ok_or_else(|| ValidationError::DateOutOfRange {
                date: self.format_iso(),
                days,
            })
    }

    /// Whole days from `self` to `later` (negative when `later` is earlier).
    pub fn days_until(self, later: Self) -> i64 {
        (later.0 - self.0).whole_days()
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(ISO_DATE)
            .expect("TradeDate must be ISO formattable")
    }
}

/// Two-digit years are taken as 20YY; `time` cannot build a `Date` from them.
fn parse_short_year(input: &str, format: &[BorrowedFormatItem<'_>]) -> Option<Date> {
    let mut parsed = Parsed::new();
    let rest = parsed.parse_items(input.as_bytes(), format).ok()?;
    if !rest.is_empty() {
        return None;
    }
    let year = 2000 + i32::from(parsed.year_last_two()?);
    Date::from_calendar_date(year, parsed.month()?, parsed.day()?.get()).ok()
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl From<Date> for TradeDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}
