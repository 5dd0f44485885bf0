//! Month period normalization for the `month` facet.
//!
//! Upstream stores `month` as a point in time. The gallery only cares about
//! the calendar month, so every timestamp is projected to a [`MonthPeriod`]
//! whose display key (`"March 2024"`) is what selection controls show and
//! what the filter compares.

use std::fmt;

use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

use crate::errors::CoreError;

/// A calendar month in a specific year. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    /// Build a period from a year and a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::Validation(format!(
                "month must be within 1..=12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The period containing `at`, evaluated in UTC.
    #[must_use]
    pub fn of(at: &DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// Parse a raw upstream timestamp and project it to its period.
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        parse_timestamp(raw).map(|at| Self::of(&at))
    }

    /// Parse a display key such as `"March 2024"` (month names are
    /// case-insensitive and may be abbreviated).
    #[must_use]
    pub fn parse_key(key: &str) -> Option<Self> {
        let (name, year) = key.trim().split_once(' ')?;
        let month = name.parse::<Month>().ok()?;
        let year = year.trim().parse::<i32>().ok()?;
        Some(Self {
            year,
            month: month.number_from_month(),
        })
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Display key, e.g. `"March 2024"`.
    #[must_use]
    pub fn key(self) -> String {
        self.to_string()
    }

    /// The period `n` months earlier.
    #[must_use]
    pub fn minus_months(self, n: u32) -> Self {
        let ordinal = self.ordinal() - i64::from(n);
        let year = ordinal.div_euclid(12);
        let month = ordinal.rem_euclid(12) + 1;
        Self {
            year: i32::try_from(year).unwrap_or(i32::MIN),
            month: u32::try_from(month).unwrap_or(1),
        }
    }

    const fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("Unknown", |m| m.name());
        write!(f, "{name} {}", self.year)
    }
}

impl Serialize for MonthPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse the timestamp shapes the CMS emits for date/datetime fields.
///
/// Accepts RFC 3339 (`2024-03-05T10:00:00Z`, with offsets), naive datetimes
/// (`2024-03-05T10:00:00`, `2024-03-05 10:00:00`), plain dates
/// (`2024-03-05`) and year-month (`2024-03`). Naive values are taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    // RFC 3339 requires seconds; `2024-03-05T00:00Z` still shows up in the wild.
    let naive_part = raw.strip_suffix('Z').unwrap_or(raw);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_part, format) {
            return Some(naive.and_utc());
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .ok()?;
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}
