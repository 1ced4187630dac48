//! Core record types shared by the loader and the processor.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Column names used once the source table has been projected.
pub const DATE_COL: &str = "Date";
pub const INDUSTRY_COL: &str = "Industry";
pub const VALUE_COL: &str = "Value";

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Parse a strict `YYYY-MM` string: four-digit year, two-digit month.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || b.is_ascii_digit());
        if !shape_ok {
            return None;
        }
        // Pin the day so chrono rejects anything after the month.
        let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").ok()?;
        Self::new(date.year(), date.month())
    }

    /// Months since year 0, used as the integer date key in data frames.
    pub fn ordinal(self) -> i32 {
        self.year * 12 + (self.month as i32 - 1)
    }

    pub fn from_ordinal(ordinal: i32) -> Self {
        Self {
            year: ordinal.div_euclid(12),
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Fractional year, used as the x coordinate when plotting.
    pub fn as_plot_x(self) -> f64 {
        self.year as f64 + (self.month - 1) as f64 / 12.0
    }

    /// Nearest month to a fractional-year plot coordinate.
    pub fn from_plot_x(x: f64) -> Self {
        Self::from_ordinal((x * 12.0).round() as i32)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One projected source row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: YearMonth,
    pub industry: String,
    /// `None` when the source cell was empty.
    pub value: Option<f64>,
}
