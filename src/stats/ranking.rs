//! Final Value Ranking
//! Orders industries by their value at the last date of the pivot table.

use crate::data::{PivotTable, YearMonth};
use std::cmp::Ordering;

/// One industry and its value at the last date.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalValue {
    pub industry: String,
    /// `None` when the industry has no value at the last date.
    pub value: Option<f64>,
}

impl FinalValue {
    /// Legend text, e.g. `Retail trade ($1234.50)`.
    pub fn label(&self) -> String {
        match self.value {
            Some(v) => format!("{} (${:.2})", self.industry, v),
            None => format!("{} (n/a)", self.industry),
        }
    }
}

/// Industries sorted descending by final value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinalValueRanking {
    pub last_date: Option<YearMonth>,
    pub entries: Vec<FinalValue>,
}

impl FinalValueRanking {
    /// Rank every industry of the table.
    ///
    /// The sort is stable: equal values keep the table's column order and
    /// industries without a final value go last.
    pub fn from_pivot(pivot: &PivotTable) -> Self {
        let Some(last_date) = pivot.last_date() else {
            return Self::default();
        };

        let mut entries: Vec<FinalValue> = pivot
            .categories()
            .iter()
            .map(|industry| FinalValue {
                industry: industry.clone(),
                value: pivot.get(last_date, industry),
            })
            .collect();

        entries.sort_by(|a, b| match (a.value, b.value) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Self {
            last_date: Some(last_date),
            entries,
        }
    }

    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.industry.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
