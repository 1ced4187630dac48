//! Data Processor Module
//! Handles enumeration, filtering, aggregation and pivoting of industry records.

use crate::data::types::{DATE_COL, INDUSTRY_COL, VALUE_COL};
use crate::data::{Record, YearMonth};
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Date-indexed table with one column per industry.
///
/// Cells that never appeared in the aggregation stay unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    /// Industries in first-seen order of the aggregated input.
    categories: Vec<String>,
    rows: BTreeMap<YearMonth, HashMap<String, f64>>,
}

impl PivotTable {
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = YearMonth> + '_ {
        self.rows.keys().copied()
    }

    pub fn get(&self, date: YearMonth, category: &str) -> Option<f64> {
        self.rows.get(&date)?.get(category).copied()
    }

    pub fn last_date(&self) -> Option<YearMonth> {
        self.rows.keys().next_back().copied()
    }

    /// One industry's values across every date of the table.
    pub fn series(&self, category: &str) -> Vec<(YearMonth, Option<f64>)> {
        self.rows
            .iter()
            .map(|(date, row)| (*date, row.get(category).copied()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Handles the table transformations between loading and ranking.
pub struct DataProcessor;

impl DataProcessor {
    /// Build the projected frame: [Date (month ordinal), Industry, Value].
    pub fn to_dataframe(records: &[Record]) -> Result<DataFrame, ProcessorError> {
        let dates: Vec<i32> = records.iter().map(|r| r.date.ordinal()).collect();
        let industries: Vec<&str> = records.iter().map(|r| r.industry.as_str()).collect();
        let values: Vec<Option<f64>> = records.iter().map(|r| r.value).collect();

        let df = DataFrame::new(vec![
            Column::new(DATE_COL.into(), dates),
            Column::new(INDUSTRY_COL.into(), industries),
            Column::new(VALUE_COL.into(), values),
        ])?;

        Ok(df)
    }

    /// Distinct industries in first-seen order.
    pub fn unique_industries(df: &DataFrame) -> Result<Vec<String>, ProcessorError> {
        let unique = df
            .clone()
            .lazy()
            .select([col(INDUSTRY_COL).unique_stable()])
            .collect()?;

        let industries = unique
            .column(INDUSTRY_COL)?
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        Ok(industries)
    }

    /// Write one industry per line, replacing any existing file.
    pub fn write_industries(path: &Path, industries: &[String]) -> Result<(), ProcessorError> {
        let io_err = |source: std::io::Error| ProcessorError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut buf = BufWriter::new(file);
        for industry in industries {
            writeln!(buf, "{}", industry).map_err(io_err)?;
        }
        buf.flush().map_err(io_err)?;
        Ok(())
    }

    /// Keep only rows whose industry is in the selection (exact match).
    pub fn filter_industries(
        df: &DataFrame,
        selection: &[String],
    ) -> Result<DataFrame, ProcessorError> {
        let selection = Series::new("selection".into(), selection);
        let filtered = df
            .clone()
            .lazy()
            .filter(col(INDUSTRY_COL).is_in(lit(selection)))
            .collect()?;
        Ok(filtered)
    }

    /// Sum values per (date, industry); group order follows first appearance.
    pub fn aggregate(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by_stable([col(DATE_COL), col(INDUSTRY_COL)])
            .agg([col(VALUE_COL).sum()])
            .collect()?;
        Ok(grouped)
    }

    /// Reshape an aggregated frame into a date × industry table.
    pub fn pivot(df: &DataFrame) -> Result<PivotTable, ProcessorError> {
        let dates = df.column(DATE_COL)?.i32()?;
        let industries = df.column(INDUSTRY_COL)?.str()?;
        let values = df.column(VALUE_COL)?.f64()?;

        let mut table = PivotTable::default();
        for ((date, industry), value) in dates
            .into_iter()
            .zip(industries.into_iter())
            .zip(values.into_iter())
        {
            let (Some(date), Some(industry)) = (date, industry) else {
                continue;
            };
            if !table.categories.iter().any(|c| c == industry) {
                table.categories.push(industry.to_string());
            }
            let row = table.rows.entry(YearMonth::from_ordinal(date)).or_default();
            if let Some(v) = value {
                row.insert(industry.to_string(), v);
            }
        }

        Ok(table)
    }
}
