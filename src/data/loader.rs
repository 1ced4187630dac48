//! CSV Data Loader Module
//! Loads the source table with Polars, normalizes headers and turns rows into records.

use crate::data::types::{Record, YearMonth};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Missing column '{column}' (available: {available:?})")]
    SchemaError {
        column: String,
        available: Vec<String>,
    },
    #[error("Row {row}: invalid {column} value '{value}', expected {expected}")]
    ParseError {
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },
    #[error("No data loaded")]
    NoData,
}

/// Source column names to project onto (date, industry, value).
#[derive(Debug, Clone, Copy)]
pub struct SourceColumns<'a> {
    pub date: &'a str,
    pub industry: &'a str,
    pub value: &'a str,
}

/// Holds the raw source table between loading and record extraction.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file with every column read as text, then trim the header names.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }
        self.file_path = Some(file_path.to_path_buf());

        // Schema inference is disabled so values are validated here, not coerced.
        let mut df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let trimmed: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        df.set_column_names(trimmed)?;

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Project the loaded table onto (date, industry, value) records.
    ///
    /// Every date must be `YYYY-MM` and every non-empty value numeric; the first
    /// bad cell aborts the whole load. Empty value cells and `NaN` become `None`,
    /// an empty industry cell becomes the empty string.
    pub fn extract_records(&self, columns: SourceColumns<'_>) -> Result<Vec<Record>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;

        let dates = self.string_column(df, columns.date)?;
        let industries = self.string_column(df, columns.industry)?;
        let values = self.string_column(df, columns.value)?;

        let mut records = Vec::with_capacity(df.height());
        for (i, ((date, industry), value)) in dates
            .into_iter()
            .zip(industries.into_iter())
            .zip(values.into_iter())
            .enumerate()
        {
            let row = i + 1;
            let date_text = date.unwrap_or_default();
            let date = YearMonth::parse(date_text).ok_or_else(|| LoaderError::ParseError {
                row,
                column: columns.date.to_string(),
                value: date_text.to_string(),
                expected: "a YYYY-MM date",
            })?;

            let value = match value.map(str::trim).filter(|v| !v.is_empty()) {
                None => None,
                Some(text) => {
                    let parsed: f64 = text.parse().map_err(|_| LoaderError::ParseError {
                        row,
                        column: columns.value.to_string(),
                        value: text.to_string(),
                        expected: "a number",
                    })?;
                    (!parsed.is_nan()).then_some(parsed)
                }
            };

            records.push(Record {
                date,
                industry: industry.unwrap_or_default().to_string(),
                value,
            });
        }

        Ok(records)
    }

    fn string_column<'a>(
        &self,
        df: &'a DataFrame,
        name: &str,
    ) -> Result<&'a StringChunked, LoaderError> {
        let column = df.column(name).map_err(|_| LoaderError::SchemaError {
            column: name.to_string(),
            available: self.get_columns(),
        })?;
        Ok(column.str()?)
    }
}

/// Read the selection list: one industry per line, whitespace-trimmed, blank lines skipped.
pub fn read_selection(path: &Path) -> Result<Vec<String>, LoaderError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoaderError::FileNotFound(path.to_path_buf()),
        _ => LoaderError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut selection = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = line.trim();
        if !name.is_empty() {
            selection.push(name.to_string());
        }
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const COLUMNS: SourceColumns<'static> = SourceColumns {
        date: "REF_DATE",
        industry: "NAICS",
        value: "VALUE",
    };

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_records_and_trims_headers() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write(
            dir.path(),
            "data.csv",
            " REF_DATE ,GEO, NAICS ,VALUE \n\
             2020-01,Canada,Retail,100\n\
             2020-02,Canada,Mining,2.5\n",
        );

        let mut loader = DataLoader::new();
        loader.load_csv(&csv).unwrap();
        assert_eq!(loader.get_columns(), vec!["REF_DATE", "GEO", "NAICS", "VALUE"]);
        assert_eq!(loader.get_row_count(), 2);

        let records = loader.extract_records(COLUMNS).unwrap();
        assert_eq!(
            records,
            vec![
                Record {
                    date: YearMonth::new(2020, 1).unwrap(),
                    industry: "Retail".to_string(),
                    value: Some(100.0),
                },
                Record {
                    date: YearMonth::new(2020, 2).unwrap(),
                    industry: "Mining".to_string(),
                    value: Some(2.5),
                },
            ]
        );
    }

    #[test]
    fn empty_value_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write(
            dir.path(),
            "data.csv",
            "REF_DATE,NAICS,VALUE\n2020-01,Retail,\n2020-02,Retail,NaN\n",
        );

        let mut loader = DataLoader::new();
        loader.load_csv(&csv).unwrap();
        let records = loader.extract_records(COLUMNS).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.value.is_none()));
    }

    #[test]
    fn bad_date_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write(
            dir.path(),
            "data.csv",
            "REF_DATE,NAICS,VALUE\n2020-01,Retail,1\n2020/02,Retail,2\n",
        );

        let mut loader = DataLoader::new();
        loader.load_csv(&csv).unwrap();
        match loader.extract_records(COLUMNS) {
            Err(LoaderError::ParseError { row, column, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "REF_DATE");
                assert_eq!(value, "2020/02");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn short_year_or_month_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        for bad in ["2020-1", "20-01", "+2020-01"] {
            let csv = write(
                dir.path(),
                "data.csv",
                &format!("REF_DATE,NAICS,VALUE\n{},Retail,1\n", bad),
            );

            let mut loader = DataLoader::new();
            loader.load_csv(&csv).unwrap();
            match loader.extract_records(COLUMNS) {
                Err(LoaderError::ParseError { row, value, .. }) => {
                    assert_eq!(row, 1);
                    assert_eq!(value, bad);
                }
                other => panic!("expected parse error for {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn non_numeric_value_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write(
            dir.path(),
            "data.csv",
            "REF_DATE,NAICS,VALUE\n2020-01,Retail,x\n",
        );

        let mut loader = DataLoader::new();
        loader.load_csv(&csv).unwrap();
        let err = loader.extract_records(COLUMNS).unwrap_err();
        assert!(matches!(err, LoaderError::ParseError { row: 1, .. }));
    }

    #[test]
    fn na_markers_are_not_missing() {
        let dir = tempfile::tempdir().unwrap();
        for marker in ["NA", "N/A", "null", ".."] {
            let csv = write(
                dir.path(),
                "data.csv",
                &format!("REF_DATE,NAICS,VALUE\n2020-01,Retail,{}\n", marker),
            );

            let mut loader = DataLoader::new();
            loader.load_csv(&csv).unwrap();
            match loader.extract_records(COLUMNS) {
                Err(LoaderError::ParseError { column, value, .. }) => {
                    assert_eq!(column, "VALUE");
                    assert_eq!(value, marker);
                }
                other => panic!("expected parse error for {}, got {:?}", marker, other),
            }
        }
    }

    #[test]
    fn missing_column_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write(dir.path(), "data.csv", "REF_DATE,VALUE\n2020-01,1\n");

        let mut loader = DataLoader::new();
        loader.load_csv(&csv).unwrap();
        match loader.extract_records(COLUMNS) {
            Err(LoaderError::SchemaError { column, available }) => {
                assert_eq!(column, "NAICS");
                assert_eq!(available, vec!["REF_DATE", "VALUE"]);
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn missing_csv_is_file_not_found() {
        let mut loader = DataLoader::new();
        let err = loader.load_csv(Path::new("/no/such/data.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn selection_lines_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "industries.txt",
            "  Retail trade \nMining\n\n\tConstruction\n",
        );

        assert_eq!(
            read_selection(&path).unwrap(),
            vec!["Retail trade", "Mining", "Construction"]
        );
    }

    #[test]
    fn missing_selection_is_file_not_found() {
        let err = read_selection(Path::new("/no/such/industries.txt")).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }
}
