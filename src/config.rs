//! Command line arguments and pipeline configuration.

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Plot industry values over time.
#[derive(Parser, Debug)]
#[command(name = "industry_trends", version)]
pub struct Cli {
    /// Path to the CSV file containing the data.
    pub csv_file: PathBuf,
    /// Path to the text file containing the list of industries.
    pub industries_file: PathBuf,
    /// JSON file overriding column names, output path and chart labels.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Also save the chart to this file (.png or .svg).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Do not open the interactive chart window.
    #[arg(long)]
    pub no_window: bool,
}

/// Source column names and the category sidecar path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub date_column: String,
    pub category_column: String,
    pub value_column: String,
    pub categories_output: PathBuf,
    pub chart: ChartConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            date_column: "REF_DATE".to_string(),
            category_column: "North American Industry Classification System (NAICS)".to_string(),
            value_column: "VALUE".to_string(),
            categories_output: PathBuf::from("unique_industries.txt"),
            chart: ChartConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a config from JSON; missing keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Chart labels and size, shared by the window and the static export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Industry Values Over Time".to_string(),
            x_label: "Date".to_string(),
            y_label: "Value (millions of dollars)".to_string(),
            width: 1400,
            height: 800,
        }
    }
}
