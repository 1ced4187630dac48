//! Transformation pipeline
//! load → normalize → enumerate (sidecar file) → filter → aggregate → pivot → rank.

use crate::config::PipelineConfig;
use crate::data::{read_selection, DataLoader, DataProcessor, PivotTable, SourceColumns};
use crate::stats::FinalValueRanking;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Everything a run derives before rendering.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Every distinct industry of the source table, first-seen order.
    pub industries: Vec<String>,
    pub pivot: PivotTable,
    pub ranking: FinalValueRanking,
}

/// Run every step in order. The sidecar file is written before the selection
/// list is read, so it exists even when nothing ends up selected.
pub fn run(
    csv_file: &Path,
    industries_file: &Path,
    config: &PipelineConfig,
) -> Result<PipelineOutput> {
    let mut loader = DataLoader::new();
    loader
        .load_csv(csv_file)
        .with_context(|| format!("loading {}", csv_file.display()))?;
    info!(
        "loaded {} rows, {} columns from {}",
        loader.get_row_count(),
        loader.get_columns().len(),
        loader
            .get_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    );

    let records = loader.extract_records(SourceColumns {
        date: &config.date_column,
        industry: &config.category_column,
        value: &config.value_column,
    })?;
    let df = DataProcessor::to_dataframe(&records)?;
    debug!("projected {} records", df.height());

    let industries = DataProcessor::unique_industries(&df)?;
    DataProcessor::write_industries(&config.categories_output, &industries)?;
    info!(
        "Unique industries have been saved to '{}' ({} industries).",
        config.categories_output.display(),
        industries.len()
    );

    let selection = read_selection(industries_file)
        .with_context(|| format!("reading industries from {}", industries_file.display()))?;
    debug!("selection list has {} entries", selection.len());

    let filtered = DataProcessor::filter_industries(&df, &selection)?;
    let grouped = DataProcessor::aggregate(&filtered)?;
    let pivot = DataProcessor::pivot(&grouped)?;
    debug!(
        "filtered to {} rows, {} (date, industry) groups",
        filtered.height(),
        grouped.height()
    );

    for name in &selection {
        if !pivot.categories().contains(name) {
            debug!("selected industry '{}' not present in data", name);
        }
    }

    let ranking = FinalValueRanking::from_pivot(&pivot);
    debug!(
        "ranking from {:?}: {:?}",
        pivot.dates().next(),
        ranking.industries().collect::<Vec<_>>()
    );
    match ranking.last_date {
        Some(last) => info!(
            "{} industries over {} dates, ranked at {}",
            ranking.len(),
            pivot.height(),
            last
        ),
        None => warn!("no selected industry found in the data, nothing to plot"),
    }

    Ok(PipelineOutput {
        industries,
        pivot,
        ranking,
    })
}
