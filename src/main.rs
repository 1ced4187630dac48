//! Industry Trends - industry time-series aggregation & trend chart viewer
//!
//! Loads an industry CSV, writes the list of industries it contains, then plots
//! the selected industries over time ranked by their final value.

mod charts;
mod config;
mod data;
mod gui;
mod pipeline;
mod stats;

use anyhow::{anyhow, Context, Result};
use charts::{ChartData, StaticChartRenderer};
use clap::Parser;
use config::{Cli, PipelineConfig};
use gui::IndustryChartApp;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    let output = pipeline::run(&cli.csv_file, &cli.industries_file, &config)?;
    info!(
        "{} industries in data, {} plotted",
        output.industries.len(),
        output.ranking.len()
    );
    let chart_data = ChartData::new(&output.pivot, &output.ranking, &config.chart);

    if let Some(path) = &cli.output {
        StaticChartRenderer::render_to_file(
            &chart_data,
            path,
            (config.chart.width, config.chart.height),
        )
        .with_context(|| format!("saving chart to {}", path.display()))?;
        info!("chart saved to {}", path.display());
    }

    if !cli.no_window {
        IndustryChartApp::run(chart_data, &config.chart)
            .map_err(|e| anyhow!("chart window failed: {}", e))?;
    }

    Ok(())
}
