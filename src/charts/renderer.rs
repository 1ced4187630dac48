//! Static Chart Renderer
//! Saves the industry line chart to PNG or SVG with plotters.
//!
//! Layout mirrors the interactive window: caption on top, one line per
//! industry in ranking order, legend in the upper-left corner, `YYYY-MM` x labels.

use crate::charts::plotter::{ChartData, ChartPlotter};
use crate::data::YearMonth;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unsupported chart format '{0}', expected .png or .svg")]
    UnsupportedFormat(PathBuf),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart to `path`; the extension picks the backend.
    pub fn render_to_file(
        data: &ChartData,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                Self::draw(&root, data).map_err(|e| RenderError::Draw(e.to_string()))
            }
            Some("svg") => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                Self::draw(&root, data).map_err(|e| RenderError::Draw(e.to_string()))
            }
            _ => Err(RenderError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn padded(range: Option<(f64, f64)>, fraction: f64) -> (f64, f64) {
        let Some((lo, hi)) = range else {
            return (0.0, 1.0);
        };
        let span = hi - lo;
        let pad = if span > 0.0 { span * fraction } else { 1.0 };
        (lo - pad, hi + pad)
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &ChartData,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let (x_min, x_max) = Self::padded(data.x_range(), 1.0 / 20.0);
        let (y_min, y_max) = Self::padded(data.y_range(), 1.0 / 10.0);

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .light_line_style(RGBColor(235, 235, 235))
            .bold_line_style(RGBColor(200, 200, 200))
            .label_style(("sans-serif", 16))
            .x_labels(12)
            .x_label_formatter(&|x: &f64| YearMonth::from_plot_x(*x).to_string())
            .y_label_formatter(&|y: &f64| format!("{:.0}", y))
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .draw()?;

        for (i, series) in data.series.iter().enumerate() {
            let [r, g, b, _] = ChartPlotter::series_color(i).to_array();
            let color = RGBColor(r, g, b);

            let mut labelled = false;
            for segment in series.segments() {
                // A lone point draws no line, so mark it instead.
                let anno = if segment.len() == 1 {
                    let [x, y] = segment[0];
                    chart.draw_series(std::iter::once(Circle::new((x, y), 3, color.filled())))?
                } else {
                    chart.draw_series(LineSeries::new(
                        segment.into_iter().map(|[x, y]| (x, y)),
                        color.stroke_width(2),
                    ))?
                };
                if !labelled {
                    labelled = true;
                    anno.label(series.label.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
        }

        if !data.series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 16))
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::plotter::SeriesData;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn writes_svg_with_legend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let data = ChartData {
            title: "Industry Values Over Time".to_string(),
            x_label: "Date".to_string(),
            y_label: "Value (millions of dollars)".to_string(),
            series: vec![
                SeriesData {
                    label: "Retail ($9.00)".to_string(),
                    points: vec![
                        (ym(2020, 1), Some(1.0)),
                        (ym(2020, 2), Some(3.0)),
                        (ym(2020, 3), None),
                        (ym(2020, 4), Some(7.0)),
                        (ym(2020, 5), Some(9.0)),
                    ],
                },
                SeriesData {
                    label: "Mining ($2.00)".to_string(),
                    points: vec![(ym(2020, 5), Some(2.0))],
                },
            ],
        };
        assert_eq!(data.series[0].segments().len(), 2);

        StaticChartRenderer::render_to_file(&data, &path, (800, 600)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Retail ($9.00)"));
        assert!(svg.contains("Mining ($2.00)"));
        assert!(svg.contains("Industry Values Over Time"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.pdf");
        let data = ChartData {
            title: "Industry Values Over Time".to_string(),
            x_label: "Date".to_string(),
            y_label: "Value".to_string(),
            series: Vec::new(),
        };

        let err = StaticChartRenderer::render_to_file(&data, &path, (800, 600)).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }

    #[test]
    fn padding_handles_flat_and_empty_ranges() {
        assert_eq!(StaticChartRenderer::padded(None, 0.1), (0.0, 1.0));
        assert_eq!(StaticChartRenderer::padded(Some((5.0, 5.0)), 0.1), (4.0, 6.0));
        assert_eq!(StaticChartRenderer::padded(Some((0.0, 100.0)), 0.1), (-10.0, 110.0));
    }
}
