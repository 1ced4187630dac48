//! Chart Plotter Module
//! Builds the line chart model and draws it interactively using egui_plot.

use crate::config::ChartConfig;
use crate::data::{PivotTable, YearMonth};
use crate::stats::FinalValueRanking;
use egui::{Color32, RichText};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints, Points};

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
    Color32::from_rgb(140, 86, 75),   // Brown
    Color32::from_rgb(227, 119, 194), // Pink
    Color32::from_rgb(127, 127, 127), // Grey
    Color32::from_rgb(188, 189, 34),  // Olive
    Color32::from_rgb(23, 190, 207),  // Cyan
];

/// One plotted industry.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    /// Legend text including the final value.
    pub label: String,
    pub points: Vec<(YearMonth, Option<f64>)>,
}

impl SeriesData {
    /// Runs of consecutive set values as `[x, y]` points; unset cells split the line.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (date, value) in &self.points {
            match value {
                Some(v) => current.push([date.as_plot_x(), *v]),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Everything needed to draw the chart, in legend order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<SeriesData>,
}

impl ChartData {
    pub fn new(pivot: &PivotTable, ranking: &FinalValueRanking, config: &ChartConfig) -> Self {
        let series = ranking
            .entries
            .iter()
            .map(|entry| SeriesData {
                label: entry.label(),
                points: pivot.series(&entry.industry),
            })
            .collect();

        Self {
            title: config.title.clone(),
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            series,
        }
    }

    /// Min and max plot x over all set points.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Self::range(self.set_points().map(|p| p[0]))
    }

    /// Min and max value over all set points.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        Self::range(self.set_points().map(|p| p[1]))
    }

    pub fn is_empty(&self) -> bool {
        self.set_points().next().is_none()
    }

    fn set_points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.series.iter().flat_map(|s| {
            s.points
                .iter()
                .filter_map(|(date, value)| value.map(|v| [date.as_plot_x(), v]))
        })
    }

    fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
        values.fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Draws the industry line chart using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Colour for the series at a legend position.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    pub fn draw_title(ui: &mut egui::Ui, chart_data: &ChartData) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&chart_data.title).size(20.0).strong());
        });
    }

    /// Draw one line per series, legend top-left, x axis labelled in months.
    pub fn draw_line_chart(ui: &mut egui::Ui, chart_data: &ChartData) {
        Plot::new("industry_values")
            .legend(Legend::default().position(Corner::LeftTop))
            .x_axis_label(chart_data.x_label.clone())
            .y_axis_label(chart_data.y_label.clone())
            .show_grid(true)
            .x_axis_formatter(|mark, _range| YearMonth::from_plot_x(mark.value).to_string())
            .label_formatter(|name, value| {
                let date = YearMonth::from_plot_x(value.x);
                if name.is_empty() {
                    format!("{}: {:.2}", date, value.y)
                } else {
                    format!("{}\n{}: {:.2}", name, date, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for (i, series) in chart_data.series.iter().enumerate() {
                    let color = Self::series_color(i);

                    for segment in series.segments() {
                        // A lone point draws no line, so mark it instead.
                        if segment.len() == 1 {
                            plot_ui.points(
                                Points::new(PlotPoints::from(segment))
                                    .radius(3.0)
                                    .color(color)
                                    .name(&series.label),
                            );
                        } else {
                            plot_ui.line(
                                Line::new(PlotPoints::from(segment))
                                    .color(color)
                                    .width(1.5)
                                    .name(&series.label),
                            );
                        }
                    }
                }
            });
    }
}
