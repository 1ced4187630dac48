//! Industry Trends chart window
//! Opens a native window with the chart and blocks until it is closed.

use crate::charts::ChartData;
use crate::config::ChartConfig;
use crate::gui::ChartViewer;
use eframe::egui;

/// Main application window.
pub struct IndustryChartApp {
    chart_viewer: ChartViewer,
}

impl IndustryChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, chart_data: ChartData) -> Self {
        Self {
            chart_viewer: ChartViewer::new(chart_data),
        }
    }

    /// Run the window on the current thread until the user closes it.
    pub fn run(chart_data: ChartData, config: &ChartConfig) -> eframe::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([config.width as f32, config.height as f32])
                .with_min_inner_size([640.0, 400.0])
                .with_title(config.title.as_str()),
            ..Default::default()
        };

        eframe::run_native(
            "Industry Trends",
            options,
            Box::new(move |cc| Ok(Box::new(IndustryChartApp::new(cc, chart_data)))),
        )
    }
}

impl eframe::App for IndustryChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
