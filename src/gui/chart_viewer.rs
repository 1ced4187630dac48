//! Chart Viewer Widget
//! Central panel showing the title and the interactive industry chart.

use crate::charts::{ChartData, ChartPlotter};
use egui::RichText;

/// Displays one line chart filling the available space.
pub struct ChartViewer {
    pub chart_data: ChartData,
}

impl ChartViewer {
    pub fn new(chart_data: ChartData) -> Self {
        Self { chart_data }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ChartPlotter::draw_title(ui, &self.chart_data);
        ui.add_space(8.0);

        if self.chart_data.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ChartPlotter::draw_line_chart(ui, &self.chart_data);
    }
}
