//! Charts module - Chart model, interactive plotting and static export

mod plotter;
mod renderer;

pub use plotter::{ChartData, ChartPlotter};
pub use renderer::StaticChartRenderer;
