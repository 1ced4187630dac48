//! Data module - CSV loading and table processing

mod loader;
mod processor;
mod types;

pub use loader::{read_selection, DataLoader, LoaderError, SourceColumns};
pub use processor::{DataProcessor, PivotTable};
pub use types::{Record, YearMonth};
