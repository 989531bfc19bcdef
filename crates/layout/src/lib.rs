use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid layout configuration: {0}")]
    Configuration(String),
}

mod engine;
pub mod config;
pub mod grid;
pub mod output;

pub use self::config::{LayoutConfig, MissingIdentifierPolicy};
pub use self::engine::LayoutEngine;
pub use self::grid::{CellAddress, SheetGrid};
pub use self::output::{CellPlacement, LaidOutSheet, LayoutWarning};

// Re-export geometry types used by placements to prevent type mismatches
pub use labelsheet_types::geometry::{Rect, Size};

#[cfg(test)]
mod test_utils;
