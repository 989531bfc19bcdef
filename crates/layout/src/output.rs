//! Output types from the layout engine.
//!
//! A `LaidOutSheet` is the ordered list of placements for a whole run, in
//! the order they must be drawn.

use crate::config::MissingIdentifierPolicy;
use labelsheet_source::NormalizedRecord;
use labelsheet_types::{Rect, Size};
use std::fmt;

/// One record assigned to one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPlacement {
    pub page_index: usize,
    pub cell_row: usize,
    pub cell_column: usize,
    /// The whole label.
    pub cell: Rect,
    pub text_region: Rect,
    pub code_region: Rect,
    pub record: NormalizedRecord,
}

impl CellPlacement {
    /// False when the renderer should leave the code region empty.
    pub fn has_code(&self) -> bool {
        self.record.has_identifier()
    }
}

/// A per-record problem found during layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutWarning {
    MissingIdentifier {
        row: usize,
        policy: MissingIdentifierPolicy,
    },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::MissingIdentifier { row, policy } => {
                write!(f, "row {}: no identifier for the code, label {}", row, policy)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutSheet {
    /// Placements in draw order.
    pub placements: Vec<CellPlacement>,
    pub page_count: usize,
    pub page_size: Size,
    pub cells_per_page: usize,
    pub warnings: Vec<LayoutWarning>,
}

impl LaidOutSheet {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements grouped by page, in page order.
    pub fn pages(&self) -> impl Iterator<Item = &[CellPlacement]> {
        self.placements.chunk_by(|a, b| a.page_index == b.page_index)
    }

    /// Empty when nothing was placed on `page_index`.
    pub fn placements_on_page(&self, page_index: usize) -> &[CellPlacement] {
        self.pages()
            .find(|page| page[0].page_index == page_index)
            .unwrap_or(&[])
    }
}
