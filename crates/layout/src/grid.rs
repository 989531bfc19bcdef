use crate::LayoutError;
use labelsheet_profile::Profile;
use labelsheet_types::{Rect, Size};

/// The position of a slot in the page grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    pub page_index: usize,
    pub cell_row: usize,
    pub cell_column: usize,
}

/// A profile's grid converted to points, ready for addressing cells.
///
/// Pages have no margins: cell `(0, 0)` starts at the top-left corner of the
/// page. Printers that cannot print to the edge will clip the outer labels.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub rows: usize,
    pub columns: usize,
    pub label_size: Size,
    pub page_size: Size,
    pub swap_columns: bool,
    pub code_fraction: f32,
}

impl SheetGrid {
    pub fn from_profile(profile: &Profile) -> Result<Self, LayoutError> {
        profile.validate().map_err(LayoutError::Configuration)?;
        let grid = Self {
            rows: profile.rows as usize,
            columns: profile.columns as usize,
            label_size: profile.label_size_pt(),
            page_size: profile.page_size_pt(),
            swap_columns: profile.swap_columns,
            code_fraction: profile.code_fraction,
        };
        if grid.cells_per_page() == 0 {
            return Err(LayoutError::Configuration(format!(
                "profile '{}' has no cells per page",
                profile.name
            )));
        }
        Ok(grid)
    }

    pub fn cells_per_page(&self) -> usize {
        self.rows * self.columns
    }

    pub fn extent(&self) -> Size {
        Size::new(
            self.label_size.width * self.columns as f32,
            self.label_size.height * self.rows as f32,
        )
    }

    /// Addresses the `slot`-th cell, counting row-major across pages.
    pub fn address(&self, slot: usize) -> CellAddress {
        let cells_per_page = self.cells_per_page();
        let cell_index = slot % cells_per_page;
        CellAddress {
            page_index: slot / cells_per_page,
            cell_row: cell_index / self.columns,
            cell_column: cell_index % self.columns,
        }
    }

    pub fn cell_rect(&self, address: CellAddress) -> Rect {
        Rect::new(
            address.cell_column as f32 * self.label_size.width,
            address.cell_row as f32 * self.label_size.height,
            self.label_size.width,
            self.label_size.height,
        )
    }

    /// Splits a cell into `(text_region, code_region)`.
    pub fn regions(&self, cell: Rect) -> (Rect, Rect) {
        if self.swap_columns {
            let (code, text) = cell.split_horizontal(self.code_fraction);
            (text, code)
        } else {
            let (text, code) = cell.split_horizontal(1.0 - self.code_fraction);
            (text, code)
        }
    }

    pub fn page_count(&self, placed: usize) -> usize {
        placed.div_ceil(self.cells_per_page())
    }
}
