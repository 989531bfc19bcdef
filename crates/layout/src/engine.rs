use crate::config::{LayoutConfig, MissingIdentifierPolicy};
use crate::grid::SheetGrid;
use crate::output::{CellPlacement, LaidOutSheet, LayoutWarning};
use crate::LayoutError;
use labelsheet_profile::Profile;
use labelsheet_source::NormalizedRecord;

/// Places label records onto the cells of a profile's page grid.
///
/// Cells are filled row-major within a page and pages follow input order,
/// with no gaps: the n-th placed record always lands in the n-th cell. The
/// last page may be partially filled. The same input and profile always
/// produce the same placements.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout<I>(&self, records: I, profile: &Profile) -> Result<LaidOutSheet, LayoutError>
    where
        I: IntoIterator<Item = NormalizedRecord>,
    {
        let grid = SheetGrid::from_profile(profile)?;
        if !grid.page_size.contains(grid.extent()) {
            log::warn!(
                "Label grid of profile '{}' ({:.1}x{:.1}pt) is larger than the page ({:.1}x{:.1}pt); outer labels will be clipped",
                profile.name,
                grid.extent().width,
                grid.extent().height,
                grid.page_size.width,
                grid.page_size.height
            );
        }

        let policy = self.config.missing_identifier;
        let mut placements = Vec::new();
        let mut warnings = Vec::new();

        for record in records {
            if !record.has_identifier() {
                log::warn!("Row {}: no identifier for the code, label {}", record.row, policy);
                warnings.push(LayoutWarning::MissingIdentifier {
                    row: record.row,
                    policy,
                });
                if policy == MissingIdentifierPolicy::Skip {
                    continue;
                }
            }

            let address = grid.address(placements.len());
            let cell = grid.cell_rect(address);
            let (text_region, code_region) = grid.regions(cell);
            placements.push(CellPlacement {
                page_index: address.page_index,
                cell_row: address.cell_row,
                cell_column: address.cell_column,
                cell,
                text_region,
                code_region,
                record,
            });
        }

        let page_count = grid.page_count(placements.len());
        log::info!(
            "Laid out {} labels on {} page(s) using profile '{}' ({} per page)",
            placements.len(),
            page_count,
            profile.name,
            grid.cells_per_page()
        );

        Ok(LaidOutSheet {
            placements,
            page_count,
            page_size: grid.page_size,
            cells_per_page: grid.cells_per_page(),
            warnings,
        })
    }
}
