// src/pipeline/report.rs
use labelsheet_layout::LayoutWarning;
use labelsheet_render_core::RenderWarning;
use labelsheet_source::SourceWarning;

/// What a run did, returned once the document is written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Rows read from the source, malformed ones included.
    pub rows_read: usize,
    pub labels_placed: usize,
    /// Zero when nothing was placed and no document was written.
    pub pages: usize,
    pub source_warnings: Vec<SourceWarning>,
    pub layout_warnings: Vec<LayoutWarning>,
    pub render_warnings: Vec<RenderWarning>,
}

impl RunReport {
    pub fn warning_count(&self) -> usize {
        self.source_warnings.len() + self.layout_warnings.len() + self.render_warnings.len()
    }

    pub fn wrote_document(&self) -> bool {
        self.pages > 0
    }

    /// Logs a one-line summary, then each warning at `warn` level.
    pub fn log_summary(&self) {
        log::info!(
            "Placed {} labels from {} rows on {} pages ({} warnings)",
            self.labels_placed,
            self.rows_read,
            self.pages,
            self.warning_count()
        );
        for warning in &self.source_warnings {
            log::warn!("{}", warning);
        }
        for warning in &self.layout_warnings {
            log::warn!("{}", warning);
        }
        for warning in &self.render_warnings {
            log::warn!("{}", warning);
        }
    }
}
