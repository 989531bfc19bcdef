// src/error.rs
use labelsheet_layout::LayoutError;
use labelsheet_profile::ProfileError;
use labelsheet_render_core::RenderError;
use labelsheet_source::SourceError;
use thiserror::Error;

/// A comprehensive error type for a label generation run.
///
/// Every variant is fatal. Per-record problems never surface here; they are
/// collected in the `RunReport` instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Input error: {0}")]
    Source(#[from] SourceError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pipeline is not configured: {0}")]
    Config(String),
}
