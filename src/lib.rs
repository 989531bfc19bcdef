//! Label sheet generation for record collection exports.
//!
//! Rows from a CSV export are adapted into label records, placed onto the
//! cells of a sheet profile by the layout engine and written to a PDF with a
//! QR code per label.
//!
//! ```no_run
//! use labelsheet::{CsvRowSource, PipelineBuilder, Profile, Unit};
//!
//! let profile = Profile::new("a4-24", 8, 3, 70.0, 37.0, Unit::Millimeters);
//! let pipeline = PipelineBuilder::new().with_profile(profile).build()?;
//! let report = pipeline.generate_to_file(CsvRowSource::from_path("collection.csv")?, "labels.pdf")?;
//! println!("{} labels on {} pages", report.labels_placed, report.pages);
//! # Ok::<(), labelsheet::PipelineError>(())
//! ```

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{LabelPipeline, PipelineBuilder, RunReport};

pub use labelsheet_layout::{LayoutConfig, LayoutWarning, MissingIdentifierPolicy};
pub use labelsheet_profile::{ConfigFile, Profile, ProfileError, resolve_profile};
pub use labelsheet_render_core::{CodeImage, CodeRenderer, RenderError, RenderWarning};
pub use labelsheet_render_lopdf::{CanvasOptions, QrCodeRenderer};
pub use labelsheet_source::{
    CsvRowSource, ExportKind, RawRow, RowSource, SourceWarning, VecRowSource,
};
pub use labelsheet_types::{PageSize, Unit};
