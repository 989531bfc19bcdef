//! Streaming PDF label sheet writer using lopdf.
//!
//! Pages are written to the output as soon as they are complete, so memory
//! use stays flat however many labels a run produces.

mod canvas;
mod qr;
pub mod text;
mod writer;

pub use canvas::{CanvasOptions, LopdfLabelCanvas};
pub use qr::QrCodeRenderer;
pub use writer::StreamingPdfWriter;
