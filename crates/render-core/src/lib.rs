//! Core rendering abstractions for label sheets.
//!
//! This crate provides the two seams between the layout engine and the
//! outside world:
//! - `CodeRenderer`: turns a record identifier into a scannable code image
//! - `LabelCanvas`: consumes placements in draw order and writes a document
//!
//! plus the error and warning types shared by rendering backends and a few coordinate
//! helpers.

mod error;
mod traits;
pub mod utils;

pub use error::{RenderError, RenderWarning};
pub use traits::{CodeImage, CodeRenderer, LabelCanvas};
