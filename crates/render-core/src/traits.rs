use crate::error::RenderError;
use image::GrayImage;
use labelsheet_layout::CellPlacement;
use labelsheet_profile::Profile;
use labelsheet_types::Size;
use std::io::{Seek, Write};

/// A rendered scannable code: a grayscale bitmap with one pixel per module,
/// quiet zone included. Scaled to the code region when drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeImage {
    pub pixels: GrayImage,
}

impl CodeImage {
    pub fn new(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw 8-bit luma samples, row by row from the top.
    pub fn samples(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

/// Turns an identifier into a code image. Implementations are pure: the same
/// identifier always yields the same image.
pub trait CodeRenderer {
    fn render(&self, identifier: &str) -> Result<CodeImage, RenderError>;
}

/// A trait for document writers, abstracting the drawing primitives a label
/// sheet needs.
///
/// Placements must be drawn in the order the layout engine produced them;
/// the canvas never reorders. Page breaks follow `CellPlacement::page_index`.
pub trait LabelCanvas<W: Write + Seek> {
    fn begin_document(&mut self, writer: W, profile: &Profile, page_size: Size)
    -> Result<(), RenderError>;

    /// Draws one label. `code` is `None` when the code region stays empty.
    fn draw_placement(
        &mut self,
        placement: &CellPlacement,
        code: Option<&CodeImage>,
    ) -> Result<(), RenderError>;

    /// Number of pages written or started so far.
    fn page_count(&self) -> usize;

    fn finish(self: Box<Self>) -> Result<W, RenderError>;
}
