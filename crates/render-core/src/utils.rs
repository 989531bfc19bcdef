use labelsheet_types::Rect;

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// The PDF rectangle `[x, y, width, height]` for a layout rectangle, with the
/// origin moved to the bottom-left corner of the page.
pub fn to_pdf_rect(rect: &Rect, page_height: f32) -> [f32; 4] {
    [
        rect.x,
        flip_y(rect.bottom(), page_height),
        rect.width,
        rect.height,
    ]
}
