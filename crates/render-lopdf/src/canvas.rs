use crate::text::{centered_baselines, to_win_ansi};
use crate::writer::StreamingPdfWriter;
use labelsheet_layout::CellPlacement;
use labelsheet_profile::Profile;
use labelsheet_render_core::utils::{flip_y, to_pdf_rect};
use labelsheet_render_core::{CodeImage, LabelCanvas, RenderError};
use labelsheet_types::{Rect, Size};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io::{Cursor, Seek, Write};

const FONT_RESOURCE: &str = "F1";
const BASE_FONT: &str = "Helvetica";

/// Drawing options for the lopdf canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasOptions {
    pub font_size: f32,
    /// Distance between baselines.
    pub leading: f32,
    /// Space kept free inside the text and code regions.
    pub padding: f32,
    /// Stroke each cell's outline, for checking alignment against a sheet.
    pub cell_outlines: bool,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            leading: 10.0,
            padding: 2.0,
            cell_outlines: false,
        }
    }
}

struct PageInProgress {
    index: usize,
    content: Content,
    xobjects: Dictionary,
}

impl PageInProgress {
    fn new(index: usize) -> Self {
        Self {
            index,
            content: Content { operations: vec![] },
            xobjects: Dictionary::new(),
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }
}

/// A label sheet canvas writing PDF through `lopdf`.
///
/// Text uses the standard Helvetica font, so nothing is embedded; codes are
/// written as grayscale image XObjects. Each page is written out as soon as
/// the first placement of the next page arrives.
pub struct LopdfLabelCanvas<W: Write + Seek> {
    writer: Option<StreamingPdfWriter<W>>,
    options: CanvasOptions,
    page_size: Size,
    font_id: Option<ObjectId>,
    page: Option<PageInProgress>,
    page_ids: Vec<ObjectId>,
}

impl<W: Write + Seek> LopdfLabelCanvas<W> {
    pub fn new(options: CanvasOptions) -> Self {
        Self {
            writer: None,
            options,
            page_size: Size::zero(),
            font_id: None,
            page: None,
            page_ids: Vec::new(),
        }
    }

    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    fn writer_mut(&mut self) -> Result<&mut StreamingPdfWriter<W>, RenderError> {
        self.writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))
    }

    fn flush_page(&mut self) -> Result<(), RenderError> {
        let Some(page) = self.page.take() else {
            return Ok(());
        };
        let font_id = self
            .font_id
            .ok_or_else(|| RenderError::Other("Document not started".into()))?;
        let Size { width, height } = self.page_size;

        let writer = self.writer_mut()?;
        let content_id = writer.write_content_stream(page.content)?;
        let mut resources = dictionary! {
            "Font" => dictionary! { FONT_RESOURCE => font_id },
        };
        if !page.xobjects.is_empty() {
            resources.set("XObject", page.xobjects);
        }
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => resources,
        };
        let page_id = writer.write_object(page_dict.into())?;
        log::debug!("Wrote page {} as object {:?}", page.index + 1, page_id);
        self.page_ids.push(page_id);
        Ok(())
    }

    fn draw_outline(&self, page: &mut PageInProgress, cell: &Rect) {
        let [x, y, w, h] = to_pdf_rect(cell, self.page_size.height);
        page.push("q", vec![]);
        page.push("w", vec![0.25.into()]);
        page.push("re", vec![x.into(), y.into(), w.into(), h.into()]);
        page.push("S", vec![]);
        page.push("Q", vec![]);
    }

    fn draw_code(
        &mut self,
        page: &mut PageInProgress,
        region: &Rect,
        code: &CodeImage,
    ) -> Result<(), RenderError> {
        let target = region.inset(self.options.padding).centered_square();
        if target.width <= 0.0 {
            log::warn!("Code region too small to draw a code, leaving it empty");
            return Ok(());
        }
        let image = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => code.width() as i64,
            "Height" => code.height() as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8_i64,
            "Interpolate" => false,
        };
        let stream = Stream::new(image, code.samples().to_vec());
        let image_id = self.writer_mut()?.write_object(Object::Stream(stream))?;
        let name = format!("Im{}", image_id.0);
        page.xobjects.set(name.as_bytes(), image_id);

        let [x, y, side, _] = to_pdf_rect(&target, self.page_size.height);
        page.push("q", vec![]);
        page.push(
            "cm",
            vec![side.into(), 0.0.into(), 0.0.into(), side.into(), x.into(), y.into()],
        );
        page.push("Do", vec![Object::Name(name.into_bytes())]);
        page.push("Q", vec![]);
        Ok(())
    }

    fn draw_text(&self, page: &mut PageInProgress, region: &Rect, lines: &[String]) {
        if lines.iter().all(|l| l.trim().is_empty()) {
            return;
        }
        let CanvasOptions {
            font_size,
            leading,
            padding,
            ..
        } = self.options;
        let inner = region.inset(padding);
        let page_height = self.page_size.height;
        let [cx, cy, cw, ch] = to_pdf_rect(&inner, page_height);

        // Clip so long titles cannot run into the code or the next label.
        page.push("q", vec![]);
        page.push("re", vec![cx.into(), cy.into(), cw.into(), ch.into()]);
        page.push("W", vec![]);
        page.push("n", vec![]);
        page.push("BT", vec![]);
        page.push(
            "Tf",
            vec![Object::Name(FONT_RESOURCE.as_bytes().to_vec()), font_size.into()],
        );
        let baselines = centered_baselines(lines.len(), inner.y, inner.height, font_size, leading);
        for (line, baseline) in lines.iter().zip(baselines) {
            if line.is_empty() {
                continue;
            }
            let pdf_y = flip_y(baseline, page_height);
            page.push(
                "Tm",
                vec![1.0.into(), 0.0.into(), 0.0.into(), 1.0.into(), inner.x.into(), pdf_y.into()],
            );
            page.push(
                "Tj",
                vec![Object::String(to_win_ansi(line), StringFormat::Literal)],
            );
        }
        page.push("ET", vec![]);
        page.push("Q", vec![]);
    }
}

impl LopdfLabelCanvas<Cursor<Vec<u8>>> {
    /// Convenience for rendering into memory.
    pub fn in_memory(options: CanvasOptions) -> Self {
        Self::new(options)
    }
}

impl<W: Write + Seek> LabelCanvas<W> for LopdfLabelCanvas<W> {
    fn begin_document(
        &mut self,
        writer: W,
        profile: &Profile,
        page_size: Size,
    ) -> Result<(), RenderError> {
        let mut writer = StreamingPdfWriter::new(writer, "1.7")?;
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => BASE_FONT,
            "Encoding" => "WinAnsiEncoding",
        };
        self.font_id = Some(writer.write_object(font.into())?);

        let title = if profile.description.is_empty() {
            format!("Labels ({})", profile.name)
        } else {
            format!("Labels ({})", profile.description)
        };
        writer.set_info(dictionary! {
            "Title" => Object::String(to_win_ansi(&title), StringFormat::Literal),
            "Producer" => Object::string_literal("labelsheet"),
        });

        self.writer = Some(writer);
        self.page_size = page_size;
        self.page = None;
        self.page_ids.clear();
        Ok(())
    }

    fn draw_placement(
        &mut self,
        placement: &CellPlacement,
        code: Option<&CodeImage>,
    ) -> Result<(), RenderError> {
        if self.writer.is_none() {
            return Err(RenderError::Other("Document not started".into()));
        }
        let current = self.page.as_ref().map(|p| p.index);
        match current {
            Some(index) if index == placement.page_index => {}
            Some(index) if index > placement.page_index => {
                return Err(RenderError::Other(format!(
                    "Placement for page {} arrived after page {}; placements must be in draw order",
                    placement.page_index + 1,
                    index + 1
                )));
            }
            _ => {
                self.flush_page()?;
                self.page = Some(PageInProgress::new(placement.page_index));
            }
        }

        let mut page = self
            .page
            .take()
            .ok_or_else(|| RenderError::Other("No page in progress".into()))?;
        if self.options.cell_outlines {
            self.draw_outline(&mut page, &placement.cell);
        }
        let result = match code {
            Some(code) => self.draw_code(&mut page, &placement.code_region, code),
            None => Ok(()),
        };
        self.draw_text(&mut page, &placement.text_region, &placement.record.field_values);
        self.page = Some(page);
        result
    }

    fn page_count(&self) -> usize {
        self.page_ids.len() + usize::from(self.page.is_some())
    }

    fn finish(self: Box<Self>) -> Result<W, RenderError> {
        let mut canvas = *self;
        canvas.flush_page()?;
        let writer = canvas.writer.take().ok_or_else(|| {
            RenderError::Other("Document was never started with begin_document".into())
        })?;
        Ok(writer.finish(&canvas.page_ids)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QrCodeRenderer;
    use labelsheet_layout::{LaidOutSheet, LayoutConfig, LayoutEngine};
    use labelsheet_render_core::CodeRenderer;
    use labelsheet_source::NormalizedRecord;
    use labelsheet_types::{PageSize, Unit};
    use lopdf::Document;

    fn sheet(profile: &Profile, count: usize) -> LaidOutSheet {
        let records = (1..=count).map(|i| {
            NormalizedRecord::new(
                i,
                format!("https://www.discogs.com/release/{}", i),
                vec![format!("Artist {}", i), format!("Title {}", i)],
            )
        });
        LayoutEngine::new(LayoutConfig::default())
            .layout(records, profile)
            .unwrap()
    }

    fn render(profile: &Profile, sheet: &LaidOutSheet, options: CanvasOptions) -> Vec<u8> {
        let renderer = QrCodeRenderer::default();
        let mut canvas: Box<dyn LabelCanvas<Cursor<Vec<u8>>>> =
            Box::new(LopdfLabelCanvas::in_memory(options));
        canvas
            .begin_document(Cursor::new(Vec::new()), profile, sheet.page_size)
            .unwrap();
        for placement in &sheet.placements {
            let code = renderer.render(placement.record.identifier.as_str()).unwrap();
            canvas.draw_placement(placement, Some(&code)).unwrap();
        }
        canvas.finish().unwrap().into_inner()
    }

    fn operators(doc: &Document, page_id: ObjectId) -> Vec<Operation> {
        let bytes = doc.get_page_content(page_id).unwrap();
        Content::decode(&bytes).unwrap().operations
    }

    #[test]
    fn test_pages_follow_page_index() {
        let profile = Profile::new("a4-24", 8, 3, 70.0, 37.0, Unit::Millimeters)
            .with_page_size(PageSize::A4);
        let sheet = sheet(&profile, 25);
        let bytes = render(&profile, &sheet, CanvasOptions::default());

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        let first = operators(&doc, pages[&1]);
        let second = operators(&doc, pages[&2]);
        let count = |ops: &[Operation], op: &str| ops.iter().filter(|o| o.operator == op).count();
        assert_eq!(count(&first[..], "Do"), 24);
        assert_eq!(count(&second[..], "Do"), 1);
        assert_eq!(count(&first[..], "Tj"), 48);
    }

    #[test]
    fn test_media_box_matches_page_size() {
        let profile = Profile::new("dymo", 1, 1, 89.0, 36.0, Unit::Millimeters);
        let sheet = sheet(&profile, 3);
        let bytes = render(&profile, &sheet, CanvasOptions::default());

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 3);
        let page = doc.get_dictionary(pages[&1]).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((width - Unit::Millimeters.to_points(89.0)).abs() < 0.01);
        assert!((height - Unit::Millimeters.to_points(36.0)).abs() < 0.01);
    }

    #[test]
    fn test_text_is_written_in_field_order() {
        let profile = Profile::new("dymo", 1, 1, 89.0, 36.0, Unit::Millimeters);
        let sheet = sheet(&profile, 1);
        let bytes = render(&profile, &sheet, CanvasOptions::default());

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        let strings: Vec<Vec<u8>> = operators(&doc, pages[&1])
            .into_iter()
            .filter(|o| o.operator == "Tj")
            .filter_map(|o| o.operands.first().and_then(|s| s.as_str().ok()).map(<[u8]>::to_vec))
            .collect();
        assert_eq!(strings, vec![b"Artist 1".to_vec(), b"Title 1".to_vec()]);
    }

    #[test]
    fn test_cell_outlines_are_optional() {
        let profile = Profile::new("dymo", 1, 1, 89.0, 36.0, Unit::Millimeters);
        let sheet = sheet(&profile, 1);
        let strokes = |options| {
            let bytes = render(&profile, &sheet, options);
            let doc = Document::load_mem(&bytes).unwrap();
            let pages = doc.get_pages();
            operators(&doc, pages[&1])
                .iter()
                .filter(|o| o.operator == "S")
                .count()
        };
        assert_eq!(strokes(CanvasOptions::default()), 0);
        assert_eq!(
            strokes(CanvasOptions {
                cell_outlines: true,
                ..CanvasOptions::default()
            }),
            1
        );
    }

    #[test]
    fn test_placement_before_begin_is_an_error() {
        let profile = Profile::new("dymo", 1, 1, 89.0, 36.0, Unit::Millimeters);
        let sheet = sheet(&profile, 1);
        let mut canvas = LopdfLabelCanvas::<Cursor<Vec<u8>>>::in_memory(CanvasOptions::default());
        assert!(canvas.draw_placement(&sheet.placements[0], None).is_err());
    }

    #[test]
    fn test_out_of_order_pages_are_rejected() {
        let profile = Profile::new("dymo", 1, 1, 89.0, 36.0, Unit::Millimeters);
        let sheet = sheet(&profile, 2);
        let mut canvas = LopdfLabelCanvas::in_memory(CanvasOptions::default());
        canvas
            .begin_document(Cursor::new(Vec::new()), &profile, sheet.page_size)
            .unwrap();
        canvas.draw_placement(&sheet.placements[1], None).unwrap();
        assert!(canvas.draw_placement(&sheet.placements[0], None).is_err());
        assert_eq!(canvas.page_count(), 1);
    }
}
