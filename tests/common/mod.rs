#![allow(dead_code)]

use labelsheet::{CsvRowSource, PipelineBuilder, PipelineError, Profile, RunReport, Unit};
use lopdf::content::{Content, Operation};
use lopdf::{Document as LopdfDocument, ObjectId};
use std::io::Cursor;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Header row of a collection export.
pub const COLLECTION_HEADER: &str = "Catalog#,Artist,Title,Label,Format,Rating,Released,release_id,CollectionFolder,Date Added,Collection Media Condition,Collection Sleeve Condition,Collection Notes";

/// Header row of an inventory export.
pub const INVENTORY_HEADER: &str = "listing_id,artist,title,label,catno,format,release_id,status,price,listed,comments,media_condition,sleeve_condition";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A collection export with `count` rows, numbered from 1.
pub fn collection_csv(count: usize) -> String {
    let mut csv = String::from(COLLECTION_HEADER);
    csv.push('\n');
    for i in 1..=count {
        csv.push_str(&format!(
            "CAT-{i},Artist {i},Title {i},Label,LP,,1971,{id},Uncategorized,2024-01-01,Near Mint (NM or M-),Very Good Plus (VG+),\n",
            i = i,
            id = 1000 + i
        ));
    }
    csv
}

/// The 8x3 A4 sheet of 70x37mm labels.
pub fn a4_24() -> Profile {
    Profile::new("a4-24", 8, 3, 70.0, 37.0, Unit::Millimeters).with_page_size(labelsheet::PageSize::A4)
}

/// A single-label roll printer.
pub fn dymo() -> Profile {
    Profile::new("dymo", 1, 1, 89.0, 36.0, Unit::Millimeters)
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    fn page_id(&self, page: u32) -> ObjectId {
        self.doc.get_pages()[&page]
    }

    /// Width and height of a page's MediaBox, 1-based page number.
    pub fn page_size(&self, page: u32) -> (f32, f32) {
        let dict = self.doc.get_dictionary(self.page_id(page)).unwrap();
        let media_box = dict.get(b"MediaBox").unwrap().as_array().unwrap();
        (
            media_box[2].as_float().unwrap(),
            media_box[3].as_float().unwrap(),
        )
    }

    pub fn operations(&self, page: u32) -> Vec<Operation> {
        let content = self.doc.get_page_content(self.page_id(page)).unwrap();
        Content::decode(&content).unwrap().operations
    }

    /// Strings shown on a page, in drawing order.
    pub fn text_lines(&self, page: u32) -> Vec<String> {
        self.operations(page)
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|s| s.as_str().ok())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }

    /// Number of code images drawn on a page.
    pub fn code_count(&self, page: u32) -> usize {
        self.operations(page)
            .iter()
            .filter(|op| op.operator == "Do")
            .count()
    }

    /// X offsets of the text lines on a page.
    pub fn text_x(&self, page: u32) -> Vec<f32> {
        self.operand_at(page, "Tm", 4)
    }

    /// X offsets of the code images on a page.
    pub fn code_x(&self, page: u32) -> Vec<f32> {
        self.operand_at(page, "cm", 4)
    }

    fn operand_at(&self, page: u32, operator: &str, index: usize) -> Vec<f32> {
        self.operations(page)
            .iter()
            .filter(|op| op.operator == operator)
            .filter_map(|op| op.operands.get(index))
            .filter_map(|o| o.as_float().ok())
            .collect()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Runs `builder` over `csv` into memory. Returns `None` for the document
/// when nothing was written.
pub fn generate(
    builder: PipelineBuilder,
    csv: &str,
) -> Result<(RunReport, Option<GeneratedPdf>), PipelineError> {
    init_logging();
    let pipeline = builder.build()?;
    let source = CsvRowSource::from_reader(Cursor::new(csv.as_bytes().to_vec()))?;
    let (report, writer) = pipeline.generate(source, Cursor::new(Vec::new()))?;
    let bytes = writer.into_inner();
    if bytes.is_empty() {
        return Ok((report, None));
    }
    let pdf = GeneratedPdf::from_bytes(bytes).map_err(|e| PipelineError::Config(e.to_string()))?;
    Ok((report, Some(pdf)))
}

pub fn generate_pdf(builder: PipelineBuilder, csv: &str) -> Result<GeneratedPdf, PipelineError> {
    match generate(builder, csv)? {
        (_, Some(pdf)) => Ok(pdf),
        (_, None) => Err(PipelineError::Config("no document was written".to_string())),
    }
}
