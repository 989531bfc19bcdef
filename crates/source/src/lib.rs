//! Input rows for the labelsheet pipeline.
//!
//! This crate provides the `RowSource` trait that feeds raw rows into the
//! pipeline, and the record adapter ([`adapt`]) that turns a raw row into a
//! [`NormalizedRecord`].
//!
//! ## Available Sources
//!
//! - `VecRowSource`: In-memory rows, mostly for tests
//! - `CsvRowSource`: A CSV export with a header row
//!
//! A source never aborts the batch because of one bad row: rows that cannot
//! be decoded are reported as a [`SourceWarning`] and the source moves on.

mod record;

pub use record::{CONDITION_FIELD, ExportKind, NormalizedRecord, RawRow, adapt};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

/// Fatal problems with an input source. Raised before any row is read.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading input: {0}")]
    Io(#[from] io::Error),
    #[error("Input is not a readable CSV file: {0}")]
    Csv(#[from] csv::Error),
    #[error("Input has no header row")]
    MissingHeader,
}

/// A recoverable problem with a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceWarning {
    MalformedRow { row: usize, message: String },
}

impl fmt::Display for SourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceWarning::MalformedRow { row, message } => {
                write!(f, "row {}: skipped malformed row ({})", row, message)
            }
        }
    }
}

pub type RowResult = Result<RawRow, SourceWarning>;

/// A trait for sources that feed raw rows into the pipeline.
pub trait RowSource {
    /// Get the next row, if available.
    ///
    /// Returns `None` when the source is exhausted.
    fn next(&mut self) -> Option<RowResult>;

    /// Hint about the total number of rows (for progress reporting).
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

impl RowSource for Box<dyn RowSource> {
    fn next(&mut self) -> Option<RowResult> {
        (**self).next()
    }

    fn size_hint(&self) -> Option<usize> {
        (**self).size_hint()
    }
}

/// A source backed by an in-memory vector of rows.
pub struct VecRowSource {
    rows: std::vec::IntoIter<RawRow>,
    len: usize,
}

impl VecRowSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        let len = rows.len();
        Self {
            rows: rows.into_iter(),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl RowSource for VecRowSource {
    fn next(&mut self) -> Option<RowResult> {
        self.rows.next().map(Ok)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len)
    }
}

/// Reads rows from a CSV export whose first line names the columns.
///
/// Short rows are allowed (missing columns read as absent), surrounding
/// whitespace is trimmed and a UTF-8 byte order mark is ignored.
pub struct CsvRowSource<R: Read> {
    headers: StringRecord,
    records: StringRecordsIntoIter<R>,
    row_number: usize,
    finished: bool,
}

impl CsvRowSource<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to open CSV file '{}': {}", path.display(), e),
            )
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvRowSource<R> {
    pub fn from_reader(reader: R) -> Result<Self, SourceError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(SourceError::MissingHeader);
        }
        log::debug!("CSV columns: {:?}", headers.iter().collect::<Vec<_>>());
        Ok(Self {
            headers,
            records: reader.into_records(),
            row_number: 0,
            finished: false,
        })
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    fn to_row(&self, record: &StringRecord) -> RawRow {
        let mut row = RawRow::new(self.row_number);
        for (column, value) in self.headers.iter().zip(record.iter()) {
            if !column.is_empty() {
                row.values.insert(column.to_string(), value.to_string());
            }
        }
        if record.len() > self.headers.len() {
            log::debug!(
                "Row {} has {} values for {} columns; extra values ignored",
                self.row_number,
                record.len(),
                self.headers.len()
            );
        }
        row
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    fn next(&mut self) -> Option<RowResult> {
        if self.finished {
            return None;
        }
        loop {
            let record = match self.records.next() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(record) => record,
            };
            self.row_number += 1;
            return match record {
                Ok(record) if record.iter().all(|v| v.is_empty()) => {
                    log::debug!("Row {} is blank, skipping", self.row_number);
                    continue;
                }
                Ok(record) => Some(Ok(self.to_row(&record))),
                Err(e) => {
                    // An I/O failure leaves the reader in an unknown state.
                    if e.is_io_error() {
                        self.finished = true;
                    }
                    Some(Err(SourceWarning::MalformedRow {
                        row: self.row_number,
                        message: e.to_string(),
                    }))
                }
            };
        }
    }
}
