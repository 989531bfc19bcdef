use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Failed to generate code for '{identifier}': {message}")]
    Code { identifier: String, message: String },
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// A per-record problem found while drawing. The label is still drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderWarning {
    /// The identifier could not be encoded; the code region stays empty.
    CodeUnrenderable { row: usize, message: String },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::CodeUnrenderable { row, message } => {
                write!(f, "row {}: code could not be drawn, label placed without a code ({})", row, message)
            }
        }
    }
}
