//! Newtype wrapper for the URL a label's code encodes.

use std::fmt;
use std::sync::Arc;

/// The permanent external reference of a record, encoded into its QR code.
///
/// An empty `RecordUrl` means the source row carried no usable identifier.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct RecordUrl(Arc<str>);

impl RecordUrl {
    /// Creates a new RecordUrl from a string
    pub fn new(url: impl Into<Arc<str>>) -> Self {
        Self(url.into())
    }

    /// An identifier that cannot produce a code.
    pub fn empty() -> Self {
        Self(Arc::from(""))
    }

    /// Returns the string representation of this URL
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for RecordUrl {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for RecordUrl {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for RecordUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
