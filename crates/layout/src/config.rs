use std::fmt;

/// What the engine does with a record whose identifier is empty.
///
/// One policy applies to a whole run. Either way a warning is recorded for
/// the record and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingIdentifierPolicy {
    /// Place the record; the renderer leaves its code region empty.
    #[default]
    BlankCode,
    /// Leave the record out. It does not consume a cell.
    Skip,
}

impl fmt::Display for MissingIdentifierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingIdentifierPolicy::BlankCode => f.write_str("placed without a code"),
            MissingIdentifierPolicy::Skip => f.write_str("skipped"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutConfig {
    pub missing_identifier: MissingIdentifierPolicy,
}

impl LayoutConfig {
    pub fn with_missing_identifier(mut self, policy: MissingIdentifierPolicy) -> Self {
        self.missing_identifier = policy;
        self
    }
}
