//! The record adapter: raw input rows to normalized label records.

use labelsheet_types::RecordUrl;
use std::collections::BTreeMap;

const DISCOGS_RELEASE_URL: &str = "https://www.discogs.com/release/";
const DISCOGS_SELL_ITEM_URL: &str = "https://www.discogs.com/sell/item/";

/// Name of the synthetic field combining media and sleeve condition.
pub const CONDITION_FIELD: &str = "condition";

const MEDIA_CONDITION_COLUMNS: [&str; 2] = ["media_condition", "Collection Media Condition"];
const SLEEVE_CONDITION_COLUMNS: [&str; 2] = ["sleeve_condition", "Collection Sleeve Condition"];

/// Which kind of export the rows come from. Decides the identifier column
/// and the URL the code points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportKind {
    /// A collection dump, one row per release.
    #[default]
    Collection,
    /// A marketplace inventory dump, one row per listing.
    Inventory,
}

impl ExportKind {
    pub fn identifier_column(self) -> &'static str {
        match self {
            ExportKind::Collection => "release_id",
            ExportKind::Inventory => "listing_id",
        }
    }

    fn url_prefix(self) -> &'static str {
        match self {
            ExportKind::Collection => DISCOGS_RELEASE_URL,
            ExportKind::Inventory => DISCOGS_SELL_ITEM_URL,
        }
    }
}

/// One input row: raw column name to raw value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 1-based position among the data rows of the source.
    pub number: usize,
    pub values: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Looks a column up by exact name, then case-insensitively, then
    /// ignoring case, spaces, dashes and underscores.
    pub fn get(&self, column: &str) -> Option<&str> {
        if let Some(v) = self.values.get(column) {
            return Some(v.as_str());
        }
        if let Some((_, v)) = self
            .values
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(column))
        {
            return Some(v.as_str());
        }
        let wanted = loose_key(column);
        self.values
            .iter()
            .find(|(k, _)| loose_key(k) == wanted)
            .map(|(_, v)| v.as_str())
    }

    fn get_non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }
}

fn loose_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A label's content, ready for layout.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Source row number, for reporting.
    pub row: usize,
    /// What the code encodes. May be empty.
    pub identifier: RecordUrl,
    /// Display strings in the profile's field order.
    pub field_values: Vec<String>,
}

impl NormalizedRecord {
    pub fn new(row: usize, identifier: impl Into<RecordUrl>, field_values: Vec<String>) -> Self {
        Self {
            row,
            identifier: identifier.into(),
            field_values,
        }
    }

    pub fn has_identifier(&self) -> bool {
        !self.identifier.is_empty()
    }
}

/// Maps one raw row to a [`NormalizedRecord`].
///
/// Never fails: absent fields become empty strings and an absent id becomes
/// an empty identifier.
pub fn adapt(row: &RawRow, field_order: &[String], kind: ExportKind) -> NormalizedRecord {
    let identifier = match row.get_non_empty(kind.identifier_column()) {
        Some(id) if id.starts_with("http://") || id.starts_with("https://") => RecordUrl::from(id),
        Some(id) => RecordUrl::from(format!("{}{}", kind.url_prefix(), id)),
        None => RecordUrl::empty(),
    };

    let field_values = field_order
        .iter()
        .map(|field| field_value(row, field))
        .collect();

    NormalizedRecord {
        row: row.number,
        identifier,
        field_values,
    }
}

fn field_value(row: &RawRow, field: &str) -> String {
    if let Some(value) = row.get(field) {
        return value.trim().to_string();
    }
    if field.eq_ignore_ascii_case(CONDITION_FIELD) {
        return condition_summary(row);
    }
    String::new()
}

fn condition_summary(row: &RawRow) -> String {
    let find = |columns: &[&str]| {
        columns
            .iter()
            .find_map(|c| row.get_non_empty(c))
            .unwrap_or("")
            .to_string()
    };
    let media = find(&MEDIA_CONDITION_COLUMNS);
    let sleeve = find(&SLEEVE_CONDITION_COLUMNS);
    if media.is_empty() && sleeve.is_empty() {
        String::new()
    } else {
        format!("v/s: {}/{}", media, sleeve)
    }
}
