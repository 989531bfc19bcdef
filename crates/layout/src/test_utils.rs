use labelsheet_profile::Profile;
use labelsheet_source::NormalizedRecord;
use labelsheet_types::Unit;

/// `count` records with identifiers, numbered from row 1.
pub fn records(count: usize) -> Vec<NormalizedRecord> {
    (1..=count).map(record).collect()
}

pub fn record(row: usize) -> NormalizedRecord {
    NormalizedRecord::new(
        row,
        format!("https://www.discogs.com/release/{}", row),
        vec![format!("Artist {}", row), format!("Title {}", row)],
    )
}

pub fn record_without_identifier(row: usize) -> NormalizedRecord {
    NormalizedRecord::new(row, "", vec![format!("Artist {}", row), String::new()])
}

/// The 8x3 A4 sheet of 70x37mm labels.
pub fn a4_24() -> Profile {
    Profile::new("a4-24", 8, 3, 70.0, 37.0, Unit::Millimeters)
        .with_page_size(labelsheet_types::PageSize::A4)
}

pub fn single_label() -> Profile {
    Profile::new("dymo", 1, 1, 89.0, 36.0, Unit::Millimeters)
}
