use crate::config::{ConfigFile, RawSection, SectionKind};
use crate::error::ProfileError;
use crate::profile::{DEFAULT_CODE_FRACTION, DEFAULT_FIELDS, FIELD_DELIMITER, Profile};
use labelsheet_types::{PageSize, Unit};

/// Resolves the profile called `name` from `config`.
///
/// The `general` defaults are merged in unless the profile section sets the
/// value itself. Fails before any layout work if the profile is absent or
/// incomplete.
pub fn resolve_profile(name: &str, config: &ConfigFile) -> Result<Profile, ProfileError> {
    let section = config
        .sections
        .get(name)
        .ok_or_else(|| ProfileError::NotFound {
            name: name.to_string(),
            available: config.profile_names(),
        })?;

    match section.kind() {
        Some(SectionKind::Profile) => {}
        Some(SectionKind::General) => {
            return Err(ProfileError::configuration(
                name,
                "section is of type 'general', not 'profile'",
            ));
        }
        None => {
            return Err(ProfileError::configuration(
                name,
                "section has no valid type (expected type = \"profile\")",
            ));
        }
    }

    let defaults = config.general_defaults();

    let rows = require_count(name, "rows", section.rows)?;
    let columns = require_count(name, "columns", section.columns)?;
    let label_width = require_length(name, "width", section.width)?;
    let label_height = require_length(name, "height", section.height)?;

    let unit = section.unit.unwrap_or_default();
    let page_size = section
        .page_size
        .map(|size| custom_page_size_in_points(name, size, unit))
        .transpose()?;

    let fields = parse_fields(name, section)?;

    let code_fraction = match section.code_fraction {
        Some(f) if f > 0.0 && f < 1.0 => f as f32,
        Some(f) => {
            return Err(ProfileError::configuration(
                name,
                format!("'code-fraction' must lie strictly between 0 and 1, got {}", f),
            ));
        }
        None => DEFAULT_CODE_FRACTION,
    };

    let profile = Profile {
        name: name.to_string(),
        description: section.description.clone().unwrap_or_default(),
        rows,
        columns,
        label_width,
        label_height,
        unit,
        page_size,
        fields,
        swap_columns: section.swap_columns.unwrap_or(defaults.swap_columns),
        code_fraction,
    };
    profile
        .validate()
        .map_err(|e| ProfileError::configuration(name, e))?;

    log::debug!(
        "Resolved profile '{}': {}x{} labels of {}x{}{}, fields {:?}, swap_columns={}",
        profile.name,
        profile.rows,
        profile.columns,
        profile.label_width,
        profile.label_height,
        profile.unit,
        profile.fields,
        profile.swap_columns
    );
    Ok(profile)
}

fn require_count(section: &str, key: &str, value: Option<i64>) -> Result<u32, ProfileError> {
    match value {
        None => Err(ProfileError::configuration(
            section,
            format!("required value '{}' is missing", key),
        )),
        Some(v) if v <= 0 => Err(ProfileError::configuration(
            section,
            format!("'{}' must be a positive integer, got {}", key, v),
        )),
        Some(v) => u32::try_from(v).map_err(|_| {
            ProfileError::configuration(section, format!("'{}' is too large: {}", key, v))
        }),
    }
}

fn require_length(section: &str, key: &str, value: Option<f64>) -> Result<f32, ProfileError> {
    match value {
        None => Err(ProfileError::configuration(
            section,
            format!("required value '{}' is missing", key),
        )),
        Some(v) if !(v.is_finite() && v > 0.0) => Err(ProfileError::configuration(
            section,
            format!("'{}' must be a positive number, got {}", key, v),
        )),
        Some(v) => Ok(v as f32),
    }
}

/// Custom page sizes are written in the profile's unit; named sizes are
/// already in points.
fn custom_page_size_in_points(
    section: &str,
    size: PageSize,
    unit: Unit,
) -> Result<PageSize, ProfileError> {
    let PageSize::Custom { width, height } = size else {
        return Ok(size);
    };
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(ProfileError::configuration(
            section,
            format!("'page-size' must be positive, got {}x{}", width, height),
        ));
    }
    Ok(PageSize::Custom {
        width: unit.to_points(width),
        height: unit.to_points(height),
    })
}

fn parse_fields(section_name: &str, section: &RawSection) -> Result<Vec<String>, ProfileError> {
    let Some(raw) = &section.fields else {
        return Ok(DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect());
    };
    let fields: Vec<String> = raw
        .split(FIELD_DELIMITER)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    if fields.is_empty() {
        return Err(ProfileError::configuration(
            section_name,
            "'fields' is set but names no field",
        ));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelsheet_types::Size;

    fn config(source: &str) -> ConfigFile {
        ConfigFile::from_toml_str(source).unwrap()
    }

    const SHEET: &str = r#"
        [general]
        type = "general"
        swap-columns = true

        [a4-24]
        type = "profile"
        description = "24 labels on A4"
        rows = 8
        columns = 3
        width = 70
        height = 37
        unit = "mm"
        page-size = "A4"
        fields = "artist:title:condition"

        [a4-24-plain]
        type = "profile"
        rows = 8
        columns = 3
        width = 70
        height = 37
        unit = "mm"
        page-size = "A4"
        swap-columns = false
    "#;

    #[test]
    fn test_resolves_full_profile() {
        let p = resolve_profile("a4-24", &config(SHEET)).unwrap();
        assert_eq!(p.rows, 8);
        assert_eq!(p.columns, 3);
        assert_eq!(p.unit, Unit::Millimeters);
        assert_eq!(p.page_size, Some(PageSize::A4));
        assert_eq!(p.fields, vec!["artist", "title", "condition"]);
        assert_eq!(p.description, "24 labels on A4");
        assert_eq!(p.code_fraction, DEFAULT_CODE_FRACTION);
    }

    #[test]
    fn test_general_defaults_merged() {
        let p = resolve_profile("a4-24", &config(SHEET)).unwrap();
        assert!(p.swap_columns);
    }

    #[test]
    fn test_profile_overrides_general_defaults() {
        let p = resolve_profile("a4-24-plain", &config(SHEET)).unwrap();
        assert!(!p.swap_columns);
        assert_eq!(p.fields, vec!["artist", "title"]);
    }

    #[test]
    fn test_unknown_profile_lists_available() {
        let err = resolve_profile("nope", &config(SHEET)).unwrap_err();
        match err {
            ProfileError::NotFound { name, available } => {
                assert_eq!(name, "nope");
                assert_eq!(available, vec!["a4-24", "a4-24-plain"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_rows_is_configuration_error() {
        let source = r#"
            [broken]
            type = "profile"
            columns = 3
            width = 70
            height = 37
        "#;
        let err = resolve_profile("broken", &config(source)).unwrap_err();
        match err {
            ProfileError::Configuration { section, message } => {
                assert_eq!(section, "broken");
                assert!(message.contains("rows"), "message was: {message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_positive_values_rejected() {
        for (key, line) in [
            ("columns", "columns = 0"),
            ("rows", "rows = -2"),
            ("width", "width = 0"),
        ] {
            let mut source = String::from("[p]\ntype = \"profile\"\n");
            for default in ["rows = 1", "columns = 1", "width = 10", "height = 10"] {
                if !default.starts_with(key) {
                    source.push_str(default);
                    source.push('\n');
                }
            }
            source.push_str(line);
            source.push('\n');
            let err = resolve_profile("p", &config(&source)).unwrap_err();
            assert!(
                matches!(err, ProfileError::Configuration { .. }),
                "{key}: unexpected {err}"
            );
        }
    }

    #[test]
    fn test_general_section_is_not_a_profile() {
        let err = resolve_profile("general", &config(SHEET)).unwrap_err();
        assert!(matches!(err, ProfileError::Configuration { .. }));
    }

    #[test]
    fn test_custom_page_size_uses_profile_unit() {
        let source = r#"
            [roll]
            type = "profile"
            rows = 2
            columns = 1
            width = 50
            height = 25
            unit = "mm"
            page-size = { width = 60, height = 60 }
        "#;
        let p = resolve_profile("roll", &config(source)).unwrap();
        let expected = Unit::Millimeters.to_points(60.0);
        assert_eq!(
            p.page_size,
            Some(PageSize::Custom { width: expected, height: expected })
        );
        assert_eq!(p.page_size_pt(), Size::new(expected, expected));
    }

    #[test]
    fn test_non_positive_custom_page_size_rejected() {
        let source = "[p]\ntype = \"profile\"\nrows = 1\ncolumns = 1\nwidth = 1\nheight = 1\npage-size = { width = 0, height = 10 }\n";
        let err = resolve_profile("p", &config(source)).unwrap_err();
        assert!(matches!(err, ProfileError::Configuration { .. }));
    }

    #[test]
    fn test_blank_fields_rejected() {
        let source = "[p]\ntype = \"profile\"\nrows = 1\ncolumns = 1\nwidth = 1\nheight = 1\nfields = \"::\"\n";
        let err = resolve_profile("p", &config(source)).unwrap_err();
        assert!(matches!(err, ProfileError::Configuration { .. }));
    }

    #[test]
    fn test_single_label_profile_without_page_size() {
        let source = r#"
            [dymo]
            type = "profile"
            rows = 1
            columns = 1
            width = 2
            height = 1
            unit = "in"
        "#;
        let p = resolve_profile("dymo", &config(source)).unwrap();
        assert!(p.is_single_label());
        assert_eq!(p.page_size, None);
        assert_eq!(p.page_size_pt(), Size::new(144.0, 72.0));
    }

    #[test]
    fn test_code_fraction_out_of_range() {
        let source = "[p]\ntype = \"profile\"\nrows = 1\ncolumns = 1\nwidth = 1\nheight = 1\ncode-fraction = 1.5\n";
        let err = resolve_profile("p", &config(source)).unwrap_err();
        assert!(matches!(err, ProfileError::Configuration { .. }));
    }
}
