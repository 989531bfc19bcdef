//! Raw configuration sections as they appear in the TOML file.
//!
//! Every top-level table is a section. Values are kept optional here so that
//! resolution can report a missing or out-of-range value with the section it
//! belongs to, instead of failing on the whole document.

use crate::error::ProfileError;
use crate::profile::GeneralDefaults;
use labelsheet_types::{PageSize, Unit};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// What a configuration section describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Process-wide defaults merged into every profile.
    General,
    /// A label sheet description.
    Profile,
}

impl SectionKind {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "general" => Some(SectionKind::General),
            "profile" => Some(SectionKind::Profile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawSection {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub rows: Option<i64>,
    pub columns: Option<i64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub unit: Option<Unit>,
    /// A size name, or `{ width, height }` in the section's `unit`.
    #[serde(alias = "pagesize")]
    pub page_size: Option<PageSize>,
    pub fields: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub swap_columns: Option<bool>,
    pub code_fraction: Option<f64>,
}

impl RawSection {
    pub fn kind(&self) -> Option<SectionKind> {
        self.kind.as_deref().and_then(SectionKind::from_name)
    }
}

/// Accepts TOML booleans as well as the `yes`/`no` spelling older
/// configuration files use.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagDef {
        Bool(bool),
        Str(String),
    }

    match Option::<FlagDef>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FlagDef::Bool(b)) => Ok(Some(b)),
        Some(FlagDef::Str(s)) => match s.trim().to_lowercase().as_str() {
            "yes" | "true" | "on" | "1" => Ok(Some(true)),
            "no" | "false" | "off" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected yes/no or a boolean, got '{}'",
                other
            ))),
        },
    }
}

/// A parsed configuration file: named sections in name order.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub sections: BTreeMap<String, RawSection>,
}

impl ConfigFile {
    pub fn from_toml_str(source: &str) -> Result<Self, ProfileError> {
        let sections: BTreeMap<String, RawSection> = toml::from_str(source)?;
        for (name, section) in &sections {
            match (&section.kind, section.kind()) {
                (None, _) => log::warn!("Section '{}' has no type and will be ignored", name),
                (Some(kind), None) => {
                    log::warn!("Section '{}' has unknown type '{}' and will be ignored", name, kind)
                }
                _ => {}
            }
        }
        Ok(Self { sections })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to read configuration from '{}': {}", path.display(), e),
            )
        })?;
        Self::from_toml_str(&source)
    }

    /// Names of all `profile`-typed sections, sorted.
    pub fn profile_names(&self) -> Vec<String> {
        self.profiles().map(|(name, _)| name.to_string()).collect()
    }

    /// All `profile`-typed sections with their names, sorted by name.
    pub fn profiles(&self) -> impl Iterator<Item = (&str, &RawSection)> {
        self.sections
            .iter()
            .filter(|(_, s)| s.kind() == Some(SectionKind::Profile))
            .map(|(name, s)| (name.as_str(), s))
    }

    /// Defaults from the `general`-typed sections. Later sections (by name)
    /// override earlier ones.
    pub fn general_defaults(&self) -> GeneralDefaults {
        self.sections
            .values()
            .filter(|s| s.kind() == Some(SectionKind::General))
            .fold(GeneralDefaults::default(), |mut defaults, section| {
                if let Some(swap) = section.swap_columns {
                    defaults.swap_columns = swap;
                }
                defaults
            })
    }
}
