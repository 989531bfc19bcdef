//! Physical units and named page sizes.
use crate::geometry::Size;
use serde::{Deserialize, Deserializer, de};
use std::fmt;
use std::str::FromStr;

const POINTS_PER_INCH: f32 = 72.0;
const MM_PER_INCH: f32 = 25.4;

/// The unit a label profile expresses its dimensions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    Millimeters,
    Inches,
    #[default]
    Points,
}

impl Unit {
    /// Converts `value` expressed in this unit into PDF points.
    pub fn to_points(self, value: f32) -> f32 {
        match self {
            Unit::Millimeters => value * POINTS_PER_INCH / MM_PER_INCH,
            Unit::Inches => value * POINTS_PER_INCH,
            Unit::Points => value,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Millimeters => "mm",
            Unit::Inches => "in",
            Unit::Points => "pt",
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(Unit::Millimeters),
            "in" | "inch" | "inches" => Ok(Unit::Inches),
            "pt" | "point" | "points" => Ok(Unit::Points),
            other => Err(format!("Unknown unit: '{}' (expected mm, in or pt)", other)),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A page size, resolved to absolute dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> Size {
        match self {
            PageSize::A4 => Size::new(595.28, 841.89),
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::Legal => Size::new(612.0, 1008.0),
            PageSize::Custom { width, height } => Size::new(*width, *height),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    /// Parses a page size name (e.g., "A4", "Letter", "Legal").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: '{}'", s)),
        }
    }
}

/// Accepts a size name, or a table with `width` and `height` for a custom
/// size.
impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => s.parse().map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}
