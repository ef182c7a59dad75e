// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! Decoded tag values, the name-keyed tag map, the GPS sub-mapping and the
//! per-file information record.

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use std::fmt;

/// GPS sub-tag holding the latitude (degrees, minutes, seconds) triple.
pub const GPS_LATITUDE: &str = "GPSLatitude";
/// GPS sub-tag holding the longitude (degrees, minutes, seconds) triple.
pub const GPS_LONGITUDE: &str = "GPSLongitude";
/// GPS sub-tag holding `N` or `S`.
pub const GPS_LATITUDE_REF: &str = "GPSLatitudeRef";
/// GPS sub-tag holding `E` or `W`.
pub const GPS_LONGITUDE_REF: &str = "GPSLongitudeRef";

// =============================================================================
// Tag Values
// =============================================================================

/// A single decoded leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Rational { num: i64, den: i64 },
    Text(String),
    Bytes(Vec<u8>),
}

impl Scalar {
    /// Numeric value, if this scalar is a number with a non-zero denominator.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            Scalar::Rational { den: 0, .. } => None,
            Scalar::Rational { num, den } => Some(*num as f64 / *den as f64),
            Scalar::Text(_) | Scalar::Bytes(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Rational { num, den } => write!(f, "{num}/{den}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bytes(bytes) if bytes.len() > 16 => write!(f, "<{} bytes>", bytes.len()),
            Scalar::Bytes(bytes) => {
                let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
                write!(f, "[{}]", hex.join(" "))
            }
        }
    }
}

/// A decoded tag value.
///
/// Nested structures are explicit so a tree renderer can recurse without
/// inspecting runtime types.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Scalar(Scalar),
    Mapping(TagMap),
    Sequence(Vec<TagValue>),
}

impl TagValue {
    #[must_use]
    pub fn int(value: i64) -> Self {
        TagValue::Scalar(Scalar::Int(value))
    }

    #[must_use]
    pub fn float(value: f64) -> Self {
        TagValue::Scalar(Scalar::Float(value))
    }

    #[must_use]
    pub fn rational(num: i64, den: i64) -> Self {
        TagValue::Scalar(Scalar::Rational { num, den })
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        TagValue::Scalar(Scalar::Text(value.into()))
    }

    #[must_use]
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        TagValue::Scalar(Scalar::Bytes(value.into()))
    }

    /// Numeric value of a scalar; `None` for text, bytes and nested values.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Scalar(scalar) => scalar.as_f64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Scalar(Scalar::Text(s)) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[TagValue]> {
        match self {
            TagValue::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Scalar(scalar) => write!(f, "{scalar}"),
            TagValue::Sequence(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            TagValue::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// =============================================================================
// TagMap
// =============================================================================

/// Tag name to value mapping, in insertion order.
///
/// Inserting an existing name replaces its value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMap(IndexMap<String, TagValue>);

impl TagMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `name`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: TagValue) -> Option<TagValue> {
        self.0.insert(name.into(), value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, TagValue)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (K, TagValue)>>(iter: I) -> Self {
        let mut map = TagMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

// =============================================================================
// GeoInfo
// =============================================================================

/// The decoded GPS block of an image, keyed by GPS tag name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoInfo(TagMap);

impl GeoInfo {
    #[must_use]
    pub fn new(entries: TagMap) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &TagMap {
        &self.0
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.0.get(name)
    }

    #[must_use]
    pub fn latitude(&self) -> Option<&TagValue> {
        self.0.get(GPS_LATITUDE)
    }

    #[must_use]
    pub fn longitude(&self) -> Option<&TagValue> {
        self.0.get(GPS_LONGITUDE)
    }
}

impl From<TagMap> for GeoInfo {
    fn from(entries: TagMap) -> Self {
        Self(entries)
    }
}

// =============================================================================
// FileInfo
// =============================================================================

/// Basic information about an image file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    /// File name without directories
    pub name: String,
    /// Container format (e.g., "JPEG", "PNG")
    pub format: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// File size in bytes
    pub file_size: u64,
    /// Creation time, when the filesystem records one
    pub created: Option<DateTime<Local>>,
    /// Last modification time
    pub modified: Option<DateTime<Local>>,
}

impl FileInfo {
    /// Labelled rows for display, in a fixed order.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("File name", self.name.clone()),
            ("Format", self.format.clone()),
            ("Image size", format!("{} x {}", self.width, self.height)),
            ("File size", format_file_size(self.file_size)),
            ("Creation date", format_timestamp(self.created.as_ref())),
            ("Modification date", format_timestamp(self.modified.as_ref())),
        ]
    }
}

fn format_timestamp(timestamp: Option<&DateTime<Local>>) -> String {
    timestamp
        .map(|t| t.format("%a %b %e %H:%M:%S %Y").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Format file size in human-readable format.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

// =============================================================================
// Tests
// =============================================================================
