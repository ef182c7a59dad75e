// SPDX-License-Identifier: MPL-2.0
//! Image metadata extraction: file info, named tags and the GPS block.
//!
//! [`extract`] reads one image and returns its [`FileInfo`], a [`TagMap`] of
//! human-readable tag names and, when the image carries one, the decoded GPS
//! block as [`GeoInfo`]. It is a pure function of the path.

use crate::domain::metadata::{FileInfo, GeoInfo, TagMap, TagValue};
use crate::error::{Error, Result};
use crate::media::raw_tags::{self, RawKey, RawTag, RawValue};
use crate::media::tag_names::{exif_tag_name, gps_tag_name, GPS_INFO_NAME};
use chrono::{DateTime, Local};
use image_rs::{ImageFormat, ImageReader};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Everything extracted from one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMetadata {
    pub file_info: FileInfo,
    pub tags: TagMap,
    /// `None` when the image has no GPS block
    pub geo: Option<GeoInfo>,
}

/// Result of resolving a raw table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTags {
    pub tags: TagMap,
    pub geo: Option<GeoInfo>,
    /// The decoding fault that cut normalization short, if any
    pub fault: Option<Error>,
}

/// Extract file info, tags and GPS block from an image file.
///
/// PNG files expose free-form chunk info which is used directly as the tag
/// source; other formats use their EXIF block.
///
/// # Errors
///
/// Returns [`Error::ImageUnreadable`] if the file cannot be opened or its
/// format and dimensions cannot be decoded. Tag decoding faults are logged
/// and yield a partial result instead.
pub fn extract<P: AsRef<Path>>(path: P) -> Result<ExtractedMetadata> {
    let path = path.as_ref();
    let (file_info, format) = read_file_info(path)?;

    let table = if format == ImageFormat::Png {
        raw_tags::read_png_info(path)?
    } else {
        raw_tags::read_exif_table(path)?
    };

    let NormalizedTags { tags, geo, fault } = normalize_tags(table);
    if let Some(fault) = fault {
        warn!(path = %path.display(), error = %fault, "metadata extracted partially");
    }
    debug!(
        path = %path.display(),
        format = %file_info.format,
        tags = tags.len(),
        has_gps = geo.is_some(),
        "metadata extracted"
    );

    Ok(ExtractedMetadata {
        file_info,
        tags,
        geo,
    })
}

/// Reads name, format, pixel size, size on disk and timestamps of `path`.
pub fn read_file_info(path: &Path) -> Result<(FileInfo, ImageFormat)> {
    let reader = ImageReader::open(path)
        .map_err(|e| Error::unreadable(path, e))?
        .with_guessed_format()
        .map_err(|e| Error::unreadable(path, e))?;
    let format = reader
        .format()
        .ok_or_else(|| Error::unreadable(path, "unrecognized image format"))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| Error::unreadable(path, e))?;

    let fs_metadata = fs::metadata(path).map_err(|e| Error::unreadable(path, e))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let info = FileInfo {
        name,
        format: format_name(format),
        width,
        height,
        file_size: fs_metadata.len(),
        created: fs_metadata.created().ok().map(DateTime::<Local>::from),
        modified: fs_metadata.modified().ok().map(DateTime::<Local>::from),
    };
    Ok((info, format))
}

fn format_name(format: ImageFormat) -> String {
    format!("{format:?}").to_uppercase()
}

/// Resolves a raw table into named tags and the GPS block.
///
/// Codes are named through the EXIF table; codes without a name keep their
/// decimal code as the key. The entry named `GPSInfo` holding a sub-table is
/// not added to the tags: its entries are named through the GPS table and
/// become the GPS block. A later tag with an already present name overwrites
/// the earlier value.
///
/// A text decoding fault stops the walk; what was accumulated so far is
/// returned together with the fault.
pub fn normalize_tags(table: Vec<RawTag>) -> NormalizedTags {
    let mut normalized = NormalizedTags::default();

    for raw in table {
        let name = resolve_name(raw.key, exif_tag_name);
        let outcome = match raw.value {
            RawValue::SubTable(entries) if name == GPS_INFO_NAME => {
                decode_table(entries, gps_tag_name).map(|gps| {
                    normalized.geo = Some(GeoInfo::new(gps));
                })
            }
            value => decode_value(value).map(|value| {
                normalized.tags.insert(name, value);
            }),
        };

        if let Err(fault) = outcome {
            warn!(
                error = %fault,
                kept = normalized.tags.len(),
                "tag decoding stopped, keeping partial result"
            );
            normalized.fault = Some(fault);
            break;
        }
    }

    normalized
}

fn resolve_name(key: RawKey, names: fn(u16) -> Option<&'static str>) -> String {
    match key {
        RawKey::Code(code) => names(code)
            .map(str::to_owned)
            .unwrap_or_else(|| code.to_string()),
        RawKey::Name(name) => name,
    }
}

fn decode_table(entries: Vec<RawTag>, names: fn(u16) -> Option<&'static str>) -> Result<TagMap> {
    let mut map = TagMap::new();
    for entry in entries {
        let name = resolve_name(entry.key, names);
        map.insert(name, decode_value(entry.value)?);
    }
    Ok(map)
}

fn decode_value(value: RawValue) -> Result<TagValue> {
    match value {
        RawValue::Exif(value) => decode_exif_value(&value),
        RawValue::Undecodable(reason) => Err(Error::TagDecoding(reason)),
        RawValue::Decoded(value) => Ok(value),
        RawValue::SubTable(entries) => decode_table(entries, exif_tag_name).map(TagValue::Mapping),
    }
}

/// Converts an EXIF field value. Single-element arrays collapse to a scalar.
fn decode_exif_value(value: &exif::Value) -> Result<TagValue> {
    use exif::Value;

    let decoded = match value {
        Value::Byte(v) => collapse(v.iter().map(|&b| TagValue::int(i64::from(b)))),
        Value::SByte(v) => collapse(v.iter().map(|&b| TagValue::int(i64::from(b)))),
        Value::Short(v) => collapse(v.iter().map(|&n| TagValue::int(i64::from(n)))),
        Value::SShort(v) => collapse(v.iter().map(|&n| TagValue::int(i64::from(n)))),
        Value::Long(v) => collapse(v.iter().map(|&n| TagValue::int(i64::from(n)))),
        Value::SLong(v) => collapse(v.iter().map(|&n| TagValue::int(i64::from(n)))),
        Value::Rational(v) => collapse(
            v.iter()
                .map(|r| TagValue::rational(i64::from(r.num), i64::from(r.denom))),
        ),
        Value::SRational(v) => collapse(
            v.iter()
                .map(|r| TagValue::rational(i64::from(r.num), i64::from(r.denom))),
        ),
        Value::Float(v) => collapse(v.iter().map(|&x| TagValue::float(f64::from(x)))),
        Value::Double(v) => collapse(v.iter().map(|&x| TagValue::float(x))),
        Value::Ascii(lines) => collapse(lines.iter().map(|line| TagValue::text(latin1(line)))),
        Value::Undefined(bytes, _) => TagValue::bytes(bytes.clone()),
        Value::Unknown(kind, count, offset) => {
            debug!(kind, count, offset, "EXIF value of unknown type kept as empty bytes");
            TagValue::bytes(Vec::new())
        }
    };
    Ok(decoded)
}

fn collapse(items: impl IntoIterator<Item = TagValue>) -> TagValue {
    let mut items: Vec<TagValue> = items.into_iter().collect();
    if items.len() == 1 {
        items.remove(0)
    } else {
        TagValue::Sequence(items)
    }
}

/// EXIF ASCII as Latin-1, so any byte maps to a character. Trailing NULs
/// are dropped.
fn latin1(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |idx| idx + 1);
    bytes[..end].iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::{GPS_LATITUDE, GPS_LATITUDE_REF};
    use crate::media::tag_names::GPS_INFO_TAG;
    use exif::{Rational, Value};
    use tracing_test::traced_test;

    fn exif(value: Value) -> RawValue {
        RawValue::Exif(value)
    }

    fn ascii(text: &str) -> RawValue {
        exif(Value::Ascii(vec![text.as_bytes().to_vec()]))
    }

    fn gps_block() -> RawTag {
        RawTag::code(
            GPS_INFO_TAG,
            RawValue::SubTable(vec![
                RawTag::code(0x01, ascii("N")),
                RawTag::code(
                    0x02,
                    exif(Value::Rational(vec![
                        Rational { num: 41, denom: 1 },
                        Rational { num: 54, denom: 1 },
                        Rational { num: 9, denom: 1 },
                    ])),
                ),
            ]),
        )
    }

    #[test]
    fn codes_resolve_to_names() {
        let normalized = normalize_tags(vec![
            RawTag::code(0x010F, ascii("Canon")),
            RawTag::code(0x0112, exif(Value::Short(vec![6]))),
        ]);
        assert_eq!(normalized.tags.get("Make"), Some(&TagValue::text("Canon")));
        assert_eq!(normalized.tags.get("Orientation"), Some(&TagValue::int(6)));
        assert!(normalized.geo.is_none());
        assert!(normalized.fault.is_none());
    }

    #[test]
    fn unknown_code_is_kept_under_its_number() {
        let normalized = normalize_tags(vec![RawTag::code(0xBEEF, exif(Value::Long(vec![7])))]);
        assert_eq!(normalized.tags.get("48879"), Some(&TagValue::int(7)));
    }

    #[test]
    fn gps_block_becomes_geo_info_not_a_tag() {
        let normalized = normalize_tags(vec![RawTag::code(0x010F, ascii("Canon")), gps_block()]);

        assert!(!normalized.tags.contains_key(GPS_INFO_NAME));
        let geo = normalized.geo.expect("GPS block");
        assert_eq!(geo.get(GPS_LATITUDE_REF), Some(&TagValue::text("N")));
        assert_eq!(
            geo.get(GPS_LATITUDE),
            Some(&TagValue::Sequence(vec![
                TagValue::rational(41, 1),
                TagValue::rational(54, 1),
                TagValue::rational(9, 1),
            ]))
        );
    }

    #[test]
    fn later_duplicate_name_overwrites_earlier() {
        let normalized = normalize_tags(vec![
            RawTag::code(0x920B, exif(Value::Short(vec![1]))),
            RawTag::code(0xA20B, exif(Value::Short(vec![2]))),
        ]);
        assert_eq!(normalized.tags.len(), 1);
        assert_eq!(normalized.tags.get("FlashEnergy"), Some(&TagValue::int(2)));
    }

    #[test]
    fn multi_value_fields_become_sequences() {
        let normalized = normalize_tags(vec![RawTag::code(
            0x0102,
            exif(Value::Short(vec![8, 8, 8])),
        )]);
        assert_eq!(
            normalized.tags.get("BitsPerSample"),
            Some(&TagValue::Sequence(vec![
                TagValue::int(8),
                TagValue::int(8),
                TagValue::int(8)
            ]))
        );
    }

    #[test]
    fn undefined_payload_is_kept_as_bytes() {
        let normalized = normalize_tags(vec![RawTag::code(
            0x9000,
            exif(Value::Undefined(b"0232".to_vec(), 0)),
        )]);
        assert_eq!(normalized.tags.get("ExifVersion"), Some(&TagValue::bytes(b"0232".to_vec())));
    }

    #[test]
    fn free_form_names_pass_through() {
        let normalized = normalize_tags(vec![
            RawTag::named("Software", RawValue::Decoded(TagValue::text("GIMP"))),
            RawTag::named("Title", RawValue::Decoded(TagValue::text("Città"))),
        ]);
        assert_eq!(normalized.tags.get("Software"), Some(&TagValue::text("GIMP")));
        assert_eq!(normalized.tags.get("Title"), Some(&TagValue::text("Città")));
    }

    #[test]
    #[traced_test]
    fn decoding_fault_keeps_partial_result() {
        let normalized = normalize_tags(vec![
            RawTag::code(0x010F, ascii("Canon")),
            gps_block(),
            RawTag::named("Title", RawValue::Undecodable("corrupt deflate stream".to_string())),
            RawTag::code(0x0131, ascii("never reached")),
        ]);

        assert_eq!(normalized.tags.get("Make"), Some(&TagValue::text("Canon")));
        assert!(!normalized.tags.contains_key("Title"));
        assert!(!normalized.tags.contains_key("Software"));
        assert!(normalized.geo.is_some());
        assert!(matches!(normalized.fault, Some(Error::TagDecoding(_))));
        assert!(logs_contain("tag decoding stopped"));
    }

    #[test]
    fn fault_inside_gps_block_drops_the_block() {
        let normalized = normalize_tags(vec![
            RawTag::code(0x010F, ascii("Canon")),
            RawTag::code(
                GPS_INFO_TAG,
                RawValue::SubTable(vec![RawTag::code(
                    0x1B,
                    RawValue::Undecodable("bad text".to_string()),
                )]),
            ),
        ]);
        assert_eq!(normalized.tags.len(), 1);
        assert!(normalized.geo.is_none());
        assert!(normalized.fault.is_some());
    }

    #[test]
    fn trailing_nuls_are_trimmed_from_text() {
        assert_eq!(latin1(b"Nikon\0\0"), "Nikon");
        assert_eq!(latin1(b"\0"), "");
    }

    #[test]
    fn ascii_with_latin1_bytes_does_not_stop_normalization() {
        let normalized = normalize_tags(vec![
            RawTag::code(0x010F, ascii("Canon")),
            RawTag::code(0x013B, exif(Value::Ascii(vec![b"Jos\xe9".to_vec()]))),
            RawTag::code(0x8298, ascii("(c) 2024")),
            gps_block(),
        ]);

        assert!(normalized.fault.is_none());
        assert_eq!(normalized.tags.get("Artist"), Some(&TagValue::text("José")));
        assert_eq!(normalized.tags.get("Copyright"), Some(&TagValue::text("(c) 2024")));
        assert!(normalized.geo.is_some());
    }

    #[test]
    fn unknown_value_type_becomes_empty_bytes() {
        let normalized = normalize_tags(vec![RawTag::code(0x010F, exif(Value::Unknown(99, 1, 0)))]);
        assert_eq!(normalized.tags.get("Make"), Some(&TagValue::bytes(Vec::new())));
        assert!(normalized.fault.is_none());
    }

    #[test]
    fn extract_handles_missing_file() {
        let result = extract("/nonexistent/path/image.jpg");
        assert!(matches!(result, Err(Error::ImageUnreadable { .. })));
    }

    #[test]
    fn extract_rejects_non_image_content() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("corrupt.jpg");
        fs::write(&path, b"not an image").expect("write");

        let result = extract(&path);
        assert!(matches!(result, Err(Error::ImageUnreadable { .. })));
    }

    #[test]
    fn extract_png_without_metadata() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("plain.png");
        image_rs::RgbImage::new(3, 2).save(&path).expect("save png");

        let extracted = extract(&path).expect("extract");
        assert_eq!(extracted.file_info.name, "plain.png");
        assert_eq!(extracted.file_info.format, "PNG");
        assert_eq!((extracted.file_info.width, extracted.file_info.height), (3, 2));
        assert!(extracted.file_info.file_size > 0);
        assert!(extracted.file_info.modified.is_some());
        assert!(extracted.geo.is_none());
    }
}
