// SPDX-License-Identifier: MPL-2.0
//! Raw tag tables read from image files, before names are resolved.
//!
//! Two sources exist:
//! - numerically coded EXIF fields, read with `kamadak-exif`, where the GPS
//!   fields are regrouped under a single [`GPS_INFO_TAG`] sub-table;
//! - free-form PNG chunk info, keyed by name.
//!
//! A PNG text payload that fails to decode is kept as [`RawValue::Undecodable`]
//! so that the fault surfaces while tags are being normalized, not while the
//! file is read.

use crate::domain::metadata::TagValue;
use crate::error::{Error, Result};
use crate::media::tag_names::GPS_INFO_TAG;
use exif::{Context, In};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Key of a raw tag.
#[derive(Debug, Clone, PartialEq)]
pub enum RawKey {
    /// Numeric tag code
    Code(u16),
    /// Free-form key, used as the name verbatim
    Name(String),
}

/// Payload of a raw tag.
#[derive(Debug, Clone)]
pub enum RawValue {
    /// Undecoded EXIF field value
    Exif(exif::Value),
    /// Text payload that could not be decoded, with the reason
    Undecodable(String),
    /// Value that needs no further decoding
    Decoded(TagValue),
    /// Nested numerically coded table
    SubTable(Vec<RawTag>),
}

#[derive(Debug, Clone)]
pub struct RawTag {
    pub key: RawKey,
    pub value: RawValue,
}

impl RawTag {
    #[must_use]
    pub fn code(code: u16, value: RawValue) -> Self {
        Self {
            key: RawKey::Code(code),
            value,
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>, value: RawValue) -> Self {
        Self {
            key: RawKey::Name(name.into()),
            value,
        }
    }
}

// =============================================================================
// EXIF source
// =============================================================================

/// Reads the primary-image EXIF fields of `path`.
///
/// A file without an EXIF block yields an empty table. A block that is only
/// partly readable yields the fields that parsed.
pub fn read_exif_table(path: &Path) -> Result<Vec<RawTag>> {
    let file = File::open(path).map_err(|e| Error::unreadable(path, e))?;
    let mut reader = BufReader::new(file);
    let mut exif_reader = exif::Reader::new();
    exif_reader.continue_on_error(true);

    let exif = match exif_reader.read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            warn!(
                path = %path.display(),
                errors = errors.len(),
                "EXIF block partially unreadable"
            );
            exif
        }
        Err(exif::Error::NotFound(_)) => {
            debug!(path = %path.display(), "no EXIF block");
            return Ok(Vec::new());
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "EXIF block unreadable");
            return Ok(Vec::new());
        }
    };

    Ok(table_from_fields(exif.fields()))
}

/// Builds the raw table from parsed EXIF fields, in field order.
///
/// Thumbnail fields are dropped. GPS fields are moved into one
/// [`GPS_INFO_TAG`] sub-table placed where the first GPS field appeared.
pub fn table_from_fields<'a>(fields: impl IntoIterator<Item = &'a exif::Field>) -> Vec<RawTag> {
    let mut table = Vec::new();
    let mut gps = Vec::new();
    let mut gps_slot = None;

    for field in fields {
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        let entry = RawTag::code(field.tag.number(), RawValue::Exif(field.value.clone()));
        if matches!(field.tag.context(), Context::Gps) {
            gps_slot.get_or_insert(table.len());
            gps.push(entry);
        } else {
            table.push(entry);
        }
    }

    if let Some(slot) = gps_slot {
        table.insert(slot, RawTag::code(GPS_INFO_TAG, RawValue::SubTable(gps)));
    }
    table
}

// =============================================================================
// PNG source
// =============================================================================

const INCHES_PER_METRE: f64 = 0.0254;

/// Reads the free-form info of a PNG file.
pub fn read_png_info(path: &Path) -> Result<Vec<RawTag>> {
    let file = File::open(path).map_err(|e| Error::unreadable(path, e))?;
    png_info_from_reader(BufReader::new(file)).map_err(|e| Error::unreadable(path, e))
}

/// Decodes the PNG header chunks of `reader` and collects the info entries.
///
/// Only chunks before the image data are seen. Entries come grouped by kind:
/// `tEXt`, `zTXt` and `iTXt` keywords, then `dpi`, `gamma`, `srgb` and `exif`.
pub fn png_info_from_reader<R: Read>(
    reader: R,
) -> std::result::Result<Vec<RawTag>, png::DecodingError> {
    let reader = png::Decoder::new(reader).read_info()?;
    Ok(info_entries(reader.info()))
}

fn info_entries(info: &png::Info<'_>) -> Vec<RawTag> {
    let mut entries = Vec::new();

    for chunk in &info.uncompressed_latin1_text {
        entries.push(RawTag::named(
            chunk.keyword.clone(),
            RawValue::Decoded(TagValue::text(chunk.text.clone())),
        ));
    }
    for chunk in &info.compressed_latin1_text {
        entries.push(RawTag::named(chunk.keyword.clone(), text_value(chunk.get_text())));
    }
    for chunk in &info.utf8_text {
        entries.push(RawTag::named(chunk.keyword.clone(), text_value(chunk.get_text())));
    }

    // Unit metre only; an unspecified unit gives just the aspect ratio.
    if let Some(dims) = info.pixel_dims.filter(|dims| dims.unit == png::Unit::Meter) {
        let dpi = TagValue::Sequence(vec![
            TagValue::int((f64::from(dims.xppu) * INCHES_PER_METRE).round() as i64),
            TagValue::int((f64::from(dims.yppu) * INCHES_PER_METRE).round() as i64),
        ]);
        entries.push(RawTag::named("dpi", RawValue::Decoded(dpi)));
    }
    if let Some(gamma) = info.gama_chunk {
        entries.push(RawTag::named(
            "gamma",
            RawValue::Decoded(TagValue::float(f64::from(gamma.into_scaled()) / 100_000.0)),
        ));
    }
    if let Some(intent) = info.srgb {
        entries.push(RawTag::named(
            "srgb",
            RawValue::Decoded(TagValue::int(i64::from(intent as u8))),
        ));
    }
    if let Some(exif) = &info.exif_metadata {
        entries.push(RawTag::named(
            "exif",
            RawValue::Decoded(TagValue::bytes(exif.to_vec())),
        ));
    }

    entries
}

fn text_value(text: std::result::Result<String, png::DecodingError>) -> RawValue {
    match text {
        Ok(text) => RawValue::Decoded(TagValue::text(text)),
        Err(err) => {
            debug!(error = %err, "PNG text chunk could not be decoded");
            RawValue::Undecodable(err.to_string())
        }
    }
}
