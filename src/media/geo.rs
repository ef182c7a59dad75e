// SPDX-License-Identifier: MPL-2.0
//! Conversion of a GPS block into decimal coordinates and a map link.
//!
//! [`to_decimal`] does not apply the hemisphere references: a point in the
//! southern or western hemisphere comes out with a positive value. Callers
//! that want signed values use [`to_signed_decimal`].

use crate::config::DEFAULT_MAP_BASE_URL;
use crate::domain::metadata::{
    Coordinates, GeoInfo, TagValue, GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE,
    GPS_LONGITUDE_REF,
};
use crate::error::{Error, Result};

/// Converts the latitude and longitude (degrees, minutes, seconds) triples
/// to decimal degrees: `degrees + minutes / 60 + seconds / 3600`.
///
/// # Errors
///
/// Returns [`Error::MissingField`] if either triple is absent or is not
/// three numbers.
pub fn to_decimal(geo: &GeoInfo) -> Result<(f64, f64)> {
    let latitude = dms_to_decimal(geo.latitude(), GPS_LATITUDE)?;
    let longitude = dms_to_decimal(geo.longitude(), GPS_LONGITUDE)?;
    Ok((latitude, longitude))
}

/// Like [`to_decimal`], then negates the latitude for an `S` reference and
/// the longitude for a `W` reference. Missing references leave the value
/// positive.
pub fn to_signed_decimal(geo: &GeoInfo) -> Result<(f64, f64)> {
    let (latitude, longitude) = to_decimal(geo)?;
    Ok((
        apply_reference(latitude, geo.get(GPS_LATITUDE_REF), 'S'),
        apply_reference(longitude, geo.get(GPS_LONGITUDE_REF), 'W'),
    ))
}

/// [`to_decimal`] as a [`Coordinates`] value.
pub fn coordinates(geo: &GeoInfo) -> Result<Coordinates> {
    to_decimal(geo).map(Coordinates::from)
}

/// `https://www.google.it/maps?q=<lat>,<lon>` with the values printed as
/// plain floating-point text.
#[must_use]
pub fn to_map_link(latitude: f64, longitude: f64) -> String {
    to_map_link_with(DEFAULT_MAP_BASE_URL, latitude, longitude)
}

/// Map link on another map service.
#[must_use]
pub fn to_map_link_with(base_url: &str, latitude: f64, longitude: f64) -> String {
    Coordinates::new(latitude, longitude).map_link_with(base_url)
}

fn dms_to_decimal(value: Option<&TagValue>, field: &str) -> Result<f64> {
    let missing = || Error::MissingField(field.to_string());
    let parts = value.and_then(TagValue::as_sequence).ok_or_else(missing)?;
    let [degrees, minutes, seconds] = parts else {
        return Err(missing());
    };
    let degrees = degrees.as_f64().ok_or_else(missing)?;
    let minutes = minutes.as_f64().ok_or_else(missing)?;
    let seconds = seconds.as_f64().ok_or_else(missing)?;
    Ok(degrees + minutes / 60.0 + seconds / 3600.0)
}

fn apply_reference(value: f64, reference: Option<&TagValue>, negative: char) -> f64 {
    let is_negative = reference
        .and_then(TagValue::as_text)
        .and_then(|text| text.trim().chars().next())
        .is_some_and(|c| c.eq_ignore_ascii_case(&negative));
    if is_negative {
        -value
    } else {
        value
    }
}
