// SPDX-License-Identifier: MPL-2.0
//! Decimal coordinate pair.

use crate::config::DEFAULT_MAP_BASE_URL;

/// Latitude and longitude in decimal degrees.
///
/// No range clamping is applied: values are exactly what the conversion
/// produced.
///
/// # Example
///
/// ```
/// use exif_lens::domain::metadata::Coordinates;
///
/// let rome = Coordinates::new(41.9025, 12.4964);
/// assert_eq!(rome.map_link(), "https://www.google.it/maps?q=41.9025,12.4964");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Formats the coordinates as a human-readable string.
    ///
    /// Format: "48.856600° N, 2.352200° E"
    #[must_use]
    pub fn format(&self) -> String {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        format!(
            "{:.6}° {}, {:.6}° {}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }

    /// Map URL on the default map service.
    #[must_use]
    pub fn map_link(&self) -> String {
        self.map_link_with(DEFAULT_MAP_BASE_URL)
    }

    /// Map URL on the given service: `<base>?q=<lat>,<lon>`.
    #[must_use]
    pub fn map_link_with(&self, base_url: &str) -> String {
        format!("{}?q={},{}", base_url, self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}
