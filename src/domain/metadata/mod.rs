// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! Pure data: decoded tag values, the GPS sub-mapping, per-file information
//! and the decimal coordinate pair. Extraction lives in [`crate::media`].

mod coordinates;
mod tree;
mod types;

pub use coordinates::Coordinates;
pub use tree::{tree_rows, TreeRow};
pub use types::{
    format_file_size, FileInfo, GeoInfo, Scalar, TagMap, TagValue, GPS_LATITUDE,
    GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF,
};
