// SPDX-License-Identifier: MPL-2.0
//! Domain layer - image references and metadata value types.
//!
//! # Modules
//!
//! - [`media`]: Image references ([`ImageRef`](media::ImageRef))
//! - [`metadata`]: Tag values ([`TagValue`](metadata::TagValue),
//!   [`TagMap`](metadata::TagMap), [`GeoInfo`](metadata::GeoInfo)),
//!   [`FileInfo`](metadata::FileInfo) and [`Coordinates`](metadata::Coordinates)

pub mod media;
pub mod metadata;
