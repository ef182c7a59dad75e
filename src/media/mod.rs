// SPDX-License-Identifier: MPL-2.0
//! Metadata extraction from image files and GPS coordinate resolution.

pub mod geo;
pub mod metadata;
pub mod raw_tags;
pub mod tag_names;

// Re-export commonly used types
pub use geo::{to_decimal, to_map_link, to_signed_decimal};
pub use metadata::{extract, ExtractedMetadata};
