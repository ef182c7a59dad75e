// SPDX-License-Identifier: MPL-2.0
//! Port definition for reading image metadata.
//!
//! The session only knows this trait, so tests can swap in a reader that
//! never touches the file system.
//!
//! # Example
//!
//! ```no_run
//! use exif_lens::application::port::{ExifReader, MetadataReader};
//! use exif_lens::domain::media::ImageRef;
//!
//! let reader = ExifReader;
//! let metadata = reader.extract(&ImageRef::from("photo.jpg"))?;
//! println!("{} tags", metadata.tags.len());
//! # Ok::<(), exif_lens::error::Error>(())
//! ```

use crate::domain::media::ImageRef;
use crate::error::Result;
use crate::media::metadata::{self, ExtractedMetadata};

/// Source of file info, tags and GPS block for an image.
pub trait MetadataReader {
    /// Reads everything the session shows about `image`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageUnreadable`](crate::error::Error::ImageUnreadable)
    /// if the image cannot be opened or decoded.
    fn extract(&self, image: &ImageRef) -> Result<ExtractedMetadata>;
}

/// Reader backed by the image file on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl MetadataReader for ExifReader {
    fn extract(&self, image: &ImageRef) -> Result<ExtractedMetadata> {
        metadata::extract(image.path())
    }
}
