// SPDX-License-Identifier: MPL-2.0
//! `exif_lens` keeps a list of opened images, extracts the file info and EXIF
//! tags of the selected one and turns its GPS block into decimal coordinates
//! and a map link.
//!
//! The presentation layer drives an [`application::ExifSession`] and
//! re-queries it whenever a subscribed handler fires.

#![doc(html_root_url = "https://docs.rs/exif_lens/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod image_registry;
pub mod logging;
pub mod media;

pub use application::{ExifReader, ExifSession, MetadataReader, SubscriptionId};
pub use error::{Error, Result};
pub use image_registry::ImageRegistry;
