// SPDX-License-Identifier: MPL-2.0
//! Application layer - the session the presentation layer talks to.
//!
//! - [`port`]: Trait definitions for the metadata source
//! - [`session`]: Registry, derived data of the selection and change notifications
//!
//! # Dependency Rule
//!
//! The application layer depends on the domain layer and on the
//! [`MetadataReader`] port. The `media` module provides the real reader.

pub mod port;
pub mod session;

pub use port::{ExifReader, MetadataReader};
pub use session::{ExifSession, SubscriptionId};
