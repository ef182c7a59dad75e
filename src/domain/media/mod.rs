// SPDX-License-Identifier: MPL-2.0
//! Media domain types.

mod image_ref;

pub use image_ref::ImageRef;
