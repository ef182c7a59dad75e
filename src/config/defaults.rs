// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.

// ==========================================================================
// Accepted Formats
// ==========================================================================

/// Extensions accepted at the presentation boundary (compared case-insensitively).
pub const DEFAULT_ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// ==========================================================================
// Map Link
// ==========================================================================

/// Base URL the decimal coordinates are appended to as `?q=<lat>,<lon>`.
pub const DEFAULT_MAP_BASE_URL: &str = "https://www.google.it/maps";

// ==========================================================================
// Logging
// ==========================================================================

/// Filter used by [`crate::logging::init`] when neither `RUST_LOG` nor the
/// configuration provides one.
pub const DEFAULT_LOG_FILTER: &str = "info";
