// SPDX-License-Identifier: MPL-2.0
//! Logging setup for embedding applications.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the host. [`init`] is a convenience for hosts that want the default
//! formatter.

use crate::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `filter`; when neither is set the
/// default filter is used. Returns false if a global subscriber was already
/// installed, in which case nothing changes.
pub fn init(filter: Option<&str>) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_LOG_FILTER)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

