// SPDX-License-Identifier: MPL-2.0
//! This module handles the library's configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use exif_lens::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.log_filter = Some("exif_lens=debug".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{DEFAULT_ACCEPTED_EXTENSIONS, DEFAULT_LOG_FILTER, DEFAULT_MAP_BASE_URL};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ExifLens";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub accepted_extensions: Vec<String>,
    pub map_base_url: String,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accepted_extensions: DEFAULT_ACCEPTED_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            map_base_url: DEFAULT_MAP_BASE_URL.to_string(),
            log_filter: None,
        }
    }
}

impl Config {
    /// Returns true if `path` has one of the accepted extensions, ignoring case.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.accepted_extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
