// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use hvac_notify::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Keep errors on screen a little longer
//! config.notifications.error_duration_ms = 10_000;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.notifications.error_duration_ms, 10_000);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "HvacNotify";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// Timing and layout knobs for the notification store and its renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub default_duration_ms: u64,
    pub error_duration_ms: u64,
    pub http_error_duration_ms: u64,
    pub max_visible: usize,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_DURATION_MS,
            error_duration_ms: DEFAULT_ERROR_DURATION_MS,
            http_error_duration_ms: DEFAULT_HTTP_ERROR_DURATION_MS,
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

impl NotificationSettings {
    /// Returns a copy with every value clamped into its valid range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            default_duration_ms: self.default_duration_ms.min(MAX_DURATION_MS),
            error_duration_ms: self.error_duration_ms.min(MAX_DURATION_MS),
            http_error_duration_ms: self.http_error_duration_ms.min(MAX_DURATION_MS),
            max_visible: self.max_visible.clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE),
        }
    }

    #[must_use]
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    #[must_use]
    pub fn error_duration(&self) -> Duration {
        Duration::from_millis(self.error_duration_ms)
    }

    #[must_use]
    pub fn http_error_duration(&self) -> Duration {
        Duration::from_millis(self.http_error_duration_ms)
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

/// Reads settings from `path`. Unparseable content yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content).unwrap_or_default();
    config.notifications = config.notifications.clamped();
    Ok(config)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
