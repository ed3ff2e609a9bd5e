// SPDX-License-Identifier: MPL-2.0
//! This module handles the toast manager's configuration, including loading and
//! saving settings to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use hx_toast::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.default_duration_ms = 4_000;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::{
    DEFAULT_BASE_URL, DEFAULT_CONTAINER_ID, DEFAULT_DURATION_MS, DEFAULT_EXIT_ANIMATION_MS,
    FALLBACK_LANGUAGE, MAX_EXIT_ANIMATION_MS,
};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "HxToast";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin serving `GET /toast/{kind}`.
    pub base_url: String,
    pub default_duration_ms: u64,
    pub exit_animation_ms: u64,
    pub container_id: String,
    /// Initial document language (BCP 47).
    pub language: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_duration_ms: DEFAULT_DURATION_MS,
            exit_animation_ms: DEFAULT_EXIT_ANIMATION_MS,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            language: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// Exit animation delay, clamped to [`MAX_EXIT_ANIMATION_MS`].
    #[must_use]
    pub fn exit_animation(&self) -> Duration {
        Duration::from_millis(self.exit_animation_ms.min(MAX_EXIT_ANIMATION_MS))
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
            log::warn!("Ignoring invalid config at {}: {err}", path.display());
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            base_url: "https://example.test".to_string(),
            default_duration_ms: 2_500,
            exit_animation_ms: 150,
            container_id: "notices".to_string(),
            language: Some("ar".to_string()),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "default_duration_ms = 1000\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.default_duration_ms, 1_000);
        assert_eq!(loaded.container_id, DEFAULT_CONTAINER_ID);
        assert_eq!(loaded.exit_animation_ms, DEFAULT_EXIT_ANIMATION_MS);
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn exit_animation_is_clamped() {
        let config = Config {
            exit_animation_ms: 60_000,
            ..Config::default()
        };
        assert_eq!(
            config.exit_animation(),
            Duration::from_millis(MAX_EXIT_ANIMATION_MS)
        );
    }

    #[test]
    fn default_duration_is_ten_seconds() {
        assert_eq!(Config::default().default_duration(), Duration::from_secs(10));
    }
}
