//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use iced_knob::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.snap_to_ticks = Some(true);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedKnob";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub snap_to_ticks: Option<bool>,
    #[serde(default)]
    pub show_tick_marks: Option<bool>,
    #[serde(default)]
    pub show_tick_labels: Option<bool>,
    #[serde(default)]
    pub major_tick_unit: Option<f64>,
    #[serde(default)]
    pub minor_tick_count: Option<u32>,
    #[serde(default)]
    pub block_increment: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snap_to_ticks: Some(false),
            show_tick_marks: Some(true),
            show_tick_labels: Some(true),
            major_tick_unit: None,
            minor_tick_count: None,
            block_increment: None,
        }
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
    Ok(toml::from_str(&content).unwrap_or_default())
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
            snap_to_ticks: Some(true),
            show_tick_marks: Some(false),
            show_tick_labels: Some(true),
            major_tick_unit: Some(45.0),
            minor_tick_count: Some(2),
            block_increment: Some(5.0),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.snap_to_ticks, config.snap_to_ticks);
        assert_eq!(loaded.show_tick_marks, config.show_tick_marks);
        assert_eq!(loaded.show_tick_labels, config.show_tick_labels);
        assert_eq!(loaded.major_tick_unit, config.major_tick_unit);
        assert_eq!(loaded.minor_tick_count, config.minor_tick_count);
        assert_eq!(loaded.block_increment, config.block_increment);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.snap_to_ticks, Some(false));
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested_dir = temp_dir.path().join("deep").join("path");
        let config_path = nested_dir.join("settings.toml");
        let config = Config::default();

        save_to_path(&config, &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn default_config_shows_ticks_without_snapping() {
        let config = Config::default();
        assert_eq!(config.snap_to_ticks, Some(false));
        assert_eq!(config.show_tick_marks, Some(true));
        assert_eq!(config.show_tick_labels, Some(true));
        assert!(config.major_tick_unit.is_none());
    }
}
