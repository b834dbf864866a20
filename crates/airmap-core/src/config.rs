// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Platform config directory for AirMap, or `./.airmap` when the platform has
/// no notion of one.
pub fn get_config_root() -> PathBuf {
    ProjectDirs::from("com", "StarTuz", "AirMap")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".airmap"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// GeoJSON country borders drawn under the markers.
    pub geography_path: PathBuf,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Smallest on-screen marker radius, in pixels.
    pub min_marker_px: f64,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            geography_path: get_config_root().join("features.json"),
            log_level: "info".to_string(),
            min_marker_px: 3.0,
        }
    }
}

impl AtlasConfig {
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            config_path: get_config_root().join(CONFIG_FILE),
        }
    }

    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<AtlasConfig> {
        if !self.config_path.exists() {
            return Ok(AtlasConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read {}", self.config_path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.config_path.display()))
    }

    /// Like [`ConfigStore::load`], but writes the defaults out on first run so
    /// there is a file to edit.
    pub fn load_or_init(&self) -> Result<AtlasConfig> {
        if self.config_path.exists() {
            return self.load();
        }

        let config = AtlasConfig::default();
        self.save(&config)?;
        info!("Wrote default settings to {}", self.config_path.display());
        Ok(config)
    }

    pub fn save(&self, config: &AtlasConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("config.json"));
        assert_eq!(store.load().unwrap(), AtlasConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("nested").join("config.json"));
        let config = AtlasConfig {
            geography_path: PathBuf::from("/srv/maps/world.geojson"),
            log_level: "debug".to_string(),
            min_marker_px: 4.5,
        };
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
        assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "log_level": "warn" }"#).unwrap();

        let config = ConfigStore::at(&path).load().unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.min_marker_px, 3.0);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(ConfigStore::at(&path).load().is_err());
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("AirMap").join("config.json");
        let store = ConfigStore::at(&path);

        assert_eq!(store.load_or_init().unwrap(), AtlasConfig::default());
        assert!(path.exists());

        let edited = AtlasConfig {
            min_marker_px: 6.0,
            ..Default::default()
        };
        store.save(&edited).unwrap();
        // An existing file is read, never overwritten.
        assert_eq!(store.load_or_init().unwrap(), edited);
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = AtlasConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_level_filter(), log::LevelFilter::Info);
    }
}
