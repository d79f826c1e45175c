//! Configuration for the FloorKit engine.
//!
//! Covers the two knobs the engine actually has: the canvas the entities are
//! confined to, and the remote store endpoint the sync layer talks to.
//! Stored as JSON; loading a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Canvas dimensions, in canvas-local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
        }
    }
}

/// Remote store connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the remote store.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Canvas bounds.
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Remote store settings.
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// A missing file is not an error; defaults are returned so a fresh
    /// installation works without any setup.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.canvas.width, 1200.0);
        assert_eq!(config.canvas.height, 600.0);
        assert_eq!(config.remote.timeout_ms, 5000);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.canvas.width = 800.0;
        config.remote.base_url = "http://depot.local/api".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
