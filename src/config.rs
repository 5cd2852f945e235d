//! Application configuration management.
//!
//! Persisted defaults for knobs users tend to set once: the fingerprint
//! detail size and the scanned extension set. Stored as JSON in the
//! platform config directory; a missing or unreadable file silently
//! falls back to defaults, and explicit CLI flags always win.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::hashing::DEFAULT_DETAIL_SIZE;
use crate::scanner::DEFAULT_EXTENSIONS;

/// Persisted application defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default fingerprint detail size.
    #[serde(default = "default_detail_size")]
    pub detail_size: u32,
    /// Default extension set.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_detail_size() -> u32 {
    DEFAULT_DETAIL_SIZE
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detail_size: default_detail_size(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    pub fn load() -> Self {
        match Self::load_internal() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn load_internal() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save the configuration to the default platform-specific path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Default platform-specific configuration path.
    fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "picdupe", "picdupe")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}
