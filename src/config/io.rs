//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;
use crate::atomic::write_atomic;

/// Environment variable overriding the store directory
pub const HOME_ENV: &str = "DEVQUEST_HOME";

impl Config {
    /// Get the store directory: `$DEVQUEST_HOME`, else `~/.devquest/`
    pub fn default_home() -> PathBuf {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".devquest")
    }

    /// Get the config file path inside a store directory
    pub fn path_in(home: &Path) -> PathBuf {
        home.join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load the config of a store directory, falling back to defaults when
    /// there is no config file
    pub fn load(home: &Path) -> Result<Self> {
        let path = Self::path_in(home);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Save configuration to a file, creating the parent directory if needed.
    /// The file is replaced atomically, so readers never see a partial config.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_atomic(path, content.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
