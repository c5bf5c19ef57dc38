//! Configuration management for labelprint.
//!
//! Handles loading configuration from a TOML file. Every setting has a
//! default, so a missing file is not an error.

use crate::category::CandidateSet;
use crate::error::{LabelError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for labelprint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Replacement candidate list. Uses the built-in categories when absent.
    #[serde(default)]
    pub categories: Option<Vec<String>>,

    /// Presentation settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Maximum number of suggestion rows visible at once.
    #[serde(default = "default_dropdown_max_height")]
    pub dropdown_max_height: u16,

    /// Placeholder shown while the field is empty.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Event poll timeout in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_dropdown_max_height() -> u16 {
    6
}

fn default_placeholder() -> String {
    "Start entering the name".to_string()
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dropdown_max_height: default_dropdown_max_height(),
            placeholder: default_placeholder(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl UiConfig {
    /// Returns the event poll timeout.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("labelprint")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| LabelError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses and validates configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            LabelError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.ui.dropdown_max_height == 0 {
            return Err(LabelError::config("ui.dropdown_max_height must be at least 1"));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(LabelError::config("ui.tick_rate_ms must be at least 1"));
        }
        self.candidates().map(|_| ())
    }

    /// Builds the candidate set this config describes.
    pub fn candidates(&self) -> Result<CandidateSet> {
        match &self.categories {
            Some(names) => CandidateSet::new(names),
            None => Ok(CandidateSet::default()),
        }
    }
}
