//! Persisted CLI settings.
//!
//! Settings are stored as TOML in the user's config directory. Command-line
//! flags always take precedence over values read here.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::logging::LogFormat;

/// CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub selection: SelectionSettings,
    pub logging: LoggingSettings,
}

/// Defaults for `certrule select`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Category used when `--category` is not given.
    pub default_category: String,
    /// Rule set used when `--rules` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_path: Option<PathBuf>,
    /// Preferred description language in table output.
    pub language: String,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            default_category: "General".to_string(),
            rules_path: None,
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<LogFormat>,
    /// Prefix log lines with a timestamp.
    pub timestamps: bool,
    /// Include the emitting module path.
    pub target: bool,
}

impl LoggingSettings {
    /// Parsed level, ignoring names `tracing` does not know.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
    }
}

impl Settings {
    /// Load settings from the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::read_or_default(&Self::config_path())
    }

    /// Read settings from `path`, using defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::read_from(path)
    }

    /// Read settings from a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn read_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse settings {}", path.display()))
    }

    /// Save settings to a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("failed to serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write settings {}", path.display()))
    }

    /// Default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "certrule", "certrule")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }
}
