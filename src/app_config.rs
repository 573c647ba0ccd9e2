use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::subtitle_document::DEFAULT_BACKUP_SUFFIX;

/// Application configuration module
/// This module handles loading and validating the configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Table display settings for the shell
    #[serde(default)]
    pub display: DisplayConfig,

    /// Backup settings applied when saving
    #[serde(default)]
    pub backup: BackupConfig,
}

/// How the shell prints the alignment table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Rows printed by a bare `show`
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum characters shown per text cell
    #[serde(default = "default_text_width")]
    pub text_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            text_width: default_text_width(),
        }
    }
}

/// Where the previous version of a file goes before it is overwritten
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BackupConfig {
    /// Appended to the base name, e.g. `movie-backup.srt`
    #[serde(default = "default_backup_suffix")]
    pub suffix: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            suffix: default_backup_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_page_size() -> usize {
    20
}

fn default_text_width() -> usize {
    40
}

fn default_backup_suffix() -> String {
    DEFAULT_BACKUP_SUFFIX.to_string()
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults when it is missing
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = FileManager::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.display.page_size == 0 {
            return Err(AppError::Config("display.page_size must be at least 1".to_string()));
        }

        if self.display.text_width < 4 {
            return Err(AppError::Config("display.text_width must be at least 4".to_string()));
        }

        let suffix = &self.backup.suffix;
        if suffix.is_empty() {
            return Err(AppError::Config("backup.suffix must not be empty".to_string()));
        }
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(AppError::Config(format!("backup.suffix must not contain a path separator: {}", suffix)));
        }

        Ok(())
    }
}
