//! Flagdex configuration.
//!
//! Configuration lives in `<config dir>/flagdex/config.toml`
//! (e.g. `~/.config/flagdex/config.toml`). Every field has a default, so a
//! partial file is fine and a missing or unreadable file means defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "flagdex";
const CONFIG_FILE: &str = "config.toml";

/// Default key of the statistics blob
pub const DEFAULT_STATS_KEY: &str = "user_stats";
/// Default key of the unlocked-ids blob
pub const DEFAULT_UNLOCKED_KEY: &str = "unlocked_achievements";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Where and under which keys progress is persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory; platform data dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_stats_key")]
    pub stats_key: String,

    #[serde(default = "default_unlocked_key")]
    pub unlocked_key: String,
}

fn default_stats_key() -> String {
    DEFAULT_STATS_KEY.to_string()
}

fn default_unlocked_key() -> String {
    DEFAULT_UNLOCKED_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            stats_key: default_stats_key(),
            unlocked_key: default_unlocked_key(),
        }
    }
}

impl StorageConfig {
    /// Effective data directory
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// Notification queue behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Drop pending notifications on reset (default: keep them)
    #[serde(default)]
    pub clear_on_reset: bool,
}

/// Export artifact settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target directory; current directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// File name prefix, the date and `.json` are appended
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_file_prefix() -> String {
    "flag-explorer-progress".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

/// Complete Flagdex configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagdexConfig {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl FlagdexConfig {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_or_default(&config_path())
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Strict load, errors are reported
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Get the config directory
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Get the default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
