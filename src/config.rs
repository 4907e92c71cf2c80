//! Session timing configuration, optionally read from TOML.

use crate::core::constants::*;
use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Timer periods for a session. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Training advance period
    pub tick_interval_ms: i64,

    /// Auto-trainer period
    pub auto_trainer_interval_ms: i64,

    /// Delay before auto-battle re-engages after a victory
    pub auto_battle_cooldown_ms: i64,

    /// Periodic save in addition to saves after each action
    pub autosave_interval_ms: i64,

    /// Lines kept in the activity log
    pub activity_log_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            auto_trainer_interval_ms: AUTO_TRAINER_INTERVAL_MS,
            auto_battle_cooldown_ms: AUTO_BATTLE_COOLDOWN_MS,
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
            activity_log_len: ACTIVITY_LOG_LEN,
        }
    }
}

impl SessionConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Reads `path` if given, else the default config file if it exists,
    /// else the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/tycoon.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tycoon").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = SessionConfig::default();
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.auto_trainer_interval_ms, 5_000);
        assert_eq!(config.auto_battle_cooldown_ms, 2_000);
        assert_eq!(config.autosave_interval_ms, 30_000);
    }

    #[test]
    fn test_partial_toml() {
        let config = SessionConfig::from_toml("tick_interval_ms = 250\n").unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.auto_trainer_interval_ms, 5_000);
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(SessionConfig::from_toml("tick_interval_ms = \"fast\"").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SessionConfig::load_or_default(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
