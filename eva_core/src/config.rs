//! Configuration file support for EVA.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/eva/config.toml`.

use crate::{Error, Result, DEFAULT_INACTIVITY_THRESHOLD_HOURS};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Thresholds the host may offer for the inactivity slider
pub const INACTIVITY_THRESHOLD_RANGE: RangeInclusive<u32> = 1..=6;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Rule engine parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "default_inactivity_threshold_hours")]
    pub inactivity_threshold_hours: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inactivity_threshold_hours: default_inactivity_threshold_hours(),
        }
    }
}

/// How the host renders the alert history
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_alert_history_limit")]
    pub alert_history_limit: usize,

    #[serde(default)]
    pub newest_first: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            alert_history_limit: default_alert_history_limit(),
            newest_first: false,
        }
    }
}

// Default value functions
fn default_inactivity_threshold_hours() -> u32 {
    DEFAULT_INACTIVITY_THRESHOLD_HOURS
}

fn default_alert_history_limit() -> usize {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("Unable to determine config directory".into()))?;
        Ok(base.join("eva").join("config.toml"))
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let threshold = self.engine.inactivity_threshold_hours;
        if !INACTIVITY_THRESHOLD_RANGE.contains(&threshold) {
            return Err(Error::Config(format!(
                "inactivity_threshold_hours must be between {} and {}, got {}",
                INACTIVITY_THRESHOLD_RANGE.start(),
                INACTIVITY_THRESHOLD_RANGE.end(),
                threshold
            )));
        }

        if self.display.alert_history_limit == 0 {
            return Err(Error::Config(
                "alert_history_limit must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
