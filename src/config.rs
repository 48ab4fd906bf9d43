//! Configuration management with validation and defaults
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables and finally by command-line flags.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::errors::{ConfigurationError, PlayroomResult};

/// Top-level Playroom configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayroomConfig {
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
    pub audio: AudioConfig,
    pub monitoring: MonitoringConfig,
}

/// Points, coins and round pacing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points that make up one coin
    pub coin_value: u64,
    /// Points awarded for the first correct answer of a round
    pub points_per_round: u64,
    /// Pause between a correct answer and the next round
    pub advance_delay_ms: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            coin_value: 1000,
            points_per_round: 1,
            advance_delay_ms: 1500,
        }
    }
}

/// Score persistence
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub data_directory: String,
    /// Namespaced key holding the point total as a base-10 string
    pub score_key: String,
    /// Keep the score in memory only
    pub in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_directory: "./DB/playroom".to_string(),
            score_key: "playroom:score:total".to_string(),
            in_memory: false,
        }
    }
}

/// Voice settings handed to the speech backend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lang: "en-GB".to_string(),
            rate: 0.92,
            pitch: 1.05,
        }
    }
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: LogLevel,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive for `tracing_subscriber::EnvFilter`
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl PlayroomConfig {
    /// In-memory score, no pause between rounds, muted
    pub fn testing() -> Self {
        Self {
            scoring: ScoringConfig {
                advance_delay_ms: 0,
                ..Default::default()
            },
            storage: StorageConfig {
                in_memory: true,
                ..Default::default()
            },
            audio: AudioConfig {
                enabled: false,
                ..Default::default()
            },
            monitoring: MonitoringConfig {
                log_level: LogLevel::Debug,
            },
        }
    }

    /// Load from a TOML file if given, apply environment overrides, validate
    pub fn load(path: Option<&Path>) -> PlayroomResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_from_file(path: &Path) -> PlayroomResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(toml::from_str(&content)?)
    }

    fn apply_env_overrides(&mut self) -> PlayroomResult<()> {
        if let Ok(dir) = env::var("PLAYROOM_DATA_DIR") {
            self.storage.data_directory = dir;
        }
        if let Ok(audio) = env::var("PLAYROOM_AUDIO") {
            self.audio.enabled = parse_switch(&audio).ok_or_else(|| ConfigurationError::InvalidValue {
                field: "PLAYROOM_AUDIO".to_string(),
                value: audio.clone(),
                reason: "expected on/off".to_string(),
            })?;
        }
        Ok(())
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.scoring.coin_value == 0 {
            return Err(ConfigurationError::ValidationFailed(
                "coin_value must be > 0".to_string(),
            ));
        }

        if self.scoring.points_per_round == 0 {
            return Err(ConfigurationError::ValidationFailed(
                "points_per_round must be > 0".to_string(),
            ));
        }

        if self.storage.score_key.trim().is_empty() {
            return Err(ConfigurationError::ValidationFailed(
                "score_key must not be empty".to_string(),
            ));
        }

        if !self.storage.in_memory && self.storage.data_directory.trim().is_empty() {
            return Err(ConfigurationError::ValidationFailed(
                "data_directory is required unless in_memory is set".to_string(),
            ));
        }

        if !(self.audio.rate > 0.0 && self.audio.pitch > 0.0) {
            return Err(ConfigurationError::InvalidValue {
                field: "audio".to_string(),
                value: format!("rate={} pitch={}", self.audio.rate, self.audio.pitch),
                reason: "rate and pitch must be positive".to_string(),
            });
        }

        Ok(())
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.scoring.advance_delay_ms)
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlayroomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.coin_value, 1000);
        assert_eq!(config.storage.score_key, "playroom:score:total");
    }

    #[test]
    fn test_testing_config_is_valid() {
        let config = PlayroomConfig::testing();
        assert!(config.validate().is_ok());
        assert_eq!(config.advance_delay(), Duration::ZERO);
    }

    #[test]
    fn test_zero_coin_value_is_rejected() {
        let mut config = PlayroomConfig::default();
        config.scoring.coin_value = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut config = PlayroomConfig::default();
        config.audio.rate = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[scoring]\nadvance_delay_ms = 250\n\n[audio]\nenabled = false\n"
        )
        .unwrap();

        let config = PlayroomConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.scoring.advance_delay_ms, 250);
        assert_eq!(config.scoring.coin_value, 1000);
        assert!(!config.audio.enabled);
        assert_eq!(config.audio.lang, "en-GB");
    }

    #[test]
    fn test_broken_toml_fails_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scoring\ncoin_value = ").unwrap();

        assert!(PlayroomConfig::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("Off"), Some(false));
        assert_eq!(parse_switch("1"), Some(true));
        assert_eq!(parse_switch("maybe"), None);
    }
}
