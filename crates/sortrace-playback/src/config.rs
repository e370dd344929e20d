//! Playback configuration: sequence size, pacing, labelling and audio.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortrace_core::AlgorithmId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} = {value} is outside {range}")]
    OutOfRange {
        field: &'static str,
        value: String,
        range: &'static str,
    },
}

pub const MIN_DATA_SIZE: usize = 10;
pub const MAX_DATA_SIZE: usize = 100;
pub const MIN_STEP_DELAY_SECS: f64 = 0.01;
pub const MAX_STEP_DELAY_SECS: f64 = 0.5;

/// Configuration for interactive playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Algorithm selected at startup.
    pub algorithm: AlgorithmId,
    /// Length of generated sequences.
    pub data_size: usize,
    /// Pause after each step, in seconds.
    pub step_delay_secs: f64,
    /// Bars are labelled with their values when the sequence is this short.
    pub label_threshold: usize,
    /// Whether audio cues are dispatched.
    pub audio_enabled: bool,
    /// Seed for generated sequences. None = fresh entropy each session.
    pub seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmId::Bubble,
            data_size: 50,
            step_delay_secs: 0.05,
            label_threshold: 50,
            audio_enabled: true,
            seed: None,
        }
    }
}

impl PlaybackConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PlaybackConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DATA_SIZE..=MAX_DATA_SIZE).contains(&self.data_size) {
            return Err(ConfigError::OutOfRange {
                field: "data_size",
                value: self.data_size.to_string(),
                range: "10..=100",
            });
        }
        if !(MIN_STEP_DELAY_SECS..=MAX_STEP_DELAY_SECS).contains(&self.step_delay_secs) {
            return Err(ConfigError::OutOfRange {
                field: "step_delay_secs",
                value: self.step_delay_secs.to_string(),
                range: "0.01..=0.5",
            });
        }
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_secs_f64(self.step_delay_secs)
    }
}
