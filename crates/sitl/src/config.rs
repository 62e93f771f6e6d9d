//! Simulator configuration
//!
//! Loaded from JSON; every field is optional and falls back to the defaults
//! below, so a config file only lists what it overrides:
//!
//! ```json
//! { "track_width_m": 0.8, "seed": 7 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default distance between track centerlines in meters
const DEFAULT_TRACK_WIDTH_M: f32 = 0.6;

/// Default track surface speed at full command in m/s
const DEFAULT_MAX_SPEED_MS: f32 = 2.0;

/// Default yaw rate limit in rad/s
const DEFAULT_MAX_TURN_RATE_RADS: f32 = 2.5;

/// Default simulation step (100 Hz)
const DEFAULT_STEP_SIZE_US: u64 = 10_000;

/// Longest accepted simulation step (1 s)
const MAX_STEP_SIZE_US: u64 = 1_000_000;

/// Configuration for the built-in skid-steer simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Distance between track centerlines in meters.
    pub track_width_m: f32,
    /// Track surface speed at a command of 1.0, in m/s.
    pub max_speed_ms: f32,
    /// Maximum yaw rate in rad/s.
    pub max_turn_rate_rads: f32,
    /// Forward velocity process noise standard deviation in m/s.
    pub velocity_noise_ms: f32,
    /// Yaw rate process noise standard deviation in rad/s.
    pub yaw_rate_noise_rads: f32,
    /// RNG seed for deterministic mode. None = random.
    pub seed: Option<u64>,
    /// Fixed step size in microseconds.
    pub step_size_us: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            track_width_m: DEFAULT_TRACK_WIDTH_M,
            max_speed_ms: DEFAULT_MAX_SPEED_MS,
            max_turn_rate_rads: DEFAULT_MAX_TURN_RATE_RADS,
            velocity_noise_ms: 0.0,
            yaw_rate_noise_rads: 0.0,
            seed: None,
            step_size_us: DEFAULT_STEP_SIZE_US,
        }
    }
}

impl SimConfig {
    /// Load and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.track_width_m.is_finite() && self.track_width_m > 0.0) {
            return Err(ConfigError::Invalid {
                field: "track_width_m",
                reason: "must be a positive distance",
            });
        }
        if !(self.max_speed_ms.is_finite() && self.max_speed_ms > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_speed_ms",
                reason: "must be a positive speed",
            });
        }
        if !(self.max_turn_rate_rads.is_finite() && self.max_turn_rate_rads > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_turn_rate_rads",
                reason: "must be a positive rate",
            });
        }
        if !(self.velocity_noise_ms >= 0.0 && self.yaw_rate_noise_rads >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "noise",
                reason: "standard deviations cannot be negative",
            });
        }
        if self.step_size_us == 0 {
            return Err(ConfigError::Invalid {
                field: "step_size_us",
                reason: "must be non-zero",
            });
        }
        if self.step_size_us > MAX_STEP_SIZE_US {
            return Err(ConfigError::Invalid {
                field: "step_size_us",
                reason: "must not exceed one second",
            });
        }
        Ok(())
    }

    /// Fixed step duration in seconds.
    pub fn step_dt_s(&self) -> f32 {
        self.step_size_us as f32 / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.step_dt_s() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config = SimConfig::from_json_str(r#"{ "track_width_m": 0.8, "seed": 7 }"#).unwrap();
        assert_eq!(config.track_width_m, 0.8);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_speed_ms, DEFAULT_MAX_SPEED_MS);
        assert_eq!(config.step_size_us, DEFAULT_STEP_SIZE_US);
    }

    #[test]
    fn rejects_zero_step() {
        let err = SimConfig::from_json_str(r#"{ "step_size_us": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "step_size_us",
                ..
            }
        ));
    }

    #[test]
    fn rejects_step_longer_than_one_second() {
        let text = format!(r#"{{ "step_size_us": {} }}"#, u64::MAX - 1);
        let err = SimConfig::from_json_str(&text).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "step_size_us",
                reason: "must not exceed one second",
            }
        ));

        let one_second = SimConfig {
            step_size_us: MAX_STEP_SIZE_US,
            ..Default::default()
        };
        assert!(one_second.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_geometry() {
        let config = SimConfig {
            track_width_m: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            max_speed_ms: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_noise() {
        let config = SimConfig {
            yaw_rate_noise_rads: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join("skidsteer_sim_config_test.json");
        fs::write(&path, r#"{ "max_speed_ms": 3.5 }"#).unwrap();
        let config = SimConfig::from_file(&path).unwrap();
        assert_eq!(config.max_speed_ms, 3.5);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SimConfig::from_file("/nonexistent/skidsteer.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
