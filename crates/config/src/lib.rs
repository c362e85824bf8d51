//! Shared engine configuration for the brush engine
//!
//! This crate holds the fixed tuning constants of the stroke simulation
//! (idle gap, filter time scales, RNG seed). They are plain numbers with
//! defaults, and may be overridden from JSON by a host application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default gap (in stroke time units) after which a new stroke begins
pub const DEFAULT_IDLE_THRESHOLD: f32 = 5.0;

/// Default factor applied to elapsed sample time for the virtual cursor filter
pub const DEFAULT_POSITION_TIME_SCALE: f32 = 100.0;

/// Default elapsed time fed to the painted-position filter on every dab
pub const DEFAULT_SLOW_POSITION_ELAPSED: f32 = 0.4;

/// Default factor applied to per-dab elapsed time for the speed filters
pub const DEFAULT_SPEED_TIME_SCALE: f32 = 0.1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// Engine configuration for stroke simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A sample arriving more than this long after the previous one starts a new stroke
    pub idle_threshold: f32,
    /// Scale applied to the elapsed sample time when smoothing the virtual cursor
    pub position_time_scale: f32,
    /// Elapsed time used by the painted-position filter on each dab
    pub slow_position_elapsed: f32,
    /// Scale applied to the per-dab elapsed time when smoothing speed
    pub speed_time_scale: f32,
    /// Seed for the brush RNG; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            idle_threshold: DEFAULT_IDLE_THRESHOLD,
            position_time_scale: DEFAULT_POSITION_TIME_SCALE,
            slow_position_elapsed: DEFAULT_SLOW_POSITION_ELAPSED,
            speed_time_scale: DEFAULT_SPEED_TIME_SCALE,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a default config with a fixed RNG seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tuning value is finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("idle_threshold", self.idle_threshold),
            ("position_time_scale", self.position_time_scale),
            ("slow_position_elapsed", self.slow_position_elapsed),
            ("speed_time_scale", self.speed_time_scale),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.idle_threshold, DEFAULT_IDLE_THRESHOLD);
        assert_eq!(config.position_time_scale, DEFAULT_POSITION_TIME_SCALE);
        assert_eq!(config.slow_position_elapsed, DEFAULT_SLOW_POSITION_ELAPSED);
        assert_eq!(config.speed_time_scale, DEFAULT_SPEED_TIME_SCALE);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{ "idle_threshold": 2.5, "seed": 7 }"#).unwrap();
        assert_eq!(config.idle_threshold, 2.5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.position_time_scale, DEFAULT_POSITION_TIME_SCALE);
    }

    #[test]
    fn test_from_json_rejects_negative() {
        let err = EngineConfig::from_json(r#"{ "speed_time_scale": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "speed_time_scale",
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_seeded() {
        let config = EngineConfig::seeded(42);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.idle_threshold, DEFAULT_IDLE_THRESHOLD);
    }
}
