//! Tunable timings of the alarm clock.

use crate::core::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`ClockConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse clock configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid clock configuration: {0}")]
    Invalid(String),
}

/// Timing parameters of the clock.
///
/// Every field has a default matching the firmware, so a JSON document only
/// needs to name what it overrides.
///
/// # Example
///
/// ```rust
/// use tickstate::clock::ClockConfig;
///
/// let config = ClockConfig::from_json_str(r#"{ "menu_timeout_ms": 5000 }"#).unwrap();
/// assert_eq!(config.menu_timeout_ms, 5000);
/// assert_eq!(config.alarm_duration_ms, 600_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Inactivity after which menus and editors fall back to idle.
    pub menu_timeout_ms: u64,

    /// How long the alarm plays before it stops by itself.
    pub alarm_duration_ms: u64,

    /// Period of one step of the alarm LED pulse.
    pub blink_interval_ms: u64,

    /// Transitions remembered by the state machine.
    pub history_capacity: usize,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            menu_timeout_ms: 10_000,
            alarm_duration_ms: 10 * 60 * 1000,
            blink_interval_ms: 50,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl ClockConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.menu_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "menu_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.alarm_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "alarm_duration_ms must be greater than zero".to_string(),
            ));
        }
        if self.blink_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "blink_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
