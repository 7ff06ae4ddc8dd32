//! Tunables for race dice and the roster cache.
use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_DIE_SIDES, DEFAULT_MAX_RACE_TURNS, DEFAULT_ROSTER_MAX_AGE_MINUTES,
};

/// Errors raised when configuration values are out of bounds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: i64,
        value: i64,
    },
}

/// Race-mode dice and turn limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceConfig {
    #[serde(default = "RaceConfig::default_die_sides")]
    pub die_sides: u32,
    /// Safety cap for simulated races.
    #[serde(default = "RaceConfig::default_max_turns")]
    pub max_turns: u32,
}

impl RaceConfig {
    const fn default_die_sides() -> u32 {
        DEFAULT_DIE_SIDES
    }

    const fn default_max_turns() -> u32 {
        DEFAULT_MAX_RACE_TURNS
    }

    /// # Errors
    ///
    /// Returns an error if the die has fewer than two sides or no turns are allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.die_sides < 2 {
            return Err(ConfigError::MinViolation {
                field: "race.die_sides",
                min: 2,
                value: i64::from(self.die_sides),
            });
        }
        if self.max_turns == 0 {
            return Err(ConfigError::MinViolation {
                field: "race.max_turns",
                min: 1,
                value: 0,
            });
        }
        Ok(())
    }
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            die_sides: Self::default_die_sides(),
            max_turns: Self::default_max_turns(),
        }
    }
}

/// How long a cached roster snapshot stays fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterCachePolicy {
    #[serde(default = "RosterCachePolicy::default_max_age_minutes")]
    pub max_age_minutes: i64,
}

impl RosterCachePolicy {
    const fn default_max_age_minutes() -> i64 {
        DEFAULT_ROSTER_MAX_AGE_MINUTES
    }

    #[must_use]
    pub fn max_age(&self) -> Duration {
        Duration::try_minutes(self.max_age_minutes).unwrap_or(Duration::MAX)
    }

    /// # Errors
    ///
    /// Returns an error if the max age is negative.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_age_minutes < 0 {
            return Err(ConfigError::MinViolation {
                field: "roster.max_age_minutes",
                min: 0,
                value: self.max_age_minutes,
            });
        }
        Ok(())
    }
}

impl Default for RosterCachePolicy {
    fn default() -> Self {
        Self {
            max_age_minutes: Self::default_max_age_minutes(),
        }
    }
}

/// Top-level configuration, loadable from JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BingoConfig {
    #[serde(default)]
    pub race: RaceConfig,
    #[serde(default)]
    pub roster: RosterCachePolicy,
}

impl BingoConfig {
    /// Load configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// # Errors
    ///
    /// Returns the first out-of-bounds value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.race.validate()?;
        self.roster.validate()
    }
}
