//! Raid configuration
//!
//! All knobs the raid clock reads. Hosts load these however they like; the
//! struct deserializes from JSON with every field optional.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when building a raid configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid raid config: {0}")]
    Invalid(String),

    #[error("Failed to parse raid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raid timing, magnitude and dispatch parameters
///
/// # Example
/// ```
/// use colony_ai_core_rs::raid::RaidConfig;
///
/// let config = RaidConfig::from_json(r#"{"max_raid_size": 40, "dev_messages": true}"#).unwrap();
/// assert_eq!(config.max_raid_size, 40);
/// assert_eq!(config.naval_water_size, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaidConfig {
    /// Hard cap on the raw raid size
    pub max_raid_size: i32,

    /// Scales raid size; 10 means "one attacker per SPAWN_MODIFIER levels"
    pub raid_size_factor: i32,

    /// Settlements with fewer citizens are never raided
    pub min_population_for_raid: usize,

    /// Nights that must pass after a raid before another can be rolled
    pub min_nights_between_raids: u32,

    /// Nightly raid chance is `1 / average_nights_between_raids`
    pub average_nights_between_raids: u32,

    /// Share of the raid that are bosses (at least one)
    pub boss_fraction: f64,

    /// Share of the raid that are archers (at least one)
    pub archer_fraction: f64,

    /// Hordes below this size are `Small`
    pub small_horde_size: i32,

    /// Hordes below this size are `Medium`
    pub medium_horde_size: i32,

    /// Hordes below this size are `Big`; anything larger is `Huge`
    pub big_horde_size: i32,

    /// Side of the square water area a raid vessel needs
    pub naval_water_size: u32,

    /// Send decision/spawn chatter to the settlement's message recipients
    pub dev_messages: bool,
}

impl Default for RaidConfig {
    fn default() -> Self {
        Self {
            max_raid_size: 80,
            raid_size_factor: 5,
            min_population_for_raid: 5,
            min_nights_between_raids: 3,
            average_nights_between_raids: 5,
            boss_fraction: 0.1,
            archer_fraction: 0.05,
            small_horde_size: 5,
            medium_horde_size: 10,
            big_horde_size: 20,
            naval_water_size: 15,
            dev_messages: false,
        }
    }
}

impl RaidConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RaidConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the raid clock cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_raid_size < 0 {
            return Err(ConfigError::Invalid(format!(
                "max_raid_size must be non-negative, got {}",
                self.max_raid_size
            )));
        }
        if self.raid_size_factor < 0 {
            return Err(ConfigError::Invalid(format!(
                "raid_size_factor must be non-negative, got {}",
                self.raid_size_factor
            )));
        }
        if self.average_nights_between_raids == 0 {
            return Err(ConfigError::Invalid(
                "average_nights_between_raids must be at least 1".to_string(),
            ));
        }
        for (name, fraction) in [
            ("boss_fraction", self.boss_fraction),
            ("archer_fraction", self.archer_fraction),
        ] {
            if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, fraction
                )));
            }
        }
        if self.boss_fraction + self.archer_fraction >= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "boss_fraction + archer_fraction must leave room for raiders, got {}",
                self.boss_fraction + self.archer_fraction
            )));
        }
        if !(self.small_horde_size < self.medium_horde_size
            && self.medium_horde_size < self.big_horde_size)
        {
            return Err(ConfigError::Invalid(format!(
                "horde size thresholds must ascend, got {} / {} / {}",
                self.small_horde_size, self.medium_horde_size, self.big_horde_size
            )));
        }
        if self.naval_water_size == 0 {
            return Err(ConfigError::Invalid(
                "naval_water_size must be positive".to_string(),
            ));
        }
        if self.min_population_for_raid == 0 {
            warn!("min_population_for_raid is 0; empty settlements can be raided");
        }
        Ok(())
    }

    /// Probability that a given eligible night rolls a raid
    pub fn nightly_raid_chance(&self) -> f64 {
        1.0 / f64::from(self.average_nights_between_raids)
    }
}
