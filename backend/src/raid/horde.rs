//! Raid magnitude
//!
//! Turns a settlement's population into a raid composition. Pure and
//! deterministic: same population and config, same horde.
//!
//! ```text
//! total_level = Σ citizen levels
//! raw         = min(max_raid_size, trunc((total_level / SPAWN_MODIFIER) × raid_size_factor × 0.1))
//! bosses      = max(1, ⌊raw × boss_fraction⌋)
//! archers     = max(1, ⌊raw × archer_fraction⌋)
//! raiders     = max(0, raw − bosses − archers)
//! ```
//!
//! When the raider remainder would be negative (tiny raids), it is clamped to
//! zero and the horde size reports the attackers actually spawned, so
//! `raiders + archers + bosses == horde_size` always holds.

use crate::models::settlement::Citizen;
use crate::raid::config::RaidConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Damps raid growth: every `SPAWN_MODIFIER` levels count as one unit
pub const SPAWN_MODIFIER: i32 = 3;

/// Composition of a raid
///
/// Deserialized through its parts, so a stored `horde_size` that disagrees
/// with them is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HordeParts")]
pub struct Horde {
    horde_size: i32,
    raider_count: i32,
    archer_count: i32,
    boss_count: i32,
}

impl Horde {
    /// The "no raid" horde
    pub const NONE: Horde = Horde {
        horde_size: 0,
        raider_count: 0,
        archer_count: 0,
        boss_count: 0,
    };

    /// Build a horde from its parts; the size is their sum
    pub fn from_parts(raider_count: i32, archer_count: i32, boss_count: i32) -> Self {
        Self {
            horde_size: raider_count + archer_count + boss_count,
            raider_count,
            archer_count,
            boss_count,
        }
    }

    pub fn horde_size(&self) -> i32 {
        self.horde_size
    }

    pub fn raider_count(&self) -> i32 {
        self.raider_count
    }

    pub fn archer_count(&self) -> i32 {
        self.archer_count
    }

    pub fn boss_count(&self) -> i32 {
        self.boss_count
    }

    /// Zero-size sentinel
    pub fn is_empty(&self) -> bool {
        self.horde_size == 0
    }
}

/// Wire form of a [`Horde`]; `horde_size` is optional and checked
#[derive(Deserialize)]
struct HordeParts {
    raider_count: i32,
    archer_count: i32,
    boss_count: i32,
    #[serde(default)]
    horde_size: Option<i32>,
}

impl TryFrom<HordeParts> for Horde {
    type Error = String;

    fn try_from(parts: HordeParts) -> Result<Self, Self::Error> {
        let counts = [parts.raider_count, parts.archer_count, parts.boss_count];
        if counts.iter().any(|count| *count < 0) {
            return Err(format!("negative horde part in {:?}", counts));
        }
        let size = counts
            .iter()
            .try_fold(0i32, |total, count| total.checked_add(*count))
            .ok_or_else(|| format!("horde parts {:?} overflow", counts))?;
        match parts.horde_size {
            Some(stored) if stored != size => Err(format!(
                "horde_size {} does not match parts sum {}",
                stored, size
            )),
            _ => Ok(Horde::from_parts(
                parts.raider_count,
                parts.archer_count,
                parts.boss_count,
            )),
        }
    }
}

/// Sum of citizen levels, saturating at the `i32` bounds
pub fn compute_raid_level(population: &[Citizen]) -> i32 {
    population
        .iter()
        .fold(0i32, |total, citizen| total.saturating_add(citizen.level))
}

/// Raid composition for `population` under `config`
///
/// # Example
/// ```
/// use colony_ai_core_rs::models::Citizen;
/// use colony_ai_core_rs::raid::{compute_horde, RaidConfig};
///
/// let config = RaidConfig {
///     raid_size_factor: 10,
///     max_raid_size: 100,
///     min_population_for_raid: 4,
///     ..RaidConfig::default()
/// };
/// let population = vec![Citizen::new(3); 4];
///
/// let horde = compute_horde(&population, &config);
/// assert_eq!(horde.horde_size(), 4);
/// assert_eq!((horde.raider_count(), horde.archer_count(), horde.boss_count()), (2, 1, 1));
/// ```
pub fn compute_horde(population: &[Citizen], config: &RaidConfig) -> Horde {
    if population.len() < config.min_population_for_raid {
        return Horde::NONE;
    }

    let raid_level = compute_raid_level(population);
    let scaled =
        f64::from(raid_level / SPAWN_MODIFIER) * (f64::from(config.raid_size_factor) * 0.1);
    let raw = (scaled as i32).min(config.max_raid_size);
    if raw <= 0 {
        return Horde::NONE;
    }

    let bosses = ((f64::from(raw) * config.boss_fraction) as i32).clamp(1, raw);
    let archers = ((f64::from(raw) * config.archer_fraction) as i32).clamp(1, raw);
    let remainder = raw.saturating_sub(bosses).saturating_sub(archers);
    if remainder < 0 {
        debug!(
            raw,
            bosses, archers, "raid too small for its minimum bosses and archers; no raiders"
        );
    }

    Horde::from_parts(remainder.max(0), archers, bosses)
}
