//! Raid timing
//!
//! Decides once per day whether tonight brings a raid, and fires that
//! decision once at nightfall. Re-entered every tick, it only changes
//! anything at phase boundaries:
//!
//! ```text
//!            day, undecided                    night, decided, will raid
//!   ┌──────────────────────────┐          ┌───────────────────────────┐
//!   │ AwaitingDecision         │─────────▶│ NightTrigger  → raid now  │
//!   │ draw once, mark decided  │          └───────────────────────────┘
//!   └──────────────────────────┘          ┌───────────────────────────┐
//!        │ day, decided                   │ NightNoRaid              │
//!        ▼                                └───────────────────────────┘
//!   Decided (no-op)                         night, undecided → Night (no-op)
//! ```
//!
//! Splitting "decide" from "execute" keeps the random draw to one sample per
//! cycle and makes a second raid in the same night impossible.

use crate::raid::config::RaidConfig;
use crate::world::{DayNightSource, Notifier, RandomSource};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Per-settlement raid timing flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidState {
    nights_since_last_raid: u32,
    has_raid_been_calculated: bool,
    will_raid_tonight: bool,
}

impl RaidState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a settlement that has gone `nights` nights without a raid
    pub fn with_nights_since_last_raid(nights: u32) -> Self {
        Self {
            nights_since_last_raid: nights,
            ..Self::default()
        }
    }

    pub fn nights_since_last_raid(&self) -> u32 {
        self.nights_since_last_raid
    }

    pub fn has_raid_been_calculated(&self) -> bool {
        self.has_raid_been_calculated
    }

    pub fn will_raid_tonight(&self) -> bool {
        self.will_raid_tonight
    }

    pub(crate) fn reset_nights(&mut self) {
        self.nights_since_last_raid = 0;
    }
}

/// What the raid clock did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockPhase {
    /// Raids disabled for the settlement
    Disabled,
    /// Too few citizens; flags untouched
    BelowPopulation,
    /// First day tick of the cycle; tonight's raid was decided
    AwaitingDecision,
    /// Daytime, already decided
    Decided,
    /// Nightfall with a raid pending: raid now
    NightTrigger,
    /// Nightfall without a raid
    NightNoRaid,
    /// Night, nothing left to do
    Night,
}

impl ClockPhase {
    pub fn raid_now(self) -> bool {
        matches!(self, ClockPhase::NightTrigger)
    }
}

/// Advance the raid decision for one tick
///
/// Returns [`ClockPhase::NightTrigger`] exactly once per night in which a
/// raid was decided during the preceding day.
pub fn is_it_time_to_raid<W>(
    state: &mut RaidState,
    population: usize,
    recipients: &[String],
    config: &RaidConfig,
    world: &mut W,
) -> ClockPhase
where
    W: DayNightSource + RandomSource + Notifier + ?Sized,
{
    if population < config.min_population_for_raid {
        return ClockPhase::BelowPopulation;
    }

    let daytime = world.is_daytime();

    if daytime && !state.has_raid_been_calculated {
        state.has_raid_been_calculated = true;
        if !state.will_raid_tonight {
            let raid = raid_this_night(state, config, world);
            info!(
                raid,
                nights_since_last_raid = state.nights_since_last_raid,
                "nightly raid decided"
            );
            if config.dev_messages {
                world.notify(recipients, &format!("Will raid tonight: {}", raid));
            }
            state.will_raid_tonight = raid;
        }
        return ClockPhase::AwaitingDecision;
    }

    if !daytime && state.has_raid_been_calculated {
        state.has_raid_been_calculated = false;
        state.nights_since_last_raid = state.nights_since_last_raid.saturating_add(1);

        if state.will_raid_tonight {
            state.will_raid_tonight = false;
            if config.dev_messages {
                world.notify(recipients, "Night reached: raiding");
            }
            return ClockPhase::NightTrigger;
        }
        return ClockPhase::NightNoRaid;
    }

    if daytime {
        ClockPhase::Decided
    } else {
        ClockPhase::Night
    }
}

/// One draw per decision; skipped entirely while still in cooldown
fn raid_this_night<R>(state: &RaidState, config: &RaidConfig, rng: &mut R) -> bool
where
    R: RandomSource + ?Sized,
{
    state.nights_since_last_raid > config.min_nights_between_raids
        && rng.next_double() < config.nightly_raid_chance()
}
