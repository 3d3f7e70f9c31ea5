//! Raid events against a settlement
//!
//! Each tick, for each settlement:
//!
//! ```text
//! 1. timing:   is_it_time_to_raid      → NightTrigger exactly once per raid night
//! 2. horde:    compute_horde           → zero horde means no raid
//! 3. spawn:    locate_spawn_site       → Unavailable means no raid
//! 4. dispatch: dispatch_raid           → tier, reset night counter, spawner hand-off
//! ```
//!
//! Nothing here fails: degenerate inputs produce a "no raid" outcome so one
//! settlement can never stall the others.

pub mod config;
pub mod dispatch;
pub mod horde;
pub mod spawn;
pub mod timing;

pub use config::{ConfigError, RaidConfig};
pub use dispatch::{dispatch_raid, AbortReason, DispatchOutcome, RaidRequest, RaidTier, ShipSize};
pub use horde::{compute_horde, compute_raid_level, Horde, SPAWN_MODIFIER};
pub use spawn::{locate_spawn_site, SpawnSite};
pub use timing::{is_it_time_to_raid, ClockPhase, RaidState};

use crate::models::settlement::Settlement;
use crate::world::RaidWorld;
use tracing::info;

/// Result of one raid clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaidTickOutcome {
    pub phase: ClockPhase,
    /// Present only on the tick a raid was triggered
    pub dispatch: Option<DispatchOutcome>,
}

/// Run the raid clock for one tick
///
/// Calls the timing decider and, when it triggers, computes the horde, finds
/// a site and dispatches in sequence.
pub fn tick_settlement_raid_clock<W>(
    settlement: &mut Settlement,
    world: &mut W,
    config: &RaidConfig,
) -> RaidTickOutcome
where
    W: RaidWorld + ?Sized,
{
    if !settlement.can_have_raid_events() {
        return RaidTickOutcome {
            phase: ClockPhase::Disabled,
            dispatch: None,
        };
    }

    let population = settlement.citizens().len();
    let (raid_state, recipients) = settlement.raid_state_and_recipients();
    let phase = is_it_time_to_raid(raid_state, population, recipients, config, world);

    let dispatch = phase
        .raid_now()
        .then(|| raid_event(settlement, world, config));
    RaidTickOutcome { phase, dispatch }
}

/// Trigger a raid on `settlement` right now, skipping the timing decision
pub fn raid_event<W>(settlement: &mut Settlement, world: &mut W, config: &RaidConfig) -> DispatchOutcome
where
    W: RaidWorld + ?Sized,
{
    if !settlement.can_have_raid_events() {
        return DispatchOutcome::Aborted(AbortReason::RaidsDisabled);
    }

    let horde = compute_horde(settlement.citizens(), config);
    if horde.is_empty() {
        info!(settlement = settlement.id(), "raid triggered but horde is empty");
        return DispatchOutcome::Aborted(AbortReason::EmptyHorde);
    }

    let site = locate_spawn_site(
        settlement.id(),
        settlement.center(),
        config.naval_water_size,
        world,
    );
    if site == SpawnSite::Unavailable {
        info!(settlement = settlement.id(), "raid triggered but no spawn site found");
    }

    dispatch_raid(settlement, horde, site, config, world)
}
