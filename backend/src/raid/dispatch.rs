//! Raid dispatch
//!
//! Hands a computed horde and a resolved spawn site to the host's spawner.
//! The size tier only picks cosmetics (message id, vessel size); it never
//! changes the horde itself.

use crate::models::settlement::Settlement;
use crate::raid::config::RaidConfig;
use crate::raid::horde::Horde;
use crate::raid::spawn::SpawnSite;
use crate::world::{Notifier, Position, RaidSpawner};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Cosmetic size class of a raid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidTier {
    Small,
    Medium,
    Big,
    Huge,
}

impl RaidTier {
    /// Compare against the ascending thresholds in `config`
    pub fn for_horde_size(horde_size: i32, config: &RaidConfig) -> Self {
        if horde_size < config.small_horde_size {
            RaidTier::Small
        } else if horde_size < config.medium_horde_size {
            RaidTier::Medium
        } else if horde_size < config.big_horde_size {
            RaidTier::Big
        } else {
            RaidTier::Huge
        }
    }

    /// Id of the arrival message shown to players
    pub fn message_id(self) -> u8 {
        match self {
            RaidTier::Small => 1,
            RaidTier::Medium => 2,
            RaidTier::Big => 3,
            RaidTier::Huge => 4,
        }
    }

    /// Vessel used when the raid arrives by sea
    pub fn ship_size(self) -> ShipSize {
        match self {
            RaidTier::Small => ShipSize::Small,
            RaidTier::Medium | RaidTier::Big => ShipSize::Medium,
            RaidTier::Huge => ShipSize::Big,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipSize {
    Small,
    Medium,
    Big,
}

/// Everything the spawner needs to put a raid in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidRequest {
    pub site: Position,
    pub horde: Horde,
    pub tier: RaidTier,
    pub naval: bool,
}

impl RaidRequest {
    /// Vessel size, only for naval raids
    pub fn ship_size(&self) -> Option<ShipSize> {
        self.naval.then(|| self.tier.ship_size())
    }
}

/// Why a triggered raid did not spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbortReason {
    RaidsDisabled,
    EmptyHorde,
    NoSpawnSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Dispatched(RaidRequest),
    Aborted(AbortReason),
}

impl DispatchOutcome {
    pub fn request(&self) -> Option<&RaidRequest> {
        match self {
            DispatchOutcome::Dispatched(request) => Some(request),
            DispatchOutcome::Aborted(_) => None,
        }
    }
}

/// Spawn `horde` at `site`, or abort without touching the settlement
pub fn dispatch_raid<W>(
    settlement: &mut Settlement,
    horde: Horde,
    site: SpawnSite,
    config: &RaidConfig,
    world: &mut W,
) -> DispatchOutcome
where
    W: RaidSpawner + Notifier + ?Sized,
{
    if horde.is_empty() {
        return DispatchOutcome::Aborted(AbortReason::EmptyHorde);
    }
    let (position, naval) = match site {
        SpawnSite::Unavailable => return DispatchOutcome::Aborted(AbortReason::NoSpawnSite),
        SpawnSite::Land(position) => (position, false),
        SpawnSite::Naval(position) => (position, true),
    };

    if config.dev_messages {
        world.notify(
            settlement.message_recipients(),
            &format!("Horde Spawn Point: {}", position),
        );
    }
    settlement.record_raider_spawn_point(position);
    settlement.raid_state_mut().reset_nights();

    let request = RaidRequest {
        site: position,
        horde,
        tier: RaidTier::for_horde_size(horde.horde_size(), config),
        naval,
    };
    info!(
        settlement = settlement.id(),
        site = %position,
        horde_size = horde.horde_size(),
        tier = ?request.tier,
        naval,
        "dispatching raid"
    );
    world.spawn_raid(settlement.id(), &request);

    DispatchOutcome::Dispatched(request)
}
