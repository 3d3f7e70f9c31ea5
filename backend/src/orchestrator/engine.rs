//! Orchestrator Engine
//!
//! Main simulation loop tying the colony core together:
//! - Day/night clock (deterministic tick counting)
//! - Raid clock per settlement (decide by day, dispatch at nightfall)
//! - Worker crews (one behavior tree step per worker)
//! - Event logging (complete simulation history)
//!
//! # Architecture
//!
//! ```text
//! For each tick t:
//! 1. Run every settlement's raid clock, in insertion order
//! 2. Step every crew, in insertion order (workers in enlistment order)
//! 3. Log events
//! 4. Advance time
//! ```
//!
//! Clock and randomness are owned here; terrain, territory, the raid spawner
//! and the chat sink come from the host through [`WorldHost`].
//!
//! # Example
//!
//! ```rust,ignore
//! use colony_ai_core_rs::orchestrator::{Orchestrator, OrchestratorConfig};
//!
//! let mut orchestrator = Orchestrator::new(OrchestratorConfig::default(), my_host)?;
//! orchestrator.add_settlement(colony)?;
//! orchestrator.add_crew(farmers);
//!
//! for _ in 0..24_000 {
//!     let result = orchestrator.tick();
//!     if result.raids_dispatched > 0 {
//!         println!("raid at tick {}", result.tick);
//!     }
//! }
//! ```

use crate::ai::{AiState, Crew, CrewTick};
use crate::core::time::TimeManager;
use crate::models::event::{Event, EventLog};
use crate::models::settlement::Settlement;
use crate::raid::{
    raid_event, tick_settlement_raid_clock, ClockPhase, ConfigError, DispatchOutcome, RaidConfig,
    RaidRequest, RaidTickOutcome,
};
use crate::rng::RngManager;
use crate::world::{
    DayNightSource, Heading, Notifier, Position, RaidSpawner, RandomSource, TerrainQuery,
    TerritoryQuery, WorldHost,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug_span;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete orchestrator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Ticks in one full day/night cycle
    pub ticks_per_day: usize,

    /// Leading ticks of each cycle that are daytime
    pub daylight_ticks: usize,

    /// RNG seed for deterministic raids
    pub rng_seed: u64,

    /// Raid timing, magnitude and dispatch parameters
    pub raid: RaidConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            ticks_per_day: 24_000,
            daylight_ticks: 12_000,
            rng_seed: 12345,
            raid: RaidConfig::default(),
        }
    }
}

/// Orchestrator error types
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Raid(#[from] ConfigError),

    #[error("Settlement not found: {0}")]
    SettlementNotFound(String),

    #[error("Duplicate settlement: {0}")]
    DuplicateSettlement(String),
}

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Tick number
    pub tick: usize,

    /// Day the tick belongs to
    pub day: usize,

    /// Phase the tick ran in
    pub is_daytime: bool,

    /// Worker actions executed across all crews
    pub transitions_fired: usize,

    /// Raids handed to the spawner
    pub raids_dispatched: usize,

    /// Raids triggered but aborted
    pub raids_aborted: usize,
}

// ============================================================================
// World view
// ============================================================================

/// Host services plus the orchestrator's own clock and RNG
struct WorldView<'a, H> {
    clock: &'a TimeManager,
    rng: &'a mut RngManager,
    host: &'a mut H,
}

impl<H> DayNightSource for WorldView<'_, H> {
    fn is_daytime(&self) -> bool {
        self.clock.is_daytime()
    }
}

impl<H> RandomSource for WorldView<'_, H> {
    fn next_double(&mut self) -> f64 {
        self.rng.next_f64()
    }
}

impl<H: TerrainQuery> TerrainQuery for WorldView<'_, H> {
    fn find_walkable_ground(&self, point: Position) -> Option<Position> {
        self.host.find_walkable_ground(point)
    }

    fn is_open_water(&self, point: Position) -> bool {
        self.host.is_open_water(point)
    }

    fn check_water_area(&self, point: Position, width: u32, height: u32) -> bool {
        self.host.check_water_area(point, width, height)
    }
}

impl<H: TerritoryQuery> TerritoryQuery for WorldView<'_, H> {
    fn outermost_point_in_direction(&self, settlement_id: &str, heading: Heading) -> Position {
        self.host.outermost_point_in_direction(settlement_id, heading)
    }
}

impl<H: RaidSpawner> RaidSpawner for WorldView<'_, H> {
    fn spawn_raid(&mut self, settlement_id: &str, request: &RaidRequest) {
        self.host.spawn_raid(settlement_id, request);
    }
}

impl<H: Notifier> Notifier for WorldView<'_, H> {
    fn notify(&mut self, recipients: &[String], text: &str) {
        self.host.notify(recipients, text);
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Drives settlements and crews one tick at a time
pub struct Orchestrator<H> {
    config: OrchestratorConfig,
    time: TimeManager,
    rng: RngManager,
    host: H,
    settlements: Vec<Settlement>,
    crews: Vec<Box<dyn CrewTick>>,
    event_log: EventLog,
}

impl<H: WorldHost> Orchestrator<H> {
    /// Create a new orchestrator
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an impossible day/night split and `Raid`
    /// when the raid configuration fails validation.
    pub fn new(config: OrchestratorConfig, host: H) -> Result<Self, OrchestratorError> {
        Self::validate_config(&config)?;

        let time = TimeManager::new(config.ticks_per_day, config.daylight_ticks);
        let rng = RngManager::new(config.rng_seed);

        Ok(Self {
            config,
            time,
            rng,
            host,
            settlements: Vec::new(),
            crews: Vec::new(),
            event_log: EventLog::new(),
        })
    }

    fn validate_config(config: &OrchestratorConfig) -> Result<(), OrchestratorError> {
        if config.ticks_per_day == 0 {
            return Err(OrchestratorError::InvalidConfig(
                "ticks_per_day must be positive".to_string(),
            ));
        }
        if config.daylight_ticks == 0 || config.daylight_ticks >= config.ticks_per_day {
            return Err(OrchestratorError::InvalidConfig(format!(
                "daylight_ticks must be within (0, {}), got {}",
                config.ticks_per_day, config.daylight_ticks
            )));
        }
        config.raid.validate()?;
        Ok(())
    }

    /// Add a settlement; ids must be unique
    pub fn add_settlement(&mut self, settlement: Settlement) -> Result<(), OrchestratorError> {
        if self.settlement(settlement.id()).is_some() {
            return Err(OrchestratorError::DuplicateSettlement(
                settlement.id().to_string(),
            ));
        }
        self.settlements.push(settlement);
        Ok(())
    }

    pub fn remove_settlement(&mut self, settlement_id: &str) -> Result<Settlement, OrchestratorError> {
        let index = self
            .settlements
            .iter()
            .position(|s| s.id() == settlement_id)
            .ok_or_else(|| OrchestratorError::SettlementNotFound(settlement_id.to_string()))?;
        Ok(self.settlements.remove(index))
    }

    pub fn settlement(&self, settlement_id: &str) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.id() == settlement_id)
    }

    pub fn settlement_mut(&mut self, settlement_id: &str) -> Option<&mut Settlement> {
        self.settlements.iter_mut().find(|s| s.id() == settlement_id)
    }

    /// Add a crew at the end of the step order
    pub fn add_crew<S: AiState, D: 'static>(&mut self, crew: Crew<S, D>) {
        self.crews.push(Box::new(crew));
    }

    pub fn crew_names(&self) -> impl Iterator<Item = &str> {
        self.crews.iter().map(|crew| crew.name())
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn current_tick(&self) -> usize {
        self.time.current_tick()
    }

    pub fn current_day(&self) -> usize {
        self.time.current_day()
    }

    pub fn is_daytime(&self) -> bool {
        self.time.is_daytime()
    }

    /// Current RNG state, enough to reproduce the remaining draws
    pub fn rng_state(&self) -> u64 {
        self.rng.state()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Force a raid on a settlement now, bypassing the timing decision
    pub fn trigger_raid(&mut self, settlement_id: &str) -> Result<DispatchOutcome, OrchestratorError> {
        let tick = self.time.current_tick();
        let settlement = self
            .settlements
            .iter_mut()
            .find(|s| s.id() == settlement_id)
            .ok_or_else(|| OrchestratorError::SettlementNotFound(settlement_id.to_string()))?;

        let mut world = WorldView {
            clock: &self.time,
            rng: &mut self.rng,
            host: &mut self.host,
        };
        let outcome = raid_event(settlement, &mut world, &self.config.raid);
        log_dispatch(&mut self.event_log, tick, settlement.id(), &outcome);
        Ok(outcome)
    }

    /// Execute one simulation tick
    pub fn tick(&mut self) -> TickResult {
        let tick = self.time.current_tick();
        let _span = debug_span!("tick", tick).entered();

        let mut result = TickResult {
            tick,
            day: self.time.current_day(),
            is_daytime: self.time.is_daytime(),
            ..TickResult::default()
        };

        // STEP 1: RAID CLOCKS
        for settlement in &mut self.settlements {
            let mut world = WorldView {
                clock: &self.time,
                rng: &mut self.rng,
                host: &mut self.host,
            };
            let outcome = tick_settlement_raid_clock(settlement, &mut world, &self.config.raid);
            record_raid_tick(&mut self.event_log, &mut result, settlement, outcome);
        }

        // STEP 2: WORKERS
        for crew in &mut self.crews {
            let summary = crew.tick(tick, &mut self.event_log);
            result.transitions_fired += summary.actions();
        }

        // STEP 3: ADVANCE TIME
        self.time.advance_tick();

        result
    }

    /// Run `ticks` ticks and return their results
    pub fn run(&mut self, ticks: usize) -> Vec<TickResult> {
        (0..ticks).map(|_| self.tick()).collect()
    }
}

fn record_raid_tick(
    log: &mut EventLog,
    result: &mut TickResult,
    settlement: &Settlement,
    outcome: RaidTickOutcome,
) {
    let tick = result.tick;
    match outcome.phase {
        ClockPhase::AwaitingDecision => log.log(Event::RaidDecided {
            tick,
            settlement_id: settlement.id().to_string(),
            will_raid: settlement.raid_state().will_raid_tonight(),
        }),
        ClockPhase::NightTrigger | ClockPhase::NightNoRaid => log.log(Event::Nightfall {
            tick,
            settlement_id: settlement.id().to_string(),
            raiding: outcome.phase.raid_now(),
            nights_since_last_raid: settlement.raid_state().nights_since_last_raid(),
        }),
        _ => {}
    }

    if let Some(dispatch) = outcome.dispatch {
        match dispatch {
            DispatchOutcome::Dispatched(_) => result.raids_dispatched += 1,
            DispatchOutcome::Aborted(_) => result.raids_aborted += 1,
        }
        log_dispatch(log, tick, settlement.id(), &dispatch);
    }
}

fn log_dispatch(log: &mut EventLog, tick: usize, settlement_id: &str, outcome: &DispatchOutcome) {
    let event = match outcome {
        DispatchOutcome::Dispatched(request) => Event::RaidDispatched {
            tick,
            settlement_id: settlement_id.to_string(),
            site: request.site,
            horde: request.horde,
            tier: request.tier,
            naval: request.naval,
        },
        DispatchOutcome::Aborted(reason) => Event::RaidAborted {
            tick,
            settlement_id: settlement_id.to_string(),
            reason: *reason,
        },
    };
    log.log(event);
}
