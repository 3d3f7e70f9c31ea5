//! Colony AI Core - Rust Engine
//!
//! Tick-driven behavior scheduling for settlement workers, plus the raid
//! event scheduler that decides when, how large and where raids arrive.
//!
//! # Architecture
//!
//! - **ai**: Worker state machines (priority classes, transitions, scheduler)
//! - **raid**: Raid timing, horde magnitude, spawn site search, dispatch
//! - **models**: Domain types (Settlement, Citizen, Event)
//! - **world**: Traits the host implements (terrain, territory, spawner)
//! - **orchestrator**: Main simulation loop
//! - **core**: Day/night time management
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. At most one transition fires per worker per tick
//! 2. All randomness is deterministic (seeded RNG)
//! 3. A raid night triggers exactly once
//! 4. `raiders + archers + bosses == horde_size` for every horde

// Module declarations
pub mod ai;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod raid;
pub mod rng;
pub mod world;

// Re-exports for convenience
pub use ai::{
    AiState, BasicState, BehaviorTree, Crew, Directive, PriorityClass, RoleRegistry,
    SchedulerError, StepOutcome, Transition, Worker,
};
pub use core::time::TimeManager;
pub use models::{
    event::{Event, EventLog},
    settlement::{Citizen, Settlement},
};
pub use orchestrator::{Orchestrator, OrchestratorConfig, OrchestratorError, TickResult};
pub use raid::{
    compute_horde, compute_raid_level, tick_settlement_raid_clock, ConfigError, Horde, RaidConfig,
    RaidRequest, RaidTier, SpawnSite,
};
pub use rng::RngManager;
pub use world::{Heading, Position};
