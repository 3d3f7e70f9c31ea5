//! Orchestrator - main simulation loop
//!
//! Ties the day/night clock, per-settlement raid clocks and worker crews
//! into a single deterministic tick loop.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{Orchestrator, OrchestratorConfig, OrchestratorError, TickResult};
