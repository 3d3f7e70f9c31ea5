//! Domain models for the colony core

pub mod event;
pub mod settlement;

// Re-exports
pub use event::{Event, EventLog};
pub use settlement::{Citizen, Settlement};
