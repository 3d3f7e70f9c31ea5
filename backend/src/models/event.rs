//! Event logging for replay and debugging
//!
//! Captures every significant state change the orchestrator drives:
//! - **Worker**: transitions fired, rejected, or halting a worker
//! - **Raid clock**: nightly decisions and nightfall
//! - **Dispatch**: raids handed to the spawner or aborted
//!
//! # Example
//!
//! ```rust
//! use colony_ai_core_rs::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::RaidDecided {
//!     tick: 3,
//!     settlement_id: "colony-1".to_string(),
//!     will_raid: true,
//! });
//!
//! assert_eq!(log.events_for_settlement("colony-1").len(), 1);
//! ```

use crate::ai::PriorityClass;
use crate::raid::{AbortReason, Horde, RaidTier};
use crate::world::Position;

/// Simulation event capturing a state change.
///
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A worker transition executed; `class` is `None` for normal-state transitions
    TransitionFired {
        tick: usize,
        crew: String,
        worker_id: String,
        class: Option<PriorityClass>,
        from: String,
        to: String,
    },

    /// A transition asked for a state its role does not allow
    TransitionRejected {
        tick: usize,
        crew: String,
        worker_id: String,
        from: String,
        attempted: String,
    },

    /// A worker's behavior finished
    WorkerFinished {
        tick: usize,
        crew: String,
        worker_id: String,
        state: String,
    },

    /// Daytime decision recorded for tonight
    RaidDecided {
        tick: usize,
        settlement_id: String,
        will_raid: bool,
    },

    /// First night tick after a decided day
    Nightfall {
        tick: usize,
        settlement_id: String,
        raiding: bool,
        /// Counter after the tick, so zero once a raid dispatched
        nights_since_last_raid: u32,
    },

    /// Raid handed to the spawner
    RaidDispatched {
        tick: usize,
        settlement_id: String,
        site: Position,
        horde: Horde,
        tier: RaidTier,
        naval: bool,
    },

    /// Raid triggered but not spawned
    RaidAborted {
        tick: usize,
        settlement_id: String,
        reason: AbortReason,
    },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::TransitionFired { tick, .. } => *tick,
            Event::TransitionRejected { tick, .. } => *tick,
            Event::WorkerFinished { tick, .. } => *tick,
            Event::RaidDecided { tick, .. } => *tick,
            Event::Nightfall { tick, .. } => *tick,
            Event::RaidDispatched { tick, .. } => *tick,
            Event::RaidAborted { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::TransitionFired { .. } => "TransitionFired",
            Event::TransitionRejected { .. } => "TransitionRejected",
            Event::WorkerFinished { .. } => "WorkerFinished",
            Event::RaidDecided { .. } => "RaidDecided",
            Event::Nightfall { .. } => "Nightfall",
            Event::RaidDispatched { .. } => "RaidDispatched",
            Event::RaidAborted { .. } => "RaidAborted",
        }
    }

    /// Get worker ID if event relates to a specific worker
    pub fn worker_id(&self) -> Option<&str> {
        match self {
            Event::TransitionFired { worker_id, .. } => Some(worker_id),
            Event::TransitionRejected { worker_id, .. } => Some(worker_id),
            Event::WorkerFinished { worker_id, .. } => Some(worker_id),
            _ => None,
        }
    }

    /// Get settlement ID if event relates to a specific settlement
    pub fn settlement_id(&self) -> Option<&str> {
        match self {
            Event::RaidDecided { settlement_id, .. } => Some(settlement_id),
            Event::Nightfall { settlement_id, .. } => Some(settlement_id),
            Event::RaidDispatched { settlement_id, .. } => Some(settlement_id),
            Event::RaidAborted { settlement_id, .. } => Some(settlement_id),
            _ => None,
        }
    }
}

/// Event log for storing and querying simulation events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific worker
    pub fn events_for_worker(&self, worker_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.worker_id() == Some(worker_id))
            .collect()
    }

    /// Get events for a specific settlement
    pub fn events_for_settlement(&self, settlement_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.settlement_id() == Some(settlement_id))
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
