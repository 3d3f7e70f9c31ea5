//! State vocabulary for worker AI
//!
//! Each role family declares its own closed enum of states. Any `Copy + Eq +
//! Hash + Debug` type qualifies as an [`AiState`], so a role's transition table
//! can be built and tested independently of every other role.
//!
//! On top of the per-state tables sit three [`PriorityClass`]es that are
//! checked every tick regardless of the current state.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// A discrete execution state. States carry no payload; all data lives on the
/// worker.
pub trait AiState: Copy + Eq + Hash + Debug + 'static {}

impl<T> AiState for T where T: Copy + Eq + Hash + Debug + 'static {}

/// Cross-cutting priority classes, evaluated before the current state
///
/// Ordering follows precedence: `Blocking > StateBlocking > Event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriorityClass {
    /// Fires once, then removes itself
    Event,
    /// Checked right before the current state's transitions
    StateBlocking,
    /// Highest priority; stops all further evaluation this tick
    Blocking,
}

impl PriorityClass {
    /// Evaluation order within a tick
    pub const EVALUATION_ORDER: [PriorityClass; 3] = [
        PriorityClass::Blocking,
        PriorityClass::StateBlocking,
        PriorityClass::Event,
    ];

    /// Whether a transition of this class is consumed after firing
    pub fn is_one_shot(self) -> bool {
        matches!(self, PriorityClass::Event)
    }
}

/// States every role shares
///
/// Role enums usually wrap this one, e.g.
/// `enum FishermanState { Basic(BasicState), SearchingWater, Fishing }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicState {
    /// Only used on AI initialization, checks that everything is in place
    Init,
    /// Starting point of a work cycle
    Idle,
    /// Walking to the work building
    StartWorking,
    /// Checking for required items
    Preparing,
    /// Waiting for a tool
    NeedsTool,
    /// Waiting for requested items
    NeedsItem,
    /// Inventory has to be dumped
    InventoryFull,
    /// Choosing what to do next
    Decide,
    /// Looking for food
    Hungry,
    /// Not working; free time
    Paused,
}
