//! Worker AI substrate
//!
//! The state-transition engine every worker role is built on. Roles bring
//! their own state enum and data type; this module brings the scheduling:
//!
//! - **state**: `AiState`, `PriorityClass`, shared `BasicState`
//! - **transition**: guarded transitions and the `Directive` actions return
//! - **worker**: the agent carrying exactly one current state
//! - **scheduler**: `BehaviorTree`, one tick = at most one transition
//! - **registry**: role → allowed states
//! - **crew**: deterministic stepping of many workers

pub mod crew;
pub mod registry;
pub mod scheduler;
pub mod state;
pub mod transition;
pub mod worker;

pub use crew::{Crew, CrewMember, CrewTick, CrewTickSummary};
pub use registry::{RoleRegistry, SchedulerError};
pub use scheduler::{BehaviorTree, StepOutcome};
pub use state::{AiState, BasicState, PriorityClass};
pub use transition::{Directive, Transition, Trigger};
pub use worker::Worker;
