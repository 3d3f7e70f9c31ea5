//! Worker (agent) model
//!
//! A worker holds exactly one current state plus role-specific data the core
//! never inspects. Only the scheduler changes the state; hosts read it and
//! freely mutate the data between ticks.

use crate::ai::state::AiState;

/// An autonomous actor stepped by a [`BehaviorTree`](crate::ai::BehaviorTree)
///
/// # Example
/// ```
/// use colony_ai_core_rs::ai::{BasicState, Worker};
///
/// let worker = Worker::with_id("citizen-7", BasicState::Init, 0u32);
/// assert_eq!(worker.id(), "citizen-7");
/// assert_eq!(worker.state(), BasicState::Init);
/// assert!(!worker.is_halted());
/// ```
#[derive(Debug, Clone)]
pub struct Worker<S, D> {
    /// Stable identifier used in logs and the event log
    id: String,

    /// Current behavioral state, mutated only by the scheduler
    state: S,

    /// Role data owned by the worker
    data: D,

    /// Set when an action returned `Directive::Halt`
    halted: bool,
}

impl<S: AiState, D> Worker<S, D> {
    /// Create a worker with a freshly generated UUID
    pub fn new(initial: S, data: D) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), initial, data)
    }

    /// Create a worker with a host-provided id
    pub fn with_id(id: impl Into<String>, initial: S, data: D) -> Self {
        Self {
            id: id.into(),
            state: initial,
            data,
            halted: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub(crate) fn set_state(&mut self, state: S) {
        self.state = state;
    }

    pub(crate) fn set_halted(&mut self, halted: bool) {
        self.halted = halted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::state::BasicState;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Worker::new(BasicState::Idle, ());
        let b = Worker::new(BasicState::Idle, ());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_data_is_freely_mutable() {
        let mut worker = Worker::new(BasicState::Idle, vec![1, 2]);
        worker.data_mut().push(3);
        assert_eq!(worker.data(), &vec![1, 2, 3]);
        assert_eq!(worker.state(), BasicState::Idle);
    }
}
