//! Role registry
//!
//! Maps a role name to the set of states its workers may occupy. A behavior
//! tree built for a role refuses transitions that reference foreign states.

use crate::ai::state::AiState;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while assembling a behavior tree
#[derive(Debug, Error, PartialEq)]
pub enum SchedulerError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("State {state} is not allowed for role {role}")]
    StateNotAllowed { role: String, state: String },

    #[error("Tick rate must be at least 1")]
    ZeroTickRate,
}

/// Role name → allowed states
#[derive(Debug, Clone)]
pub struct RoleRegistry<S: AiState> {
    roles: HashMap<String, HashSet<S>>,
}

impl<S: AiState> Default for RoleRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AiState> RoleRegistry<S> {
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// Register (or extend) a role with the given states
    pub fn register_role<I>(&mut self, role: impl Into<String>, states: I)
    where
        I: IntoIterator<Item = S>,
    {
        self.roles.entry(role.into()).or_default().extend(states);
    }

    pub fn allowed_states(&self, role: &str) -> Option<&HashSet<S>> {
        self.roles.get(role)
    }

    pub fn allows(&self, role: &str, state: S) -> bool {
        self.roles
            .get(role)
            .is_some_and(|states| states.contains(&state))
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    pub(crate) fn resolve(&self, role: &str) -> Result<HashSet<S>, SchedulerError> {
        self.roles
            .get(role)
            .cloned()
            .ok_or_else(|| SchedulerError::UnknownRole(role.to_string()))
    }
}
