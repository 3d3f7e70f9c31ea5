//! Behavior tree scheduler
//!
//! One `BehaviorTree` drives one worker. Each call to [`BehaviorTree::step`]
//! is one simulation tick and executes at most one transition:
//!
//! ```text
//! 1. Blocking transitions        (regardless of state)  → first match fires, stop
//! 2. StateBlocking transitions   (regardless of state)  → first match fires, stop
//! 3. Event transitions           (regardless of state)  → first match fires, is removed, stop
//! 4. Transitions of the current state, registration order → first match fires, stop
//! 5. Nothing matched                                    → no-op tick
//! ```
//!
//! Stepping is cooperative: actions are plain synchronous closures and run to
//! completion. Anything that takes several ticks (walking, waiting on an item)
//! is modeled as a sequence of states, and "waiting" is simply staying in the
//! same state tick after tick.
//!
//! The tree holds `&mut` access to the worker for the whole step, so an
//! action can never re-enter the scheduler that is running it.

use crate::ai::registry::{RoleRegistry, SchedulerError};
use crate::ai::state::{AiState, PriorityClass};
use crate::ai::transition::{Directive, Transition, Trigger};
use crate::ai::worker::Worker;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// What happened during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome<S> {
    /// No transition matched
    Idle,
    /// A transition fired; `class` is `None` for a normal-state transition
    Fired {
        class: Option<PriorityClass>,
        from: S,
        to: S,
    },
    /// A transition fired but asked for a state outside the worker's role
    Rejected {
        class: Option<PriorityClass>,
        from: S,
        attempted: S,
    },
    /// A transition fired and halted the worker
    Finished { class: Option<PriorityClass>, from: S },
    /// The worker was already halted; nothing was evaluated
    Halted,
}

impl<S> StepOutcome<S> {
    /// Whether an action executed this step
    pub fn fired(&self) -> bool {
        matches!(
            self,
            StepOutcome::Fired { .. } | StepOutcome::Rejected { .. } | StepOutcome::Finished { .. }
        )
    }
}

/// Per-worker finite state machine with priority interrupts
///
/// # Example
/// ```
/// use colony_ai_core_rs::ai::{BasicState, BehaviorTree, Directive, PriorityClass, StepOutcome, Worker};
///
/// struct Citizen { saturation: u32 }
///
/// let mut tree = BehaviorTree::new();
/// tree.on_class(
///     PriorityClass::Blocking,
///     |c: &Citizen| c.saturation == 0,
///     |_| Directive::Goto(BasicState::Hungry),
/// ).unwrap();
/// tree.on_state(BasicState::Idle, |_| true, |_| Directive::Goto(BasicState::StartWorking))
///     .unwrap();
///
/// let mut worker = Worker::new(BasicState::Idle, Citizen { saturation: 0 });
/// let outcome = tree.step(&mut worker);
/// assert_eq!(worker.state(), BasicState::Hungry);
/// assert!(matches!(outcome, StepOutcome::Fired { class: Some(PriorityClass::Blocking), .. }));
/// ```
pub struct BehaviorTree<S: AiState, D> {
    blocking: Vec<Transition<S, D>>,
    state_blocking: Vec<Transition<S, D>>,
    events: Vec<Transition<S, D>>,
    by_state: HashMap<S, Vec<Transition<S, D>>>,

    /// Role this tree was built for, with its allowed states
    role: Option<(String, HashSet<S>)>,

    /// Steps taken so far; drives per-transition tick rates
    ticks: u64,
}

impl<S: AiState, D> Default for BehaviorTree<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AiState, D> BehaviorTree<S, D> {
    /// Tree without role restrictions
    pub fn new() -> Self {
        Self {
            blocking: Vec::new(),
            state_blocking: Vec::new(),
            events: Vec::new(),
            by_state: HashMap::new(),
            role: None,
            ticks: 0,
        }
    }

    /// Tree restricted to the states `registry` allows for `role`
    pub fn for_role(registry: &RoleRegistry<S>, role: &str) -> Result<Self, SchedulerError> {
        let allowed = registry.resolve(role)?;
        let mut tree = Self::new();
        tree.role = Some((role.to_string(), allowed));
        Ok(tree)
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_ref().map(|(name, _)| name.as_str())
    }

    /// Whether `state` may be entered by workers of this tree
    pub fn allows(&self, state: S) -> bool {
        match &self.role {
            Some((_, allowed)) => allowed.contains(&state),
            None => true,
        }
    }

    /// Add a transition; order of registration breaks ties
    pub fn register(&mut self, transition: Transition<S, D>) -> Result<(), SchedulerError> {
        if transition.tick_rate() == 0 {
            return Err(SchedulerError::ZeroTickRate);
        }

        match transition.trigger() {
            Trigger::State(state) => {
                if !self.allows(state) {
                    return Err(self.not_allowed(state));
                }
                self.by_state.entry(state).or_default().push(transition);
            }
            Trigger::Priority(class) => self.class_table_mut(class).push(transition),
        }
        Ok(())
    }

    pub fn on_state<G, A>(&mut self, state: S, guard: G, action: A) -> Result<(), SchedulerError>
    where
        G: Fn(&D) -> bool + 'static,
        A: FnMut(&mut D) -> Directive<S> + 'static,
    {
        self.register(Transition::on_state(state, guard, action))
    }

    pub fn on_class<G, A>(
        &mut self,
        class: PriorityClass,
        guard: G,
        action: A,
    ) -> Result<(), SchedulerError>
    where
        G: Fn(&D) -> bool + 'static,
        A: FnMut(&mut D) -> Directive<S> + 'static,
    {
        self.register(Transition::on_class(class, guard, action))
    }

    /// Event transitions that have not fired yet
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Total registered transitions, consumed events excluded
    pub fn transition_count(&self) -> usize {
        self.blocking.len()
            + self.state_blocking.len()
            + self.events.len()
            + self.by_state.values().map(Vec::len).sum::<usize>()
    }

    /// Steps taken by this tree
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick for `worker`
    pub fn step(&mut self, worker: &mut Worker<S, D>) -> StepOutcome<S> {
        if worker.is_halted() {
            return StepOutcome::Halted;
        }

        let tick = self.ticks;
        self.ticks = self.ticks.wrapping_add(1);
        let from = worker.state();

        for class in PriorityClass::EVALUATION_ORDER {
            let table = self.class_table_mut(class);
            let Some(index) = first_match(table, tick, worker.data()) else {
                continue;
            };

            let directive = if class.is_one_shot() {
                let mut consumed = table.remove(index);
                consumed.fire(worker.data_mut())
            } else {
                table[index].fire(worker.data_mut())
            };
            return self.apply(worker, Some(class), from, directive);
        }

        let Some(table) = self.by_state.get_mut(&from) else {
            return StepOutcome::Idle;
        };
        let Some(index) = first_match(table, tick, worker.data()) else {
            return StepOutcome::Idle;
        };
        let directive = table[index].fire(worker.data_mut());
        self.apply(worker, None, from, directive)
    }

    /// Put a worker back into `state` and clear any halt
    pub fn reset(&mut self, worker: &mut Worker<S, D>, state: S) -> Result<(), SchedulerError> {
        if !self.allows(state) {
            return Err(self.not_allowed(state));
        }
        worker.set_state(state);
        worker.set_halted(false);
        Ok(())
    }

    fn apply(
        &self,
        worker: &mut Worker<S, D>,
        class: Option<PriorityClass>,
        from: S,
        directive: Directive<S>,
    ) -> StepOutcome<S> {
        match directive {
            Directive::Stay => {
                debug!(worker = %worker.id(), ?class, state = ?from, "transition kept state");
                StepOutcome::Fired {
                    class,
                    from,
                    to: from,
                }
            }
            Directive::Goto(to) if !self.allows(to) => {
                warn!(
                    worker = %worker.id(),
                    role = self.role().unwrap_or_default(),
                    ?from,
                    attempted = ?to,
                    "transition targeted a state outside the role; staying"
                );
                StepOutcome::Rejected {
                    class,
                    from,
                    attempted: to,
                }
            }
            Directive::Goto(to) => {
                debug!(worker = %worker.id(), ?class, ?from, ?to, "transition fired");
                worker.set_state(to);
                StepOutcome::Fired { class, from, to }
            }
            Directive::Halt => {
                debug!(worker = %worker.id(), ?class, state = ?from, "worker halted");
                worker.set_halted(true);
                StepOutcome::Finished { class, from }
            }
        }
    }

    fn class_table_mut(&mut self, class: PriorityClass) -> &mut Vec<Transition<S, D>> {
        match class {
            PriorityClass::Blocking => &mut self.blocking,
            PriorityClass::StateBlocking => &mut self.state_blocking,
            PriorityClass::Event => &mut self.events,
        }
    }

    fn not_allowed(&self, state: S) -> SchedulerError {
        SchedulerError::StateNotAllowed {
            role: self.role().unwrap_or_default().to_string(),
            state: format!("{:?}", state),
        }
    }
}

fn first_match<S: AiState, D>(table: &[Transition<S, D>], tick: u64, data: &D) -> Option<usize> {
    table.iter().position(|transition| transition.matches(tick, data))
}
