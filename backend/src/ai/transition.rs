//! Guarded transitions
//!
//! A transition pairs a trigger (a concrete state or a priority class) with a
//! guard over the worker's data and an action that returns a [`Directive`].

use crate::ai::state::{AiState, PriorityClass};

/// What an action tells the scheduler to do with the worker's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<S> {
    /// Keep the current state
    Stay,
    /// Move to another state
    Goto(S),
    /// The worker's behavior is finished; park it until reset
    Halt,
}

/// When a transition is considered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger<S> {
    /// Only while the worker is in this state
    State(S),
    /// Every tick, regardless of state
    Priority(PriorityClass),
}

type Guard<D> = Box<dyn Fn(&D) -> bool>;
type Action<S, D> = Box<dyn FnMut(&mut D) -> Directive<S>>;

/// A guarded rule mapping a worker's state to an action
pub struct Transition<S, D> {
    trigger: Trigger<S>,
    guard: Guard<D>,
    action: Action<S, D>,
    /// Evaluated only on ticks divisible by this
    tick_rate: u32,
}

impl<S: AiState, D> Transition<S, D> {
    pub fn new<G, A>(trigger: Trigger<S>, guard: G, action: A) -> Self
    where
        G: Fn(&D) -> bool + 'static,
        A: FnMut(&mut D) -> Directive<S> + 'static,
    {
        Self {
            trigger,
            guard: Box::new(guard),
            action: Box::new(action),
            tick_rate: 1,
        }
    }

    /// Transition considered while the worker is in `state`
    pub fn on_state<G, A>(state: S, guard: G, action: A) -> Self
    where
        G: Fn(&D) -> bool + 'static,
        A: FnMut(&mut D) -> Directive<S> + 'static,
    {
        Self::new(Trigger::State(state), guard, action)
    }

    /// Transition considered every tick under a priority class
    pub fn on_class<G, A>(class: PriorityClass, guard: G, action: A) -> Self
    where
        G: Fn(&D) -> bool + 'static,
        A: FnMut(&mut D) -> Directive<S> + 'static,
    {
        Self::new(Trigger::Priority(class), guard, action)
    }

    /// Only evaluate every `tick_rate` ticks
    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn trigger(&self) -> Trigger<S> {
        self.trigger
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Due on this scheduler tick and guard passes
    pub(crate) fn matches(&self, tick: u64, data: &D) -> bool {
        tick % u64::from(self.tick_rate) == 0 && (self.guard)(data)
    }

    pub(crate) fn fire(&mut self, data: &mut D) -> Directive<S> {
        (self.action)(data)
    }
}

impl<S: AiState, D> std::fmt::Debug for Transition<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("trigger", &self.trigger)
            .field("tick_rate", &self.tick_rate)
            .finish_non_exhaustive()
    }
}
