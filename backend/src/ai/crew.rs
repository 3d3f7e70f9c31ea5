//! Crews: workers stepped together each tick
//!
//! A crew owns a list of workers of one role family, each paired with its own
//! behavior tree. Workers are stepped in enlistment order so a tick is
//! deterministic. The orchestrator drives crews of different state/data types
//! through the object-safe [`CrewTick`] trait.

use crate::ai::scheduler::{BehaviorTree, StepOutcome};
use crate::ai::state::AiState;
use crate::ai::worker::Worker;
use crate::models::event::{Event, EventLog};

/// A worker and the tree that drives it
pub struct CrewMember<S: AiState, D> {
    pub worker: Worker<S, D>,
    pub tree: BehaviorTree<S, D>,
}

/// Counts from one crew tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrewTickSummary {
    pub fired: usize,
    pub idle: usize,
    pub rejected: usize,
    pub finished: usize,
    pub halted: usize,
}

impl CrewTickSummary {
    fn record<S>(&mut self, outcome: &StepOutcome<S>) {
        match outcome {
            StepOutcome::Idle => self.idle += 1,
            StepOutcome::Fired { .. } => self.fired += 1,
            StepOutcome::Rejected { .. } => self.rejected += 1,
            StepOutcome::Finished { .. } => self.finished += 1,
            StepOutcome::Halted => self.halted += 1,
        }
    }

    /// Actions executed, whatever their result
    pub fn actions(&self) -> usize {
        self.fired + self.rejected + self.finished
    }
}

/// Type-erased crew, as stored by the orchestrator
pub trait CrewTick {
    fn name(&self) -> &str;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Step every worker once, logging what fired
    fn tick(&mut self, tick: usize, log: &mut EventLog) -> CrewTickSummary;
}

/// Ordered set of workers of one role family
pub struct Crew<S: AiState, D> {
    name: String,
    members: Vec<CrewMember<S, D>>,
}

impl<S: AiState, D> Crew<S, D> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add a worker at the end of the step order
    pub fn enlist(&mut self, worker: Worker<S, D>, tree: BehaviorTree<S, D>) {
        self.members.push(CrewMember { worker, tree });
    }

    /// Remove a worker; the crew never destroys workers on its own
    pub fn discharge(&mut self, worker_id: &str) -> Option<CrewMember<S, D>> {
        let index = self
            .members
            .iter()
            .position(|member| member.worker.id() == worker_id)?;
        Some(self.members.remove(index))
    }

    pub fn worker(&self, worker_id: &str) -> Option<&Worker<S, D>> {
        self.members
            .iter()
            .map(|member| &member.worker)
            .find(|worker| worker.id() == worker_id)
    }

    pub fn worker_mut(&mut self, worker_id: &str) -> Option<&mut Worker<S, D>> {
        self.members
            .iter_mut()
            .map(|member| &mut member.worker)
            .find(|worker| worker.id() == worker_id)
    }

    pub fn workers(&self) -> impl Iterator<Item = &Worker<S, D>> {
        self.members.iter().map(|member| &member.worker)
    }

    pub fn members_mut(&mut self) -> impl Iterator<Item = &mut CrewMember<S, D>> {
        self.members.iter_mut()
    }
}

impl<S: AiState, D> CrewTick for Crew<S, D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn tick(&mut self, tick: usize, log: &mut EventLog) -> CrewTickSummary {
        let mut summary = CrewTickSummary::default();

        for member in &mut self.members {
            let outcome = member.tree.step(&mut member.worker);
            summary.record(&outcome);

            let worker_id = member.worker.id().to_string();
            let event = match outcome {
                StepOutcome::Fired { class, from, to } => Event::TransitionFired {
                    tick,
                    crew: self.name.clone(),
                    worker_id,
                    class,
                    from: format!("{:?}", from),
                    to: format!("{:?}", to),
                },
                StepOutcome::Rejected {
                    from, attempted, ..
                } => Event::TransitionRejected {
                    tick,
                    crew: self.name.clone(),
                    worker_id,
                    from: format!("{:?}", from),
                    attempted: format!("{:?}", attempted),
                },
                StepOutcome::Finished { from, .. } => Event::WorkerFinished {
                    tick,
                    crew: self.name.clone(),
                    worker_id,
                    state: format!("{:?}", from),
                },
                StepOutcome::Idle | StepOutcome::Halted => continue,
            };
            log.log(event);
        }

        summary
    }
}
