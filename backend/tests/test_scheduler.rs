//! Behavior tree scheduler scenarios
//!
//! Priority order, one-shot events, registration order, tick rates, halting
//! and role restrictions, exercised through the public API only.

use colony_ai_core_rs::ai::{
    BasicState, BehaviorTree, Crew, CrewTick, Directive, PriorityClass, RoleRegistry,
    SchedulerError, StepOutcome, Transition, Worker,
};
use colony_ai_core_rs::models::EventLog;
use std::cell::Cell;
use std::rc::Rc;

/// States of a made-up fisher role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Fisher {
    Start,
    CastLine,
    Reel,
    Flee,
    Done,
}

#[derive(Debug, Default)]
struct FisherData {
    danger: bool,
    fish: u32,
    normal_evaluations: u32,
}

fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let count = Rc::new(Cell::new(0));
    (count.clone(), count)
}

// ============================================================================
// Priority classes
// ============================================================================

#[test]
fn test_blocking_preempts_matching_normal_transition() {
    let mut tree: BehaviorTree<Fisher, FisherData> = BehaviorTree::new();
    tree.on_class(PriorityClass::Blocking, |d| d.danger, |_| Directive::Goto(Fisher::Flee))
        .unwrap();
    tree.on_state(Fisher::Start, |_| true, |d| {
        d.normal_evaluations += 1;
        Directive::Goto(Fisher::CastLine)
    })
    .unwrap();

    let mut worker = Worker::new(
        Fisher::Start,
        FisherData {
            danger: true,
            ..FisherData::default()
        },
    );
    let outcome = tree.step(&mut worker);

    assert_eq!(
        outcome,
        StepOutcome::Fired {
            class: Some(PriorityClass::Blocking),
            from: Fisher::Start,
            to: Fisher::Flee,
        }
    );
    assert_eq!(worker.state(), Fisher::Flee);
    assert_eq!(worker.data().normal_evaluations, 0);
}

#[test]
fn test_normal_guard_not_evaluated_when_blocking_fires() {
    let (guard_calls, seen) = counter();

    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    tree.on_class(PriorityClass::Blocking, |_| true, |_| Directive::Stay)
        .unwrap();
    tree.on_state(
        Fisher::Start,
        move |_| {
            guard_calls.set(guard_calls.get() + 1);
            true
        },
        |_| Directive::Goto(Fisher::CastLine),
    )
    .unwrap();

    let mut worker = Worker::new(Fisher::Start, ());
    for _ in 0..5 {
        tree.step(&mut worker);
    }

    assert_eq!(seen.get(), 0);
    assert_eq!(worker.state(), Fisher::Start);
}

#[test]
fn test_priority_precedence_order() {
    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    // Registered lowest first; evaluation order must not depend on it
    tree.on_class(PriorityClass::Event, |_| true, |_| Directive::Goto(Fisher::Reel))
        .unwrap();
    tree.on_class(PriorityClass::StateBlocking, |_| true, |_| {
        Directive::Goto(Fisher::CastLine)
    })
    .unwrap();
    tree.on_class(PriorityClass::Blocking, |_| true, |_| Directive::Goto(Fisher::Flee))
        .unwrap();

    let mut worker = Worker::new(Fisher::Start, ());
    let outcome = tree.step(&mut worker);

    assert!(matches!(
        outcome,
        StepOutcome::Fired {
            class: Some(PriorityClass::Blocking),
            ..
        }
    ));
}

#[test]
fn test_state_blocking_applies_in_any_state() {
    let mut tree: BehaviorTree<Fisher, FisherData> = BehaviorTree::new();
    tree.on_class(
        PriorityClass::StateBlocking,
        |d| d.fish >= 3,
        |_| Directive::Goto(Fisher::Done),
    )
    .unwrap();

    for state in [Fisher::Start, Fisher::CastLine, Fisher::Reel] {
        let mut worker = Worker::new(
            state,
            FisherData {
                fish: 3,
                ..FisherData::default()
            },
        );
        tree.step(&mut worker);
        assert_eq!(worker.state(), Fisher::Done);
    }
}

// ============================================================================
// Event transitions
// ============================================================================

#[test]
fn test_event_fires_once_even_if_guard_stays_true() {
    let (fired, seen) = counter();

    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    tree.on_class(PriorityClass::Event, |_| true, move |_| {
        fired.set(fired.get() + 1);
        Directive::Stay
    })
    .unwrap();
    assert_eq!(tree.pending_events(), 1);

    let mut worker = Worker::new(Fisher::Start, ());
    let first = tree.step(&mut worker);
    let second = tree.step(&mut worker);

    assert!(first.fired());
    assert_eq!(second, StepOutcome::Idle);
    assert_eq!(seen.get(), 1);
    assert_eq!(tree.pending_events(), 0);
}

#[test]
fn test_event_waits_for_its_guard() {
    let mut tree: BehaviorTree<Fisher, FisherData> = BehaviorTree::new();
    tree.on_class(PriorityClass::Event, |d| d.fish > 0, |_| Directive::Goto(Fisher::Reel))
        .unwrap();

    let mut worker = Worker::new(Fisher::CastLine, FisherData::default());
    assert_eq!(tree.step(&mut worker), StepOutcome::Idle);
    assert_eq!(tree.pending_events(), 1);

    worker.data_mut().fish = 1;
    assert!(tree.step(&mut worker).fired());
    assert_eq!(worker.state(), Fisher::Reel);
    assert_eq!(tree.pending_events(), 0);
}

#[test]
fn test_only_first_matching_event_is_consumed() {
    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    tree.on_class(PriorityClass::Event, |_| true, |_| Directive::Goto(Fisher::CastLine))
        .unwrap();
    tree.on_class(PriorityClass::Event, |_| true, |_| Directive::Goto(Fisher::Reel))
        .unwrap();

    let mut worker = Worker::new(Fisher::Start, ());
    tree.step(&mut worker);
    assert_eq!(worker.state(), Fisher::CastLine);
    assert_eq!(tree.pending_events(), 1);

    tree.step(&mut worker);
    assert_eq!(worker.state(), Fisher::Reel);
    assert_eq!(tree.pending_events(), 0);
}

// ============================================================================
// Normal-state transitions
// ============================================================================

#[test]
fn test_registration_order_breaks_ties() {
    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    tree.on_state(Fisher::Start, |_| true, |_| Directive::Goto(Fisher::CastLine))
        .unwrap();
    tree.on_state(Fisher::Start, |_| true, |_| Directive::Goto(Fisher::Flee))
        .unwrap();

    let mut worker = Worker::new(Fisher::Start, ());
    tree.step(&mut worker);
    assert_eq!(worker.state(), Fisher::CastLine);
}

#[test]
fn test_at_most_one_transition_per_tick() {
    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    tree.on_state(Fisher::Start, |_| true, |_| Directive::Goto(Fisher::CastLine))
        .unwrap();
    tree.on_state(Fisher::CastLine, |_| true, |_| Directive::Goto(Fisher::Reel))
        .unwrap();
    tree.on_state(Fisher::Reel, |_| true, |_| Directive::Goto(Fisher::Done))
        .unwrap();

    let mut worker = Worker::new(Fisher::Start, ());
    let mut states = Vec::new();
    for _ in 0..4 {
        tree.step(&mut worker);
        states.push(worker.state());
    }

    assert_eq!(
        states,
        vec![Fisher::CastLine, Fisher::Reel, Fisher::Done, Fisher::Done]
    );
}

#[test]
fn test_fishing_loop_accumulates_data() {
    let mut tree: BehaviorTree<Fisher, FisherData> = BehaviorTree::new();
    tree.on_state(Fisher::Start, |_| true, |_| Directive::Goto(Fisher::CastLine))
        .unwrap();
    tree.on_state(Fisher::CastLine, |_| true, |_| Directive::Goto(Fisher::Reel))
        .unwrap();
    tree.on_state(Fisher::Reel, |_| true, |d| {
        d.fish += 1;
        Directive::Goto(Fisher::CastLine)
    })
    .unwrap();

    let mut worker = Worker::new(Fisher::Start, FisherData::default());
    for _ in 0..7 {
        tree.step(&mut worker);
    }

    // Start → Cast, then three Cast → Reel → Cast loops
    assert_eq!(worker.data().fish, 3);
    assert_eq!(worker.state(), Fisher::CastLine);
}

#[test]
fn test_no_match_is_idle() {
    let mut tree: BehaviorTree<Fisher, FisherData> = BehaviorTree::new();
    tree.on_state(Fisher::Reel, |d| d.fish > 10, |_| Directive::Goto(Fisher::Done))
        .unwrap();

    let mut worker = Worker::new(Fisher::Reel, FisherData::default());
    assert_eq!(tree.step(&mut worker), StepOutcome::Idle);
    assert_eq!(worker.state(), Fisher::Reel);
}

// ============================================================================
// Tick rate
// ============================================================================

#[test]
fn test_tick_rate_throttles_evaluation() {
    let (fired, seen) = counter();

    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    tree.register(
        Transition::on_state(Fisher::Start, |_| true, move |_| {
            fired.set(fired.get() + 1);
            Directive::Stay
        })
        .with_tick_rate(5),
    )
    .unwrap();

    let mut worker = Worker::new(Fisher::Start, ());
    let outcomes: Vec<bool> = (0..10).map(|_| tree.step(&mut worker).fired()).collect();

    assert_eq!(seen.get(), 2);
    assert!(outcomes[0]);
    assert!(outcomes[5]);
    assert!(!outcomes[1]);
}

#[test]
fn test_zero_tick_rate_rejected() {
    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    let err = tree
        .register(
            Transition::on_state(Fisher::Start, |_| true, |_| Directive::Stay).with_tick_rate(0),
        )
        .unwrap_err();

    assert_eq!(err, SchedulerError::ZeroTickRate);
    assert_eq!(tree.transition_count(), 0);
}

// ============================================================================
// Halt and reset
// ============================================================================

#[test]
fn test_halt_parks_worker_until_reset() {
    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    tree.on_state(Fisher::Done, |_| true, |_| Directive::Halt).unwrap();
    tree.on_state(Fisher::Start, |_| true, |_| Directive::Goto(Fisher::Done))
        .unwrap();

    let mut worker = Worker::new(Fisher::Done, ());
    assert_eq!(
        tree.step(&mut worker),
        StepOutcome::Finished {
            class: None,
            from: Fisher::Done,
        }
    );
    assert!(worker.is_halted());
    assert_eq!(tree.step(&mut worker), StepOutcome::Halted);

    tree.reset(&mut worker, Fisher::Start).unwrap();
    assert!(!worker.is_halted());
    assert_eq!(worker.state(), Fisher::Start);

    tree.step(&mut worker);
    assert_eq!(worker.state(), Fisher::Done);
}

#[test]
fn test_halted_worker_ignores_blocking() {
    let mut tree: BehaviorTree<Fisher, ()> = BehaviorTree::new();
    tree.on_state(Fisher::Start, |_| true, |_| Directive::Halt).unwrap();
    tree.on_class(PriorityClass::Blocking, |_| false, |_| Directive::Goto(Fisher::Flee))
        .unwrap();

    let mut worker = Worker::new(Fisher::Start, ());
    tree.step(&mut worker);

    let ticks = tree.ticks();
    assert_eq!(tree.step(&mut worker), StepOutcome::Halted);
    assert_eq!(tree.ticks(), ticks);
}

// ============================================================================
// Role registry
// ============================================================================

fn fisher_registry() -> RoleRegistry<BasicState> {
    let mut registry = RoleRegistry::new();
    registry.register_role(
        "fisher",
        [BasicState::Idle, BasicState::StartWorking, BasicState::Hungry],
    );
    registry
}

#[test]
fn test_unknown_role_rejected() {
    let registry = fisher_registry();
    let result: Result<BehaviorTree<BasicState, ()>, _> =
        BehaviorTree::for_role(&registry, "baker");

    assert_eq!(
        result.err(),
        Some(SchedulerError::UnknownRole("baker".to_string()))
    );
}

#[test]
fn test_role_rejects_foreign_state_registration() {
    let registry = fisher_registry();
    let mut tree: BehaviorTree<BasicState, ()> =
        BehaviorTree::for_role(&registry, "fisher").unwrap();

    let err = tree
        .on_state(BasicState::InventoryFull, |_| true, |_| Directive::Stay)
        .unwrap_err();
    assert!(matches!(err, SchedulerError::StateNotAllowed { ref role, .. } if role == "fisher"));
    assert!(tree
        .on_state(BasicState::Idle, |_| true, |_| Directive::Stay)
        .is_ok());
}

#[test]
fn test_goto_outside_role_is_rejected_at_runtime() {
    let registry = fisher_registry();
    let mut tree: BehaviorTree<BasicState, ()> =
        BehaviorTree::for_role(&registry, "fisher").unwrap();
    tree.on_class(PriorityClass::Blocking, |_| true, |_| {
        Directive::Goto(BasicState::Paused)
    })
    .unwrap();

    let mut worker = Worker::new(BasicState::Idle, ());
    let outcome = tree.step(&mut worker);

    assert_eq!(
        outcome,
        StepOutcome::Rejected {
            class: Some(PriorityClass::Blocking),
            from: BasicState::Idle,
            attempted: BasicState::Paused,
        }
    );
    assert_eq!(worker.state(), BasicState::Idle);
}

#[test]
fn test_reset_respects_role() {
    let registry = fisher_registry();
    let mut tree: BehaviorTree<BasicState, ()> =
        BehaviorTree::for_role(&registry, "fisher").unwrap();
    let mut worker = Worker::new(BasicState::Idle, ());

    assert!(tree.reset(&mut worker, BasicState::Paused).is_err());
    assert_eq!(worker.state(), BasicState::Idle);
}

// ============================================================================
// Crews
// ============================================================================

#[test]
fn test_crew_steps_independent_workers() {
    let make_tree = || {
        let mut tree: BehaviorTree<Fisher, FisherData> = BehaviorTree::new();
        tree.on_class(PriorityClass::Blocking, |d| d.danger, |_| Directive::Goto(Fisher::Flee))
            .unwrap();
        tree.on_state(Fisher::Start, |_| true, |_| Directive::Goto(Fisher::CastLine))
            .unwrap();
        tree
    };

    let mut crew = Crew::new("fishers");
    crew.enlist(
        Worker::with_id("calm", Fisher::Start, FisherData::default()),
        make_tree(),
    );
    crew.enlist(
        Worker::with_id(
            "scared",
            Fisher::Start,
            FisherData {
                danger: true,
                ..FisherData::default()
            },
        ),
        make_tree(),
    );

    let mut log = EventLog::new();
    let summary = crew.tick(0, &mut log);

    assert_eq!(summary.fired, 2);
    assert_eq!(crew.worker("calm").map(Worker::state), Some(Fisher::CastLine));
    assert_eq!(crew.worker("scared").map(Worker::state), Some(Fisher::Flee));
    assert_eq!(log.events_of_type("TransitionFired").len(), 2);
    assert_eq!(log.events_for_worker("scared").len(), 1);
}
