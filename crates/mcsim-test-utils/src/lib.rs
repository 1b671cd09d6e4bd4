//! Test utilities for mcsim development.
//!
//! Provides workload fixtures (see [`fixtures`]) and invariant checkers
//! that panic with a descriptive message when a state or a pair of
//! consecutive states breaks one of the engine's guarantees.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{spec, uniform_workload, workload_from};

use std::collections::HashSet;

use mcsim_core::{SimState, TaskId, TaskState};

/// Total duration of every task, in id order.
///
/// Capture this from the initial state and pass it to
/// [`assert_conserved`] on every later state.
pub fn total_durations(state: &SimState) -> Vec<(TaskId, u32)> {
    state
        .tasks
        .values()
        .map(|t| (t.id, t.progress + t.duration_remaining))
        .collect()
}

/// `progress + duration_remaining` still equals the captured totals.
pub fn assert_conserved(state: &SimState, totals: &[(TaskId, u32)]) {
    for &(id, total) in totals {
        let task = state
            .task(id)
            .unwrap_or_else(|| panic!("task {id} disappeared"));
        assert_eq!(
            task.progress + task.duration_remaining,
            total,
            "tick {}: task {id} broke conservation",
            state.tick
        );
    }
}

/// The `Running` tasks are exactly the tasks held by cores, each once.
pub fn assert_exclusive(state: &SimState) {
    let mut held = HashSet::new();
    for core in &state.cores {
        if let Some(id) = core.current_task {
            assert!(
                held.insert(id),
                "tick {}: task {id} held by more than one core",
                state.tick
            );
        }
    }
    let running: HashSet<TaskId> = state
        .tasks
        .values()
        .filter(|t| t.state == TaskState::Running)
        .map(|t| t.id)
        .collect();
    assert_eq!(
        running, held,
        "tick {}: running set differs from held set",
        state.tick
    );
}

/// Finished tasks stay finished and the finished count never drops.
pub fn assert_monotonic(prev: &SimState, next: &SimState) {
    assert!(
        next.finished_count() >= prev.finished_count(),
        "finished count dropped from {} to {}",
        prev.finished_count(),
        next.finished_count()
    );
    for task in prev.tasks.values().filter(|t| t.is_finished()) {
        let after = next
            .task(task.id)
            .unwrap_or_else(|| panic!("task {} disappeared", task.id));
        assert_eq!(
            after, task,
            "finished task {} changed between ticks {} and {}",
            task.id, prev.tick, next.tick
        );
    }
}

/// Run every single-state check.
pub fn assert_state_invariants(state: &SimState, totals: &[(TaskId, u32)]) {
    assert_conserved(state, totals);
    assert_exclusive(state);
    if let Err(v) = state.check_invariants() {
        panic!("tick {}: {v}", state.tick);
    }
}
