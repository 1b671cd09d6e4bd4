//! The pure tick function.
//!
//! [`step`] consumes a [`SimState`] by value and returns the next one:
//! executor pass, scheduler pass, task-state reconciliation, history
//! append. No state is shared with the previous tick. If the input
//! fails its invariant check the tick does not run and the untouched
//! state is handed back inside [`TickError`].

use std::fmt;
use std::time::Instant;

use log::info;
use mcsim_core::{HistoryEntry, SimState, StepError, TaskSpec, TaskState};

use crate::config::{validate_workload, ConfigError, SimConfig};
use crate::executor::execute;
use crate::metrics::StepMetrics;
use crate::scheduler::schedule;

// ── TickOutcome ──────────────────────────────────────────────────

/// Result of a successful tick.
#[derive(Debug)]
pub struct TickOutcome {
    /// State after the tick.
    pub state: SimState,
    /// Timing and event counts for the tick.
    pub metrics: StepMetrics,
    /// Whether every task is now finished.
    pub complete: bool,
}

// ── TickError ───────────────────────────────────────────────────

/// Error returned from [`step`].
///
/// Carries the input state back unchanged so the caller never loses it.
#[derive(Debug)]
pub struct TickError {
    /// The underlying error.
    pub kind: StepError,
    /// The state passed to `step`, unmodified.
    pub state: Box<SimState>,
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for TickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// ── lifecycle ────────────────────────────────────────────────────

/// Build the tick-0 state for `num_cores` cores and the given workload.
///
/// The i-th spec becomes `TaskId(i)`. All tasks start `Waiting`, all
/// cores `Idle`; memory, history and the fairness pointer are empty.
pub fn initialize(num_cores: u32, specs: &[TaskSpec]) -> Result<SimState, ConfigError> {
    validate_workload(num_cores, specs)?;
    info!(
        "initialized simulation: {num_cores} cores, {} tasks",
        specs.len()
    );
    Ok(SimState::new(num_cores, specs))
}

/// Reinitialize every entity. Equivalent to [`initialize`].
pub fn reset(num_cores: u32, specs: &[TaskSpec]) -> Result<SimState, ConfigError> {
    initialize(num_cores, specs)
}

/// Execute one tick.
///
/// Deterministic: identical `(state, config)` inputs always produce
/// identical outputs (metrics timings aside).
pub fn step(state: SimState, config: &SimConfig) -> Result<TickOutcome, TickError> {
    if let Err(violation) = state.check_invariants() {
        return Err(TickError {
            kind: violation.into(),
            state: Box::new(state),
        });
    }

    let tick_start = Instant::now();
    let tick = state.tick.next();

    // 1. Work.
    let exec_start = Instant::now();
    let (state, executed) = execute(state, tick, config);
    let execute_us = exec_start.elapsed().as_micros() as u64;

    // 2. Assignment.
    let sched_start = Instant::now();
    let (mut state, scheduled) = schedule(state, config.policy());
    let schedule_us = sched_start.elapsed().as_micros() as u64;

    // 3. Reconcile and record.
    reconcile(&mut state);
    state.history.record(HistoryEntry::capture(tick, &state.cores));
    state.tick = tick;
    let complete = state.all_finished();

    let metrics = StepMetrics {
        total_us: tick_start.elapsed().as_micros() as u64,
        execute_us,
        schedule_us,
        assignments: scheduled.assignments.len() as u32,
        preemptions: executed.preemptions,
        completions: executed.completions,
        memory_accesses: executed.memory_accesses,
        cache_hits: executed.cache_hits,
        cache_misses: executed.cache_misses,
    };

    Ok(TickOutcome {
        state,
        metrics,
        complete,
    })
}

/// Re-derive every non-finished task's state from core assignments.
///
/// A task held by a core is `Running`; anything else unfinished is
/// `Waiting` and accrues one tick of wait time.
fn reconcile(state: &mut SimState) {
    let SimState { cores, tasks, .. } = state;
    for task in tasks.values_mut() {
        if task.is_finished() {
            continue;
        }
        let held = cores.iter().any(|c| c.current_task == Some(task.id));
        task.state = if held {
            TaskState::Running
        } else {
            TaskState::Waiting
        };
        if task.state == TaskState::Waiting {
            task.stats.wait_time += 1;
        }
    }
}
