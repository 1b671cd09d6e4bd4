//! Per-tick work simulation.
//!
//! [`execute`] advances every core that holds a task by one unit of work,
//! applying round-robin preemption and the shared-memory access protocol.
//! Cores are visited in ascending id order and each task's addresses in
//! pattern order; hit/miss outcomes depend on that order.

use log::{debug, trace};
use mcsim_core::{AccessOutcome, SimState, TaskState, TickId};

use crate::config::{Policy, SimConfig};

/// What happened during one executor pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecuteReport {
    /// Cores that held a task at the start of the pass.
    pub busy_cores: u32,
    /// Tasks returned to `Waiting` by quantum expiry.
    pub preemptions: u32,
    /// Tasks that reached `Finished`.
    pub completions: u32,
    /// Shared-memory accesses performed.
    pub memory_accesses: u64,
    /// Accesses that matched the core cache.
    pub cache_hits: u64,
    /// Accesses that refreshed the core cache.
    pub cache_misses: u64,
}

/// Run one cycle of work on every busy core.
///
/// `tick` is the tick being executed (one past `state.tick`). The caller
/// must have verified [`SimState::check_invariants`]; a core holding a
/// missing task is treated as a broken precondition and panics.
///
/// Under round-robin the quantum check runs *before* work: when the
/// slice expires and the task still has more than one cycle left, the
/// task is preempted and this tick performs no progress or memory
/// accesses for it.
pub fn execute(mut state: SimState, tick: TickId, config: &SimConfig) -> (SimState, ExecuteReport) {
    let mut report = ExecuteReport::default();
    let SimState {
        cores,
        tasks,
        memory,
        ..
    } = &mut state;

    for core in cores.iter_mut() {
        let Some(task_id) = core.current_task else {
            continue;
        };
        let task = tasks
            .get_mut(&task_id)
            .expect("held task validated before tick");
        debug_assert_eq!(task.state, TaskState::Running);
        report.busy_cores += 1;

        core.stats.utilization += 1;
        if task.stats.start_time.is_none() {
            task.stats.start_time = Some(tick);
        }

        if config.policy() == Policy::RoundRobin {
            let slice = core
                .stats
                .slice_remaining
                .unwrap_or(config.quantum())
                .saturating_sub(1);
            core.stats.slice_remaining = Some(slice);
            if slice == 0 && task.duration_remaining > 1 {
                task.state = TaskState::Waiting;
                core.release();
                report.preemptions += 1;
                debug!(
                    "tick {tick}: core {} preempted task {task_id} ({} cycles left)",
                    core.id, task.duration_remaining
                );
                continue;
            }
        }

        task.advance();

        for &addr in &task.memory_pattern {
            let outcome = memory.access(&mut core.cache, addr);
            core.stats.record(outcome);
            task.stats.memory_accesses += 1;
            report.memory_accesses += 1;
            match outcome {
                AccessOutcome::Hit => report.cache_hits += 1,
                AccessOutcome::Miss => report.cache_misses += 1,
            }
            trace!("tick {tick}: core {} {addr} -> {outcome:?}", core.id);
        }

        if task.duration_remaining == 0 {
            task.state = TaskState::Finished;
            task.stats.end_time = Some(tick);
            core.release();
            core.stats.executed += 1;
            report.completions += 1;
            debug!("tick {tick}: core {} finished task {task_id}", core.id);
        }
    }

    (state, report)
}
