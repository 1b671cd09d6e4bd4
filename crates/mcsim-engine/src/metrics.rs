//! Per-tick metrics and whole-run summary statistics.
//!
//! [`StepMetrics`] captures timing and event counts for a single tick.
//! [`SummaryStats`] derives run-level figures (throughput, wait times,
//! utilization) from a state.

use mcsim_core::SimState;

/// Timing and event counts collected during a single tick.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent in the executor pass, in microseconds.
    pub execute_us: u64,
    /// Time spent in the scheduler pass, in microseconds.
    pub schedule_us: u64,
    /// Tasks assigned to idle cores this tick.
    pub assignments: u32,
    /// Tasks preempted by quantum expiry this tick.
    pub preemptions: u32,
    /// Tasks finished this tick.
    pub completions: u32,
    /// Shared-memory accesses this tick.
    pub memory_accesses: u64,
    /// Cache hits this tick.
    pub cache_hits: u64,
    /// Cache misses this tick.
    pub cache_misses: u64,
}

/// Run-level statistics derived from a [`SimState`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummaryStats {
    /// Number of finished tasks.
    pub finished: usize,
    /// Finished tasks per elapsed tick (0 before the first tick).
    pub throughput: f64,
    /// Mean first-execution tick over finished tasks.
    pub avg_start_time: f64,
    /// Mean ticks spent waiting over finished tasks.
    pub avg_wait_time: f64,
    /// Busy core-ticks divided by total core-ticks.
    pub avg_utilization: f64,
    /// Hits over all accesses, or `None` before the first access.
    pub cache_hit_rate: Option<f64>,
}

impl SummaryStats {
    /// Compute the summary for `state`.
    pub fn from_state(state: &SimState) -> Self {
        let finished: Vec<_> = state.tasks.values().filter(|t| t.is_finished()).collect();
        let n = finished.len();
        let elapsed = state.tick.0;

        let mean = |sum: u64| if n == 0 { 0.0 } else { sum as f64 / n as f64 };
        let start_sum: u64 = finished
            .iter()
            .map(|t| t.stats.start_time.map_or(0, |tick| tick.0))
            .sum();
        let wait_sum: u64 = finished.iter().map(|t| t.stats.wait_time).sum();

        let busy: u64 = state.cores.iter().map(|c| c.stats.utilization).sum();
        let core_ticks = state.cores.len() as u64 * elapsed.max(1);
        let avg_utilization = if state.cores.is_empty() {
            0.0
        } else {
            busy as f64 / core_ticks as f64
        };

        let hits: u64 = state.cores.iter().map(|c| c.stats.cache_hits).sum();
        let misses: u64 = state.cores.iter().map(|c| c.stats.cache_misses).sum();
        let cache_hit_rate = match hits + misses {
            0 => None,
            total => Some(hits as f64 / total as f64),
        };

        Self {
            finished: n,
            throughput: if elapsed == 0 {
                0.0
            } else {
                n as f64 / elapsed as f64
            },
            avg_start_time: mean(start_sum),
            avg_wait_time: mean(wait_sum),
            avg_utilization,
            cache_hit_rate,
        }
    }
}
