//! Reusable workload fixtures.
//!
//! - [`spec`]: one task with no memory accesses.
//! - [`uniform_workload`]: `n` identical tasks.
//! - [`workload_from`]: tasks from `(duration, priority)` pairs.

use mcsim_core::TaskSpec;

/// A task of `duration` cycles and `priority`, touching no memory.
pub fn spec(duration: u32, priority: i32) -> TaskSpec {
    TaskSpec::new(duration, priority, [])
}

/// `n` tasks of equal duration and priority 1.
pub fn uniform_workload(n: usize, duration: u32) -> Vec<TaskSpec> {
    (0..n).map(|_| spec(duration, 1)).collect()
}

/// One task per `(duration, priority)` pair, in order.
pub fn workload_from(pairs: &[(u32, i32)]) -> Vec<TaskSpec> {
    pairs.iter().map(|&(d, p)| spec(d, p)).collect()
}
