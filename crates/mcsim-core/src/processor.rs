//! Processing cores.

use std::fmt;

use crate::id::{CoreId, TaskId};
use crate::memory::{AccessOutcome, CoreCache};

/// Execution status of a [`Core`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoreStatus {
    /// No task held; eligible for assignment.
    Idle,
    /// Holding a running task.
    Running,
    /// Reserved. No engine rule enters this status.
    Waiting,
    /// Reserved. No engine rule enters this status.
    Blocked,
}

impl fmt::Display for CoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Waiting => "waiting",
            Self::Blocked => "blocked",
        };
        f.write_str(s)
    }
}

/// Per-core counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoreStats {
    /// Tasks completed on this core.
    pub executed: u64,
    /// Ticks spent holding a task.
    pub utilization: u64,
    /// Shared-memory accesses that matched the cache.
    pub cache_hits: u64,
    /// Shared-memory accesses that refreshed the cache.
    pub cache_misses: u64,
    /// Round-robin slice countdown. `None` whenever the core is idle.
    pub slice_remaining: Option<u32>,
}

impl CoreStats {
    /// Fraction of accesses that hit, or `None` before the first access.
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            None
        } else {
            Some(self.cache_hits as f64 / total as f64)
        }
    }

    /// Count one access outcome.
    pub fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.cache_hits += 1,
            AccessOutcome::Miss => self.cache_misses += 1,
        }
    }
}

/// A processing unit holding at most one task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Core {
    /// Unique, immutable identifier.
    pub id: CoreId,
    /// Current status.
    pub status: CoreStatus,
    /// Task held by this core, exclusively.
    pub current_task: Option<TaskId>,
    /// Private cache, never shared with other cores.
    pub cache: CoreCache,
    /// Counters.
    pub stats: CoreStats,
}

impl Core {
    /// An idle core with an empty cache.
    pub fn new(id: CoreId) -> Self {
        Self {
            id,
            status: CoreStatus::Idle,
            current_task: None,
            cache: CoreCache::new(),
            stats: CoreStats::default(),
        }
    }

    /// Whether the core can accept a task.
    pub fn is_idle(&self) -> bool {
        self.status == CoreStatus::Idle
    }

    /// Take ownership of `task`.
    pub fn assign(&mut self, task: TaskId) {
        self.current_task = Some(task);
        self.status = CoreStatus::Running;
    }

    /// Drop the held task and go idle, clearing the round-robin slice.
    ///
    /// Returns the task that was held.
    pub fn release(&mut self) -> Option<TaskId> {
        self.status = CoreStatus::Idle;
        self.stats.slice_remaining = None;
        self.current_task.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_core_is_idle_and_empty() {
        let core = Core::new(CoreId(2));
        assert!(core.is_idle());
        assert_eq!(core.current_task, None);
        assert!(core.cache.is_empty());
        assert_eq!(core.stats, CoreStats::default());
    }

    #[test]
    fn assign_then_release_round_trips_status() {
        let mut core = Core::new(CoreId(0));
        core.assign(TaskId(4));
        assert_eq!(core.status, CoreStatus::Running);
        core.stats.slice_remaining = Some(1);
        assert_eq!(core.release(), Some(TaskId(4)));
        assert!(core.is_idle());
        assert_eq!(core.stats.slice_remaining, None);
    }

    #[test]
    fn hit_rate_is_none_without_accesses() {
        let mut stats = CoreStats::default();
        assert_eq!(stats.hit_rate(), None);
        stats.record(AccessOutcome::Hit);
        stats.record(AccessOutcome::Miss);
        stats.record(AccessOutcome::Miss);
        stats.record(AccessOutcome::Miss);
        assert_eq!(stats.hit_rate(), Some(0.25));
    }
}
