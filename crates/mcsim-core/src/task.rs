//! Tasks: the units of work moved between cores by the scheduler.

use std::fmt;

use crate::id::{Address, MemoryPattern, TaskId, TickId};

/// Lifecycle state of a [`Task`].
///
/// Transitions: `Waiting → Running` on assignment, `Running → Waiting`
/// on round-robin preemption, `Running → Finished` when the remaining
/// duration reaches zero. `Finished` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Eligible for assignment to an idle core.
    Waiting,
    /// Held by exactly one core.
    Running,
    /// Reserved. No engine rule enters this state.
    Blocked,
    /// All work done. Never mutated again.
    Finished,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Blocked => "blocked",
            Self::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// Creation-time description of a task.
///
/// A workload is an ordered `Vec<TaskSpec>`; the i-th spec becomes
/// `TaskId(i)`. Generating specs (randomly or otherwise) is the caller's
/// concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskSpec {
    /// Cycles of work required. Must be at least 1.
    pub duration: u32,
    /// Larger values are scheduled first under the priority policy.
    pub priority: i32,
    /// Addresses touched once each per executing tick.
    pub memory_pattern: MemoryPattern,
}

impl TaskSpec {
    /// Build a spec from raw address values.
    pub fn new(duration: u32, priority: i32, addresses: impl IntoIterator<Item = u32>) -> Self {
        Self {
            duration,
            priority,
            memory_pattern: addresses.into_iter().map(Address).collect(),
        }
    }
}

/// Timing and memory counters for one task.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Tick on which the task first executed. Set once.
    pub start_time: Option<TickId>,
    /// Tick on which the task finished.
    pub end_time: Option<TickId>,
    /// Ticks the task ended in the `Waiting` state.
    pub wait_time: u64,
    /// Total shared-memory accesses performed on the task's behalf.
    pub memory_accesses: u64,
}

/// A unit of work.
///
/// `progress + duration_remaining == total_duration` holds for the
/// task's entire lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// Unique, immutable identifier.
    pub id: TaskId,
    /// Duration at creation. Never changes.
    pub total_duration: u32,
    /// Cycles still to execute; zero marks completion.
    pub duration_remaining: u32,
    /// Cycles already executed.
    pub progress: u32,
    /// Scheduling priority (priority policy only).
    pub priority: i32,
    /// Current lifecycle state.
    pub state: TaskState,
    /// Addresses touched per executing tick.
    pub memory_pattern: MemoryPattern,
    /// Timing and memory counters.
    pub stats: TaskStats,
}

impl Task {
    /// Create a waiting task from its spec.
    pub fn from_spec(id: TaskId, spec: &TaskSpec) -> Self {
        Self {
            id,
            total_duration: spec.duration,
            duration_remaining: spec.duration,
            progress: 0,
            priority: spec.priority,
            state: TaskState::Waiting,
            memory_pattern: spec.memory_pattern.clone(),
            stats: TaskStats::default(),
        }
    }

    /// Whether the task has reached its terminal state.
    pub fn is_finished(&self) -> bool {
        self.state == TaskState::Finished
    }

    /// Perform one cycle of work.
    ///
    /// # Panics
    ///
    /// Panics if no work remains. The executor only advances tasks
    /// that are held by a core, and those always have work left.
    pub fn advance(&mut self) {
        assert!(
            self.duration_remaining > 0,
            "task {} advanced with no work remaining",
            self.id
        );
        self.progress += 1;
        self.duration_remaining -= 1;
    }

    /// Completed share of the total work, in percent.
    pub fn percent_complete(&self) -> f64 {
        if self.total_duration == 0 {
            return 100.0;
        }
        f64::from(self.progress) / f64::from(self.total_duration) * 100.0
    }

    /// Whether `progress + duration_remaining` still equals the total.
    pub fn is_conserved(&self) -> bool {
        u64::from(self.progress) + u64::from(self.duration_remaining)
            == u64::from(self.total_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_spec_starts_waiting_with_no_progress() {
        let spec = TaskSpec::new(4, 3, [10, 20]);
        let task = Task::from_spec(TaskId(7), &spec);
        assert_eq!(task.id, TaskId(7));
        assert_eq!(task.state, TaskState::Waiting);
        assert_eq!(task.progress, 0);
        assert_eq!(task.duration_remaining, 4);
        assert_eq!(task.total_duration, 4);
        assert_eq!(task.priority, 3);
        assert_eq!(task.memory_pattern.as_slice(), &[Address(10), Address(20)]);
        assert_eq!(task.stats, TaskStats::default());
    }

    #[test]
    fn advance_preserves_conservation() {
        let mut task = Task::from_spec(TaskId(0), &TaskSpec::new(3, 1, []));
        for expected in 1..=3 {
            task.advance();
            assert_eq!(task.progress, expected);
            assert!(task.is_conserved());
        }
        assert_eq!(task.duration_remaining, 0);
    }

    #[test]
    #[should_panic(expected = "no work remaining")]
    fn advance_past_zero_panics() {
        let mut task = Task::from_spec(TaskId(0), &TaskSpec::new(1, 1, []));
        task.advance();
        task.advance();
    }

    #[test]
    fn percent_complete_tracks_progress() {
        let mut task = Task::from_spec(TaskId(0), &TaskSpec::new(4, 1, []));
        assert_eq!(task.percent_complete(), 0.0);
        task.advance();
        assert_eq!(task.percent_complete(), 25.0);
    }

    #[test]
    fn state_display_is_lowercase() {
        assert_eq!(TaskState::Running.to_string(), "running");
        assert_eq!(TaskState::Finished.to_string(), "finished");
    }
}
