//! Error types for the mcsim core.
//!
//! Configuration errors live next to the configuration in `mcsim-engine`;
//! this module holds the errors that describe a corrupt simulation state.

use std::error::Error;
use std::fmt;

use crate::id::{CoreId, TaskId, TickId};

/// A simulation state that the engine would never construct itself.
///
/// Detected by [`SimState::check_invariants`](crate::SimState::check_invariants)
/// before a tick starts. These indicate a caller built or edited the
/// state by hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two cores hold the same task.
    TaskAssignedTwice {
        /// The shared task.
        task: TaskId,
        /// Lower-numbered core holding it.
        first: CoreId,
        /// Higher-numbered core holding it.
        second: CoreId,
    },
    /// A core holds a task that has already finished.
    FinishedTaskOnCore {
        /// The core.
        core: CoreId,
        /// The finished task.
        task: TaskId,
    },
    /// A core holds a task id that does not exist.
    UnknownTask {
        /// The core.
        core: CoreId,
        /// The missing task.
        task: TaskId,
    },
    /// A core's status disagrees with whether it holds a task.
    StatusMismatch {
        /// The core.
        core: CoreId,
    },
    /// A task is `Running` but no core holds it, or held but not `Running`.
    OrphanedTask {
        /// The task.
        task: TaskId,
    },
    /// `progress + duration_remaining` no longer equals the total duration.
    ConservationBroken {
        /// The task.
        task: TaskId,
    },
    /// A task that is not `Finished` has no work left to execute.
    NoWorkRemaining {
        /// The task.
        task: TaskId,
    },
    /// The core at position `index` of the core list has another id.
    CoreOutOfOrder {
        /// Position in the core list.
        index: usize,
        /// The id found there.
        core: CoreId,
    },
    /// The history already records a tick at or past the next one.
    HistoryAhead {
        /// Tick of the state.
        tick: TickId,
        /// Last tick recorded in the history.
        last: TickId,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TaskAssignedTwice {
                task,
                first,
                second,
            } => write!(f, "task {task} held by cores {first} and {second}"),
            Self::FinishedTaskOnCore { core, task } => {
                write!(f, "core {core} holds finished task {task}")
            }
            Self::UnknownTask { core, task } => {
                write!(f, "core {core} holds unknown task {task}")
            }
            Self::StatusMismatch { core } => {
                write!(f, "core {core} status disagrees with its current task")
            }
            Self::OrphanedTask { task } => {
                write!(f, "task {task} running state disagrees with core assignment")
            }
            Self::ConservationBroken { task } => {
                write!(f, "task {task} progress and remaining duration do not sum to total")
            }
            Self::NoWorkRemaining { task } => {
                write!(f, "unfinished task {task} has no work remaining")
            }
            Self::CoreOutOfOrder { index, core } => {
                write!(f, "core {core} found at position {index}")
            }
            Self::HistoryAhead { tick, last } => {
                write!(f, "history records tick {last} but state is at tick {tick}")
            }
        }
    }
}

impl Error for InvariantViolation {}

/// Errors from executing a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The input state failed its invariant check; nothing was executed.
    InvariantViolated(InvariantViolation),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvariantViolated(v) => write!(f, "invariant violated: {v}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvariantViolated(v) => Some(v),
        }
    }
}

impl From<InvariantViolation> for StepError {
    fn from(v: InvariantViolation) -> Self {
        Self::InvariantViolated(v)
    }
}
