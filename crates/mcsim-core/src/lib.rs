//! Core types for the mcsim multi-core scheduling simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the data model shared by the rest of the workspace: typed IDs, tasks,
//! cores, the shared-memory counter store, the assignment history, the
//! whole-simulation [`SimState`] record, and the error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod history;
pub mod id;
pub mod memory;
pub mod processor;
pub mod state;
pub mod task;

pub use error::{InvariantViolation, StepError};
pub use history::{CoreAssignment, GanttSegment, History, HistoryEntry};
pub use id::{Address, CoreId, MemoryPattern, TaskId, TickId};
pub use memory::{AccessOutcome, CoreCache, SharedMemory};
pub use processor::{Core, CoreStats, CoreStatus};
pub use state::SimState;
pub use task::{Task, TaskSpec, TaskState, TaskStats};
