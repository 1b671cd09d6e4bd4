//! Tick engine for the mcsim multi-core scheduling simulator.
//!
//! Each tick runs an executor pass (one cycle of work per busy core,
//! round-robin preemption, shared-memory/cache bookkeeping), then a
//! scheduler pass (idle cores pick up waiting tasks per [`Policy`]),
//! then reconciles task states and appends a history entry.
//!
//! [`tick::step`] is the pure `SimState -> SimState` function;
//! [`Simulation`] wraps it with run control and projections.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod executor;
pub mod metrics;
pub mod scheduler;
pub mod simulation;
pub mod tick;

pub use config::{validate_workload, ConfigError, Policy, SimConfig};
pub use executor::ExecuteReport;
pub use metrics::{StepMetrics, SummaryStats};
pub use scheduler::ScheduleReport;
pub use simulation::{Simulation, StepResult};
pub use tick::{initialize, reset, step, TickError, TickOutcome};
