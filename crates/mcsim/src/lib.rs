//! mcsim: a deterministic, tick-based simulator of multi-core CPU
//! scheduling with private per-core caches over a shared memory.
//!
//! This is the facade crate that re-exports the public API of the mcsim
//! sub-crates. Adding `mcsim` as a single dependency is enough for most
//! users.
//!
//! # Quick start
//!
//! ```rust
//! use mcsim::prelude::*;
//!
//! let workload = vec![
//!     TaskSpec::new(3, 2, [0x10, 0x20]),
//!     TaskSpec::new(2, 5, [0x10]),
//!     TaskSpec::new(4, 1, []),
//! ];
//! let config = SimConfig::new(Policy::Priority, 2).unwrap();
//! let mut sim = Simulation::new(2, workload, config).unwrap();
//!
//! let result = sim.step().unwrap();
//! assert_eq!(result.state.tick, TickId(1));
//! assert!(!result.complete);
//!
//! sim.run_to_completion(100).unwrap();
//! assert!(sim.is_complete());
//! assert_eq!(sim.summary().finished, 3);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mcsim-core` | IDs, tasks, cores, memory, history, state, errors |
//! | [`engine`] | `mcsim-engine` | Config, schedulers, executor, tick function, driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Simulation data model (`mcsim-core`).
///
/// Contains the entity types ([`types::Task`], [`types::Core`],
/// [`types::SharedMemory`]), the [`types::SimState`] aggregate and the
/// invariant error types.
pub use mcsim_core as types;

/// Tick engine and driver (`mcsim-engine`).
///
/// [`engine::step`] is the pure tick function; [`engine::Simulation`]
/// wraps it with run control and read-only projections.
pub use mcsim_engine as engine;

/// Common imports for typical mcsim usage.
///
/// ```rust
/// use mcsim::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mcsim_core::{
        Address, Core, CoreId, CoreStatus, History, SharedMemory, SimState, Task, TaskId,
        TaskSpec, TaskState, TickId,
    };

    // Errors
    pub use mcsim_core::{InvariantViolation, StepError};

    // Engine
    pub use mcsim_engine::{
        ConfigError, Policy, SimConfig, Simulation, StepMetrics, StepResult, SummaryStats,
    };
}
