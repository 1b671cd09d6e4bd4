//! Scheduling configuration, validation, and error types.
//!
//! [`SimConfig`] carries the per-run knobs (policy and quantum). It can
//! only be built through [`SimConfig::new`], so an engine holding one
//! never has to re-check it. Workload parameters (core count and task
//! specs) are validated by [`validate_workload`] at initialization.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use mcsim_core::TaskSpec;

// ── Policy ─────────────────────────────────────────────────────────

/// How waiting tasks are matched to idle cores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First come, first served: ascending task id.
    #[default]
    Fcfs,
    /// Highest priority value first; ties keep creation order.
    Priority,
    /// Rotating pointer over the waiting list, with quantum preemption.
    RoundRobin,
}

impl Policy {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Priority => "priority",
            Self::RoundRobin => "round_robin",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    /// Parse a policy name. Unknown names are an error, never a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "priority" => Ok(Self::Priority),
            "roundrobin" | "round_robin" | "round-robin" | "rr" => Ok(Self::RoundRobin),
            _ => Err(ConfigError::UnknownPolicy {
                name: s.to_string(),
            }),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while configuring or (re)initializing a simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The policy name is not recognised.
    UnknownPolicy {
        /// The name as given.
        name: String,
    },
    /// Quantum must be at least 1.
    InvalidQuantum {
        /// The rejected value.
        value: u32,
    },
    /// A simulation needs at least one core.
    NoCores,
    /// A task was specified with zero duration.
    ZeroDurationTask {
        /// Position of the offending spec in the workload.
        index: usize,
    },
    /// Task count exceeds `u32::MAX`.
    TaskCountOverflow {
        /// The number of specs supplied.
        value: usize,
    },
    /// Reconfiguration was attempted while a run is active.
    RunActive,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPolicy { name } => write!(f, "unknown scheduling policy '{name}'"),
            Self::InvalidQuantum { value } => {
                write!(f, "quantum must be at least 1, got {value}")
            }
            Self::NoCores => write!(f, "at least one core is required"),
            Self::ZeroDurationTask { index } => {
                write!(f, "task spec {index} has zero duration")
            }
            Self::TaskCountOverflow { value } => {
                write!(f, "task count {value} exceeds u32::MAX")
            }
            Self::RunActive => write!(f, "cannot reconfigure while a run is active"),
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Scheduling policy and round-robin quantum for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    policy: Policy,
    quantum: u32,
}

impl SimConfig {
    /// Default round-robin quantum, in ticks.
    pub const DEFAULT_QUANTUM: u32 = 2;

    /// Build a validated configuration.
    ///
    /// The quantum is checked for every policy, even though only
    /// round-robin reads it, so switching policy later cannot expose
    /// an invalid value.
    pub fn new(policy: Policy, quantum: u32) -> Result<Self, ConfigError> {
        if quantum == 0 {
            return Err(ConfigError::InvalidQuantum { value: quantum });
        }
        Ok(Self { policy, quantum })
    }

    /// Parse the policy from its name, then validate.
    pub fn parse(policy: &str, quantum: u32) -> Result<Self, ConfigError> {
        Self::new(policy.parse()?, quantum)
    }

    /// The scheduling policy.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Maximum consecutive ticks a task may hold a core under round-robin.
    pub fn quantum(&self) -> u32 {
        self.quantum
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Fcfs,
            quantum: Self::DEFAULT_QUANTUM,
        }
    }
}

/// Check a workload before building a state from it.
///
/// Only semantic minimums are enforced: at least one core, every task
/// with at least one cycle of work, and ids that fit in `u32`.
pub fn validate_workload(num_cores: u32, specs: &[TaskSpec]) -> Result<(), ConfigError> {
    if num_cores == 0 {
        return Err(ConfigError::NoCores);
    }
    if u32::try_from(specs.len()).is_err() {
        return Err(ConfigError::TaskCountOverflow { value: specs.len() });
    }
    if let Some(index) = specs.iter().position(|s| s.duration == 0) {
        return Err(ConfigError::ZeroDurationTask { index });
    }
    Ok(())
}
