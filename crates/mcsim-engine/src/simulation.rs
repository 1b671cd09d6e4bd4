//! Stateful simulation driver.
//!
//! [`Simulation`] owns the canonical [`SimState`] together with the run
//! configuration and the workload it was built from. Each call to
//! [`step()`](Simulation::step) hands the state by value to
//! [`tick::step`](crate::tick::step) and stores the state that comes back.
//!
//! # Ownership model
//!
//! `Simulation` is [`Send`] but all mutating methods take `&mut self`,
//! and read-only projections borrow from `self`. Callers driving the
//! simulation from a timer therefore cannot interleave two ticks; the
//! borrow checker serialises them.
//!
//! # Run state
//!
//! A simulation is either *active* (started, as if driven by a timer) or
//! paused. Reconfiguration is refused while active. A tick that finishes
//! the last task pauses the run.

use log::info;
use mcsim_core::{Core, History, SharedMemory, SimState, StepError, Task, TaskSpec, TickId};

use crate::config::{ConfigError, Policy, SimConfig};
use crate::metrics::{StepMetrics, SummaryStats};
use crate::tick;

// Compile-time assertion: Simulation is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── StepResult ──────────────────────────────────────────────────

/// Result of a successful [`Simulation::step()`] call.
#[derive(Debug)]
pub struct StepResult<'s> {
    /// Read-only view of the state after this tick.
    pub state: &'s SimState,
    /// Timing and event counts for this tick.
    pub metrics: StepMetrics,
    /// Whether every task is now finished.
    pub complete: bool,
}

// ── Simulation ──────────────────────────────────────────────────

/// Single-threaded multi-core scheduling simulation.
///
/// # Example
///
/// ```
/// use mcsim_core::TaskSpec;
/// use mcsim_engine::{Policy, SimConfig, Simulation};
///
/// let workload = vec![TaskSpec::new(3, 1, [10]), TaskSpec::new(2, 5, [])];
/// let config = SimConfig::new(Policy::RoundRobin, 2).unwrap();
/// let mut sim = Simulation::new(2, workload, config).unwrap();
/// let ticks = sim.run_to_completion(100).unwrap();
/// assert!(sim.is_complete());
/// assert_eq!(sim.current_tick().0, ticks);
/// ```
#[derive(Debug)]
pub struct Simulation {
    state: SimState,
    config: SimConfig,
    num_cores: u32,
    workload: Vec<TaskSpec>,
    active: bool,
    last_metrics: StepMetrics,
}

impl Simulation {
    /// Create a paused simulation at tick 0.
    pub fn new(
        num_cores: u32,
        workload: Vec<TaskSpec>,
        config: SimConfig,
    ) -> Result<Self, ConfigError> {
        let state = tick::initialize(num_cores, &workload)?;
        Ok(Self {
            state,
            config,
            num_cores,
            workload,
            active: false,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Execute one tick.
    ///
    /// On error the state is left exactly as it was.
    pub fn step(&mut self) -> Result<StepResult<'_>, StepError> {
        let state = std::mem::take(&mut self.state);
        match tick::step(state, &self.config) {
            Ok(outcome) => {
                self.state = outcome.state;
                self.last_metrics = outcome.metrics.clone();
                if outcome.complete && self.active {
                    self.active = false;
                    info!("all tasks finished at tick {}; run paused", self.state.tick);
                }
                Ok(StepResult {
                    state: &self.state,
                    metrics: outcome.metrics,
                    complete: outcome.complete,
                })
            }
            Err(err) => {
                self.state = *err.state;
                Err(err.kind)
            }
        }
    }

    /// Step until every task finishes or `max_ticks` ticks have run.
    ///
    /// Returns the number of ticks executed by this call. Marks the run
    /// active for its duration.
    pub fn run_to_completion(&mut self, max_ticks: u64) -> Result<u64, StepError> {
        self.start();
        let mut ran = 0;
        while ran < max_ticks && !self.state.all_finished() {
            self.step()?;
            ran += 1;
        }
        self.pause();
        Ok(ran)
    }

    /// Reinitialize with a new core count and workload.
    ///
    /// Pauses the run and clears memory, history, and the fairness
    /// pointer. On error nothing changes.
    pub fn reset(&mut self, num_cores: u32, workload: Vec<TaskSpec>) -> Result<(), ConfigError> {
        self.state = tick::reset(num_cores, &workload)?;
        self.num_cores = num_cores;
        self.workload = workload;
        self.active = false;
        self.last_metrics = StepMetrics::default();
        Ok(())
    }

    /// Reinitialize with the current core count and workload.
    pub fn restart(&mut self) {
        self.state = SimState::new(self.num_cores, &self.workload);
        self.active = false;
        self.last_metrics = StepMetrics::default();
        info!("simulation restarted");
    }

    /// Change policy and quantum.
    ///
    /// Refused with [`ConfigError::RunActive`] while the run is active.
    pub fn configure(&mut self, policy: Policy, quantum: u32) -> Result<(), ConfigError> {
        if self.active {
            return Err(ConfigError::RunActive);
        }
        self.config = SimConfig::new(policy, quantum)?;
        info!("configured policy={policy} quantum={quantum}");
        Ok(())
    }

    /// Mark the run active.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Mark the run paused.
    pub fn pause(&mut self) {
        self.active = false;
    }

    /// Whether the run is active.
    pub fn is_running(&self) -> bool {
        self.active
    }

    /// Whether every task has finished.
    pub fn is_complete(&self) -> bool {
        self.state.all_finished()
    }

    /// The full current state.
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Cores in id order.
    pub fn cores(&self) -> &[Core] {
        &self.state.cores
    }

    /// Tasks in id order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.state.tasks.values()
    }

    /// Shared memory.
    pub fn memory(&self) -> &SharedMemory {
        &self.state.memory
    }

    /// Assignment history.
    pub fn history(&self) -> &History {
        &self.state.history
    }

    /// Last executed tick (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.state.tick
    }

    /// Active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Workload the current state was built from.
    pub fn workload(&self) -> &[TaskSpec] {
        &self.workload
    }

    /// Metrics from the most recent successful tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Run-level statistics for the current state.
    pub fn summary(&self) -> SummaryStats {
        SummaryStats::from_state(&self.state)
    }
}
