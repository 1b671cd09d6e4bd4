//! Workload generation and benchmark profiles for mcsim.
//!
//! The engine never generates work itself; this crate plays the part of
//! the injected task factory:
//!
//! - [`WorkloadGenerator`]: seeded random task specs
//! - [`reference_profile`]: 4 cores, 10 tasks
//! - [`stress_profile`]: 16 cores, 2000 tasks with longer access patterns

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::ops::RangeInclusive;

use mcsim_core::TaskSpec;
use mcsim_engine::{ConfigError, SimConfig, Simulation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded generator of random task specs.
///
/// Defaults produce durations 3..=7, priorities 1..=5 and three
/// addresses in `0..100` per task. The same seed always yields the same
/// workload.
#[derive(Clone, Debug)]
pub struct WorkloadGenerator {
    /// Number of tasks to generate.
    pub num_tasks: usize,
    /// Inclusive duration range. The lower bound must be at least 1.
    pub duration: RangeInclusive<u32>,
    /// Inclusive priority range.
    pub priority: RangeInclusive<i32>,
    /// Addresses per task.
    pub pattern_len: usize,
    /// Addresses are drawn from `0..address_space`.
    pub address_space: u32,
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            num_tasks: 10,
            duration: 3..=7,
            priority: 1..=5,
            pattern_len: 3,
            address_space: 100,
        }
    }
}

impl WorkloadGenerator {
    /// Default generator for `num_tasks` tasks.
    pub fn with_tasks(num_tasks: usize) -> Self {
        Self {
            num_tasks,
            ..Self::default()
        }
    }

    /// Generate the workload for `seed`.
    pub fn generate(&self, seed: u64) -> Vec<TaskSpec> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..self.num_tasks)
            .map(|_| {
                let duration = rng.random_range(self.duration.clone());
                let priority = rng.random_range(self.priority.clone());
                let addresses: Vec<u32> = (0..self.pattern_len)
                    .map(|_| rng.random_range(0..self.address_space.max(1)))
                    .collect();
                TaskSpec::new(duration, priority, addresses)
            })
            .collect()
    }
}

/// A core count plus workload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    /// Number of cores.
    pub num_cores: u32,
    /// Task specs.
    pub workload: Vec<TaskSpec>,
}

impl Profile {
    /// Build a paused simulation for this profile.
    pub fn simulation(&self, config: SimConfig) -> Result<Simulation, ConfigError> {
        Simulation::new(self.num_cores, self.workload.clone(), config)
    }
}

/// 4 cores and 10 default-generated tasks.
pub fn reference_profile(seed: u64) -> Profile {
    Profile {
        num_cores: 4,
        workload: WorkloadGenerator::default().generate(seed),
    }
}

/// 16 cores and 2000 tasks with 8 addresses each over a small space,
/// so cores contend for the same addresses.
pub fn stress_profile(seed: u64) -> Profile {
    let generator = WorkloadGenerator {
        num_tasks: 2000,
        duration: 1..=20,
        priority: -10..=10,
        pattern_len: 8,
        address_space: 64,
    };
    Profile {
        num_cores: 16,
        workload: generator.generate(seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_generator_respects_ranges() {
        let w = WorkloadGenerator::default().generate(7);
        assert_eq!(w.len(), 10);
        for spec in &w {
            assert!((3..=7).contains(&spec.duration));
            assert!((1..=5).contains(&spec.priority));
            assert_eq!(spec.memory_pattern.len(), 3);
            assert!(spec.memory_pattern.iter().all(|a| a.0 < 100));
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let g = WorkloadGenerator::with_tasks(25);
        assert_eq!(g.generate(42), g.generate(42));
        assert_ne!(g.generate(42), g.generate(43));
    }

    #[test]
    fn profiles_build_simulations() {
        reference_profile(1)
            .simulation(SimConfig::default())
            .unwrap();
        stress_profile(1).simulation(SimConfig::default()).unwrap();
    }

    #[test]
    fn reference_profile_runs_to_completion() {
        let mut sim = reference_profile(3)
            .simulation(SimConfig::default())
            .unwrap();
        sim.run_to_completion(10_000).unwrap();
        assert!(sim.is_complete());
    }
}
