//! Integration tests: shared-memory counter semantics.
//!
//! Shared memory stores an access counter, not data. Every access bumps
//! the counter after comparing it with the accessing core's cached copy,
//! so a core re-reading an address always finds it changed. Under this
//! model an engine-driven run records misses only.

use mcsim_bench::{reference_profile, stress_profile};
use mcsim_core::{Address, CoreId, TaskSpec};
use mcsim_engine::{Policy, SimConfig, Simulation};

fn fcfs_sim(cores: u32, workload: Vec<TaskSpec>) -> Simulation {
    Simulation::new(cores, workload, SimConfig::default()).unwrap()
}

#[test]
fn consecutive_accesses_by_one_core_both_miss() {
    let mut sim = fcfs_sim(1, vec![TaskSpec::new(2, 1, [5])]);
    sim.step().unwrap(); // assign
    sim.step().unwrap(); // first access
    let core = &sim.cores()[0];
    assert_eq!((core.stats.cache_hits, core.stats.cache_misses), (0, 1));
    assert_eq!(core.cache.get(Address(5)), Some(0));
    assert_eq!(sim.memory().read(Address(5)), 1);

    sim.step().unwrap(); // second access, nothing in between
    let core = &sim.cores()[0];
    assert_eq!((core.stats.cache_hits, core.stats.cache_misses), (0, 2));
    assert_eq!(core.cache.get(Address(5)), Some(1));
    assert_eq!(sim.memory().read(Address(5)), 2);
}

#[test]
fn repeated_address_within_one_tick_misses_twice() {
    let mut sim = fcfs_sim(1, vec![TaskSpec::new(1, 1, [8, 8])]);
    sim.step().unwrap();
    sim.step().unwrap();
    let core = &sim.cores()[0];
    assert_eq!(core.stats.cache_misses, 2);
    assert_eq!(core.stats.cache_hits, 0);
    assert_eq!(core.cache.get(Address(8)), Some(1));
    assert_eq!(sim.tasks().next().map(|t| t.stats.memory_accesses), Some(2));
}

#[test]
fn cores_observe_each_other_in_id_order() {
    let workload = vec![TaskSpec::new(1, 1, [3]), TaskSpec::new(1, 1, [3])];
    let mut sim = fcfs_sim(2, workload);
    sim.step().unwrap();
    sim.step().unwrap();
    // Core 0 accesses first and caches 0; core 1 sees the bumped 1.
    assert_eq!(sim.cores()[0].cache.get(Address(3)), Some(0));
    assert_eq!(sim.cores()[1].cache.get(Address(3)), Some(1));
    assert_eq!(sim.memory().read(Address(3)), 2);
}

#[test]
fn caches_are_private() {
    let workload = vec![TaskSpec::new(1, 1, [1]), TaskSpec::new(1, 1, [2])];
    let mut sim = fcfs_sim(2, workload);
    sim.run_to_completion(10).unwrap();
    let c0 = &sim.cores()[0].cache;
    let c1 = &sim.cores()[1].cache;
    assert_eq!(c0.get(Address(1)), Some(0));
    assert_eq!(c0.get(Address(2)), None);
    assert_eq!(c1.get(Address(2)), Some(0));
    assert_eq!(c1.get(Address(1)), None);
}

#[test]
fn memory_counter_equals_total_accesses() {
    for policy in [Policy::Fcfs, Policy::Priority, Policy::RoundRobin] {
        let profile = reference_profile(11);
        let mut sim = profile.simulation(SimConfig::new(policy, 2).unwrap()).unwrap();
        sim.run_to_completion(10_000).unwrap();

        let counters: u64 = sim.memory().iter().map(|(_, v)| v).sum();
        let task_accesses: u64 = sim.tasks().map(|t| t.stats.memory_accesses).sum();
        let core_accesses: u64 = sim
            .cores()
            .iter()
            .map(|c| c.stats.cache_hits + c.stats.cache_misses)
            .sum();
        assert_eq!(counters, task_accesses, "{policy}");
        assert_eq!(counters, core_accesses, "{policy}");

        // Each task touches its full pattern once per cycle of work.
        for (task, spec) in sim.tasks().zip(&profile.workload) {
            assert_eq!(
                task.stats.memory_accesses,
                u64::from(spec.duration) * spec.memory_pattern.len() as u64
            );
        }
    }
}

#[test]
fn engine_driven_runs_never_hit() {
    let mut sim = stress_profile(5)
        .simulation(SimConfig::new(Policy::RoundRobin, 3).unwrap())
        .unwrap();
    sim.run_to_completion(1_000_000).unwrap();
    assert!(sim.is_complete());
    assert!(sim.cores().iter().all(|c| c.stats.cache_hits == 0));
    assert_eq!(sim.summary().cache_hit_rate, Some(0.0));
    assert!(sim
        .cores()
        .iter()
        .any(|c| c.id == CoreId(0) && c.stats.cache_misses > 0));
}
