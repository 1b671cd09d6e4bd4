//! Property tests over whole runs of the tick function.

use mcsim_bench::reference_profile;
use mcsim_core::{SimState, TaskSpec};
use mcsim_engine::{initialize, step, Policy, SimConfig, Simulation};
use mcsim_test_utils::{assert_monotonic, assert_state_invariants, total_durations};
use proptest::prelude::*;

fn arb_spec() -> impl Strategy<Value = TaskSpec> {
    (1u32..8, -3i32..3, prop::collection::vec(0u32..16, 0..4))
        .prop_map(|(d, p, addrs)| TaskSpec::new(d, p, addrs))
}

fn arb_workload() -> impl Strategy<Value = Vec<TaskSpec>> {
    prop::collection::vec(arb_spec(), 0..12)
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(Policy::Fcfs),
        Just(Policy::Priority),
        Just(Policy::RoundRobin),
    ]
}

/// Generous upper bound on ticks to completion when every assignment
/// makes at least one cycle of progress within two ticks.
fn tick_bound(workload: &[TaskSpec]) -> u64 {
    workload.iter().map(|s| u64::from(s.duration)).sum::<u64>() * 2 + 4
}

/// Step `ticks` times, checking every invariant along the way.
fn run_checked(mut state: SimState, config: &SimConfig, ticks: u64) -> SimState {
    let totals = total_durations(&state);
    assert_state_invariants(&state, &totals);
    for _ in 0..ticks {
        let prev = state.clone();
        let outcome = step(state, config).unwrap();
        state = outcome.state;
        assert_state_invariants(&state, &totals);
        assert_monotonic(&prev, &state);
        assert_eq!(state.tick.0, prev.tick.0 + 1);
        assert_eq!(state.history.len(), state.tick.0 as usize);
        assert_eq!(outcome.complete, state.all_finished());
    }
    state
}

proptest! {
    #[test]
    fn invariants_hold_every_tick(
        workload in arb_workload(),
        cores in 1u32..6,
        policy in arb_policy(),
        quantum in 1u32..4,
        ticks in 0u64..40,
    ) {
        let config = SimConfig::new(policy, quantum).unwrap();
        let state = initialize(cores, &workload).unwrap();
        run_checked(state, &config, ticks);
    }

    #[test]
    fn every_run_finishes_with_quantum_two_or_more(
        workload in arb_workload(),
        cores in 1u32..6,
        policy in arb_policy(),
        quantum in 2u32..5,
    ) {
        let config = SimConfig::new(policy, quantum).unwrap();
        let state = initialize(cores, &workload).unwrap();
        let state = run_checked(state, &config, tick_bound(&workload));
        prop_assert!(state.all_finished());
        for task in state.tasks.values() {
            prop_assert_eq!(task.progress, task.total_duration);
            prop_assert!(task.stats.start_time.is_some());
            prop_assert!(task.stats.end_time >= task.stats.start_time);
        }
    }

    #[test]
    fn fcfs_starts_in_id_order(
        workload in arb_workload(),
        cores in 1u32..6,
    ) {
        let state = initialize(cores, &workload).unwrap();
        let state = run_checked(state, &SimConfig::default(), tick_bound(&workload));
        let starts: Vec<_> = state.tasks.values().map(|t| t.stats.start_time).collect();
        prop_assert!(starts.windows(2).all(|w| w[0] <= w[1]), "{:?}", starts);
    }

    #[test]
    fn priority_starts_higher_tasks_no_later(
        workload in arb_workload(),
        cores in 1u32..6,
    ) {
        let config = SimConfig::new(Policy::Priority, 2).unwrap();
        let state = initialize(cores, &workload).unwrap();
        let state = run_checked(state, &config, tick_bound(&workload));
        for a in state.tasks.values() {
            for b in state.tasks.values().filter(|b| b.priority < a.priority) {
                prop_assert!(
                    a.stats.start_time <= b.stats.start_time,
                    "task {} (prio {}) started after task {} (prio {})",
                    a.id, a.priority, b.id, b.priority
                );
            }
        }
    }

    #[test]
    fn reset_is_idempotent(
        workload in arb_workload(),
        cores in 1u32..6,
        policy in arb_policy(),
        ticks in 0u64..20,
    ) {
        let fresh = initialize(cores, &workload).unwrap();
        prop_assert_eq!(&fresh, &initialize(cores, &workload).unwrap());

        let config = SimConfig::new(policy, 2).unwrap();
        let mut sim = Simulation::new(cores, workload.clone(), config).unwrap();
        for _ in 0..ticks {
            sim.step().unwrap();
        }
        sim.reset(cores, workload.clone()).unwrap();
        prop_assert_eq!(sim.state(), &fresh);
        prop_assert!(!sim.is_running());
    }
}

#[test]
fn identical_runs_are_identical() {
    for policy in [Policy::Fcfs, Policy::Priority, Policy::RoundRobin] {
        let config = SimConfig::new(policy, 2).unwrap();
        let mut a = reference_profile(42).simulation(config).unwrap();
        let mut b = reference_profile(42).simulation(config).unwrap();
        while !a.is_complete() {
            assert!(a.current_tick().0 < 1_000, "{policy} did not finish");
            a.step().unwrap();
            b.step().unwrap();
            assert_eq!(a.state(), b.state(), "{policy} diverged at tick {}", a.current_tick());
        }
        assert!(b.is_complete());
    }
}

#[test]
fn step_does_not_depend_on_prior_calls() {
    let profile = reference_profile(3);
    let config = SimConfig::new(Policy::RoundRobin, 3).unwrap();
    let start = initialize(profile.num_cores, &profile.workload).unwrap();

    let mut state = start.clone();
    for _ in 0..5 {
        state = step(state, &config).unwrap().state;
    }
    let replayed = step(state.clone(), &config).unwrap().state;
    let again = step(state, &config).unwrap().state;
    assert_eq!(replayed, again);
}
