//! mcsim quickstart: generate a workload, run it under each policy, and
//! print per-core statistics plus a text Gantt chart.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example quickstart -- [policy] [quantum] [seed]
//!
//! `policy` is one of `fcfs`, `priority`, `round-robin` (all three run
//! when omitted).

use std::error::Error;

use mcsim_bench::WorkloadGenerator;
use mcsim_core::CoreId;
use mcsim_engine::{Policy, SimConfig, Simulation};

// ─── Run parameters ─────────────────────────────────────────────

const NUM_CORES: u32 = 4;
const NUM_TASKS: usize = 10;
const MAX_TICKS: u64 = 1_000;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let policies = match args.next() {
        Some(name) => vec![name.parse::<Policy>()?],
        None => vec![Policy::Fcfs, Policy::Priority, Policy::RoundRobin],
    };
    let quantum = match args.next() {
        Some(q) => q.parse()?,
        None => SimConfig::DEFAULT_QUANTUM,
    };
    let seed = match args.next() {
        Some(s) => s.parse()?,
        None => 42,
    };

    let workload = WorkloadGenerator::with_tasks(NUM_TASKS).generate(seed);
    println!("workload (seed {seed}):");
    for (i, spec) in workload.iter().enumerate() {
        let addrs: Vec<String> = spec.memory_pattern.iter().map(|a| a.to_string()).collect();
        println!(
            "  task {i}: duration {}, priority {}, addresses [{}]",
            spec.duration,
            spec.priority,
            addrs.join(", ")
        );
    }

    for policy in policies {
        let config = SimConfig::new(policy, quantum)?;
        let mut sim = Simulation::new(NUM_CORES, workload.clone(), config)?;
        let ticks = sim.run_to_completion(MAX_TICKS)?;
        report(&sim, ticks);
    }
    Ok(())
}

fn report(sim: &Simulation, ticks: u64) {
    let config = sim.config();
    println!();
    println!(
        "── {} (quantum {}) ── {} ticks, complete: {}",
        config.policy(),
        config.quantum(),
        ticks,
        sim.is_complete()
    );

    for core in sim.cores() {
        let hit_rate = core
            .stats
            .hit_rate()
            .map_or_else(|| "n/a".to_string(), |r| format!("{:.0}%", r * 100.0));
        println!(
            "  core {}: executed {}, busy {} ticks, hit rate {hit_rate}",
            core.id, core.stats.executed, core.stats.utilization
        );
    }

    // One column per tick; a task id while held, '.' while idle.
    println!("  gantt:");
    for core in 0..sim.cores().len() as u32 {
        let lane: String = sim
            .history()
            .lane(CoreId(core))
            .into_iter()
            .map(|slot| match slot {
                Some(task) => std::char::from_digit(task.0 % 36, 36).unwrap_or('#'),
                None => '.',
            })
            .collect();
        println!("    core {core} |{lane}|");
    }

    let summary = sim.summary();
    println!(
        "  finished {} | throughput {:.3}/tick | avg start {:.2} | avg wait {:.2} | avg util {:.2}",
        summary.finished,
        summary.throughput,
        summary.avg_start_time,
        summary.avg_wait_time,
        summary.avg_utilization
    );
}
