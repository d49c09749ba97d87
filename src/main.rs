use average::Estimate;
use rand::prelude::*;
use sched_model::scheduler::DEFAULT_QUANTUM;
use sched_model::{MetricsReport, Process, Sim, SimConfig};

fn main() {
    let processes = bernoulli_processes(40, 0.25, 0.4, 2, 6, 0);
    let sim = Sim::new(SimConfig::all(DEFAULT_QUANTUM));
    let result = sim.run(&processes).expect("generated workload is non-empty");

    for (algorithm, timeline) in result.iter() {
        println!("== {algorithm} ==");
        for segment in timeline {
            println!(
                "t={}..{} {} (slice {})",
                segment.start, segment.end, segment.process, segment.seq
            );
        }

        let report = MetricsReport::from_run(&processes, timeline);
        println!(
            "Average turnaround: {:.3} ticks ({})",
            avg(report.per_process.iter().map(|m| m.turnaround as f64)),
            report.turnaround,
        );
        println!(
            "Average waiting: {:.3} ticks ({})",
            avg(report.per_process.iter().map(|m| m.waiting as f64)),
            report.waiting,
        );
    }

    println!("Grid horizon: {} ticks", result.horizon());
}

fn bernoulli_processes(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    seed: u64,
) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            processes.push(Process {
                id: format!("P{}", processes.len() + 1),
                arrival: t,
                burst,
                priority: rng.random_range(1..=5),
            });
        }
    }

    processes
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
