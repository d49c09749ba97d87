use pretty_assertions::assert_eq;
use rand::prelude::*;
use rustc_hash::FxHashMap;
use sched_model::{Algorithm, MetricsReport, Process, Sim, SimConfig, Ticks};

fn random_workload(seed: u64) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..30 {
        if rng.random::<f64>() < 0.4 {
            processes.push(Process {
                id: format!("P{}", processes.len() + 1),
                arrival: t,
                burst: rng.random_range(1..=8),
                priority: rng.random_range(1..=5),
            });
        }
    }

    if processes.is_empty() {
        processes.push(Process {
            id: "P1".into(),
            arrival: 0,
            burst: 3,
            priority: 1,
        });
    }

    // The generator is arrival-ordered; shuffle so input order and arrival
    // order disagree, which is where tie-break bugs hide.
    processes.shuffle(&mut rng);
    processes
}

#[test]
fn every_algorithm_conserves_burst_time() {
    for seed in 0..8 {
        let processes = random_workload(seed);
        let result = Sim::new(SimConfig::all(2)).run(&processes).unwrap();

        for (algorithm, timeline) in result.iter() {
            let mut executed: FxHashMap<&str, Ticks> = FxHashMap::default();
            for segment in timeline {
                *executed.entry(segment.process.as_str()).or_insert(0) +=
                    segment.end - segment.start;
            }
            for process in &processes {
                assert_eq!(
                    executed.get(process.id.as_str()).copied(),
                    Some(process.burst),
                    "{algorithm} lost time for {} (seed {seed})",
                    process.id
                );
            }
        }
    }
}

#[test]
fn segments_are_well_formed_and_never_overlap() {
    for seed in 0..8 {
        let processes = random_workload(seed);
        let arrivals: FxHashMap<&str, Ticks> = processes
            .iter()
            .map(|p| (p.id.as_str(), p.arrival))
            .collect();
        let result = Sim::new(SimConfig::all(3)).run(&processes).unwrap();

        for (algorithm, timeline) in result.iter() {
            let mut cursor = 0;
            for segment in timeline {
                assert!(
                    segment.end > segment.start,
                    "{algorithm} emitted an empty segment (seed {seed})"
                );
                assert!(
                    segment.start >= cursor,
                    "{algorithm} overlapped dispatches (seed {seed})"
                );
                assert!(
                    segment.start >= arrivals[segment.process.as_str()],
                    "{algorithm} ran {} before its arrival (seed {seed})",
                    segment.process
                );
                cursor = segment.end;
            }
        }
    }
}

#[test]
fn preemptive_seq_numbers_count_dispatches() {
    for seed in 0..8 {
        let processes = random_workload(seed);
        let result = Sim::new(SimConfig::all(2)).run(&processes).unwrap();

        for (algorithm, timeline) in result.iter() {
            let mut seen: FxHashMap<&str, u32> = FxHashMap::default();
            for segment in timeline {
                let count = seen.entry(segment.process.as_str()).or_insert(0);
                *count += 1;
                assert_eq!(
                    segment.seq, *count,
                    "{algorithm} mis-numbered a dispatch of {} (seed {seed})",
                    segment.process
                );
            }
        }
    }
}

#[test]
fn nonpreemptive_algorithms_emit_one_segment_per_process() {
    let processes = random_workload(1);
    let result = Sim::new(SimConfig::all(2)).run(&processes).unwrap();

    for algorithm in [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::Priority] {
        let timeline = result.timeline(algorithm).unwrap();
        assert_eq!(timeline.len(), processes.len(), "{algorithm} split a burst");
        assert!(timeline.iter().all(|s| s.seq == 1 && s.recycles == 0));
    }
}

#[test]
fn reruns_on_an_unmodified_workload_are_identical() {
    let processes = random_workload(2);
    let sim = Sim::new(SimConfig::all(2));
    assert_eq!(sim.run(&processes).unwrap(), sim.run(&processes).unwrap());
}

#[test]
fn metrics_agree_across_algorithms_on_totals() {
    // Turnaround minus waiting is burst, whatever the schedule looked like.
    let processes = random_workload(3);
    let result = Sim::new(SimConfig::all(2)).run(&processes).unwrap();
    let total_burst: Ticks = processes.iter().map(|p| p.burst).sum();

    for (algorithm, timeline) in result.iter() {
        let report = MetricsReport::from_run(&processes, timeline);
        assert_eq!(report.per_process.len(), processes.len());
        assert_eq!(
            report.turnaround.sum - report.waiting.sum,
            total_burst,
            "{algorithm} metrics disagree with burst totals"
        );
    }
}
