pub mod fcfs;
pub mod pqs;
pub mod priority;
pub mod round_robin;
pub mod sjf;

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;

use crate::core::{Process, Rank, RunState, Ticks, Timeline};
pub use fcfs::Fcfs;
pub use pqs::Pqs;
pub use priority::Priority;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;

/// Slice handed to the quantum-based disciplines when the caller has no
/// opinion.
pub const DEFAULT_QUANTUM: Ticks = 2;

/// A scheduling discipline. `schedule` is pure: the input is copied into
/// per-run state, so running a strategy never disturbs the caller's records
/// or other strategies in the same batch.
pub trait Scheduler {
    fn schedule(&self, processes: &[Process]) -> Timeline;
}

/// The closed set of disciplines the simulator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fcfs,
    Sjf,
    RoundRobin,
    Priority,
    Pqs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::RoundRobin,
        Algorithm::Priority,
        Algorithm::Pqs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::RoundRobin => "RoundRobin",
            Algorithm::Priority => "Priority",
            Algorithm::Pqs => "PQS",
        }
    }

    pub fn uses_quantum(&self) -> bool {
        matches!(self, Algorithm::RoundRobin | Algorithm::Pqs)
    }

    pub fn build(&self, quantum: Ticks) -> Box<dyn Scheduler> {
        match self {
            Algorithm::Fcfs => Box::new(Fcfs),
            Algorithm::Sjf => Box::new(Sjf),
            Algorithm::RoundRobin => Box::new(RoundRobin::new(quantum)),
            Algorithm::Priority => Box::new(Priority),
            Algorithm::Pqs => Box::new(Pqs::new(quantum)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm name {:?}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "FCFS" => Ok(Algorithm::Fcfs),
            "SJF" => Ok(Algorithm::Sjf),
            "RoundRobin" => Ok(Algorithm::RoundRobin),
            // Older callers send the Spanish name.
            "Priority" | "Prioridades" => Ok(Algorithm::Priority),
            "PQS" => Ok(Algorithm::Pqs),
            other => Err(UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Copies the input into run state, stable-sorted by arrival. `order` is the
/// post-sort position: among equal arrivals it preserves insertion order,
/// which makes it the single tie-break source for every keyed queue.
pub(crate) fn ready_order(processes: &[Process]) -> Vec<RunState> {
    let mut runs: Vec<RunState> = processes.iter().map(RunState::new).collect();
    runs.sort_by_key(|run| run.arrival);
    for (position, run) in runs.iter_mut().enumerate() {
        run.order = position as u64;
    }
    runs
}

/// Shared control flow for the non-preemptive disciplines. Repeatedly admits
/// everything that has arrived into a keyed ready queue and runs the smallest
/// `rank` to completion. When nothing has arrived yet, the earliest pending
/// process runs anyway; `start = max(clock, arrival)` covers the idle gap.
pub(crate) fn run_nonpreemptive(
    processes: &[Process],
    rank: impl Fn(&RunState) -> Rank,
) -> Timeline {
    let mut pending: VecDeque<RunState> = ready_order(processes).into();
    let mut ready: KeyedPriorityQueue<u64, Rank> = KeyedPriorityQueue::new();
    let mut parked: FxHashMap<u64, RunState> = FxHashMap::default();
    let mut timeline = Vec::with_capacity(processes.len());
    let mut clock: Ticks = 0;

    loop {
        while let Some(run) = pending.pop_front() {
            if run.arrival > clock {
                pending.push_front(run);
                break;
            }
            ready.push(run.order, rank(&run));
            parked.insert(run.order, run);
        }

        let mut run = match ready.pop() {
            Some((order, _)) => parked
                .remove(&order)
                .expect("ready queue entry missing its parked run state"),
            // Nothing has arrived: the earliest pending process is forced
            // to run, insertion order deciding between equal arrivals.
            None => match pending.pop_front() {
                Some(run) => run,
                None => break,
            },
        };

        let start = clock.max(run.arrival);
        let span = run.burst;
        timeline.push(run.dispatch(start, span));
        clock = start + span;
    }

    timeline
}
