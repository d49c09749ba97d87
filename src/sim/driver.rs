use std::fmt;

use rustc_hash::FxHashMap;

use crate::core::{Observer, Process, Segment, Ticks, Timeline};
use crate::scheduler::Algorithm;

/// Caller-owned run configuration. There is no ambient engine state: quantum
/// and selection travel with every `Sim`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub quantum: Ticks,
    pub algorithms: Vec<Algorithm>,
}

impl SimConfig {
    pub fn new(quantum: Ticks, algorithms: Vec<Algorithm>) -> Self {
        Self { quantum, algorithms }
    }

    /// Every discipline at once.
    pub fn all(quantum: Ticks) -> Self {
        Self::new(quantum, Algorithm::ALL.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    EmptyWorkload,
    NoAlgorithmSelected,
    /// A quantum-based algorithm was selected with an unusable quantum.
    InvalidQuantum(Ticks),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::EmptyWorkload => write!(f, "no processes to schedule"),
            SimError::NoAlgorithmSelected => write!(f, "no algorithm selected"),
            SimError::InvalidQuantum(quantum) => {
                write!(f, "quantum {quantum} is invalid for the selected algorithms")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Timelines keyed by algorithm, in dispatch order. Iteration is presented
/// in `Algorithm::ALL` order so display output is stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimulationResult {
    timelines: FxHashMap<Algorithm, Timeline>,
}

impl SimulationResult {
    fn insert(&mut self, algorithm: Algorithm, timeline: Timeline) {
        self.timelines.insert(algorithm, timeline);
    }

    pub fn timeline(&self, algorithm: Algorithm) -> Option<&[Segment]> {
        self.timelines.get(&algorithm).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &[Segment])> {
        Algorithm::ALL.iter().filter_map(|algorithm| {
            self.timeline(*algorithm)
                .map(|timeline| (*algorithm, timeline))
        })
    }

    /// Upper bound of the occupancy grid: every segment lies in
    /// `[0, horizon())`.
    pub fn horizon(&self) -> Ticks {
        self.timelines
            .values()
            .flatten()
            .map(|segment| segment.end)
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }
}

/// Runs each selected strategy over a snapshot of the process set and
/// collects the named timelines. Strategies share no mutable state and
/// nothing is memoized: a `Sim` can be re-run after any workload mutation
/// and always recomputes from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sim {
    config: SimConfig,
}

impl Sim {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn run(&self, processes: &[Process]) -> Result<SimulationResult, SimError> {
        if processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }
        if self.config.algorithms.is_empty() {
            return Err(SimError::NoAlgorithmSelected);
        }
        let needs_quantum = self.config.algorithms.iter().any(Algorithm::uses_quantum);
        if needs_quantum && self.config.quantum == 0 {
            return Err(SimError::InvalidQuantum(self.config.quantum));
        }

        let mut observer = Observer::new();
        let mut result = SimulationResult::default();
        for algorithm in &self.config.algorithms {
            let timeline = algorithm.build(self.config.quantum).schedule(processes);
            observer.observe(processes, &timeline);
            result.insert(*algorithm, timeline);
        }
        Ok(result)
    }
}
