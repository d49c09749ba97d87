use super::{Scheduler, run_nonpreemptive};
use crate::core::{Process, Rank, Timeline};

/// Shortest-job-first, non-preemptive: among arrived processes the smallest
/// burst wins, ties falling back to arrival and then insertion order.
pub struct Sjf;

impl Scheduler for Sjf {
    fn schedule(&self, processes: &[Process]) -> Timeline {
        run_nonpreemptive(processes, |run| Rank(run.burst, run.arrival, run.order))
    }
}
