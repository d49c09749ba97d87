use super::{Scheduler, run_nonpreemptive};
use crate::core::{Process, Rank, Timeline};

/// Strict priority, non-preemptive: same control flow as SJF, but the
/// smallest priority value wins instead of the smallest burst.
pub struct Priority;

impl Scheduler for Priority {
    fn schedule(&self, processes: &[Process]) -> Timeline {
        run_nonpreemptive(processes, |run| {
            Rank(u64::from(run.priority), run.arrival, run.order)
        })
    }
}
