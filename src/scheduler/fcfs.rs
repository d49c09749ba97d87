use super::{Scheduler, ready_order};
use crate::core::{Process, Timeline};

/// First-come-first-served: arrival order, ties resolved by insertion order,
/// every process runs its full burst in one dispatch.
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn schedule(&self, processes: &[Process]) -> Timeline {
        let mut timeline = Vec::with_capacity(processes.len());
        let mut clock = 0;

        let mut runs = ready_order(processes);
        for run in &mut runs {
            let start = clock.max(run.arrival);
            let span = run.burst;
            timeline.push(run.dispatch(start, span));
            clock = start + span;
        }

        timeline
    }
}
