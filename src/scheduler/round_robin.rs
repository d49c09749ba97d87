use std::collections::VecDeque;

use super::Scheduler;
use crate::core::{Process, RunState, Ticks, Timeline};

/// Preemptive round-robin with a fixed quantum. The ready queue is seeded in
/// input order; a process whose slice expires goes back to the tail.
///
/// Requeued entries keep their arrival untouched: the field records when the
/// process entered the system, not when it was last queued.
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    pub fn new(quantum: Ticks) -> Self {
        assert!(quantum > 0, "Round-robin requires a positive quantum");
        Self { quantum }
    }
}

impl Scheduler for RoundRobin {
    fn schedule(&self, processes: &[Process]) -> Timeline {
        let mut queue: VecDeque<RunState> = processes.iter().map(RunState::new).collect();
        let mut timeline = Vec::with_capacity(processes.len());
        let mut clock: Ticks = 0;

        while let Some(mut run) = queue.pop_front() {
            if run.arrival > clock {
                // The head has not arrived yet; the CPU idles up to it.
                clock = run.arrival;
            }

            let span = self.quantum.min(run.remaining);
            timeline.push(run.dispatch(clock, span));
            clock += span;

            if !run.finished() {
                run.recycles += 1;
                queue.push_back(run);
            }
        }

        timeline
    }
}
