use std::collections::VecDeque;

use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;

use super::{Scheduler, ready_order};
use crate::core::{Process, Rank, RunState, Ticks, Timeline};

/// Hybrid priority + quantum discipline. Three disjoint sets are tracked:
/// an arrival-sorted pending queue, at most one running process, and a
/// waiting set ordered by (priority, order).
///
/// A process arriving while the CPU is free takes it directly, without
/// consulting the waiting set; preempted processes re-enter waiting under
/// their original priority (no aging).
pub struct Pqs {
    quantum: Ticks,
}

impl Pqs {
    pub fn new(quantum: Ticks) -> Self {
        assert!(quantum > 0, "PQS requires a positive quantum");
        Self { quantum }
    }
}

impl Scheduler for Pqs {
    fn schedule(&self, processes: &[Process]) -> Timeline {
        let mut pending: VecDeque<RunState> = ready_order(processes).into();
        let mut running: Option<RunState> = None;
        let mut waiting: KeyedPriorityQueue<u64, Rank> = KeyedPriorityQueue::new();
        let mut parked: FxHashMap<u64, RunState> = FxHashMap::default();
        let mut timeline = Vec::with_capacity(processes.len());
        let mut clock: Ticks = 0;

        while running.is_some() || !pending.is_empty() || !waiting.is_empty() {
            // Admit everything due, in arrival order: the first arrival takes
            // a free CPU, the rest join the waiting set.
            while let Some(next) = pending.pop_front() {
                if next.arrival > clock {
                    pending.push_front(next);
                    break;
                }
                if running.is_none() {
                    running = Some(next);
                } else {
                    waiting.push(next.order, Rank(u64::from(next.priority), next.order, 0));
                    parked.insert(next.order, next);
                }
            }

            if let Some(mut run) = running.take() {
                let span = self.quantum.min(run.remaining);
                timeline.push(run.dispatch(clock, span));
                clock += span;
                if !run.finished() {
                    run.recycles += 1;
                    waiting.push(run.order, Rank(u64::from(run.priority), run.order, 0));
                    parked.insert(run.order, run);
                }
            } else if let Some((order, _)) = waiting.pop() {
                running = parked.remove(&order);
                debug_assert!(running.is_some(), "waiting entry missing its parked run state");
            } else if let Some(next) = pending.front() {
                // Nothing ready: idle up to the next arrival.
                clock = next.arrival;
            } else {
                debug_assert!(false, "scheduler stalled with work outstanding");
                clock += 1;
            }
        }

        timeline
    }
}
