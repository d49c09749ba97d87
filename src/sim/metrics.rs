use std::fmt;

use rustc_hash::FxHashMap;

use crate::core::{Process, ProcessId, Segment, Ticks};

/// Derived timings for one process. `completion` is the largest segment end;
/// turnaround and waiting follow from arrival and burst.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub id: ProcessId,
    pub completion: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
}

/// Exact aggregate over per-process values. The sum and count are exposed so
/// callers pick their own precision; `Display` rounds the mean to three
/// decimals the way the result table renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSummary {
    pub sum: Ticks,
    pub count: usize,
}

impl MetricsSummary {
    fn push(&mut self, value: Ticks) {
        self.sum += value;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} = {:.3}", self.sum, self.count, self.mean())
    }
}

/// Per-process and aggregate turnaround/waiting statistics for one
/// algorithm's timeline. Recomputed from scratch on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsReport {
    /// Rows in process input order, covering every id present in the
    /// timeline.
    pub per_process: Vec<ProcessMetrics>,
    pub turnaround: MetricsSummary,
    pub waiting: MetricsSummary,
}

impl MetricsReport {
    pub fn from_run(processes: &[Process], timeline: &[Segment]) -> Self {
        let mut completions: FxHashMap<&str, Ticks> = FxHashMap::default();
        for segment in timeline {
            let completion = completions.entry(segment.process.as_str()).or_insert(0);
            *completion = (*completion).max(segment.end);
        }

        let mut per_process = Vec::with_capacity(processes.len());
        let mut turnaround = MetricsSummary::default();
        let mut waiting = MetricsSummary::default();

        for process in processes {
            let Some(&completion) = completions.get(process.id.as_str()) else {
                continue;
            };
            let metrics = ProcessMetrics {
                id: process.id.clone(),
                completion,
                turnaround: completion - process.arrival,
                waiting: (completion - process.arrival) - process.burst,
            };
            turnaround.push(metrics.turnaround);
            waiting.push(metrics.waiting);
            per_process.push(metrics);
        }

        Self {
            per_process,
            turnaround,
            waiting,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn process(id: &str, arrival: u64, burst: u64) -> Process {
        Process {
            id: id.into(),
            arrival,
            burst,
            priority: 1,
        }
    }

    fn segment(id: &str, start: u64, end: u64, seq: u32) -> Segment {
        Segment {
            process: id.into(),
            start,
            end,
            seq,
            recycles: seq - 1,
        }
    }

    #[test]
    fn derives_turnaround_and_waiting() {
        let processes = vec![process("P1", 0, 3), process("P2", 1, 2)];
        let timeline = vec![segment("P1", 0, 3, 1), segment("P2", 3, 5, 1)];

        let report = MetricsReport::from_run(&processes, &timeline);
        assert_eq!(
            report.per_process,
            vec![
                ProcessMetrics {
                    id: "P1".into(),
                    completion: 3,
                    turnaround: 3,
                    waiting: 0,
                },
                ProcessMetrics {
                    id: "P2".into(),
                    completion: 5,
                    turnaround: 4,
                    waiting: 2,
                },
            ]
        );
        assert_eq!(report.turnaround, MetricsSummary { sum: 7, count: 2 });
        assert_eq!(report.waiting, MetricsSummary { sum: 2, count: 2 });
        assert_eq!(report.turnaround.mean(), 3.5);
    }

    #[test]
    fn completion_is_the_last_segment_end_under_preemption() {
        let processes = vec![process("P1", 0, 4)];
        let timeline = vec![segment("P1", 0, 2, 1), segment("P1", 5, 7, 2)];

        let report = MetricsReport::from_run(&processes, &timeline);
        assert_eq!(report.per_process[0].completion, 7);
        assert_eq!(report.per_process[0].waiting, 3);
    }

    #[test]
    fn aggregates_are_invariant_to_segment_order() {
        let processes = vec![process("P1", 0, 3), process("P2", 1, 2)];
        let forward = vec![segment("P1", 0, 3, 1), segment("P2", 3, 5, 1)];
        let reversed: Vec<Segment> = forward.iter().rev().cloned().collect();

        let a = MetricsReport::from_run(&processes, &forward);
        let b = MetricsReport::from_run(&processes, &reversed);
        assert_eq!(a.turnaround, b.turnaround);
        assert_eq!(a.waiting, b.waiting);
        assert_eq!(a.per_process, b.per_process);
    }

    #[test]
    fn display_rounds_to_three_decimals() {
        let summary = MetricsSummary { sum: 7, count: 3 };
        assert_eq!(summary.to_string(), "7 / 3 = 2.333");
        assert_eq!(MetricsSummary::default().mean(), 0.0);
    }
}
