use rustc_hash::FxHashMap;

use super::state::{Process, Segment, Ticks};

/// Walks finished timelines and checks the invariants every strategy must
/// uphold. All checks are `debug_assert!`s, so release builds pay nothing.
#[derive(Debug)]
pub struct Observer {
    runs: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { runs: 0 }
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn observe(&mut self, processes: &[Process], timeline: &[Segment]) {
        self.runs += 1;

        let records: FxHashMap<&str, &Process> = processes
            .iter()
            .map(|process| (process.id.as_str(), process))
            .collect();
        let mut executed: FxHashMap<&str, Ticks> = FxHashMap::default();
        let mut last_seq: FxHashMap<&str, u32> = FxHashMap::default();
        let mut last_recycles: FxHashMap<&str, u32> = FxHashMap::default();
        let mut cursor: Ticks = 0;

        for segment in timeline {
            let id = segment.process.as_str();
            debug_assert!(
                segment.end > segment.start,
                "segment for {id} is empty ({}..{})",
                segment.start,
                segment.end
            );
            debug_assert!(
                segment.start >= cursor,
                "segment for {id} overlaps the previous dispatch on a single core"
            );
            cursor = segment.end;

            let Some(record) = records.get(id) else {
                debug_assert!(false, "segment references unknown process {id}");
                continue;
            };
            debug_assert!(
                segment.start >= record.arrival,
                "process {id} dispatched at {} before its arrival {}",
                segment.start,
                record.arrival
            );

            let seq = last_seq.entry(id).or_insert(0);
            debug_assert_eq!(
                segment.seq,
                *seq + 1,
                "dispatch sequence for {id} must count up by one"
            );
            *seq = segment.seq;

            let recycles = last_recycles.entry(id).or_insert(0);
            debug_assert!(
                segment.recycles >= *recycles,
                "recycle count for {id} went backwards"
            );
            *recycles = segment.recycles;

            *executed.entry(id).or_insert(0) += segment.span();
        }

        for process in processes {
            let total = executed.get(process.id.as_str()).copied().unwrap_or(0);
            debug_assert_eq!(
                total, process.burst,
                "process {} executed {total} ticks, burst is {}",
                process.id, process.burst
            );
            // A completing dispatch never bumps the recycle counter, so the
            // final segment's count equals the total number of preemptions.
            let dispatches = last_seq.get(process.id.as_str()).copied().unwrap_or(0);
            let recycles = last_recycles.get(process.id.as_str()).copied().unwrap_or(0);
            debug_assert!(
                recycles < dispatches.max(1),
                "process {} recycled {recycles} times across {dispatches} dispatches",
                process.id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_well_formed_timeline() {
        let processes = vec![
            Process {
                id: "P1".into(),
                arrival: 0,
                burst: 3,
                priority: 1,
            },
            Process {
                id: "P2".into(),
                arrival: 1,
                burst: 2,
                priority: 2,
            },
        ];
        let timeline = vec![
            Segment {
                process: "P1".into(),
                start: 0,
                end: 2,
                seq: 1,
                recycles: 0,
            },
            Segment {
                process: "P2".into(),
                start: 2,
                end: 4,
                seq: 1,
                recycles: 0,
            },
            Segment {
                process: "P1".into(),
                start: 4,
                end: 5,
                seq: 2,
                recycles: 1,
            },
        ];

        let mut observer = Observer::new();
        observer.observe(&processes, &timeline);
        assert_eq!(observer.runs(), 1);
    }
}
