use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::core::{Process, Ticks};

new_key_type! {
    pub struct ProcessKey;
}

/// Rejected at admission, before a record ever reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitError {
    /// Burst must be greater than zero.
    InvalidBurst,
    /// Priority values start at 1.
    InvalidPriority,
    /// The key does not name a live record.
    UnknownProcess,
}

impl fmt::Display for AdmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmitError::InvalidBurst => write!(f, "burst must be greater than zero"),
            AdmitError::InvalidPriority => write!(f, "priority must be at least 1"),
            AdmitError::UnknownProcess => write!(f, "no such process"),
        }
    }
}

impl std::error::Error for AdmitError {}

/// The editable process table an admission front-end maintains between runs.
///
/// Records are immutable once admitted; editing replaces the record under the
/// same id. Ids are `"P<n>"` with a counter that only grows, so an id is
/// never reused even after its record is removed.
#[derive(Debug, Default)]
pub struct Workload {
    entries: SlotMap<ProcessKey, Process>,
    order: Vec<ProcessKey>,
    next_seq: u32,
}

impl Workload {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            next_seq: 0,
        }
    }

    fn validate(burst: Ticks, priority: u32) -> Result<(), AdmitError> {
        if burst == 0 {
            return Err(AdmitError::InvalidBurst);
        }
        if priority == 0 {
            return Err(AdmitError::InvalidPriority);
        }
        Ok(())
    }

    pub fn admit(
        &mut self,
        arrival: Ticks,
        burst: Ticks,
        priority: u32,
    ) -> Result<ProcessKey, AdmitError> {
        Self::validate(burst, priority)?;

        self.next_seq += 1;
        let id = format!("P{}", self.next_seq);
        let key = self.entries.insert(Process {
            id,
            arrival,
            burst,
            priority,
        });
        self.order.push(key);
        Ok(key)
    }

    /// Replaces a record in place; the id is stable across edits.
    pub fn replace(
        &mut self,
        key: ProcessKey,
        arrival: Ticks,
        burst: Ticks,
        priority: u32,
    ) -> Result<(), AdmitError> {
        Self::validate(burst, priority)?;

        let record = self.entries.get_mut(key).ok_or(AdmitError::UnknownProcess)?;
        record.arrival = arrival;
        record.burst = burst;
        record.priority = priority;
        Ok(())
    }

    pub fn remove(&mut self, key: ProcessKey) -> Option<Process> {
        let record = self.entries.remove(key)?;
        self.order.retain(|entry| *entry != key);
        Some(record)
    }

    pub fn get(&self, key: ProcessKey) -> Option<&Process> {
        self.entries.get(key)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.order.iter().filter_map(|key| self.entries.get(*key))
    }

    /// Owned snapshot in insertion order; the orchestrator input.
    pub fn processes(&self) -> Vec<Process> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
