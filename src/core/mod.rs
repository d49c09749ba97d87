pub mod observer;
pub mod state;

pub use observer::Observer;
pub use state::{Process, ProcessId, Rank, RunState, Segment, Ticks, Timeline};
