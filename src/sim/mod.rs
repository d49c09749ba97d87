pub mod driver;
pub mod metrics;
pub mod workload;

pub use driver::{Sim, SimConfig, SimError, SimulationResult};
pub use metrics::{MetricsReport, MetricsSummary, ProcessMetrics};
pub use workload::{AdmitError, ProcessKey, Workload};
