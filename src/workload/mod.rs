//! Traffic traces: parsing, fanout rewriting and offered-load estimates.

pub mod trace;
pub mod fanout;
pub mod utilization;

pub use trace::{parse_workload, parse_workload_str, write_workload, Flow, StartTime};
pub use fanout::expand_workload_fanout;
pub use utilization::{link_utilization, NodeUtilization};

/// Errors from workload rewriting and load estimation
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    #[error("fanout must be at least 1")]
    ZeroFanout,

    #[error("duration must be positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("link rate must be non-zero")]
    ZeroLinkRate,

    #[error("node {node} shifted by {offset} does not fit in a 32-bit node id")]
    Overflow { node: u32, offset: u64 },
}
