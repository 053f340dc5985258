//! Network topology module.
//!
//! Edge-list topologies and end-host lists as consumed by the simulator,
//! plus the rewriting passes used to derive the fanout variants.

pub mod types;
pub mod parser;
pub mod transform;

// Re-export key types and functions for easier access
pub use types::{EndHost, EndHostSet, Link, NodeId, Topology};
pub use parser::{
    parse_end_hosts, parse_end_hosts_str, parse_topology, parse_topology_str, write_end_hosts,
    write_topology,
};
pub use transform::{assign_delays, expand_fanout, find_end_hosts, TransformError};
