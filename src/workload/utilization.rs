//! Offered load per source host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::trace::Flow;
use super::WorkloadError;
use crate::topology::NodeId;

/// Bytes a source injects and the share of its access link they occupy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeUtilization {
    pub node: NodeId,
    pub bytes: u64,
    /// Percent of `link_rate_bps * duration`
    pub percent: f64,
}

/// Offered load of every source node over `duration_secs`, ascending by node
pub fn link_utilization(
    flows: &[Flow],
    duration_secs: f64,
    link_rate_bps: u64,
) -> Result<Vec<NodeUtilization>, WorkloadError> {
    if !(duration_secs > 0.0) {
        return Err(WorkloadError::NonPositiveDuration(duration_secs));
    }
    if link_rate_bps == 0 {
        return Err(WorkloadError::ZeroLinkRate);
    }

    let mut totals: BTreeMap<NodeId, u64> = BTreeMap::new();
    for flow in flows {
        *totals.entry(flow.src).or_insert(0) += flow.size;
    }

    let capacity_bits = link_rate_bps as f64 * duration_secs;
    Ok(totals
        .into_iter()
        .map(|(node, bytes)| NodeUtilization {
            node,
            bytes,
            percent: (bytes as f64 * 8.0 * 100.0) / capacity_bits,
        })
        .collect())
}
