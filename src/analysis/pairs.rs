//! End-host pair extraction and delay/bottleneck aggregation.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::paths::{Bottleneck, RouteMatrices};
use crate::topology::{EndHostSet, NodeId};

/// Which end-host pairs to report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairFilter {
    /// Drop pairs whose ids are congruent modulo this value, i.e. replicas
    /// hanging off the same access router in a fanout topology
    pub exclude_same_site: Option<u32>,
}

impl PairFilter {
    pub fn admits(&self, src: NodeId, dst: NodeId) -> bool {
        if src == dst {
            return false;
        }
        match self.exclude_same_site {
            Some(modulus) if modulus > 0 => src % modulus != dst % modulus,
            _ => true,
        }
    }
}

/// The selected route between two end hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRoute {
    pub src: NodeId,
    pub dst: NodeId,
    pub hops: Option<u32>,
    /// `None` if no path exists
    pub delay: Option<u64>,
    pub bottleneck: Bottleneck,
}

/// Max/min/mean over the reported delays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelaySummary {
    pub max: u64,
    pub min: u64,
    pub mean: f64,
    pub count: usize,
}

/// Everything derived from one set of route matrices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAnalysis {
    pub pairs: Vec<PairRoute>,
    /// `None` when no reached pair survived filtering
    pub summary: Option<DelaySummary>,
    /// Finite bottleneck bandwidth -> number of pairs
    pub bottleneck_histogram: BTreeMap<u64, usize>,
    pub unreached_pairs: usize,
}

/// Collect every ordered end-host pair admitted by `filter`, in ascending
/// `(src, dst)` order. End hosts outside the matrices are skipped.
pub fn collect_pairs(
    matrices: &RouteMatrices,
    end_hosts: &EndHostSet,
    filter: &PairFilter,
) -> Vec<PairRoute> {
    let hosts: Vec<NodeId> = end_hosts
        .iter()
        .filter(|&node| {
            let known = matrices.contains(node);
            if !known {
                warn!("End host {} is not a node of the topology; skipping", node);
            }
            known
        })
        .collect();

    let mut pairs = Vec::new();
    for &src in &hosts {
        for &dst in &hosts {
            if !filter.admits(src, dst) {
                continue;
            }
            let route = matrices.route(src, dst);
            pairs.push(PairRoute {
                src,
                dst,
                hops: route.hops,
                delay: route.reached_delay(),
                bottleneck: route.bottleneck,
            });
        }
    }

    debug!("Collected {} pairs from {} end hosts", pairs.len(), hosts.len());
    pairs
}

/// Max, min and arithmetic mean of `delays`; `None` for an empty slice
pub fn summarize_delays(delays: &[u64]) -> Option<DelaySummary> {
    let max = *delays.iter().max()?;
    let min = *delays.iter().min()?;
    let total: u128 = delays.iter().map(|&d| d as u128).sum();

    Some(DelaySummary {
        max,
        min,
        mean: total as f64 / delays.len() as f64,
        count: delays.len(),
    })
}

/// Count pairs per finite bottleneck value
pub fn bottleneck_histogram(pairs: &[PairRoute]) -> BTreeMap<u64, usize> {
    let mut histogram = BTreeMap::new();
    for bw in pairs.iter().filter_map(|p| p.bottleneck.limited()) {
        *histogram.entry(bw).or_insert(0) += 1;
    }
    histogram
}

/// Collect pairs and aggregate them. Unreached pairs are kept in the pair
/// list but excluded from the delay summary.
pub fn analyze_paths(
    matrices: &RouteMatrices,
    end_hosts: &EndHostSet,
    filter: &PairFilter,
) -> PathAnalysis {
    let pairs = collect_pairs(matrices, end_hosts, filter);

    let delays: Vec<u64> = pairs.iter().filter_map(|p| p.delay).collect();
    let unreached_pairs = pairs.len() - delays.len();
    if unreached_pairs > 0 {
        warn!(
            "{} end-host pairs have no path and are excluded from delay statistics",
            unreached_pairs
        );
    }

    PathAnalysis {
        summary: summarize_delays(&delays),
        bottleneck_histogram: bottleneck_histogram(&pairs),
        unreached_pairs,
        pairs,
    }
}
