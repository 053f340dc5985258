//! Dense all-pairs route matrices relaxed with Floyd-Warshall.

use log::{debug, info, warn};

use super::types::{Bottleneck, Route};
use crate::topology::{NodeId, Topology};

/// Errors raised while building route matrices
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("link {index} references node {node} outside [0, {num_nodes})")]
    NodeOutOfRange {
        index: usize,
        node: NodeId,
        num_nodes: u32,
    },

    #[error("cannot allocate route matrices for {num_nodes} nodes")]
    TooLarge { num_nodes: u32 },
}

/// Hop count, delay and bottleneck for every ordered node pair.
///
/// Stored row-major in one allocation, indexed `src * n + dst`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatrices {
    num_nodes: usize,
    routes: Vec<Route>,
}

impl RouteMatrices {
    /// Initialize from direct links only: zero-hop diagonal, one-hop
    /// neighbours, everything else unreached.
    ///
    /// Links are undirected and recorded in both directions. When a node pair
    /// appears on several lines the last one wins.
    pub fn from_topology(topology: &Topology) -> Result<Self, RouteError> {
        let n = topology.num_nodes as usize;
        let too_large = || RouteError::TooLarge {
            num_nodes: topology.num_nodes,
        };
        let cells = n.checked_mul(n).ok_or_else(too_large)?;
        let mut routes = Vec::new();
        routes.try_reserve_exact(cells).map_err(|_| too_large())?;
        routes.resize(cells, Route::UNREACHED);

        for i in 0..n {
            routes[i * n + i] = Route::SELF;
        }

        for (index, link) in topology.links.iter().enumerate() {
            for node in [link.node1, link.node2] {
                if node >= topology.num_nodes {
                    return Err(RouteError::NodeOutOfRange {
                        index,
                        node,
                        num_nodes: topology.num_nodes,
                    });
                }
            }
            if link.node1 == link.node2 {
                warn!("Ignoring self-loop link {} on node {}", index, link.node1);
                continue;
            }

            let (a, b) = (link.node1 as usize, link.node2 as usize);
            let direct = Route::direct(link);
            if routes[a * n + b].is_reached() {
                debug!("Duplicate link {}-{}; keeping line {}", a, b, index);
            }
            routes[a * n + b] = direct;
            routes[b * n + a] = direct;
        }

        Ok(Self { num_nodes: n, routes })
    }

    /// Initialize and fully relax
    pub fn compute(topology: &Topology) -> Result<Self, RouteError> {
        let mut matrices = Self::from_topology(topology)?;
        let updates = matrices.relax();
        info!(
            "Computed routes for {} nodes ({} relaxations)",
            matrices.num_nodes, updates
        );
        Ok(matrices)
    }

    /// Run the Floyd-Warshall relaxation and return the number of updates.
    ///
    /// A pair is replaced only when going through `k` strictly lowers its hop
    /// count; the replacement's delay and bottleneck come from the two half
    /// routes. Equal-hop alternatives are never considered, so the first
    /// hop-minimal route found in `k, i, j` order is kept. Calling this on
    /// already relaxed matrices changes nothing.
    pub fn relax(&mut self) -> usize {
        let n = self.num_nodes;
        let mut updates = 0;

        for k in 0..n {
            for i in 0..n {
                let first_half = self.routes[i * n + k];
                if !first_half.is_reached() {
                    continue;
                }
                for j in 0..n {
                    let Some(candidate) = first_half.join(&self.routes[k * n + j]) else {
                        continue;
                    };
                    let current = &mut self.routes[i * n + j];
                    let shorter = match (candidate.hops, current.hops) {
                        (Some(new), Some(old)) => new < old,
                        (Some(_), None) => true,
                        (None, _) => false,
                    };
                    if shorter {
                        *current = candidate;
                        updates += 1;
                    }
                }
            }
        }

        updates
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Route from `src` to `dst`. Panics if either id is out of range.
    pub fn route(&self, src: NodeId, dst: NodeId) -> &Route {
        let (i, j) = (src as usize, dst as usize);
        assert!(i < self.num_nodes && j < self.num_nodes, "node id out of range");
        &self.routes[i * self.num_nodes + j]
    }

    pub fn hops(&self, src: NodeId, dst: NodeId) -> Option<u32> {
        self.route(src, dst).hops
    }

    /// Accumulated delay, or `None` if `dst` is unreachable from `src`
    pub fn delay(&self, src: NodeId, dst: NodeId) -> Option<u64> {
        self.route(src, dst).reached_delay()
    }

    pub fn bottleneck(&self, src: NodeId, dst: NodeId) -> Bottleneck {
        self.route(src, dst).bottleneck
    }

    /// Returns true if `node` is a valid index into these matrices
    pub fn contains(&self, node: NodeId) -> bool {
        (node as usize) < self.num_nodes
    }
}
