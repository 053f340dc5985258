//! Route cell types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::topology::Link;

/// Printed in place of the delay of a pair with no path
pub const UNREACHED_SENTINEL: u64 = 100_000;

/// Printed in place of the bottleneck of a path with no links
pub const UNCONSTRAINED_SENTINEL: u64 = 1_000_000_000;

/// Narrowest link capacity along a path.
///
/// Variant order matters: every `Limited` value compares below
/// `Unconstrained`, so `min` picks the narrower of two bottlenecks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bottleneck {
    Limited(u64),
    /// Empty path (a node to itself) or no path found yet
    Unconstrained,
}

impl Bottleneck {
    /// The finite capacity, if any
    pub fn limited(self) -> Option<u64> {
        match self {
            Bottleneck::Limited(bw) => Some(bw),
            Bottleneck::Unconstrained => None,
        }
    }
}

impl fmt::Display for Bottleneck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bottleneck::Limited(bw) => write!(f, "{}", bw),
            Bottleneck::Unconstrained => write!(f, "{}", UNCONSTRAINED_SENTINEL),
        }
    }
}

/// Best known route between an ordered pair of nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Edge count, or `None` while the destination is unreached
    pub hops: Option<u32>,
    /// Sum of link delays along the route. Meaningless while unreached.
    pub delay: u64,
    pub bottleneck: Bottleneck,
}

impl Route {
    /// The empty route from a node to itself
    pub const SELF: Route = Route {
        hops: Some(0),
        delay: 0,
        bottleneck: Bottleneck::Unconstrained,
    };

    pub const UNREACHED: Route = Route {
        hops: None,
        delay: 0,
        bottleneck: Bottleneck::Unconstrained,
    };

    /// Single-hop route over `link`
    pub fn direct(link: &Link) -> Route {
        Route {
            hops: Some(1),
            delay: link.delay,
            bottleneck: Bottleneck::Limited(link.bandwidth),
        }
    }

    pub fn is_reached(&self) -> bool {
        self.hops.is_some()
    }

    /// Delay of a reached route
    pub fn reached_delay(&self) -> Option<u64> {
        self.hops.map(|_| self.delay)
    }

    /// Route formed by following `self` and then `next`.
    ///
    /// Returns `None` if either half is unreached. The bottleneck is derived
    /// from the two halves' bottlenecks rather than recomputed from links.
    pub fn join(&self, next: &Route) -> Option<Route> {
        let hops = self.hops?.checked_add(next.hops?)?;
        Some(Route {
            hops: Some(hops),
            delay: self.delay.saturating_add(next.delay),
            bottleneck: self.bottleneck.min(next.bottleneck),
        })
    }
}
