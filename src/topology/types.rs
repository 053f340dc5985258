//! Topology type definitions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Dense node identifier in `[0, num_nodes)`
pub type NodeId = u32;

/// An undirected link as written in an edge-list file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub node1: NodeId,
    pub node2: NodeId,
    /// Link capacity, in the units used throughout the file
    pub bandwidth: u64,
    /// One-way propagation delay, in the units used throughout the file
    pub delay: u64,
}

impl Link {
    pub fn new(node1: NodeId, node2: NodeId, bandwidth: u64, delay: u64) -> Self {
        Self {
            node1,
            node2,
            bandwidth,
            delay,
        }
    }
}

/// A parsed edge-list topology. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Topology {
    /// Node count from the header; ids are `[0, num_nodes)`
    pub num_nodes: u32,
    /// Link count from the header. May disagree with `links.len()` in hand-edited files.
    pub declared_links: usize,
    pub links: Vec<Link>,
}

impl Topology {
    /// Build a topology whose header matches its contents
    pub fn new(num_nodes: u32, links: Vec<Link>) -> Self {
        Self {
            num_nodes,
            declared_links: links.len(),
            links,
        }
    }
}

/// A degree-1 node together with the link it hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndHost {
    pub node: NodeId,
    /// Index of the attaching link in the topology's link list
    pub link_index: usize,
    /// 0 if the host is the link's first endpoint, 1 if the second
    pub position: u8,
}

/// The set of nodes that source or sink traffic
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EndHostSet {
    nodes: BTreeSet<NodeId>,
}

impl EndHostSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: NodeId) -> bool {
        self.nodes.insert(node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in ascending order
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}

impl FromIterator<NodeId> for EndHostSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a EndHost> for EndHostSet {
    fn from_iter<I: IntoIterator<Item = &'a EndHost>>(iter: I) -> Self {
        iter.into_iter().map(|h| h.node).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_host_set_is_ordered_and_deduplicated() {
        let set: EndHostSet = vec![9, 2, 5, 2].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 5, 9]);
        assert!(set.contains(5));
        assert!(!set.contains(3));
    }
}
