//! Topology rewriting passes.
//!
//! These derive the simulated topologies from a base edge list: picking out
//! the end hosts, giving access links and core links different delays, and
//! replicating every end host `fanout` times behind its access router.

use std::collections::BTreeMap;

use log::{debug, info};

use super::types::{EndHost, EndHostSet, Link, NodeId, Topology};

/// Errors from topology rewriting
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("fanout must be at least 1")]
    ZeroFanout,

    #[error("topology declares {declared} links but has {core} core nodes; expected at least one access link per core node")]
    TooFewLinks { declared: usize, core: u32 },

    #[error("expanded topology does not fit in 32-bit node ids")]
    Overflow,
}

/// Find the degree-1 nodes of a topology.
///
/// A node qualifies when it appears on exactly one link endpoint. Hosts are
/// returned in ascending node order together with the link they attach to.
pub fn find_end_hosts(topology: &Topology) -> Vec<EndHost> {
    let mut endpoints: BTreeMap<NodeId, Vec<(usize, u8)>> = BTreeMap::new();

    for (index, link) in topology.links.iter().enumerate() {
        endpoints.entry(link.node1).or_default().push((index, 0));
        endpoints.entry(link.node2).or_default().push((index, 1));
    }

    let hosts: Vec<EndHost> = endpoints
        .into_iter()
        .filter_map(|(node, seen)| match seen.as_slice() {
            [(link_index, position)] => Some(EndHost {
                node,
                link_index: *link_index,
                position: *position,
            }),
            _ => None,
        })
        .collect();

    info!("Found {} end hosts among {} nodes", hosts.len(), topology.num_nodes);
    hosts
}

/// Rewrite link delays: `access_delay` for links touching an end host,
/// `core_delay` for all others. Node ids, bandwidths and the header are kept.
pub fn assign_delays(
    topology: &Topology,
    end_hosts: &EndHostSet,
    access_delay: u64,
    core_delay: u64,
) -> Topology {
    let links: Vec<Link> = topology
        .links
        .iter()
        .map(|link| {
            let delay = if end_hosts.contains(link.node1) || end_hosts.contains(link.node2) {
                access_delay
            } else {
                core_delay
            };
            Link { delay, ..*link }
        })
        .collect();

    let access = links.iter().filter(|l| l.delay == access_delay).count();
    debug!(
        "Assigned delay {} to {} access links and {} to {} core links",
        access_delay,
        access,
        core_delay,
        links.len() - access
    );

    Topology {
        num_nodes: topology.num_nodes,
        declared_links: topology.declared_links,
        links,
    }
}

/// Replicate every end host `fanout` times.
///
/// The lower half of the id space holds the core nodes and the upper half
/// their single attached host. A link whose second endpoint is a host is
/// emitted once per replica, the i-th copy attaching to `node2 + i * core`
/// and carrying `bandwidth / fanout`. Core links are copied unchanged.
pub fn expand_fanout(topology: &Topology, fanout: u32) -> Result<Topology, TransformError> {
    if fanout == 0 {
        return Err(TransformError::ZeroFanout);
    }

    let core = topology.num_nodes / 2;
    let edge_nodes = core.checked_mul(fanout).ok_or(TransformError::Overflow)?;
    let num_nodes = core.checked_add(edge_nodes).ok_or(TransformError::Overflow)?;

    let core_links = topology
        .declared_links
        .checked_sub(core as usize)
        .ok_or(TransformError::TooFewLinks {
            declared: topology.declared_links,
            core,
        })?;
    let declared_links = core_links + edge_nodes as usize;

    let mut links = Vec::with_capacity(declared_links);
    for link in &topology.links {
        if link.node2 >= core {
            for i in 0..fanout {
                let node2 = i
                    .checked_mul(core)
                    .and_then(|offset| link.node2.checked_add(offset))
                    .ok_or(TransformError::Overflow)?;
                links.push(Link {
                    node2,
                    bandwidth: link.bandwidth / fanout as u64,
                    ..*link
                });
            }
        } else {
            links.push(*link);
        }
    }

    info!(
        "Expanded {} core nodes with fanout {}: {} nodes, {} links",
        core, fanout, num_nodes, declared_links
    );

    Ok(Topology {
        num_nodes,
        declared_links,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two core routers 0-1, each with one host (2, 3)
    fn dumbbell() -> Topology {
        Topology::new(
            4,
            vec![
                Link::new(0, 1, 1000, 10),
                Link::new(0, 2, 100, 10),
                Link::new(1, 3, 100, 10),
            ],
        )
    }

    #[test]
    fn test_find_end_hosts() {
        let hosts = find_end_hosts(&dumbbell());
        assert_eq!(
            hosts,
            vec![
                EndHost { node: 2, link_index: 1, position: 1 },
                EndHost { node: 3, link_index: 2, position: 1 },
            ]
        );
    }

    #[test]
    fn test_find_end_hosts_first_endpoint() {
        let topo = Topology::new(3, vec![Link::new(2, 0, 10, 1), Link::new(0, 1, 10, 1)]);
        let hosts = find_end_hosts(&topo);
        assert_eq!(
            hosts,
            vec![
                EndHost { node: 1, link_index: 1, position: 1 },
                EndHost { node: 2, link_index: 0, position: 0 },
            ]
        );
    }

    #[test]
    fn test_assign_delays() {
        let topo = dumbbell();
        let hosts: EndHostSet = find_end_hosts(&topo).iter().collect();
        let rewritten = assign_delays(&topo, &hosts, 1, 10);

        let delays: Vec<u64> = rewritten.links.iter().map(|l| l.delay).collect();
        assert_eq!(delays, vec![10, 1, 1]);
        assert_eq!(rewritten.num_nodes, 4);
        assert_eq!(rewritten.links[0].bandwidth, 1000);
    }

    #[test]
    fn test_expand_fanout() {
        let expanded = expand_fanout(&dumbbell(), 3).unwrap();

        // 2 core + 2*3 hosts; 1 core link + 6 access links
        assert_eq!(expanded.num_nodes, 8);
        assert_eq!(expanded.declared_links, 7);
        assert_eq!(expanded.links.len(), 7);

        assert_eq!(expanded.links[0], Link::new(0, 1, 1000, 10));
        let host_links: Vec<(u32, u32, u64)> = expanded.links[1..]
            .iter()
            .map(|l| (l.node1, l.node2, l.bandwidth))
            .collect();
        assert_eq!(
            host_links,
            vec![
                (0, 2, 33),
                (0, 4, 33),
                (0, 6, 33),
                (1, 3, 33),
                (1, 5, 33),
                (1, 7, 33),
            ]
        );
    }

    #[test]
    fn test_expand_fanout_one_is_identity() {
        let topo = dumbbell();
        assert_eq!(expand_fanout(&topo, 1).unwrap(), topo);
    }

    #[test]
    fn test_expand_fanout_rejects_zero() {
        assert!(matches!(expand_fanout(&dumbbell(), 0), Err(TransformError::ZeroFanout)));
    }

    #[test]
    fn test_expand_fanout_inconsistent_header() {
        let topo = Topology {
            num_nodes: 8,
            declared_links: 2,
            links: Vec::new(),
        };
        assert!(matches!(
            expand_fanout(&topo, 2),
            Err(TransformError::TooFewLinks { declared: 2, core: 4 })
        ));
    }
}
