//! Readers and writers for edge-list topologies and end-host lists.
//!
//! Edge-list format:
//!
//! ```text
//! <num_nodes>
//! <num_links>
//! <node1>\t<node2>\t<bandwidth>\t<delay>
//! ...
//! ```
//!
//! End-host format: a count line, then one row per host whose first column is
//! the node id. Extra columns are ignored on read.

use std::path::Path;

use log::{debug, warn};

use super::types::{EndHost, EndHostSet, Link, Topology};
use crate::input::{read_input, write_output, InputError, LineFields};

/// Parse an edge-list topology file
pub fn parse_topology(path: &Path) -> Result<Topology, InputError> {
    let content = read_input(path)?;
    parse_topology_from(&content, &path.display().to_string())
}

/// Parse an edge-list topology held in memory
pub fn parse_topology_str(content: &str) -> Result<Topology, InputError> {
    parse_topology_from(content, "<topology>")
}

fn parse_topology_from(content: &str, origin: &str) -> Result<Topology, InputError> {
    let mut lines = content.lines().enumerate();

    let num_nodes: u32 = match lines.next() {
        Some((idx, text)) => LineFields::new(origin, idx + 1, text).parse(0, "node count")?,
        None => {
            return Err(InputError::Empty {
                origin: origin.to_string(),
                expected: "a node count",
            })
        }
    };
    let declared_links: usize = match lines.next() {
        Some((idx, text)) => LineFields::new(origin, idx + 1, text).parse(0, "link count")?,
        None => {
            return Err(InputError::MissingField {
                origin: origin.to_string(),
                line: 2,
                field: "link count",
            })
        }
    };

    let mut links = Vec::with_capacity(declared_links);
    for (idx, text) in lines {
        let fields = LineFields::new(origin, idx + 1, text);
        if fields.is_blank() {
            continue;
        }

        let node1: u32 = fields.parse(0, "node1")?;
        let node2: u32 = fields.parse(1, "node2")?;
        let bandwidth: u64 = fields.parse(2, "bandwidth")?;
        let delay: u64 = fields.parse(3, "delay")?;

        for node in [node1, node2] {
            if node >= num_nodes {
                return Err(InputError::NodeOutOfRange {
                    origin: origin.to_string(),
                    line: fields.line(),
                    node,
                    num_nodes,
                });
            }
        }

        links.push(Link::new(node1, node2, bandwidth, delay));
    }

    if links.len() != declared_links {
        warn!(
            "{}: header declares {} links but {} were read",
            origin,
            declared_links,
            links.len()
        );
    }
    debug!("Parsed {} nodes and {} links from {}", num_nodes, links.len(), origin);

    Ok(Topology {
        num_nodes,
        declared_links,
        links,
    })
}

/// Parse an end-host list file
pub fn parse_end_hosts(path: &Path) -> Result<EndHostSet, InputError> {
    let content = read_input(path)?;
    parse_end_hosts_from(&content, &path.display().to_string())
}

/// Parse an end-host list held in memory
pub fn parse_end_hosts_str(content: &str) -> Result<EndHostSet, InputError> {
    parse_end_hosts_from(content, "<end hosts>")
}

fn parse_end_hosts_from(content: &str, origin: &str) -> Result<EndHostSet, InputError> {
    let mut lines = content.lines().enumerate();

    let declared: usize = match lines.next() {
        Some((idx, text)) => LineFields::new(origin, idx + 1, text).parse(0, "end host count")?,
        None => {
            return Err(InputError::Empty {
                origin: origin.to_string(),
                expected: "an end host count",
            })
        }
    };

    let mut hosts = EndHostSet::new();
    let mut rows = 0usize;
    for (idx, text) in lines {
        let fields = LineFields::new(origin, idx + 1, text);
        if fields.is_blank() {
            continue;
        }
        hosts.insert(fields.parse(0, "node")?);
        rows += 1;
    }

    if rows != declared {
        warn!("{}: header declares {} end hosts but {} were read", origin, declared, rows);
    }
    debug!("Parsed {} end hosts from {}", hosts.len(), origin);

    Ok(hosts)
}

/// Write a topology in edge-list format. The header is written as declared.
pub fn write_topology(topology: &Topology, path: &Path) -> Result<(), InputError> {
    write_output(path, &render_topology(topology))
}

pub(crate) fn render_topology(topology: &Topology) -> String {
    let mut out = format!("{}\n{}\n", topology.num_nodes, topology.declared_links);
    for link in &topology.links {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            link.node1, link.node2, link.bandwidth, link.delay
        ));
    }
    out
}

/// Write an end-host list: count line, then `node\tlink_index\tposition` rows
pub fn write_end_hosts(hosts: &[EndHost], path: &Path) -> Result<(), InputError> {
    write_output(path, &render_end_hosts(hosts))
}

pub(crate) fn render_end_hosts(hosts: &[EndHost]) -> String {
    let mut out = format!("{}\n", hosts.len());
    for host in hosts {
        out.push_str(&format!("{}\t{}\t{}\n", host.node, host.link_index, host.position));
    }
    out
}
