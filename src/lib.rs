//! # netsim-analysis - Offline analysis of network simulator runs
//!
//! This library post-processes the inputs and outputs of a packet-level
//! simulation comparing two congestion-control variants: a regular TCP run
//! and an alternative scheme.
//!
//! ## Overview
//!
//! Everything here is a single-shot transform over flat, whitespace-delimited
//! text tables. Nothing is persisted beyond the tables and reports written by
//! each command.
//!
//! ## Architecture
//!
//! - `topology`: edge-list and end-host files, plus the delay and fanout rewrites
//! - `paths`: all-pairs hop-minimal routes with bottleneck bandwidth tracking
//! - `analysis`: end-host path statistics, FCT comparison tables and reports
//! - `workload`: traffic trace fanout and offered-load estimates
//! - `config` / `config_loader`: optional YAML settings
//! - `input`: shared line parsing and the `InputError` type
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use netsim_analysis::analysis::{analyze_paths, PairFilter};
//! use netsim_analysis::paths::RouteMatrices;
//! use netsim_analysis::topology::{parse_end_hosts, parse_topology};
//!
//! let topology = parse_topology(Path::new("internet2.txt"))?;
//! let end_hosts = parse_end_hosts(Path::new("endhosts.txt"))?;
//!
//! let matrices = RouteMatrices::compute(&topology)?;
//! let analysis = analyze_paths(&matrices, &end_hosts, &PairFilter::default());
//!
//! if let Some(summary) = &analysis.summary {
//!     println!("max {} min {} mean {}", summary.max, summary.min, summary.mean);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Parsers return `InputError`, which names the file and line at fault.
//! The binaries wrap everything in `color_eyre` reports and abort on the
//! first malformed line; no partial results are written.

pub mod config;
pub mod config_loader;
pub mod input;

pub mod topology;
pub mod paths;
pub mod analysis;
pub mod workload;
