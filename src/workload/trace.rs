//! Workload trace format.
//!
//! One flow per line: `start_time size src dst`. Traces produced by this
//! crate are prefixed with a flow count line; raw traces from the workload
//! generator are not. Both are accepted on read.

use std::fmt;
use std::num::ParseFloatError;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::input::{read_input, write_output, InputError, LineFields};
use crate::topology::NodeId;

/// Flow start time in seconds, written back exactly as it was read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartTime {
    seconds: f64,
    text: String,
}

impl StartTime {
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

impl FromStr for StartTime {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            seconds: s.parse()?,
            text: s.to_string(),
        })
    }
}

impl From<f64> for StartTime {
    fn from(seconds: f64) -> Self {
        Self {
            seconds,
            text: seconds.to_string(),
        }
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One flow of a workload trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub start_time: StartTime,
    /// Flow size in bytes
    pub size: u64,
    pub src: NodeId,
    pub dst: NodeId,
}

pub fn parse_workload(path: &Path) -> Result<Vec<Flow>, InputError> {
    let content = read_input(path)?;
    parse_workload_from(&content, &path.display().to_string())
}

pub fn parse_workload_str(content: &str) -> Result<Vec<Flow>, InputError> {
    parse_workload_from(content, "<workload>")
}

fn parse_workload_from(content: &str, origin: &str) -> Result<Vec<Flow>, InputError> {
    let mut flows = Vec::new();
    let mut declared: Option<usize> = None;

    for (idx, text) in content.lines().enumerate() {
        let fields = LineFields::new(origin, idx + 1, text);
        if fields.is_blank() {
            continue;
        }
        // A lone integer on the first line is a flow count
        if idx == 0 && fields.len() == 1 {
            declared = Some(fields.parse(0, "flow count")?);
            continue;
        }

        flows.push(Flow {
            start_time: fields.parse(0, "start time")?,
            size: fields.parse(1, "flow size")?,
            src: fields.parse(2, "source node")?,
            dst: fields.parse(3, "destination node")?,
        });
    }

    if let Some(count) = declared {
        if count != flows.len() {
            warn!("{}: header declares {} flows but {} were read", origin, count, flows.len());
        }
    }
    debug!("Parsed {} flows from {}", flows.len(), origin);

    Ok(flows)
}

/// Write a counted trace
pub fn write_workload(flows: &[Flow], path: &Path) -> Result<(), InputError> {
    write_output(path, &render_workload(flows))
}

pub(crate) fn render_workload(flows: &[Flow]) -> String {
    let mut out = format!("{}\n", flows.len());
    for flow in flows {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            flow.start_time, flow.size, flow.src, flow.dst
        ));
    }
    out
}
