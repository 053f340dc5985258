//! Report generation for path analysis.
//!
//! The text report is what the legacy tooling printed to the console; the
//! JSON report carries the same data with run metadata for later scripting.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use super::pairs::{DelaySummary, PairRoute, PathAnalysis};
use crate::paths::UNREACHED_SENTINEL;

/// Which columns the text report carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Delay and bottleneck per pair, plus the bottleneck histogram
    Full,
    /// Delay per pair only
    DelayOnly,
}

/// Metadata recorded alongside a JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub analysis_timestamp: String,
    pub topology_file: String,
    pub end_host_file: String,
    pub total_nodes: u32,
    pub total_links: usize,
    pub total_end_hosts: usize,
}

/// Full JSON report for one path analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathReport {
    pub metadata: ReportMetadata,
    pub analysis: PathAnalysis,
}

/// One `"<src>-><dst>:\t<delay>[\t<bandwidth>]"` line
pub fn format_pair(pair: &PairRoute, mode: ReportMode) -> String {
    let delay = pair.delay.unwrap_or(UNREACHED_SENTINEL);
    match mode {
        ReportMode::Full => format!("{}->{}:\t{}\t{}", pair.src, pair.dst, delay, pair.bottleneck),
        ReportMode::DelayOnly => format!("{}->{}:\t{}", pair.src, pair.dst, delay),
    }
}

/// Render the console report: pair lines, then max, min and mean delay,
/// then (in full mode) the bottleneck histogram.
pub fn render_text_report(analysis: &PathAnalysis, summary: &DelaySummary, mode: ReportMode) -> String {
    let mut lines: Vec<String> = analysis
        .pairs
        .iter()
        .map(|pair| format_pair(pair, mode))
        .collect();

    lines.push(summary.max.to_string());
    lines.push(summary.min.to_string());
    lines.push(summary.mean.to_string());

    if mode == ReportMode::Full {
        lines.push(format!("{:?}", analysis.bottleneck_histogram));
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Generate JSON report
pub fn generate_json_report(report: &PathReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::Bottleneck;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample() -> PathAnalysis {
        PathAnalysis {
            pairs: vec![
                PairRoute { src: 1, dst: 2, hops: Some(2), delay: Some(3), bottleneck: Bottleneck::Limited(10) },
                PairRoute { src: 2, dst: 1, hops: Some(2), delay: Some(7), bottleneck: Bottleneck::Limited(20) },
            ],
            summary: Some(DelaySummary { max: 7, min: 3, mean: 5.0, count: 2 }),
            bottleneck_histogram: BTreeMap::from([(10, 1), (20, 1)]),
            unreached_pairs: 0,
        }
    }

    #[test]
    fn test_format_pair() {
        let pair = sample().pairs[0];
        assert_eq!(format_pair(&pair, ReportMode::Full), "1->2:\t3\t10");
        assert_eq!(format_pair(&pair, ReportMode::DelayOnly), "1->2:\t3");
    }

    #[test]
    fn test_format_unreached_pair() {
        let pair = PairRoute { src: 0, dst: 5, hops: None, delay: None, bottleneck: Bottleneck::Unconstrained };
        assert_eq!(format_pair(&pair, ReportMode::Full), "0->5:\t100000\t1000000000");
    }

    #[test]
    fn test_render_text_report() {
        let analysis = sample();
        let summary = analysis.summary.clone().unwrap();

        let full = render_text_report(&analysis, &summary, ReportMode::Full);
        assert_eq!(full, "1->2:\t3\t10\n2->1:\t7\t20\n7\n3\n5\n{10: 1, 20: 1}\n");

        let delay_only = render_text_report(&analysis, &summary, ReportMode::DelayOnly);
        assert_eq!(delay_only, "1->2:\t3\n2->1:\t7\n7\n3\n5\n");
    }

    #[test]
    fn test_generate_json_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("paths.json");
        let report = PathReport {
            metadata: ReportMetadata {
                analysis_timestamp: "2000-01-01T00:00:00Z".to_string(),
                topology_file: "topo.txt".to_string(),
                end_host_file: "hosts.txt".to_string(),
                total_nodes: 3,
                total_links: 2,
                total_end_hosts: 2,
            },
            analysis: sample(),
        };

        generate_json_report(&report, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["total_nodes"], 3);
        assert_eq!(value["analysis"]["summary"]["max"], 7);
        assert_eq!(value["analysis"]["pairs"].as_array().unwrap().len(), 2);
        assert_eq!(value["analysis"]["bottleneck_histogram"]["10"], 1);
    }
}
