//! Flow completion time comparison between two congestion-control runs.
//!
//! Each run logs one line per finished flow: `size fct start flow_id`. Only
//! flows that started after the warm-up period and finished before the run's
//! deadline are kept, and only flows that finished in both runs are compared.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::stats::FctStats;
use crate::input::{read_input, write_output, InputError, LineFields};

/// Flow size in bytes -> flow id -> completion time in seconds
pub type FctRun = BTreeMap<u64, BTreeMap<u64, f64>>;

/// Admission window for FCT records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FctWindow {
    /// Latest simulated time by which a flow must have completed
    pub deadline: f64,
    /// Earliest start time considered
    pub warmup: f64,
}

impl FctWindow {
    pub fn admits(&self, fct: f64, start: f64) -> bool {
        fct + start <= self.deadline && start >= self.warmup
    }
}

/// Parse an FCT log file, keeping records inside `window`
pub fn parse_fct_log(path: &Path, window: &FctWindow) -> Result<FctRun, InputError> {
    let content = read_input(path)?;
    parse_fct_log_from(&content, &path.display().to_string(), window)
}

/// Parse an FCT log held in memory
pub fn parse_fct_log_str(content: &str, window: &FctWindow) -> Result<FctRun, InputError> {
    parse_fct_log_from(content, "<fct log>", window)
}

fn parse_fct_log_from(content: &str, origin: &str, window: &FctWindow) -> Result<FctRun, InputError> {
    let mut run = FctRun::new();
    let mut total = 0usize;
    let mut kept = 0usize;

    for (idx, text) in content.lines().enumerate() {
        let fields = LineFields::new(origin, idx + 1, text);
        if fields.is_blank() {
            continue;
        }
        total += 1;

        let size: u64 = fields.parse(0, "flow size")?;
        let fct: f64 = fields.parse(1, "completion time")?;
        let start: f64 = fields.parse(2, "start time")?;
        let flow_id: u64 = fields.parse(3, "flow id")?;

        if window.admits(fct, start) {
            run.entry(size).or_default().insert(flow_id, fct);
            kept += 1;
        }
    }

    debug!("{}: kept {} of {} flows", origin, kept, total);
    Ok(run)
}

/// Completion times of the commonly finished flows of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantSamples {
    pub per_size: BTreeMap<u64, Vec<f64>>,
    pub bulk: Vec<f64>,
    /// `fct * size` per flow
    pub weighted: Vec<f64>,
}

impl VariantSamples {
    fn push(&mut self, size: u64, fct: f64) {
        self.per_size.entry(size).or_default().push(fct);
        self.bulk.push(fct);
        self.weighted.push(fct * size as f64);
    }

    /// Per-size, per-flow and per-byte statistics. `total_bytes` is the sum
    /// of the compared flow sizes.
    pub fn summarize(&self, total_bytes: f64) -> Option<VariantSummary> {
        let per_size = self
            .per_size
            .iter()
            .filter_map(|(size, values)| FctStats::from_values(size.to_string(), values))
            .collect();
        let bulk = FctStats::from_values("avg_over_flows", &self.bulk)?;
        let weighted_avg = self.weighted.iter().sum::<f64>() / total_bytes;
        let weighted = FctStats::with_average("avg_over_bytes", weighted_avg, &self.weighted)?;

        Some(VariantSummary {
            per_size,
            bulk,
            weighted,
        })
    }
}

/// Paired samples from the regular and alternative runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub regular: VariantSamples,
    pub alternative: VariantSamples,
    /// Size of every compared flow, in comparison order
    pub sizes: Vec<f64>,
}

impl Comparison {
    pub fn common_flows(&self) -> usize {
        self.sizes.len()
    }
}

/// Statistics tables for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub per_size: Vec<FctStats>,
    pub bulk: FctStats,
    pub weighted: FctStats,
}

/// Pair up flows that completed in both runs.
///
/// Sizes are taken from the alternative run; sizes absent from the regular
/// run contribute nothing.
pub fn compare_runs(regular: &FctRun, alternative: &FctRun) -> Comparison {
    let mut comparison = Comparison::default();

    for (&size, alt_flows) in alternative {
        let Some(reg_flows) = regular.get(&size) else {
            debug!("Size {} has no completed flows in the regular run", size);
            continue;
        };
        for (flow_id, &alt_fct) in alt_flows {
            if let Some(&reg_fct) = reg_flows.get(flow_id) {
                comparison.regular.push(size, reg_fct);
                comparison.alternative.push(size, alt_fct);
                comparison.sizes.push(size as f64);
            }
        }
    }

    info!(
        "Compared {} flows across {} sizes",
        comparison.common_flows(),
        comparison.alternative.per_size.len()
    );
    comparison
}

/// The three table files written for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPaths {
    pub per_size: PathBuf,
    pub bulk: PathBuf,
    pub weighted: PathBuf,
}

impl SummaryPaths {
    /// `<dir>/<label>-<suffix>`, `<dir>/<label>-bulk-<suffix>`, `<dir>/<label>-weighted-<suffix>`
    pub fn new(dir: &Path, label: &str, suffix: &str) -> Self {
        Self {
            per_size: dir.join(format!("{}-{}", label, suffix)),
            bulk: dir.join(format!("{}-bulk-{}", label, suffix)),
            weighted: dir.join(format!("{}-weighted-{}", label, suffix)),
        }
    }
}

/// Write a run's statistics tables
pub fn write_variant_summary(summary: &VariantSummary, paths: &SummaryPaths) -> Result<(), InputError> {
    let per_size: String = summary
        .per_size
        .iter()
        .map(|row| format!("{}\n", row))
        .collect();
    write_output(&paths.per_size, &per_size)?;
    write_output(&paths.bulk, &format!("{}\n", summary.bulk))?;
    write_output(&paths.weighted, &format!("{}\n", summary.weighted))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const WINDOW: FctWindow = FctWindow { deadline: 10.0, warmup: 2.0 };

    #[test]
    fn test_window() {
        assert!(WINDOW.admits(1.0, 2.0));
        assert!(WINDOW.admits(8.0, 2.0));
        assert!(!WINDOW.admits(8.5, 2.0));
        assert!(!WINDOW.admits(0.5, 1.9));
    }

    #[test]
    fn test_parse_fct_log_filters() {
        let log = "1000\t0.5\t2.5\t1\n1000\t0.7\t1.0\t2\n2000\t9.0\t3.0\t3\n2000\t1.5\t3.0\t4\n";
        let run = parse_fct_log_str(log, &WINDOW).unwrap();

        assert_eq!(run[&1000], BTreeMap::from([(1, 0.5)]));
        assert_eq!(run[&2000], BTreeMap::from([(4, 1.5)]));
    }

    #[test]
    fn test_parse_fct_log_short_line() {
        let err = parse_fct_log_str("1000\t0.5\t2.5\n", &WINDOW).unwrap_err();
        assert!(matches!(err, InputError::MissingField { field: "flow id", .. }));
    }

    fn runs() -> (FctRun, FctRun) {
        let regular = FctRun::from([
            (100, BTreeMap::from([(1, 2.0), (2, 4.0), (3, 6.0)])),
            (300, BTreeMap::from([(4, 1.0)])),
        ]);
        let alternative = FctRun::from([
            (100, BTreeMap::from([(1, 1.0), (2, 2.0), (9, 0.1)])),
            (300, BTreeMap::from([(4, 0.5)])),
            (500, BTreeMap::from([(5, 0.5)])),
        ]);
        (regular, alternative)
    }

    #[test]
    fn test_compare_runs_keeps_common_flows() {
        let (regular, alternative) = runs();
        let cmp = compare_runs(&regular, &alternative);

        assert_eq!(cmp.common_flows(), 3);
        assert_eq!(cmp.regular.per_size[&100], vec![2.0, 4.0]);
        assert_eq!(cmp.alternative.per_size[&100], vec![1.0, 2.0]);
        assert_eq!(cmp.regular.bulk, vec![2.0, 4.0, 1.0]);
        assert_eq!(cmp.regular.weighted, vec![200.0, 400.0, 300.0]);
        assert_eq!(cmp.sizes, vec![100.0, 100.0, 300.0]);
        assert!(!cmp.alternative.per_size.contains_key(&500));
    }

    #[test]
    fn test_summarize() {
        let (regular, alternative) = runs();
        let cmp = compare_runs(&regular, &alternative);
        let total_bytes: f64 = cmp.sizes.iter().sum();
        let summary = cmp.regular.summarize(total_bytes).unwrap();

        assert_eq!(summary.per_size.len(), 2);
        assert_eq!(summary.per_size[0].key, "100");
        assert_eq!(summary.per_size[0].avg, 3.0);
        assert_eq!(summary.bulk.key, "avg_over_flows");
        assert!((summary.bulk.avg - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.weighted.key, "avg_over_bytes");
        assert_eq!(summary.weighted.avg, 900.0 / 500.0);
        assert_eq!(summary.weighted.count, 3);
    }

    #[test]
    fn test_summarize_empty_is_none() {
        assert!(VariantSamples::default().summarize(0.0).is_none());
    }

    #[test]
    fn test_write_variant_summary() {
        let (regular, alternative) = runs();
        let cmp = compare_runs(&regular, &alternative);
        let total_bytes: f64 = cmp.sizes.iter().sum();
        let summary = cmp.alternative.summarize(total_bytes).unwrap();

        let dir = tempdir().unwrap();
        let paths = SummaryPaths::new(dir.path(), "rc3", "run1.txt");
        write_variant_summary(&summary, &paths).unwrap();

        assert_eq!(paths.per_size, dir.path().join("rc3-run1.txt"));
        let per_size = std::fs::read_to_string(&paths.per_size).unwrap();
        assert_eq!(per_size.lines().count(), 2);
        assert!(per_size.starts_with("100\t1.5\t"));

        let bulk = std::fs::read_to_string(dir.path().join("rc3-bulk-run1.txt")).unwrap();
        assert!(bulk.starts_with("avg_over_flows\t"));
        assert!(dir.path().join("rc3-weighted-run1.txt").exists());
    }
}
