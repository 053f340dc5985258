//! Summary statistics over flow completion times.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Percentile with linear interpolation between closest ranks.
///
/// `p` is in `[0, 100]`. Matches the default method of numpy's `percentile`.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// One row of an FCT statistics table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FctStats {
    /// Flow size, or `avg_over_flows` / `avg_over_bytes` for aggregate rows
    pub key: String,
    pub avg: f64,
    pub median: f64,
    pub p99: f64,
    pub p1: f64,
    pub p10: f64,
    pub count: usize,
}

impl FctStats {
    /// Statistics of `values` with the plain mean as average
    pub fn from_values(key: impl Into<String>, values: &[f64]) -> Option<Self> {
        let avg = mean(values)?;
        Self::with_average(key, avg, values)
    }

    /// Statistics of `values` with a caller-supplied average
    pub fn with_average(key: impl Into<String>, avg: f64, values: &[f64]) -> Option<Self> {
        Some(Self {
            key: key.into(),
            avg,
            median: percentile(values, 50.0)?,
            p99: percentile(values, 99.0)?,
            p1: percentile(values, 1.0)?,
            p10: percentile(values, 10.0)?,
            count: values.len(),
        })
    }
}

impl fmt::Display for FctStats {
    /// Tab-separated `key avg median p99 p1 p10 count`; floats keep a
    /// fractional part even when integral
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{:?}\t{:?}\t{:?}\t{:?}\t{:?}\t{}",
            self.key, self.avg, self.median, self.p99, self.p1, self.p10, self.count
        )
    }
}
