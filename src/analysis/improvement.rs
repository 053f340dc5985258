//! Percentage reduction in average FCT of the alternative run over the regular one.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::{read_input, write_output, InputError, LineFields};

/// Errors from pairing two statistics tables
#[derive(Debug, thiserror::Error)]
pub enum ImprovementError {
    #[error("key '{key}' is missing from the alternative statistics")]
    MissingKey { key: String },

    #[error("regular average for key '{key}' is zero")]
    ZeroBaseline { key: String },
}

/// Key and average columns of a statistics table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageRow {
    pub key: String,
    pub avg: f64,
}

/// Reduction for one key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reduction {
    pub key: String,
    pub regular_avg: f64,
    pub alternative_avg: f64,
    /// `(regular - alternative) * 100 / regular`
    pub percent: f64,
}

/// Read the first two columns of an FCT statistics table
pub fn parse_averages(path: &Path) -> Result<Vec<AverageRow>, InputError> {
    let content = read_input(path)?;
    parse_averages_from(&content, &path.display().to_string())
}

pub fn parse_averages_str(content: &str) -> Result<Vec<AverageRow>, InputError> {
    parse_averages_from(content, "<stats>")
}

fn parse_averages_from(content: &str, origin: &str) -> Result<Vec<AverageRow>, InputError> {
    let mut rows = Vec::new();
    for (idx, text) in content.lines().enumerate() {
        let fields = LineFields::new(origin, idx + 1, text);
        if fields.is_blank() {
            continue;
        }
        rows.push(AverageRow {
            key: fields.text(0, "key")?.to_string(),
            avg: fields.parse(1, "average")?,
        });
    }
    Ok(rows)
}

/// One reduction per regular row, in the regular table's order
pub fn compute_reductions(
    regular: &[AverageRow],
    alternative: &[AverageRow],
) -> Result<Vec<Reduction>, ImprovementError> {
    let alt_by_key: HashMap<&str, f64> = alternative
        .iter()
        .map(|row| (row.key.as_str(), row.avg))
        .collect();

    regular
        .iter()
        .map(|row| {
            let alternative_avg = *alt_by_key
                .get(row.key.as_str())
                .ok_or_else(|| ImprovementError::MissingKey { key: row.key.clone() })?;
            if row.avg == 0.0 {
                return Err(ImprovementError::ZeroBaseline { key: row.key.clone() });
            }
            Ok(Reduction {
                key: row.key.clone(),
                regular_avg: row.avg,
                alternative_avg,
                percent: (row.avg - alternative_avg) * 100.0 / row.avg,
            })
        })
        .collect()
}

/// Write `key\tpercent` rows
pub fn write_reductions(reductions: &[Reduction], path: &Path) -> Result<(), InputError> {
    let out: String = reductions
        .iter()
        .map(|r| format!("{}\t{:?}\n", r.key, r.percent))
        .collect();
    write_output(path, &out)
}
