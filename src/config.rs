use serde::{Deserialize, Serialize};

/// Top-level configuration structure that mirrors the YAML configuration.
///
/// Every section and field is optional; missing values take the defaults
/// used for the published runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub paths: PathsConfig,
    pub topology: TopologyConfig,
    pub workload: WorkloadConfig,
    pub fct: FctConfig,
}

/// Settings for end-host path reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Print delays only, without bottleneck bandwidths
    pub delay_only: bool,
    /// Skip pairs whose node ids are congruent modulo this value
    pub exclude_same_site: Option<u32>,
}

/// Delays assigned by the `assign-delay` rewrite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Delay of links touching an end host
    pub access_delay: u64,
    /// Delay of router-to-router links
    pub core_delay: u64,
}

/// Workload rewriting and load estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Access link rate used for utilization estimates
    pub link_rate_bps: u64,
    /// Seed for fanout endpoint selection; random when absent
    pub seed: Option<u64>,
}

/// Flow completion time comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FctConfig {
    pub regular_label: String,
    pub alternative_label: String,
    /// Completion deadline in seconds for the regular run
    pub regular_deadline: f64,
    /// Completion deadline in seconds for the alternative run
    pub alternative_deadline: f64,
    /// Flows starting before this many seconds are ignored
    pub warmup: f64,
    /// Directory receiving statistics tables
    pub output_dir: String,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            access_delay: 1,
            core_delay: 10,
        }
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            link_rate_bps: 1_000_000_000,
            seed: None,
        }
    }
}

impl Default for FctConfig {
    fn default() -> Self {
        Self {
            regular_label: "regular".to_string(),
            alternative_label: "rc3".to_string(),
            regular_deadline: 10.0,
            alternative_deadline: 5.0,
            warmup: 2.0,
            output_dir: "improvements".to_string(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid paths configuration: {0}")]
    InvalidPaths(String),
    #[error("Invalid workload configuration: {0}")]
    InvalidWorkload(String),
    #[error("Invalid fct configuration: {0}")]
    InvalidFct(String),
}

impl AnalysisConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.paths.exclude_same_site == Some(0) {
            return Err(ValidationError::InvalidPaths(
                "exclude_same_site must be at least 1".to_string(),
            ));
        }

        if self.workload.link_rate_bps == 0 {
            return Err(ValidationError::InvalidWorkload(
                "link_rate_bps must be non-zero".to_string(),
            ));
        }

        let fct = &self.fct;
        if fct.regular_label.is_empty() || fct.alternative_label.is_empty() {
            return Err(ValidationError::InvalidFct("labels cannot be empty".to_string()));
        }
        if fct.regular_label == fct.alternative_label {
            return Err(ValidationError::InvalidFct(format!(
                "regular and alternative labels must differ, both are '{}'",
                fct.regular_label
            )));
        }
        for (name, value) in [
            ("regular_deadline", fct.regular_deadline),
            ("alternative_deadline", fct.alternative_deadline),
        ] {
            if !(value > 0.0) {
                return Err(ValidationError::InvalidFct(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(fct.warmup >= 0.0) {
            return Err(ValidationError::InvalidFct(format!(
                "warmup cannot be negative, got {}",
                fct.warmup
            )));
        }

        Ok(())
    }
}
