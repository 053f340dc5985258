//! Post-processing of simulator output.
//!
//! Path statistics over end-host pairs, flow completion time comparisons
//! between the regular and alternative congestion-control runs, and the
//! report writers for both.

pub mod pairs;
pub mod report;
pub mod stats;
pub mod fct;
pub mod improvement;

pub use pairs::{analyze_paths, summarize_delays, DelaySummary, PairFilter, PairRoute, PathAnalysis};
pub use report::{generate_json_report, render_text_report, PathReport, ReportMetadata, ReportMode};
pub use fct::{compare_runs, parse_fct_log, write_variant_summary, FctRun, FctWindow, SummaryPaths};
pub use improvement::{compute_reductions, parse_averages, write_reductions};
