//! Flow completion time comparison CLI.
//!
//! Compares the FCT logs of a regular run and an alternative congestion
//! control run, writes per-size and aggregate statistics tables, and derives
//! the percentage reduction in average FCT.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};

use netsim_analysis::analysis::{
    self,
    fct::VariantSummary,
    FctWindow, SummaryPaths,
};
use netsim_analysis::config::FctConfig;
use netsim_analysis::config_loader;

#[derive(Parser)]
#[command(name = "fct-analyzer")]
#[command(about = "Flow completion time comparison between two simulator runs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Write per-size, per-flow and per-byte FCT statistics for both runs
    Stats {
        /// FCT log of the regular run
        regular_log: PathBuf,
        /// FCT log of the alternative run
        alternative_log: PathBuf,
        /// Suffix of the regular run's output files
        regular_suffix: String,
        /// Suffix of the alternative run's output files
        alternative_suffix: String,
        /// Directory for the statistics tables
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Completion deadline of the regular run, in seconds
        #[arg(long)]
        regular_deadline: Option<f64>,
        /// Completion deadline of the alternative run, in seconds
        #[arg(long)]
        alternative_deadline: Option<f64>,
        /// Ignore flows starting earlier than this, in seconds
        #[arg(long)]
        warmup: Option<f64>,
    },

    /// Percentage reduction in average FCT per key
    Improvement {
        /// Statistics table of the regular run
        regular_stats: PathBuf,
        /// Statistics table of the alternative run
        alternative_stats: PathBuf,
        /// Output is written to avgreduction-<pattern>.txt
        pattern: String,
        /// Directory for the reduction table
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let mut config = config_loader::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Stats {
            regular_log,
            alternative_log,
            regular_suffix,
            alternative_suffix,
            output_dir,
            regular_deadline,
            alternative_deadline,
            warmup,
        } => {
            if let Some(deadline) = regular_deadline {
                config.fct.regular_deadline = deadline;
            }
            if let Some(deadline) = alternative_deadline {
                config.fct.alternative_deadline = deadline;
            }
            if let Some(warmup) = warmup {
                config.fct.warmup = warmup;
            }
            config.validate()?;
            let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(&config.fct.output_dir));

            run_stats(
                &config.fct,
                &regular_log,
                &alternative_log,
                &regular_suffix,
                &alternative_suffix,
                &output_dir,
            )
        }
        Commands::Improvement {
            regular_stats,
            alternative_stats,
            pattern,
            output_dir,
        } => run_improvement(&config.fct, &regular_stats, &alternative_stats, &pattern, &output_dir),
    }
}

fn run_stats(
    fct: &FctConfig,
    regular_log: &Path,
    alternative_log: &Path,
    regular_suffix: &str,
    alternative_suffix: &str,
    output_dir: &Path,
) -> Result<()> {
    let regular_window = FctWindow {
        deadline: fct.regular_deadline,
        warmup: fct.warmup,
    };
    let alternative_window = FctWindow {
        deadline: fct.alternative_deadline,
        warmup: fct.warmup,
    };

    log::info!("Loading FCT logs...");
    let regular = analysis::parse_fct_log(regular_log, &regular_window)
        .with_context(|| format!("Failed to load regular FCT log {}", regular_log.display()))?;
    let alternative = analysis::parse_fct_log(alternative_log, &alternative_window)
        .with_context(|| format!("Failed to load alternative FCT log {}", alternative_log.display()))?;

    let comparison = analysis::compare_runs(&regular, &alternative);
    if comparison.common_flows() == 0 {
        return Err(eyre!(
            "No flow completed within the deadlines in both {} and {}",
            regular_log.display(),
            alternative_log.display()
        ));
    }
    let total_bytes: f64 = comparison.sizes.iter().sum();

    let summaries = [
        (&fct.regular_label, regular_suffix, &comparison.regular),
        (&fct.alternative_label, alternative_suffix, &comparison.alternative),
    ];

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    println!("\n=== FCT COMPARISON SUMMARY ===\n");
    println!("Common flows: {}", comparison.common_flows());
    for (label, suffix, samples) in summaries {
        let summary = samples
            .summarize(total_bytes)
            .ok_or_else(|| eyre!("No samples for run '{}'", label))?;

        let paths = SummaryPaths::new(output_dir, label, suffix);
        analysis::write_variant_summary(&summary, &paths)?;
        log::info!("Statistics for '{}' written to {}", label, paths.per_size.display());

        print_variant(label, &summary);
    }
    println!();

    Ok(())
}

fn print_variant(label: &str, summary: &VariantSummary) {
    println!("\n{}:", label);
    println!("  Sizes: {}", summary.per_size.len());
    println!("  Avg over flows: {:.6}s", summary.bulk.avg);
    println!("  Median: {:.6}s", summary.bulk.median);
    println!("  P99: {:.6}s", summary.bulk.p99);
    println!("  Avg over bytes: {:.6}s", summary.weighted.avg);
}

fn run_improvement(
    fct: &FctConfig,
    regular_stats: &Path,
    alternative_stats: &Path,
    pattern: &str,
    output_dir: &Path,
) -> Result<()> {
    let regular = analysis::parse_averages(regular_stats)
        .with_context(|| format!("Failed to read statistics {}", regular_stats.display()))?;
    let alternative = analysis::parse_averages(alternative_stats)
        .with_context(|| format!("Failed to read statistics {}", alternative_stats.display()))?;

    let reductions = analysis::compute_reductions(&regular, &alternative)?;

    let output_path = output_dir.join(format!("avgreduction-{}.txt", pattern));
    analysis::write_reductions(&reductions, &output_path)?;

    for r in &reductions {
        println!(
            "{}: {}; {}: {}; Reduction: {}",
            fct.regular_label, r.regular_avg, fct.alternative_label, r.alternative_avg, r.percent
        );
    }
    log::info!("Reductions written to {}", output_path.display());

    Ok(())
}
