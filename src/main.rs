use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use netsim_analysis::analysis::{
    analyze_paths, generate_json_report, render_text_report, PairFilter, PathReport,
    ReportMetadata, ReportMode,
};
use netsim_analysis::config::AnalysisConfig;
use netsim_analysis::config_loader;
use netsim_analysis::paths::RouteMatrices;
use netsim_analysis::topology::{self, EndHostSet};
use netsim_analysis::workload;

/// Topology, path and workload utilities for network simulator runs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Optional YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report delay and bottleneck bandwidth between every pair of end hosts
    Paths {
        /// Edge-list topology file
        topology: PathBuf,
        /// End-host list file
        end_hosts: PathBuf,
        /// Report delays only
        #[arg(long)]
        delay_only: bool,
        /// Skip pairs whose node ids are congruent modulo this value
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        exclude_same_site: Option<u32>,
        /// Also write a JSON report to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Extract degree-1 nodes into an end-host list
    EndHosts {
        topology: PathBuf,
        output: PathBuf,
    },

    /// Rewrite link delays: access links vs. core links
    AssignDelay {
        topology: PathBuf,
        end_hosts: PathBuf,
        output: PathBuf,
        /// Delay of links touching an end host
        #[arg(long)]
        access_delay: Option<u64>,
        /// Delay of all other links
        #[arg(long)]
        core_delay: Option<u64>,
    },

    /// Replicate every end host behind its access router
    FanoutTopology {
        topology: PathBuf,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        fanout: u32,
        output: PathBuf,
    },

    /// Move workload endpoints onto random host replicas
    FanoutWorkload {
        workload: PathBuf,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        fanout: u32,
        /// Number of core nodes in the fanout topology
        num_core: u32,
        output: PathBuf,
        /// Seed for reproducible endpoint selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Estimate per-source access link utilization of a workload
    LinkUtil {
        workload: PathBuf,
        /// Length of the run in seconds
        duration: f64,
        /// Access link rate in bits per second
        #[arg(long)]
        link_rate: Option<u64>,
    },
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging; --log-level is the default, RUST_LOG still wins
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    let config = config_loader::load_or_default(args.config.as_deref())?;

    match args.command {
        Command::Paths {
            topology,
            end_hosts,
            delay_only,
            exclude_same_site,
            json,
        } => run_paths(&config, &topology, &end_hosts, delay_only, exclude_same_site, json.as_deref()),
        Command::EndHosts { topology, output } => run_end_hosts(&topology, &output),
        Command::AssignDelay {
            topology,
            end_hosts,
            output,
            access_delay,
            core_delay,
        } => {
            let access = access_delay.unwrap_or(config.topology.access_delay);
            let core = core_delay.unwrap_or(config.topology.core_delay);
            run_assign_delay(&topology, &end_hosts, &output, access, core)
        }
        Command::FanoutTopology {
            topology,
            fanout,
            output,
        } => run_fanout_topology(&topology, fanout, &output),
        Command::FanoutWorkload {
            workload,
            fanout,
            num_core,
            output,
            seed,
        } => run_fanout_workload(&workload, fanout, num_core, &output, seed.or(config.workload.seed)),
        Command::LinkUtil {
            workload,
            duration,
            link_rate,
        } => run_link_util(&workload, duration, link_rate.unwrap_or(config.workload.link_rate_bps)),
    }
}

fn load_topology(path: &Path) -> Result<topology::Topology> {
    topology::parse_topology(path)
        .wrap_err_with(|| format!("Failed to load topology '{}'", path.display()))
}

fn load_end_hosts(path: &Path) -> Result<EndHostSet> {
    topology::parse_end_hosts(path)
        .wrap_err_with(|| format!("Failed to load end hosts '{}'", path.display()))
}

fn run_paths(
    config: &AnalysisConfig,
    topology_path: &Path,
    end_hosts_path: &Path,
    delay_only: bool,
    exclude_same_site: Option<u32>,
    json: Option<&Path>,
) -> Result<()> {
    let topology = load_topology(topology_path)?;
    let end_hosts = load_end_hosts(end_hosts_path)?;
    info!(
        "Loaded {} nodes, {} links and {} end hosts",
        topology.num_nodes,
        topology.links.len(),
        end_hosts.len()
    );

    let matrices = RouteMatrices::compute(&topology)
        .wrap_err_with(|| format!("Failed to compute routes for '{}'", topology_path.display()))?;

    let filter = PairFilter {
        exclude_same_site: exclude_same_site.or(config.paths.exclude_same_site),
    };
    let analysis = analyze_paths(&matrices, &end_hosts, &filter);

    let summary = analysis.summary.clone().ok_or_else(|| {
        eyre!(
            "No reachable end-host pairs in '{}' for the hosts in '{}'",
            topology_path.display(),
            end_hosts_path.display()
        )
    })?;

    let mode = if delay_only || config.paths.delay_only {
        ReportMode::DelayOnly
    } else {
        ReportMode::Full
    };
    print!("{}", render_text_report(&analysis, &summary, mode));

    if let Some(json_path) = json {
        let report = PathReport {
            metadata: ReportMetadata {
                analysis_timestamp: chrono::Utc::now().to_rfc3339(),
                topology_file: topology_path.display().to_string(),
                end_host_file: end_hosts_path.display().to_string(),
                total_nodes: topology.num_nodes,
                total_links: topology.links.len(),
                total_end_hosts: end_hosts.len(),
            },
            analysis,
        };
        generate_json_report(&report, json_path)?;
    }

    Ok(())
}

fn run_end_hosts(topology_path: &Path, output: &Path) -> Result<()> {
    let topo = load_topology(topology_path)?;
    let hosts = topology::find_end_hosts(&topo);

    for host in &hosts {
        println!("{}\t({}, {})", host.node, host.link_index, host.position);
    }

    topology::write_end_hosts(&hosts, output)?;
    info!("Wrote {} end hosts to {}", hosts.len(), output.display());
    Ok(())
}

fn run_assign_delay(
    topology_path: &Path,
    end_hosts_path: &Path,
    output: &Path,
    access_delay: u64,
    core_delay: u64,
) -> Result<()> {
    let topo = load_topology(topology_path)?;
    let end_hosts = load_end_hosts(end_hosts_path)?;

    let rewritten = topology::assign_delays(&topo, &end_hosts, access_delay, core_delay);
    topology::write_topology(&rewritten, output)?;
    info!("Wrote delay-assigned topology to {}", output.display());
    Ok(())
}

fn run_fanout_topology(topology_path: &Path, fanout: u32, output: &Path) -> Result<()> {
    let topo = load_topology(topology_path)?;
    let expanded = topology::expand_fanout(&topo, fanout)?;
    topology::write_topology(&expanded, output)?;
    info!("Wrote fanout topology to {}", output.display());
    Ok(())
}

fn run_fanout_workload(
    workload_path: &Path,
    fanout: u32,
    num_core: u32,
    output: &Path,
    seed: Option<u64>,
) -> Result<()> {
    let flows = workload::parse_workload(workload_path)
        .wrap_err_with(|| format!("Failed to load workload '{}'", workload_path.display()))?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let expanded = workload::expand_workload_fanout(&flows, fanout, num_core, &mut rng)?;

    workload::write_workload(&expanded, output)?;
    info!("Wrote {} flows to {}", expanded.len(), output.display());
    Ok(())
}

fn run_link_util(workload_path: &Path, duration: f64, link_rate_bps: u64) -> Result<()> {
    let flows = workload::parse_workload(workload_path)
        .wrap_err_with(|| format!("Failed to load workload '{}'", workload_path.display()))?;

    for entry in workload::link_utilization(&flows, duration, link_rate_bps)? {
        println!("{}\t{}", entry.node, entry.percent);
    }
    Ok(())
}
