use anyhow::{Context, Result};
use cache_simulator::generator::{TraceConfig, TraceGenerator};
use cache_simulator::models::{CacheMode, SimulationConfig};
use cache_simulator::runner::SimulationRunner;
use cache_simulator::stats::SimulationStats;
use clap::{Parser, Subcommand, ValueEnum};
use keycache::{CacheConfig, PolicyKind};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Cache eviction policy simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay traces against the selected caches
    Simulate {
        /// Trace files or directories of traces
        #[arg(short, long, value_name = "PATH", required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Cache capacity in entries
        #[arg(short, long, default_value = "10000", allow_negative_numbers = true)]
        capacity: i64,

        /// Policies to simulate (lru, lfu). Defaults to all.
        #[arg(short, long, value_name = "POLICIES", num_args = 1.., value_delimiter = ',')]
        policies: Vec<String>,

        /// Which cache wrappers to drive
        #[arg(long, value_enum, default_value_t = ModeArg::Sequential)]
        mode: ModeArg,

        /// Export results to a CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Write a synthetic trace
    Generate {
        /// Output CSV file
        #[arg(short, long, default_value = "trace.csv")]
        output: PathBuf,

        /// Number of requests
        #[arg(long, default_value = "100000")]
        requests: u64,

        /// Number of distinct keys
        #[arg(long, default_value = "10000")]
        keys: u32,

        /// Percentage of keys in the hot set
        #[arg(long, default_value = "20")]
        hot_keys: u8,

        /// Percentage of requests going to the hot set
        #[arg(long, default_value = "80")]
        hot_traffic: u8,

        /// Minimum object size in bytes
        #[arg(long, default_value = "1024")]
        min_size: u64,

        /// Maximum object size in bytes
        #[arg(long, default_value = "65536")]
        max_size: u64,

        /// Seed for a reproducible trace
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Sequential,
    Concurrent,
    Both,
}

impl ModeArg {
    fn modes(self) -> Vec<CacheMode> {
        match self {
            ModeArg::Sequential => vec![CacheMode::Sequential],
            ModeArg::Concurrent => vec![CacheMode::Concurrent],
            ModeArg::Both => vec![CacheMode::Sequential, CacheMode::Concurrent],
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Commands::Simulate {
            input,
            capacity,
            policies,
            mode,
            output_csv,
        } => simulate(input, capacity, &policies, mode, output_csv),

        Commands::Generate {
            output,
            requests,
            keys,
            hot_keys,
            hot_traffic,
            min_size,
            max_size,
            seed,
        } => {
            let start_timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock is before the Unix epoch")?
                .as_secs();
            let config = TraceConfig {
                requests,
                unique_keys: keys,
                hot_keys_percent: hot_keys,
                hot_traffic_percent: hot_traffic,
                min_size,
                max_size,
                start_timestamp,
                seed,
            };
            let written = TraceGenerator::new(config)
                .generate_to_path(&output)
                .with_context(|| format!("generating {}", output.display()))?;
            info!(requests = written, path = %output.display(), "trace written");
            Ok(())
        }
    }
}

fn parse_policies(names: &[String]) -> Result<Vec<PolicyKind>> {
    if names.is_empty() {
        return Ok(PolicyKind::all().to_vec());
    }
    let mut policies = names
        .iter()
        .map(|name| name.parse::<PolicyKind>())
        .collect::<Result<Vec<_>, _>>()?;
    policies.sort();
    policies.dedup();
    Ok(policies)
}

fn simulate(
    inputs: Vec<PathBuf>,
    capacity: i64,
    policies: &[String],
    mode: ModeArg,
    output_csv: Option<PathBuf>,
) -> Result<()> {
    let capacity = CacheConfig::try_from_signed(capacity)?
        .non_zero()
        .context("a simulation needs a cache that can hold entries")?
        .get();
    let config = SimulationConfig {
        inputs,
        capacity,
        policies: parse_policies(policies)?,
        modes: mode.modes(),
    };
    info!(
        capacity,
        policies = ?config.policies,
        modes = ?config.modes,
        "starting simulation"
    );

    let result = SimulationRunner::new(config).run()?;
    let stats = SimulationStats::from_result(&result);
    stats.print_summary();

    if let Some(path) = output_csv {
        stats
            .export_csv(&path)
            .with_context(|| format!("exporting results to {}", path.display()))?;
        info!(path = %path.display(), "results exported");
    }
    Ok(())
}
