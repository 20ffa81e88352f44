//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sonde_profiling::ProfilingLevel;

/// Instrumented count requests against a search cluster
#[derive(Debug, Parser)]
#[command(name = "sonde", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML); defaults to ./sonde.toml when present
    #[arg(long, global = true, env = "SONDE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Count documents, blocking until the cluster answers
    Count(CountArgs),
    /// Print the effective configuration as JSON
    Config,
}

#[derive(Debug, Args)]
pub struct CountArgs {
    /// Cluster base URL (overrides `search.url`)
    #[arg(long)]
    pub url: Option<String>,

    /// Collection to count in; repeatable
    #[arg(short = 'c', long = "collection", value_name = "NAME")]
    pub collections: Vec<String>,

    /// Type to filter on; repeatable
    #[arg(short = 't', long = "type", value_name = "NAME")]
    pub types: Vec<String>,

    /// Query restricting the count, as JSON
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Minimum document score
    #[arg(long)]
    pub min_score: Option<f32>,

    /// Shard routing value
    #[arg(long)]
    pub routing: Option<String>,

    /// Replica preference (e.g. `_local`)
    #[arg(long)]
    pub preference: Option<String>,

    /// Profiling level: NONE, BASIC or FULL (overrides `profiling.level`)
    #[arg(long, value_name = "LEVEL")]
    pub profiling: Option<ProfilingLevel>,

    /// Print the whole response as JSON instead of the bare count
    #[arg(long)]
    pub json: bool,
}
