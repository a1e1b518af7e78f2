//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sigclust CLI - Cluster samples by their mutational signature exposures.
#[derive(Debug, Parser)]
#[command(name = "sigclust")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Tree output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TreeFormat {
    /// Nested `{name, children}` JSON (default)
    Json,
    /// Indented text rendering
    Tree,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a labeled clustering tree for one or more projects
    Cluster(ClusterArgs),

    /// List projects in a data directory
    Projects(ProjectsArgs),
}

/// Arguments for the cluster command.
#[derive(Debug, Parser)]
pub struct ClusterArgs {
    /// Data directory containing meta.tsv
    #[arg(short, long, env = "SIGCLUST_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Precomputed samples × signatures exposure table (TSV)
    #[arg(short, long)]
    pub exposures: PathBuf,

    /// Project to include (repeatable, order is kept)
    #[arg(short, long = "project", required = true)]
    pub projects: Vec<String>,

    /// Signature to decompose into (repeatable, order is kept)
    #[arg(short, long = "signature", required = true)]
    pub signatures: Vec<String>,

    /// Mutation type (SBS, DBS or INDEL)
    #[arg(short, long, default_value = "SBS")]
    pub mut_type: String,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: TreeFormat,

    /// Print the per-project aggregation summary to stderr
    #[arg(long)]
    pub report: bool,
}

/// Arguments for the projects command.
#[derive(Debug, Parser)]
pub struct ProjectsArgs {
    /// Data directory containing meta.tsv
    #[arg(short, long, env = "SIGCLUST_DATA_DIR")]
    pub data_dir: PathBuf,
}
