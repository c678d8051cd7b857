pub mod generate;
pub mod schema;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roadmap")]
#[command(
    author,
    version,
    about = "Plan server migrations: phased timelines, risks, costs and milestones"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a migration roadmap from a server inventory
    Generate(GenerateArgs),

    /// Print JSON Schema for the config file or the inventory input
    Schema(SchemaArgs),
}

#[derive(Parser, Clone)]
pub struct GenerateArgs {
    /// Server inventory (JSON or YAML); use - to read JSON from stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path to config file (default: roadmap.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project start date (YYYY-MM-DD); overrides the inventory's startDate
    #[arg(long)]
    pub start_date: Option<String>,

    /// Write the plan JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write roadmap.json and roadmap.md to the configured report directory
    #[arg(long)]
    pub report: bool,

    /// Override report directory (implies --report)
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Cost estimator program (reads request JSON on stdin)
    #[arg(long, env = "ROADMAP_ESTIMATOR_COMMAND", conflicts_with = "estimator_url")]
    pub estimator_command: Option<PathBuf>,

    /// Cost estimator HTTP endpoint (receives request JSON via POST)
    #[arg(long, env = "ROADMAP_ESTIMATOR_URL")]
    pub estimator_url: Option<String>,

    /// Override max concurrent cost lookups
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Parser, Clone)]
pub struct SchemaArgs {
    /// Print the inventory input schema instead of the config schema
    #[arg(long)]
    pub input: bool,
}
