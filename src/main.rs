use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod error;
mod estimator;
mod inventory;
mod output;
mod planner;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("roadmap=debug")
    } else {
        EnvFilter::new("roadmap=warn")
    };

    // stdout carries the plan, so logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => cli::generate::execute(args).await,
        Commands::Schema(args) => cli::schema::execute(args),
    }
}
