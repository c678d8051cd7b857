use crate::cli::GenerateArgs;
use crate::config::{Config, EstimatorProvider};
use crate::error::ConfigError;
use crate::estimator::create_estimator;
use crate::inventory;
use crate::output::{write_plan, write_report_dir};
use crate::planner::RoadmapGenerator;
use std::path::Path;
use tracing::{info, warn};

const DEFAULT_CONFIG: &str = "roadmap.yaml";

pub async fn execute(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;

    // Apply CLI overrides
    if let Some(binary) = args.estimator_command {
        config.use_command_estimator(binary);
    }
    if let Some(url) = args.estimator_url {
        config.use_http_estimator(url);
    }
    if let Some(concurrency) = args.concurrency {
        config.estimator.concurrency = concurrency;
    }

    config.validate()?;

    info!("Reading inventory from {:?}", args.input);
    let request = inventory::load_request(&args.input)?;
    let start_date = args.start_date.or(request.start_date);

    if config.estimator.provider == EstimatorProvider::None {
        warn!("No cost estimator configured; every server is costed at zero");
    }
    let estimator = create_estimator(&config.estimator)?;

    let generator =
        RoadmapGenerator::new(estimator).with_concurrency(config.estimator.concurrency);
    let plan = generator
        .generate_migration_roadmap(&request.servers, start_date.as_deref())
        .await?;

    info!(
        "Roadmap covers {} servers over {} days ({} -> {})",
        plan.summary.servers.total,
        plan.summary.duration.total_days,
        plan.summary.duration.start_date,
        plan.summary.duration.end_date
    );

    let failed = &plan.summary.costs.failed_estimates;
    if !failed.is_empty() && config.estimator.provider != EstimatorProvider::None {
        warn!(
            "Cost estimates failed for {} server(s): {}",
            failed.len(),
            failed.join(", ")
        );
    }

    write_plan(&plan, args.output.as_deref())?;
    if let Some(ref path) = args.output {
        info!("Plan written to {:?}", path);
    }

    if args.report || args.report_dir.is_some() {
        let report_dir = args.report_dir.unwrap_or(config.report_dir);
        let written = write_report_dir(&report_dir, &plan)?;
        info!("Reports written: {:?}", written);
    }

    Ok(())
}

/// Load an explicit config, or `roadmap.yaml` when present, or defaults
fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Config::load(path)
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            info!("Loading config from {}", DEFAULT_CONFIG);
            Config::load(Path::new(DEFAULT_CONFIG))
        }
        None => Ok(Config::default()),
    }
}
