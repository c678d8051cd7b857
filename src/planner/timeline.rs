//! Timeline assembly: ranks servers, lays them out back to back and attaches
//! risks, mitigations and cost estimates.

use chrono::{Days, Local, NaiveDate};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};

use super::priority::{is_critical_path, prioritize_servers};
use super::risk::{assess_server_risks, generate_mitigation_strategies};
use super::scheduler::schedule_server;
use super::summary::assemble_plan;
use super::types::{ProjectPlan, ServerSummary, TimelineEntry};
use crate::error::InputError;
use crate::estimator::{estimate_cost, CostEstimate, CostEstimator};
use crate::inventory::ServerRecord;

/// Idle days between the end of one server and the start of the next
pub const SERVER_BUFFER_DAYS: u64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct RoadmapGenerator {
    estimator: Arc<dyn CostEstimator>,
    concurrency: usize,
}

impl RoadmapGenerator {
    pub fn new(estimator: Arc<dyn CostEstimator>) -> Self {
        Self {
            estimator,
            concurrency: 1,
        }
    }

    /// Number of cost lookups kept in flight; results keep timeline order
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn generate_migration_roadmap(
        &self,
        servers: &[ServerRecord],
        start_date: Option<&str>,
    ) -> Result<ProjectPlan, InputError> {
        if servers.is_empty() {
            return Err(InputError::EmptyServerList);
        }

        let project_start = resolve_start_date(start_date)?;
        let ranked = prioritize_servers(servers);

        info!(
            "Planning {} servers starting {} using '{}' cost estimator",
            ranked.len(),
            project_start,
            self.estimator.name()
        );

        let costs = self.estimate_costs(&ranked).await;
        let timeline = build_timeline(&ranked, servers, costs, project_start);

        Ok(assemble_plan(timeline, project_start))
    }

    async fn estimate_costs(&self, ranked: &[&ServerRecord]) -> Vec<CostEstimate> {
        let estimator = self.estimator.as_ref();
        stream::iter(ranked.iter().copied())
            .map(|server| estimate_cost(estimator, server))
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

/// Parse a `YYYY-MM-DD` start date, defaulting to today
pub fn resolve_start_date(start_date: Option<&str>) -> Result<NaiveDate, InputError> {
    match start_date.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| InputError::InvalidStartDate(raw.to_string())),
        None => Ok(Local::now().date_naive()),
    }
}

/// Lay out ranked servers sequentially; `costs` is aligned with `ranked`
pub fn build_timeline(
    ranked: &[&ServerRecord],
    all_servers: &[ServerRecord],
    costs: Vec<CostEstimate>,
    project_start: NaiveDate,
) -> Vec<TimelineEntry> {
    let mut timeline = Vec::with_capacity(ranked.len());
    let mut cursor = project_start;

    for (server, cost_estimate) in ranked.iter().copied().zip(costs) {
        let entry = build_entry(server, all_servers, cost_estimate, cursor);
        debug!(
            "{} scheduled {} -> {}",
            server.server_id, entry.start_date, entry.end_date
        );
        cursor = entry.end_date + Days::new(SERVER_BUFFER_DAYS);
        timeline.push(entry);
    }

    timeline
}

fn build_entry(
    server: &ServerRecord,
    all_servers: &[ServerRecord],
    cost_estimate: CostEstimate,
    start_date: NaiveDate,
) -> TimelineEntry {
    let schedule = schedule_server(server, start_date);
    let risks = assess_server_risks(server);
    let mitigation_strategies = generate_mitigation_strategies(&risks);

    TimelineEntry {
        server: ServerSummary {
            id: server.server_id.clone(),
            name: server.server_name.clone(),
            server_type: server.server_type().to_string(),
            strategy: server.strategy(),
            complexity: server.complexity(),
        },
        phases: schedule.phases,
        start_date: schedule.start_date,
        end_date: schedule.end_date,
        risks,
        mitigation_strategies,
        cost_estimate,
        dependencies: server.dependencies.clone(),
        critical_path: is_critical_path(server, all_servers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;
    use crate::estimator::{CostRequest, DisabledEstimator};
    use async_trait::async_trait;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn servers(json: &str) -> Vec<ServerRecord> {
        serde_json::from_str(json).unwrap()
    }

    /// Prices every server at 1000 except `db-*`, which fails
    struct TableEstimator;

    #[async_trait]
    impl CostEstimator for TableEstimator {
        fn name(&self) -> &'static str {
            "table"
        }

        async fn estimate(
            &self,
            request: &CostRequest<'_>,
        ) -> Result<CostEstimate, EstimatorError> {
            if request.server_data.server_id.starts_with("db-") {
                return Err(EstimatorError::NonZeroExit {
                    code: 2,
                    stderr: "no pricing".to_string(),
                });
            }
            Ok(CostEstimate {
                total: 1000.0,
                infrastructure: Some(600.0),
                labor: Some(400.0),
                ..CostEstimate::default()
            })
        }
    }

    fn generator() -> RoadmapGenerator {
        RoadmapGenerator::new(Arc::new(TableEstimator))
    }

    const TWO_SERVERS: &str = r#"[
        {"serverId": "A", "serverName": "App", "complexity": {"level": "Medium"},
         "migrationStrategy": {"strategy": "Rehost"}, "dependencies": []},
        {"serverId": "B", "serverName": "Batch", "complexity": {"level": "High"},
         "migrationStrategy": {"strategy": "Rehost"}, "dependencies": ["A"]}
    ]"#;

    #[tokio::test]
    async fn test_empty_server_list_is_rejected() {
        let err = generator()
            .generate_migration_roadmap(&[], Some("2024-01-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, InputError::EmptyServerList));
        assert_eq!(err.to_string(), "Server data is required");
    }

    #[tokio::test]
    async fn test_invalid_start_date_is_rejected() {
        let err = generator()
            .generate_migration_roadmap(&servers(TWO_SERVERS), Some("01/02/2024"))
            .await
            .unwrap_err();
        assert!(matches!(err, InputError::InvalidStartDate(_)));
    }

    #[tokio::test]
    async fn test_servers_are_laid_out_sequentially_by_priority() {
        let plan = generator()
            .generate_migration_roadmap(&servers(TWO_SERVERS), Some("2024-01-01"))
            .await
            .unwrap();

        // B scores 6 + 0.5 for its dependency, A scores 4
        let ids: Vec<&str> = plan.timeline.iter().map(|e| e.server.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);

        let first = &plan.timeline[0];
        let second = &plan.timeline[1];
        assert_eq!(first.start_date, date("2024-01-01"));
        assert_eq!(second.start_date, first.end_date + Days::new(7));

        // A medium Rehost spans 58 days
        assert_eq!(second.span_days(), 58);
        assert_eq!(plan.summary.duration.start_date, date("2024-01-01"));
        assert_eq!(plan.summary.duration.end_date, second.end_date);
    }

    #[tokio::test]
    async fn test_business_critical_server_goes_first() {
        let input = r#"[
            {"serverId": "A", "complexity": {"level": "Medium"}, "businessCritical": true},
            {"serverId": "B", "complexity": {"level": "High"}, "dependencies": ["A"]}
        ]"#;
        let plan = generator()
            .generate_migration_roadmap(&servers(input), Some("2024-01-01"))
            .await
            .unwrap();

        let first = &plan.timeline[0];
        assert_eq!(first.server.id, "A");
        assert!(first.critical_path);
        assert_eq!(first.phases[0].end_date, date("2024-01-08"));
        assert_eq!(first.end_date, date("2024-02-28"));
        assert_eq!(plan.timeline[1].start_date, date("2024-03-06"));
        assert!(!plan.timeline[1].critical_path);
    }

    #[tokio::test]
    async fn test_cost_failure_only_affects_its_server() {
        let input = r#"[
            {"serverId": "web-01", "complexity": {"level": "High"}},
            {"serverId": "db-01", "complexity": {"level": "Low"}}
        ]"#;
        let plan = generator()
            .generate_migration_roadmap(&servers(input), Some("2024-01-01"))
            .await
            .unwrap();

        assert_eq!(plan.timeline.len(), 2);
        assert_eq!(plan.timeline[0].cost_estimate.total, 1000.0);
        let failed = &plan.timeline[1].cost_estimate;
        assert_eq!(failed.total, 0.0);
        assert!(failed.error.as_deref().unwrap().contains("no pricing"));

        assert_eq!(plan.summary.costs.total, 1000.0);
        assert_eq!(plan.summary.costs.failed_estimates, vec!["db-01".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_estimates_keep_timeline_order() {
        let input: Vec<String> = (0..8)
            .map(|i| {
                let deps = vec!["\"x\""; i].join(",");
                format!(r#"{{"serverId": "s{}", "dependencies": [{}]}}"#, i, deps)
            })
            .collect();
        let servers = servers(&format!("[{}]", input.join(",")));

        let plan = generator()
            .with_concurrency(4)
            .generate_migration_roadmap(&servers, Some("2024-01-01"))
            .await
            .unwrap();

        let ids: Vec<&str> = plan.timeline.iter().map(|e| e.server.id.as_str()).collect();
        assert_eq!(ids, vec!["s7", "s6", "s5", "s4", "s3", "s2", "s1", "s0"]);
        assert!(plan.timeline.iter().all(|e| e.cost_estimate.total == 1000.0));
    }

    #[tokio::test]
    async fn test_repeated_generation_is_identical() {
        let input = servers(TWO_SERVERS);
        let generator = RoadmapGenerator::new(Arc::new(DisabledEstimator));

        let first = generator
            .generate_migration_roadmap(&input, Some("2024-01-01"))
            .await
            .unwrap();
        let second = generator
            .generate_migration_roadmap(&input, Some("2024-01-01"))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unknown_strategy_and_level_fall_back() {
        let input = r#"[{"serverId": "x", "complexity": {"level": "Extreme"},
                         "migrationStrategy": {"strategy": "Retire"}}]"#;
        let plan = generator()
            .generate_migration_roadmap(&servers(input), Some("2024-01-01"))
            .await
            .unwrap();

        let entry = &plan.timeline[0];
        assert_eq!(entry.server.strategy, crate::inventory::Strategy::Rehost);
        assert_eq!(entry.server.complexity, crate::inventory::Level::Medium);
        assert_eq!(entry.span_days(), 58);
    }

    #[test]
    fn test_missing_start_date_defaults_to_today() {
        assert_eq!(resolve_start_date(None).unwrap(), Local::now().date_naive());
        assert_eq!(resolve_start_date(Some("")).unwrap(), Local::now().date_naive());
        assert_eq!(resolve_start_date(Some("2024-03-15")).unwrap(), date("2024-03-15"));
    }
}
