//! Project-level aggregation over a finished timeline

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::catalog::MITIGATION_OWNER;
use super::types::{
    CategoryPlan, CostBreakdown, CostSummary, CriticalPathSummary, CriticalServer,
    DependencyAnalysis, DependentCount, Milestone, MilestoneKind, OrderingConflict,
    ProjectDuration, ProjectPlan, ProjectSummary, Recommendation, RiskCategory,
    RiskManagementPlan, RiskSummary, ServerCounts, TimelineEntry, TopRisk,
};
use crate::inventory::{Level, Strategy};

const TOP_RISK_LIMIT: usize = 5;
const MOST_DEPENDED_ON_LIMIT: usize = 5;
const LONG_PROJECT_DAYS: i64 = 180;

const RISK_MONITORING: &[&str] = &[
    "Weekly risk review with migration leads",
    "Daily status checks during Migration and Cutover phases",
    "Automated alerting on target environment health",
    "Track mitigation actions to closure in the risk register",
];

const ESCALATION_PATH: &[&str] = &[
    "Migration Team",
    "Migration Lead",
    "Project Steering Committee",
    "Executive Sponsor",
];

const KICKOFF_CRITERIA: &[&str] = &[
    "Project charter signed",
    "Team onboarded",
    "Initial planning complete",
];

const CRITICAL_MIGRATION_CRITERIA: &[&str] = &[
    "Pre-migration validation complete",
    "All dependencies ready",
    "Rollback plan approved",
];

const COMPLETION_CRITERIA: &[&str] = &[
    "All servers migrated",
    "Performance validation complete",
    "Documentation complete",
    "Operations handover complete",
];

/// Combine a timeline with every project-level view derived from it
pub fn assemble_plan(timeline: Vec<TimelineEntry>, project_start: NaiveDate) -> ProjectPlan {
    let summary = build_summary(&timeline, project_start);
    let risk_management = build_risk_management_plan(&timeline);
    let milestones = build_milestones(&timeline, &summary);
    let recommendations = build_recommendations(&timeline, &summary);

    ProjectPlan {
        timeline,
        summary,
        risk_management,
        milestones,
        recommendations,
    }
}

pub fn build_summary(timeline: &[TimelineEntry], project_start: NaiveDate) -> ProjectSummary {
    ProjectSummary {
        duration: project_duration(timeline, project_start),
        servers: server_counts(timeline),
        costs: cost_summary(timeline),
        risks: risk_summary(timeline),
        dependencies: analyze_dependencies(timeline),
        critical_path: critical_path_summary(timeline),
    }
}

fn project_duration(timeline: &[TimelineEntry], project_start: NaiveDate) -> ProjectDuration {
    let start_date = timeline
        .iter()
        .map(|e| e.start_date)
        .min()
        .unwrap_or(project_start);
    let end_date = timeline
        .iter()
        .map(|e| e.end_date)
        .max()
        .unwrap_or(project_start);

    ProjectDuration {
        start_date,
        end_date,
        total_days: (end_date - start_date).num_days(),
    }
}

fn server_counts(timeline: &[TimelineEntry]) -> ServerCounts {
    let mut by_strategy: BTreeMap<Strategy, usize> =
        Strategy::ALL.iter().map(|s| (*s, 0)).collect();
    let mut by_complexity: BTreeMap<Level, usize> = Level::ALL.iter().map(|l| (*l, 0)).collect();

    for entry in timeline {
        *by_strategy.entry(entry.server.strategy).or_default() += 1;
        *by_complexity.entry(entry.server.complexity).or_default() += 1;
    }

    ServerCounts {
        total: timeline.len(),
        by_strategy,
        by_complexity,
    }
}

fn cost_summary(timeline: &[TimelineEntry]) -> CostSummary {
    let mut by_category = CostBreakdown::default();
    let mut failed_estimates = Vec::new();
    let mut total = 0.0;

    for entry in timeline {
        let cost = &entry.cost_estimate;
        total += cost.total;
        by_category.infrastructure += cost.infrastructure.unwrap_or(0.0);
        by_category.labor += cost.labor.unwrap_or(0.0);
        by_category.tools += cost.tools.unwrap_or(0.0);
        by_category.training += cost.training.unwrap_or(0.0);
        by_category.contingency += cost.contingency.unwrap_or(0.0);

        if cost.is_failed() {
            failed_estimates.push(entry.server.id.clone());
        }
    }

    CostSummary {
        total,
        by_category,
        failed_estimates,
    }
}

fn risk_summary(timeline: &[TimelineEntry]) -> RiskSummary {
    let mut by_level: BTreeMap<Level, usize> = Level::ALL.iter().map(|l| (*l, 0)).collect();
    let mut by_category: BTreeMap<RiskCategory, usize> =
        RiskCategory::ALL.iter().map(|c| (*c, 0)).collect();
    let mut all_risks = Vec::new();

    for entry in timeline {
        for risk in &entry.risks {
            *by_level.entry(risk.severity).or_default() += 1;
            *by_category.entry(risk.category).or_default() += 1;
            all_risks.push(TopRisk {
                server_id: entry.server.id.clone(),
                server_name: entry.server.name.clone(),
                risk: risk.clone(),
            });
        }
    }

    let total = all_risks.len();

    // stable sort keeps timeline order among equal risks
    all_risks.sort_by(|a, b| {
        b.risk
            .severity
            .cmp(&a.risk.severity)
            .then_with(|| b.risk.probability.cmp(&a.risk.probability))
            .then_with(|| a.risk.category.name().cmp(b.risk.category.name()))
    });
    all_risks.truncate(TOP_RISK_LIMIT);

    RiskSummary {
        total,
        by_level,
        by_category,
        top_risks: all_risks,
    }
}

fn analyze_dependencies(timeline: &[TimelineEntry]) -> DependencyAnalysis {
    let mut position: HashMap<&str, usize> = HashMap::new();
    for (idx, entry) in timeline.iter().enumerate() {
        position.entry(entry.server.id.as_str()).or_insert(idx);
    }

    let mut dependents: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut unresolved = BTreeSet::new();
    let mut ordering_conflicts = Vec::new();

    for (idx, entry) in timeline.iter().enumerate() {
        let server_id = entry.server.id.as_str();
        for dependency in &entry.dependencies {
            let target = dependency.server_id.as_str();
            if target == server_id {
                continue;
            }
            match position.get(target) {
                None => {
                    unresolved.insert(target.to_string());
                }
                Some(&target_idx) => {
                    dependents.entry(target).or_default().insert(server_id);
                    if target_idx > idx {
                        ordering_conflicts.push(OrderingConflict {
                            server_id: server_id.to_string(),
                            depends_on: target.to_string(),
                        });
                    }
                }
            }
        }
    }

    let mut most_depended_on: Vec<DependentCount> = dependents
        .into_iter()
        .map(|(server_id, from)| DependentCount {
            server_id: server_id.to_string(),
            dependents: from.len(),
        })
        .collect();
    // BTreeMap iteration already yields ids in ascending order
    most_depended_on.sort_by(|a, b| b.dependents.cmp(&a.dependents));
    most_depended_on.truncate(MOST_DEPENDED_ON_LIMIT);

    DependencyAnalysis {
        total_dependencies: timeline.iter().map(|e| e.dependencies.len()).sum(),
        servers_with_dependencies: timeline
            .iter()
            .filter(|e| !e.dependencies.is_empty())
            .count(),
        most_depended_on,
        unresolved: unresolved.into_iter().collect(),
        ordering_conflicts,
    }
}

fn critical_path_summary(timeline: &[TimelineEntry]) -> CriticalPathSummary {
    let critical: Vec<&TimelineEntry> = timeline.iter().filter(|e| e.critical_path).collect();

    CriticalPathSummary {
        count: critical.len(),
        servers: critical
            .iter()
            .map(|e| CriticalServer {
                id: e.server.id.clone(),
                name: e.server.name.clone(),
                start_date: e.start_date,
                end_date: e.end_date,
            })
            .collect(),
        total_days: critical.iter().map(|e| e.span_days()).sum(),
    }
}

/// Project-wide risk response grouped by category
pub fn build_risk_management_plan(timeline: &[TimelineEntry]) -> RiskManagementPlan {
    let risks: Vec<_> = timeline.iter().flat_map(|e| e.risks.iter()).collect();

    let categories = RiskCategory::ALL
        .iter()
        .filter_map(|category| {
            let in_category: Vec<_> = risks.iter().filter(|r| r.category == *category).collect();
            if in_category.is_empty() {
                return None;
            }
            let plan = category.mitigation();
            Some(CategoryPlan {
                category: *category,
                count: in_category.len(),
                high_severity: in_category
                    .iter()
                    .filter(|r| r.severity == Level::High)
                    .count(),
                strategies: plan.strategies,
                contingency: plan.contingency,
                owner: MITIGATION_OWNER,
            })
        })
        .collect();

    RiskManagementPlan {
        total_risks: risks.len(),
        high_severity: risks.iter().filter(|r| r.severity == Level::High).count(),
        categories,
        monitoring: RISK_MONITORING,
        escalation_path: ESCALATION_PATH,
    }
}

/// Kickoff, one milestone per critical-path server, completion
pub fn build_milestones(timeline: &[TimelineEntry], summary: &ProjectSummary) -> Vec<Milestone> {
    let mut milestones = vec![Milestone {
        name: "Project Kickoff".to_string(),
        date: summary.duration.start_date,
        kind: MilestoneKind::Project,
        description: "Project initiation and team onboarding".to_string(),
        criteria: KICKOFF_CRITERIA,
    }];

    for entry in timeline.iter().filter(|e| e.critical_path) {
        milestones.push(Milestone {
            name: format!("Critical Server Migration - {}", entry.server.name),
            date: entry.start_date,
            kind: MilestoneKind::Migration,
            description: format!("Migration of critical server {}", entry.server.name),
            criteria: CRITICAL_MIGRATION_CRITERIA,
        });
    }

    milestones.push(Milestone {
        name: "Project Completion".to_string(),
        date: summary.duration.end_date,
        kind: MilestoneKind::Project,
        description: "Migration project completion and handover".to_string(),
        criteria: COMPLETION_CRITERIA,
    });

    milestones
}

/// Actionable follow-ups derived from the plan's findings
pub fn build_recommendations(
    timeline: &[TimelineEntry],
    summary: &ProjectSummary,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let critical = &summary.critical_path;
    if critical.count > 0 {
        let names: Vec<&str> = critical.servers.iter().map(|s| s.name.as_str()).collect();
        recommendations.push(Recommendation {
            category: "Critical Path",
            priority: Level::High,
            description: format!(
                "Rehearse rollback and plan extended hypercare for {} critical-path server(s): {}",
                critical.count,
                names.join(", ")
            ),
        });
    }

    for conflict in &summary.dependencies.ordering_conflicts {
        recommendations.push(Recommendation {
            category: "Dependencies",
            priority: Level::High,
            description: format!(
                "{} depends on {}, which is scheduled later; keep hybrid connectivity until {} has moved",
                conflict.server_id, conflict.depends_on, conflict.depends_on
            ),
        });
    }

    let unresolved = &summary.dependencies.unresolved;
    if !unresolved.is_empty() {
        recommendations.push(Recommendation {
            category: "Dependencies",
            priority: Level::Medium,
            description: format!(
                "Confirm connectivity to dependencies outside this roadmap: {}",
                unresolved.join(", ")
            ),
        });
    }

    let failed = &summary.costs.failed_estimates;
    if !failed.is_empty() {
        recommendations.push(Recommendation {
            category: "Cost",
            priority: Level::Medium,
            description: format!(
                "Re-run cost estimation for {} server(s) counted at zero: {}",
                failed.len(),
                failed.join(", ")
            ),
        });
    }

    let refactor_count = summary
        .servers
        .by_strategy
        .get(&Strategy::Refactor)
        .copied()
        .unwrap_or(0);
    if refactor_count > 0 {
        recommendations.push(Recommendation {
            category: "Strategy",
            priority: Level::Medium,
            description: format!(
                "Reserve architecture review capacity for {} Refactor server(s)",
                refactor_count
            ),
        });
    }

    let high_risks = summary
        .risks
        .by_level
        .get(&Level::High)
        .copied()
        .unwrap_or(0);
    if high_risks > 0 {
        recommendations.push(Recommendation {
            category: "Risk",
            priority: Level::High,
            description: format!(
                "Assign owners to {} high-severity risk(s) before Planning completes",
                high_risks
            ),
        });
    }

    if summary.duration.total_days > LONG_PROJECT_DAYS {
        recommendations.push(Recommendation {
            category: "Schedule",
            priority: Level::Medium,
            description: format!(
                "The sequential plan spans {} days; consider migrating independent servers in parallel waves",
                summary.duration.total_days
            ),
        });
    }

    if let Some(first) = timeline.first() {
        recommendations.push(Recommendation {
            category: "Approach",
            priority: Level::Low,
            description: format!(
                "Treat {} as the pilot migration and feed lessons learned into later servers",
                first.server.name
            ),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::CostEstimate;
    use crate::inventory::ServerRecord;
    use crate::planner::priority::prioritize_servers;
    use crate::planner::timeline::build_timeline;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Timeline in priority order with the given costs (zero when missing)
    fn timeline(json: &str, costs: Vec<CostEstimate>) -> Vec<TimelineEntry> {
        let servers: Vec<ServerRecord> = serde_json::from_str(json).unwrap();
        let ranked = prioritize_servers(&servers);
        let mut costs = costs;
        costs.resize(ranked.len(), CostEstimate::default());
        build_timeline(&ranked, &servers, costs, date("2024-01-01"))
    }

    #[test]
    fn test_empty_timeline_collapses_to_start_date() {
        let plan = assemble_plan(Vec::new(), date("2024-01-01"));
        assert_eq!(plan.summary.duration.total_days, 0);
        assert_eq!(plan.summary.duration.end_date, date("2024-01-01"));
        assert_eq!(plan.summary.servers.total, 0);
        assert_eq!(plan.summary.costs.total, 0.0);
        assert!(plan.summary.risks.top_risks.is_empty());
        assert_eq!(plan.milestones.len(), 2);
        assert!(plan.recommendations.is_empty());
    }

    #[test]
    fn test_counts_include_every_variant() {
        let entries = timeline(
            r#"[{"serverId": "a", "migrationStrategy": {"strategy": "Refactor"}, "complexity": {"level": "High"}},
                {"serverId": "b"}]"#,
            Vec::new(),
        );
        let summary = build_summary(&entries, date("2024-01-01"));
        assert_eq!(summary.servers.total, 2);
        assert_eq!(summary.servers.by_strategy[&Strategy::Refactor], 1);
        assert_eq!(summary.servers.by_strategy[&Strategy::Rehost], 1);
        assert_eq!(summary.servers.by_strategy[&Strategy::Replatform], 0);
        assert_eq!(summary.servers.by_complexity[&Level::Low], 0);

        let json = serde_json::to_value(&summary.servers).unwrap();
        assert_eq!(json["byStrategy"]["Refactor"], 1);
        assert_eq!(json["byComplexity"]["Medium"], 1);
    }

    #[test]
    fn test_cost_rollup() {
        let entries = timeline(
            r#"[{"serverId": "a", "complexity": {"level": "High"}}, {"serverId": "b"}]"#,
            vec![
                CostEstimate {
                    total: 1500.0,
                    infrastructure: Some(1000.0),
                    labor: Some(500.0),
                    ..CostEstimate::default()
                },
                CostEstimate::failed("timeout"),
            ],
        );
        let costs = build_summary(&entries, date("2024-01-01")).costs;
        assert_eq!(costs.total, 1500.0);
        assert_eq!(costs.by_category.infrastructure, 1000.0);
        assert_eq!(costs.by_category.labor, 500.0);
        assert_eq!(costs.by_category.tools, 0.0);
        assert_eq!(costs.failed_estimates, vec!["b".to_string()]);
    }

    #[test]
    fn test_top_risks_ordering_and_cap() {
        // "apps" scores highest and carries three application risks; "hot" has the only High risk
        let entries = timeline(
            r#"[
                {"serverId": "apps", "serverName": "Apps", "complexity": {"level": "High"},
                 "applications": [{"name": "a"}, {"name": "b"}, {"name": "c"}]},
                {"serverId": "hot", "serverName": "Hot", "metrics": {"cpu": {"utilization": 95}}},
                {"serverId": "deps", "serverName": "Deps", "complexity": {"level": "Low"},
                 "dependencies": ["1", "2", "3", "4", "5", "6"]},
                {"serverId": "disk", "serverName": "Disk", "complexity": {"level": "Low"},
                 "metrics": {"storage": {"used": 95, "total": 100}}}
            ]"#,
            Vec::new(),
        );
        let risks = build_summary(&entries, date("2024-01-01")).risks;
        assert_eq!(risks.total, 6);
        assert_eq!(risks.top_risks.len(), 5);
        assert_eq!(risks.by_level[&Level::High], 1);
        assert_eq!(risks.by_category[&RiskCategory::Application], 3);

        let order: Vec<(&str, RiskCategory)> = risks
            .top_risks
            .iter()
            .map(|t| (t.server_id.as_str(), t.risk.category))
            .collect();
        assert_eq!(order[0], ("hot", RiskCategory::Technical));
        // Medium/High dependency risk outranks the Medium/Medium ones
        assert_eq!(order[1], ("deps", RiskCategory::Dependencies));
        // Application sorts before Data among equal severity and probability
        assert_eq!(order[2].1, RiskCategory::Application);
        assert_eq!(order[4].1, RiskCategory::Application);
        assert_eq!(risks.top_risks[0].server_name, "Hot");
    }

    #[test]
    fn test_dependency_analysis() {
        // db scores lowest, so both of its dependents are scheduled before it
        let entries = timeline(
            r#"[
                {"serverId": "db", "complexity": {"level": "Low"}},
                {"serverId": "web", "complexity": {"level": "High"}, "dependencies": ["db", "cache", "web"]},
                {"serverId": "api", "complexity": {"level": "Low"}, "dependencies": ["db"]}
            ]"#,
            Vec::new(),
        );
        let deps = build_summary(&entries, date("2024-01-01")).dependencies;
        assert_eq!(deps.total_dependencies, 4);
        assert_eq!(deps.servers_with_dependencies, 2);
        assert_eq!(
            deps.most_depended_on,
            vec![DependentCount {
                server_id: "db".to_string(),
                dependents: 2
            }]
        );
        assert_eq!(deps.unresolved, vec!["cache".to_string()]);
        assert_eq!(
            deps.ordering_conflicts,
            vec![
                OrderingConflict {
                    server_id: "web".to_string(),
                    depends_on: "db".to_string()
                },
                OrderingConflict {
                    server_id: "api".to_string(),
                    depends_on: "db".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_critical_path_and_milestones() {
        let entries = timeline(
            r#"[
                {"serverId": "erp", "serverName": "ERP", "businessCritical": true},
                {"serverId": "web", "serverName": "Web", "complexity": {"level": "Low"}}
            ]"#,
            Vec::new(),
        );
        let summary = build_summary(&entries, date("2024-01-01"));
        assert_eq!(summary.critical_path.count, 1);
        assert_eq!(summary.critical_path.servers[0].id, "erp");
        assert_eq!(summary.critical_path.total_days, 58);

        let milestones = build_milestones(&entries, &summary);
        let names: Vec<&str> = milestones.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Project Kickoff",
                "Critical Server Migration - ERP",
                "Project Completion"
            ]
        );
        assert_eq!(milestones[0].date, date("2024-01-01"));
        assert_eq!(milestones[1].date, date("2024-01-01"));
        assert_eq!(milestones[2].date, summary.duration.end_date);
        assert_eq!(milestones[1].kind, MilestoneKind::Migration);
        assert_eq!(
            milestones[0].description,
            "Project initiation and team onboarding"
        );
        assert_eq!(
            milestones[1].criteria,
            &[
                "Pre-migration validation complete",
                "All dependencies ready",
                "Rollback plan approved"
            ]
        );
        assert_eq!(
            milestones[2].description,
            "Migration project completion and handover"
        );
        assert_eq!(milestones[2].criteria[3], "Operations handover complete");
    }

    #[test]
    fn test_most_depended_on_is_capped_and_ties_break_by_id() {
        let entries = timeline(
            r#"[
                {"serverId": "a"}, {"serverId": "b"}, {"serverId": "c"}, {"serverId": "d"},
                {"serverId": "e"}, {"serverId": "f"}, {"serverId": "g"},
                {"serverId": "x", "dependencies": ["f", "b", "c", "a"]},
                {"serverId": "y", "dependencies": ["f", "b", "c", "d"]},
                {"serverId": "z", "dependencies": ["f", "e", "g"]}
            ]"#,
            Vec::new(),
        );
        let deps = build_summary(&entries, date("2024-01-01")).dependencies;
        let ranked: Vec<(&str, usize)> = deps
            .most_depended_on
            .iter()
            .map(|d| (d.server_id.as_str(), d.dependents))
            .collect();
        assert_eq!(
            ranked,
            vec![("f", 3), ("b", 2), ("c", 2), ("a", 1), ("d", 1)]
        );
        assert!(deps.unresolved.is_empty());
    }

    #[test]
    fn test_risk_management_groups_categories_in_fixed_order() {
        let entries = timeline(
            r#"[
                {"serverId": "a", "applications": [{"name": "legacy"}]},
                {"serverId": "b", "metrics": {"cpu": {"utilization": 90}}}
            ]"#,
            Vec::new(),
        );
        let plan = build_risk_management_plan(&entries);
        assert_eq!(plan.total_risks, 2);
        assert_eq!(plan.high_severity, 1);
        let categories: Vec<RiskCategory> = plan.categories.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![RiskCategory::Technical, RiskCategory::Application]
        );
        assert_eq!(plan.categories[0].high_severity, 1);
        assert_eq!(plan.categories[0].owner, "Migration Team");
        assert_eq!(plan.escalation_path.first(), Some(&"Migration Team"));
    }

    #[test]
    fn test_recommendations_follow_findings() {
        let entries = timeline(
            r#"[
                {"serverId": "core", "serverName": "Core", "complexity": {"level": "High"},
                 "migrationStrategy": {"strategy": "Refactor"}, "dependencies": ["edge", "ldap"],
                 "metrics": {"cpu": {"utilization": 97}}},
                {"serverId": "edge", "serverName": "Edge", "complexity": {"level": "Low"}}
            ]"#,
            vec![CostEstimate::default(), CostEstimate::failed("no pricing")],
        );
        let summary = build_summary(&entries, date("2024-01-01"));
        let recommendations = build_recommendations(&entries, &summary);
        let categories: Vec<&str> = recommendations.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                "Critical Path",
                "Dependencies",
                "Dependencies",
                "Cost",
                "Strategy",
                "Risk",
                "Schedule",
                "Approach"
            ]
        );
        assert!(recommendations[1].description.starts_with("core depends on edge"));
        assert!(recommendations[2].description.ends_with("ldap"));
        assert!(recommendations[3].description.ends_with("edge"));
        assert_eq!(
            recommendations.last().unwrap().description,
            "Treat Core as the pilot migration and feed lessons learned into later servers"
        );
    }

    #[test]
    fn test_long_projects_suggest_parallel_waves() {
        let servers: Vec<String> = (0..4)
            .map(|i| format!(r#"{{"serverId": "s{}", "complexity": {{"level": "High"}}}}"#, i))
            .collect();
        let entries = timeline(&format!("[{}]", servers.join(",")), Vec::new());
        let summary = build_summary(&entries, date("2024-01-01"));
        assert!(summary.duration.total_days > LONG_PROJECT_DAYS);
        let recommendations = build_recommendations(&entries, &summary);
        assert!(recommendations.iter().any(|r| r.category == "Schedule"));
    }
}
