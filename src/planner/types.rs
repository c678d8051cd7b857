//! Types produced by the roadmap planner

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::catalog::Phase;
use crate::estimator::CostEstimate;
use crate::inventory::{Dependency, Level, Strategy};

/// The complete migration plan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    pub timeline: Vec<TimelineEntry>,
    pub summary: ProjectSummary,
    pub risk_management: RiskManagementPlan,
    pub milestones: Vec<Milestone>,
    pub recommendations: Vec<Recommendation>,
}

/// One server's slot in the timeline
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub server: ServerSummary,
    pub phases: Vec<ScheduledPhase>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub risks: Vec<ServerRisk>,
    pub mitigation_strategies: Vec<MitigationStrategy>,
    pub cost_estimate: CostEstimate,
    pub dependencies: Vec<Dependency>,
    pub critical_path: bool,
}

impl TimelineEntry {
    /// Calendar days from first phase start to last phase end
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub server_type: String,
    pub strategy: Strategy,
    pub complexity: Level,
}

/// A dated phase of one server's migration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPhase {
    pub name: Phase,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Complexity-adjusted length in days
    pub duration: u32,
    pub tasks: &'static [&'static str],
    pub deliverables: &'static [&'static str],
    pub validation: &'static [&'static str],
    pub risks: Vec<PhaseRisk>,
    pub mitigation: Vec<PhaseMitigation>,
}

/// Risk tied to a migration phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseRisk {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
    pub severity: Level,
    pub mitigation: &'static str,
}

/// Mitigation actions attached to a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseMitigation {
    pub category: &'static str,
    pub actions: &'static [&'static str],
    pub verification: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskCategory {
    Technical,
    Dependencies,
    Data,
    Application,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Technical,
        RiskCategory::Dependencies,
        RiskCategory::Data,
        RiskCategory::Application,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RiskCategory::Technical => "Technical",
            RiskCategory::Dependencies => "Dependencies",
            RiskCategory::Data => "Data",
            RiskCategory::Application => "Application",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Risk derived from a server's own metrics and inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerRisk {
    pub category: RiskCategory,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
    pub severity: Level,
    pub probability: Level,
    pub impact: &'static str,
}

/// Response plan for one server risk
#[derive(Debug, Clone, Serialize)]
pub struct MitigationStrategy {
    pub risk: String,
    pub category: RiskCategory,
    pub strategies: &'static [&'static str],
    pub contingency: &'static [&'static str],
    pub owner: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub duration: ProjectDuration,
    pub servers: ServerCounts,
    pub costs: CostSummary,
    pub risks: RiskSummary,
    pub dependencies: DependencyAnalysis,
    pub critical_path: CriticalPathSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDuration {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCounts {
    pub total: usize,
    pub by_strategy: BTreeMap<Strategy, usize>,
    pub by_complexity: BTreeMap<Level, usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub total: f64,
    pub by_category: CostBreakdown,
    /// Servers whose estimate failed and count as zero
    pub failed_estimates: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub infrastructure: f64,
    pub labor: f64,
    pub tools: f64,
    pub training: f64,
    pub contingency: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub total: usize,
    pub by_level: BTreeMap<Level, usize>,
    pub by_category: BTreeMap<RiskCategory, usize>,
    pub top_risks: Vec<TopRisk>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRisk {
    pub server_id: String,
    pub server_name: String,
    #[serde(flatten)]
    pub risk: ServerRisk,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAnalysis {
    pub total_dependencies: usize,
    pub servers_with_dependencies: usize,
    pub most_depended_on: Vec<DependentCount>,
    /// Referenced ids that are not part of this roadmap
    pub unresolved: Vec<String>,
    /// Dependencies scheduled after the server that needs them
    pub ordering_conflicts: Vec<OrderingConflict>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentCount {
    pub server_id: String,
    pub dependents: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingConflict {
    pub server_id: String,
    pub depends_on: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPathSummary {
    pub count: usize,
    pub servers: Vec<CriticalServer>,
    pub total_days: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalServer {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskManagementPlan {
    pub total_risks: usize,
    pub high_severity: usize,
    pub categories: Vec<CategoryPlan>,
    pub monitoring: &'static [&'static str],
    pub escalation_path: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPlan {
    pub category: RiskCategory,
    pub count: usize,
    pub high_severity: usize,
    pub strategies: &'static [&'static str],
    pub contingency: &'static [&'static str],
    pub owner: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    Project,
    Migration,
}

#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: MilestoneKind,
    pub description: String,
    pub criteria: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub category: &'static str,
    pub priority: Level,
    pub description: String,
}
