//! Server-level risk assessment and mitigation planning

use super::catalog::MITIGATION_OWNER;
use super::priority::HIGH_CPU_UTILIZATION;
use super::types::{MitigationStrategy, RiskCategory, ServerRisk};
use crate::inventory::{Level, ServerRecord};

const DEPENDENCY_RISK_THRESHOLD: usize = 5;
const STORAGE_RISK_FRACTION: f64 = 0.8;

/// Threshold-driven risks derived from one server's metrics and inventory
pub fn assess_server_risks(server: &ServerRecord) -> Vec<ServerRisk> {
    let mut risks = Vec::new();

    if server.cpu_utilization() > HIGH_CPU_UTILIZATION {
        risks.push(ServerRisk {
            category: RiskCategory::Technical,
            kind: "Performance",
            description: "High CPU utilization may impact migration".to_string(),
            severity: Level::High,
            probability: Level::High,
            impact: "Migration performance degradation and extended downtime",
        });
    }

    if server.dependencies.len() > DEPENDENCY_RISK_THRESHOLD {
        risks.push(ServerRisk {
            category: RiskCategory::Dependencies,
            kind: "Complexity",
            description: "High number of dependencies increases migration complexity".to_string(),
            severity: Level::Medium,
            probability: Level::High,
            impact: "Extended migration timeline and increased failure risk",
        });
    }

    if server
        .storage()
        .map(|s| s.used_fraction() > STORAGE_RISK_FRACTION)
        .unwrap_or(false)
    {
        risks.push(ServerRisk {
            category: RiskCategory::Data,
            kind: "Storage",
            description: "High storage utilization".to_string(),
            severity: Level::Medium,
            probability: Level::Medium,
            impact: "Potential data transfer issues and increased migration time",
        });
    }

    for app in server.applications.iter().filter(|a| a.has_unknown_version()) {
        risks.push(ServerRisk {
            category: RiskCategory::Application,
            kind: "Compatibility",
            description: format!("Unknown version for {}", app.name),
            severity: Level::Medium,
            probability: Level::Medium,
            impact: "Potential compatibility issues in cloud environment",
        });
    }

    risks
}

/// One mitigation entry per risk, taken from the category's response plan
pub fn generate_mitigation_strategies(risks: &[ServerRisk]) -> Vec<MitigationStrategy> {
    risks
        .iter()
        .map(|risk| {
            let plan = risk.category.mitigation();
            MitigationStrategy {
                risk: risk.description.clone(),
                category: risk.category,
                strategies: plan.strategies,
                contingency: plan.contingency,
                owner: MITIGATION_OWNER,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(json: &str) -> ServerRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_healthy_server_has_no_risks() {
        let s = server(
            r#"{"serverId": "ok", "metrics": {"cpu": {"utilization": 40}, "storage": {"used": 100, "total": 500}},
                "applications": [{"name": "nginx", "version": "1.24"}]}"#,
        );
        assert!(assess_server_risks(&s).is_empty());
    }

    #[test]
    fn test_high_cpu_is_a_technical_risk() {
        let s = server(r#"{"serverId": "hot", "metrics": {"cpu": {"utilization": 92}}}"#);
        let risks = assess_server_risks(&s);
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].category, RiskCategory::Technical);
        assert_eq!(risks[0].severity, Level::High);
        assert_eq!(risks[0].probability, Level::High);
    }

    #[test]
    fn test_dependency_threshold_is_exclusive() {
        let five = server(r#"{"serverId": "a", "dependencies": ["1","2","3","4","5"]}"#);
        assert!(assess_server_risks(&five).is_empty());

        let six = server(r#"{"serverId": "b", "dependencies": ["1","2","3","4","5","6"]}"#);
        let risks = assess_server_risks(&six);
        assert_eq!(risks[0].category, RiskCategory::Dependencies);
        assert_eq!(risks[0].severity, Level::Medium);
        assert_eq!(risks[0].probability, Level::High);
    }

    #[test]
    fn test_storage_pressure() {
        let full =
            server(r#"{"serverId": "a", "metrics": {"storage": {"used": 850, "total": 1000}}}"#);
        assert_eq!(assess_server_risks(&full)[0].category, RiskCategory::Data);

        let exactly =
            server(r#"{"serverId": "b", "metrics": {"storage": {"used": 800, "total": 1000}}}"#);
        assert!(assess_server_risks(&exactly).is_empty());
    }

    #[test]
    fn test_one_application_risk_per_unknown_version() {
        let s = server(
            r#"{"serverId": "a", "applications": [
                {"name": "billing", "version": "unknown"},
                {"name": "reports"},
                {"name": "nginx", "version": "1.24"}
            ]}"#,
        );
        let risks = assess_server_risks(&s);
        assert_eq!(risks.len(), 2);
        assert_eq!(risks[0].description, "Unknown version for billing");
        assert_eq!(risks[1].description, "Unknown version for reports");
        assert!(risks.iter().all(|r| r.category == RiskCategory::Application));
    }

    #[test]
    fn test_mitigations_follow_risk_categories() {
        let s = server(
            r#"{"serverId": "a", "metrics": {"cpu": {"utilization": 95}},
                "applications": [{"name": "erp"}]}"#,
        );
        let risks = assess_server_risks(&s);
        let mitigations = generate_mitigation_strategies(&risks);
        assert_eq!(mitigations.len(), 2);
        assert_eq!(mitigations[0].risk, "High CPU utilization may impact migration");
        assert_eq!(
            mitigations[0].strategies[0],
            "Conduct pre-migration performance optimization"
        );
        assert_eq!(mitigations[1].category, RiskCategory::Application);
        assert!(mitigations.iter().all(|m| m.owner == "Migration Team"));
    }
}
