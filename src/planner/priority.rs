//! Server prioritization and critical-path detection

use crate::inventory::{Level, ServerRecord};

const DEPENDENCY_WEIGHT: f64 = 0.5;
const DEPENDENCY_CAP: f64 = 5.0;
const UTILIZATION_DIVISOR: f64 = 20.0;
const BUSINESS_CRITICAL_BONUS: f64 = 3.0;

/// A server depended on by this many others sits on the critical path
const CRITICAL_DEPENDENT_COUNT: usize = 2;
pub const HIGH_CPU_UTILIZATION: f64 = 80.0;

impl Level {
    /// Complexity score used when ranking servers
    pub fn priority_score(self) -> f64 {
        match self {
            Level::Low => 1.0,
            Level::Medium => 2.0,
            Level::High => 3.0,
        }
    }
}

/// Priority score: higher migrates earlier
pub fn priority_score(server: &ServerRecord) -> f64 {
    let complexity = server.complexity().priority_score() * 2.0;

    let dependencies =
        (server.dependencies.len() as f64 * DEPENDENCY_WEIGHT).min(DEPENDENCY_CAP);

    let utilization = if server.metrics.is_some() {
        let average = (server.cpu_utilization() + server.memory_utilization()) / 2.0;
        average.max(0.0) / UTILIZATION_DIVISOR
    } else {
        0.0
    };

    let business = if server.business_critical {
        BUSINESS_CRITICAL_BONUS
    } else {
        0.0
    };

    complexity + dependencies + utilization + business
}

/// Order servers by descending priority score; ties keep input order
pub fn prioritize_servers(servers: &[ServerRecord]) -> Vec<&ServerRecord> {
    let mut scored: Vec<(f64, &ServerRecord)> =
        servers.iter().map(|s| (priority_score(s), s)).collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, server)| server).collect()
}

/// How many other servers declare a dependency on this one
pub fn dependent_count(server: &ServerRecord, all_servers: &[ServerRecord]) -> usize {
    all_servers
        .iter()
        .filter(|other| other.server_id != server.server_id)
        .filter(|other| other.depends_on(&server.server_id))
        .count()
}

pub fn is_critical_path(server: &ServerRecord, all_servers: &[ServerRecord]) -> bool {
    dependent_count(server, all_servers) >= CRITICAL_DEPENDENT_COUNT
        || server.cpu_utilization() > HIGH_CPU_UTILIZATION
        || server.business_critical
}
