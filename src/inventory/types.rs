//! Server inventory records as supplied by discovery tooling

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::lenient;

/// Coarse Low/Medium/High rating used for complexity, severity and probability
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    JsonSchema,
)]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Level::Low),
            "medium" | "med" => Some(Level::Medium),
            "high" => Some(Level::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Low => write!(f, "Low"),
            Level::Medium => write!(f, "Medium"),
            Level::High => write!(f, "High"),
        }
    }
}

/// Migration approach chosen for a server
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    JsonSchema,
)]
pub enum Strategy {
    /// Move as-is
    #[default]
    Rehost,
    /// Modify to exploit the target platform
    Replatform,
    /// Re-architect
    Refactor,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Rehost, Strategy::Replatform, Strategy::Refactor];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rehost" => Some(Strategy::Rehost),
            "replatform" => Some(Strategy::Replatform),
            "refactor" => Some(Strategy::Refactor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Rehost => write!(f, "Rehost"),
            Strategy::Replatform => write!(f, "Replatform"),
            Strategy::Refactor => write!(f, "Refactor"),
        }
    }
}

/// Request body accepted by the planner
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    #[serde(default, deserialize_with = "lenient::list")]
    pub servers: Vec<ServerRecord>,

    /// First day of the project (YYYY-MM-DD); today when absent
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
}

/// One server to migrate.
///
/// Fields the planner does not understand are kept in `extra` so the cost
/// service still receives the full record.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub server_id: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub server_name: String,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::value")]
    pub complexity: ComplexityDescriptor,

    #[serde(default, deserialize_with = "lenient::value")]
    pub migration_strategy: StrategyDescriptor,

    #[serde(default, deserialize_with = "lenient::list")]
    pub dependencies: Vec<Dependency>,

    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub metrics: Option<Metrics>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub applications: Vec<Application>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub business_critical: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ServerRecord {
    pub fn server_type(&self) -> &str {
        self.server_type.as_deref().unwrap_or("unknown")
    }

    pub fn complexity(&self) -> Level {
        self.complexity.level
    }

    pub fn strategy(&self) -> Strategy {
        self.migration_strategy.strategy
    }

    pub fn cpu_utilization(&self) -> f64 {
        self.metrics
            .as_ref()
            .and_then(|m| m.cpu.as_ref())
            .map(|c| c.utilization)
            .unwrap_or(0.0)
    }

    pub fn memory_utilization(&self) -> f64 {
        self.metrics
            .as_ref()
            .and_then(|m| m.memory.as_ref())
            .map(|m| m.utilization)
            .unwrap_or(0.0)
    }

    pub fn storage(&self) -> Option<&Storage> {
        self.metrics.as_ref().and_then(|m| m.storage.as_ref())
    }

    pub fn depends_on(&self, server_id: &str) -> bool {
        self.dependencies.iter().any(|d| d.server_id == server_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ComplexityDescriptor {
    #[serde(default, deserialize_with = "lenient::level")]
    pub level: Level,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct StrategyDescriptor {
    #[serde(default, deserialize_with = "lenient::strategy")]
    pub strategy: Strategy,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Reference to another server by identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub server_id: String,
}

impl<'de> Deserialize<'de> for Dependency {
    /// Accepts either a bare identifier or an object carrying `serverId` (or `id`)
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let id = match &raw {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(map) => map
                .get("serverId")
                .or_else(|| map.get("id"))
                .and_then(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                }),
            _ => None,
        };

        match id.filter(|s| !s.trim().is_empty()) {
            Some(server_id) => Ok(Dependency { server_id }),
            None => Err(serde::de::Error::custom(format!(
                "dependency without a server id: {}",
                raw
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct Metrics {
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub cpu: Option<Utilization>,

    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub memory: Option<Utilization>,

    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage: Option<Storage>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct Utilization {
    /// Percent, 0-100
    #[serde(default, deserialize_with = "lenient::number")]
    pub utilization: f64,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct Storage {
    #[serde(default, deserialize_with = "lenient::number")]
    pub used: f64,

    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Storage {
    /// Fraction of capacity in use; an unknown capacity counts as one unit
    pub fn used_fraction(&self) -> f64 {
        let total = self.total.unwrap_or(1.0);
        if total <= 0.0 {
            return if self.used > 0.0 { f64::INFINITY } else { 0.0 };
        }
        self.used / total
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct Application {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Application {
    pub fn has_unknown_version(&self) -> bool {
        match self.version.as_deref() {
            None => true,
            Some(v) => v.trim().eq_ignore_ascii_case("unknown"),
        }
    }
}
