//! Cost estimation service adapter.
//!
//! The cost service is an external collaborator: it receives
//! `{"serverData": <server record>}` and answers with a numeric breakdown.
//! Any failure is converted into a zero-cost estimate carrying the error
//! message, so one bad lookup never aborts a roadmap.

mod command;
mod http;

pub use command::CommandEstimator;
pub use http::HttpEstimator;

use crate::config::{EstimatorConfig, EstimatorProvider};
use crate::error::EstimatorError;
use crate::inventory::ServerRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Payload sent to the cost service
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRequest<'a> {
    pub server_data: &'a ServerRecord,
}

/// Cost breakdown returned by the cost service
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CostEstimate {
    #[serde(default)]
    pub total: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labor: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contingency: Option<f64>,

    /// Set when the estimate could not be obtained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Additional fields reported by the service, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CostEstimate {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[async_trait]
pub trait CostEstimator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn estimate(&self, request: &CostRequest<'_>) -> Result<CostEstimate, EstimatorError>;
}

/// Stand-in used when no cost service is configured
pub struct DisabledEstimator;

#[async_trait]
impl CostEstimator for DisabledEstimator {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn estimate(&self, _request: &CostRequest<'_>) -> Result<CostEstimate, EstimatorError> {
        Err(EstimatorError::NotConfigured)
    }
}

/// Create the estimator selected by the configuration
pub fn create_estimator(
    config: &EstimatorConfig,
) -> Result<Arc<dyn CostEstimator>, EstimatorError> {
    let timeout = Duration::from_secs(config.timeout_sec);

    let estimator: Arc<dyn CostEstimator> = match (config.provider, &config.command, &config.http) {
        (EstimatorProvider::Command, Some(command), _) => Arc::new(CommandEstimator {
            binary: command.binary.clone(),
            args: command.args.clone(),
            timeout,
        }),
        (EstimatorProvider::Http, _, Some(http)) => {
            Arc::new(HttpEstimator::new(http.url.clone(), timeout)?)
        }
        _ => Arc::new(DisabledEstimator),
    };

    debug!(
        "Using '{}' cost estimator (provider: {})",
        estimator.name(),
        config.provider
    );
    Ok(estimator)
}

/// Estimate one server's cost, converting any failure into a flagged zero estimate
pub async fn estimate_cost(estimator: &dyn CostEstimator, server: &ServerRecord) -> CostEstimate {
    let request = CostRequest {
        server_data: server,
    };

    match estimator.estimate(&request).await {
        Ok(estimate) => {
            if let Some(ref error) = estimate.error {
                warn!(
                    "Cost service reported an error for {}: {}",
                    server.server_id, error
                );
            }
            estimate
        }
        Err(EstimatorError::NotConfigured) => {
            debug!("No cost estimator configured for {}", server.server_id);
            CostEstimate::failed(EstimatorError::NotConfigured.to_string())
        }
        Err(e) => {
            warn!("Error getting cost estimate for {}: {}", server.server_id, e);
            CostEstimate::failed(e.to_string())
        }
    }
}
