use super::{CostEstimate, CostEstimator, CostRequest};
use crate::error::EstimatorError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout as tokio_timeout;

/// Posts the request JSON to a cost service endpoint
pub struct HttpEstimator {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpEstimator {
    pub fn new(url: String, timeout: Duration) -> Result<Self, EstimatorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            timeout,
        })
    }
}

#[async_trait]
impl CostEstimator for HttpEstimator {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn estimate(&self, request: &CostRequest<'_>) -> Result<CostEstimate, EstimatorError> {
        let exchange = async {
            let response = self
                .client
                .post(&self.url)
                .header("Content-Type", "application/json")
                .json(request)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            Ok::<_, EstimatorError>((status, body))
        };

        let (status, body) = tokio_timeout(self.timeout, exchange)
            .await
            .map_err(|_| EstimatorError::Timeout(self.timeout))??;

        if !status.is_success() {
            return Err(EstimatorError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(serde_json::from_str(body.trim())?)
    }
}
