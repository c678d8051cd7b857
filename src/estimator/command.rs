use super::{CostEstimate, CostEstimator, CostRequest};
use crate::error::EstimatorError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout as tokio_timeout;
use tracing::debug;

/// Runs an external program per server: request JSON on stdin, estimate JSON on stdout
pub struct CommandEstimator {
    pub binary: PathBuf,
    pub args: Vec<String>,
    pub timeout: Duration,
}

#[async_trait]
impl CostEstimator for CommandEstimator {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn estimate(&self, request: &CostRequest<'_>) -> Result<CostEstimate, EstimatorError> {
        let payload = serde_json::to_vec(request)?;

        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = std::time::Instant::now();
        let mut child = cmd.spawn()?;
        let stdin = child.stdin.take();

        let exchange = async move {
            if let Some(mut stdin) = stdin {
                // an estimator may exit without reading its input
                match stdin.write_all(&payload).await {
                    Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e),
                    _ => {}
                }
                // dropping stdin closes the pipe so the estimator sees EOF
            }
            child.wait_with_output().await
        };

        let output = tokio_timeout(self.timeout, exchange)
            .await
            .map_err(|_| EstimatorError::Timeout(self.timeout))?
            .map_err(EstimatorError::Io)?;

        debug!(
            "Estimator {} finished in {:?}",
            self.binary.display(),
            start.elapsed()
        );

        if !output.status.success() {
            return Err(EstimatorError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(serde_json::from_str(stdout.trim())?)
    }
}
