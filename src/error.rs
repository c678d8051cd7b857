use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read input from stdin: {0}")]
    ReadStdin(std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Failed to parse YAML input: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Input must be a list of servers or a request object: {0}")]
    InvalidDocument(#[source] serde_json::Error),

    #[error("Server data is required")]
    EmptyServerList,

    #[error("Invalid start date '{0}': expected YYYY-MM-DD")]
    InvalidStartDate(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Estimator provider 'command' requires estimator.command.binary")]
    MissingCommand,

    #[error("Estimator provider 'http' requires estimator.http.url")]
    MissingUrl,

    #[error("Estimator concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("Estimator timeout_sec must be at least 1")]
    InvalidTimeout,
}

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Cost estimator not configured")]
    NotConfigured,

    #[error("Cost estimation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Estimator exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cost service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode cost estimate: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
