use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    #[serde(default)]
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct EstimatorConfig {
    #[serde(default)]
    pub provider: EstimatorProvider,

    #[serde(default)]
    pub command: Option<CommandConfig>,

    #[serde(default)]
    pub http: Option<HttpConfig>,

    /// Per-server request timeout
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    /// How many cost lookups may be in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            provider: EstimatorProvider::default(),
            command: None,
            http: None,
            timeout_sec: default_timeout_sec(),
            concurrency: default_concurrency(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CommandConfig {
    pub binary: PathBuf,

    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct HttpConfig {
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorProvider {
    #[default]
    None,
    Command,
    Http,
}

impl std::fmt::Display for EstimatorProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimatorProvider::None => write!(f, "none"),
            EstimatorProvider::Command => write!(f, "command"),
            EstimatorProvider::Http => write!(f, "http"),
        }
    }
}
