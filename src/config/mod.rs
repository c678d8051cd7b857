mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::{Path, PathBuf};

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            report_dir: default_report_dir(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        let estimator = &self.estimator;

        if estimator.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }

        if estimator.timeout_sec == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        match estimator.provider {
            EstimatorProvider::Command if estimator.command.is_none() => {
                Err(ConfigError::MissingCommand)
            }
            EstimatorProvider::Http
                if estimator
                    .http
                    .as_ref()
                    .map(|h| h.url.trim().is_empty())
                    .unwrap_or(true) =>
            {
                Err(ConfigError::MissingUrl)
            }
            _ => Ok(()),
        }
    }

    /// Point the estimator at a local command, replacing any configured provider
    pub fn use_command_estimator(&mut self, binary: PathBuf) {
        self.estimator.provider = EstimatorProvider::Command;
        self.estimator.command = Some(CommandConfig {
            binary,
            args: Vec::new(),
        });
    }

    /// Point the estimator at an HTTP endpoint, replacing any configured provider
    pub fn use_http_estimator(&mut self, url: String) {
        self.estimator.provider = EstimatorProvider::Http;
        self.estimator.http = Some(HttpConfig { url });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.report_dir, PathBuf::from("reports"));
        assert_eq!(config.estimator.provider, EstimatorProvider::None);
        assert_eq!(config.estimator.timeout_sec, 30);
        assert_eq!(config.estimator.concurrency, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_command_estimator() {
        let yaml = r#"
estimator:
  provider: command
  command:
    binary: ./bin/estimate-cost
    args: ["--region", "eu-west-1"]
  timeout_sec: 5
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.estimator.provider, EstimatorProvider::Command);
        let command = config.estimator.command.as_ref().unwrap();
        assert_eq!(command.binary, PathBuf::from("./bin/estimate-cost"));
        assert_eq!(command.args.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_command_provider_without_binary_is_invalid() {
        let config: Config = serde_yaml::from_str("estimator:\n  provider: command\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingCommand)
        ));
    }

    #[test]
    fn test_http_provider_requires_url() {
        let config: Config =
            serde_yaml::from_str("estimator:\n  provider: http\n  http:\n    url: \"\"\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::MissingUrl)));
    }

    #[test]
    fn test_zero_concurrency_is_invalid() {
        let config: Config = serde_yaml::from_str("estimator:\n  concurrency: 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConcurrency)
        ));
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config: Config = serde_yaml::from_str("estimator:\n  timeout_sec: 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn test_provider_display_matches_config_spelling() {
        for provider in [
            EstimatorProvider::None,
            EstimatorProvider::Command,
            EstimatorProvider::Http,
        ] {
            let yaml = format!("estimator:\n  provider: {}\n", provider);
            let config: Config = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(config.estimator.provider, provider);
        }
    }

    #[test]
    fn test_cli_override_replaces_provider() {
        let mut config = Config::default();
        config.use_http_estimator("http://localhost:9000/estimate".to_string());
        assert_eq!(config.estimator.provider, EstimatorProvider::Http);
        assert!(config.validate().is_ok());

        config.use_command_estimator(PathBuf::from("estimate"));
        assert_eq!(config.estimator.provider, EstimatorProvider::Command);
        assert!(config.validate().is_ok());
    }
}
