//! Server inventory input: records, lenient decoding and input document loading

mod lenient;
mod types;

pub use types::*;

use crate::error::InputError;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

/// Load a roadmap request from a file, or from stdin when the path is `-`
pub fn load_request(path: &Path) -> Result<RoadmapRequest, InputError> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(InputError::ReadStdin)?;
        return parse_request(&content, InputFormat::Json);
    }

    let content = std::fs::read_to_string(path).map_err(|e| InputError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_request(&content, InputFormat::from_path(path))
}

/// Parse either a bare list of servers or a `{servers, startDate}` request object
pub fn parse_request(content: &str, format: InputFormat) -> Result<RoadmapRequest, InputError> {
    let document: Value = match format {
        InputFormat::Json => serde_json::from_str(content)?,
        InputFormat::Yaml => serde_yaml::from_str(content)?,
    };

    // shape errors are reported the same way for JSON and YAML
    let request: RoadmapRequest = if document.is_array() {
        serde_json::from_value(serde_json::json!({ "servers": document }))
    } else {
        serde_json::from_value(document)
    }
    .map_err(InputError::InvalidDocument)?;

    debug!("Parsed {} server records", request.servers.len());
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let request =
            parse_request(r#"[{"serverId": "a"}, {"serverId": "b"}]"#, InputFormat::Json).unwrap();
        assert_eq!(request.servers.len(), 2);
        assert!(request.start_date.is_none());
    }

    #[test]
    fn test_parse_request_object() {
        let request = parse_request(
            r#"{"servers": [{"serverId": "a"}], "startDate": "2024-01-01"}"#,
            InputFormat::Json,
        )
        .unwrap();
        assert_eq!(request.servers.len(), 1);
        assert_eq!(request.start_date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_parse_yaml_request() {
        let yaml = r#"
startDate: "2024-03-01"
servers:
  - serverId: db-01
    serverName: Orders DB
    complexity:
      level: High
    businessCritical: true
"#;
        let request = parse_request(yaml, InputFormat::Yaml).unwrap();
        assert_eq!(request.servers[0].server_name, "Orders DB");
        assert_eq!(request.servers[0].complexity(), Level::High);
        assert!(request.servers[0].business_critical);
    }

    #[test]
    fn test_non_object_servers_are_dropped() {
        let request =
            parse_request(r#"[{"serverId": "a"}, 42, "b", null]"#, InputFormat::Json).unwrap();
        assert_eq!(request.servers.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            parse_request("{not json", InputFormat::Json),
            Err(InputError::ParseJson(_))
        ));
    }

    #[test]
    fn test_wrongly_shaped_yaml_is_not_reported_as_json() {
        let err = parse_request("just some text\n", InputFormat::Yaml).unwrap_err();
        assert!(matches!(err, InputError::InvalidDocument(_)));
        assert!(!err.to_string().contains("JSON"));

        assert!(matches!(
            parse_request("42", InputFormat::Json),
            Err(InputError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("inv.yml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("inv.YAML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("inv.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("-")), InputFormat::Json);
    }
}
