//! Field decoders that never fail on malformed input.
//!
//! Server inventories come from discovery tooling and spreadsheets, so numbers
//! show up as strings, lists show up as scalars and levels show up in any case.
//! Each decoder substitutes the field's default instead of rejecting the record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use super::types::{Level, Strategy};

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(scalar_string(Value::deserialize(deserializer)?).filter(|s| !s.trim().is_empty()))
}

pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(scalar_number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

pub fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Ok(scalar_number(&Value::deserialize(deserializer)?))
}

pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    })
}

pub fn level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
    let raw = scalar_string(Value::deserialize(deserializer)?);
    Ok(raw
        .as_deref()
        .and_then(Level::parse)
        .unwrap_or_else(|| {
            debug!("Unrecognized level {:?}, defaulting to Medium", raw);
            Level::default()
        }))
}

pub fn strategy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Strategy, D::Error> {
    let raw = scalar_string(Value::deserialize(deserializer)?);
    Ok(raw
        .as_deref()
        .and_then(Strategy::parse)
        .unwrap_or_else(|| {
            debug!("Unrecognized strategy {:?}, defaulting to Rehost", raw);
            Strategy::default()
        }))
}

/// Decode a nested object, falling back to its default when it has the wrong shape
pub fn value<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(raw).unwrap_or_else(|e| {
        debug!("Malformed field replaced with default: {}", e);
        T::default()
    }))
}

pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(raw)
        .map_err(|e| debug!("Malformed field dropped: {}", e))
        .ok())
}

/// Decode a list, dropping entries that cannot be decoded
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            debug!("Expected a list, got {}; using empty list", other);
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!("Dropping malformed list entry: {}", e);
                None
            }
        })
        .collect())
}

fn scalar_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "number")]
        number: f64,
        #[serde(default, deserialize_with = "flag")]
        flag: bool,
        #[serde(default, deserialize_with = "level")]
        level: Level,
        #[serde(default, deserialize_with = "list")]
        items: Vec<u32>,
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let sample: Sample = serde_json::from_str(r#"{"number": "85.5%"}"#).unwrap();
        assert_eq!(sample.number, 85.5);
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let sample: Sample =
            serde_json::from_str(r#"{"number": [1], "flag": {}, "level": 7, "items": "abc"}"#)
                .unwrap();
        assert_eq!(sample.number, 0.0);
        assert!(!sample.flag);
        assert_eq!(sample.level, Level::Medium);
        assert!(sample.items.is_empty());
    }

    #[test]
    fn test_list_drops_malformed_entries() {
        let sample: Sample = serde_json::from_str(r#"{"items": [1, "two", 3, -4]}"#).unwrap();
        assert_eq!(sample.items, vec![1, 3]);
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let sample: Sample = serde_json::from_str(r#"{"level": "high", "flag": "yes"}"#).unwrap();
        assert_eq!(sample.level, Level::High);
        assert!(sample.flag);
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let sample: Sample =
            serde_json::from_str(r#"{"number": null, "level": null, "items": null}"#).unwrap();
        assert_eq!(sample.number, 0.0);
        assert_eq!(sample.level, Level::Medium);
        assert!(sample.items.is_empty());
    }
}
