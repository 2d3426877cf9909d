//! Generic document decoding
//!
//! Turns raw bytes into a loosely-typed document tree ([`serde_json::Value`]).
//! JSON is attempted first since it is cheaper and unambiguous; the same
//! bytes are then retried as YAML. YAML trees are normalized into the JSON
//! shape so the rest of the parser walks a single representation.

use openapi_importer_common::{ImportError, Result};
use serde_json::Value;
use serde_yaml::Value as YamlValue;

/// Decode raw bytes as a JSON object or YAML mapping.
pub fn decode_document(bytes: &[u8]) -> Result<Value> {
    if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
        if value.is_object() {
            return Ok(value);
        }
    }

    let text = std::str::from_utf8(bytes)
        .map_err(|_| ImportError::InvalidFormat("input is not valid UTF-8".to_string()))?;

    match serde_yaml::from_str::<YamlValue>(text) {
        Ok(value @ YamlValue::Mapping(_)) => Ok(yaml_to_json(value)),
        _ => Err(ImportError::InvalidFormat(
            "input is neither a JSON object nor a YAML mapping".to_string(),
        )),
    }
}

/// Read the document's `openapi` field, tolerant of type.
///
/// Unquoted YAML like `openapi: 3.0` decodes the version as a number; it is
/// normalized to a string for the downstream major-version check.
pub fn openapi_version(doc: &Value) -> Option<String> {
    stringish(doc.get("openapi")?)
}

/// Accept either a string or a number and normalize to a string.
pub fn stringish(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn yaml_to_json(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => yaml_number(n),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        YamlValue::Mapping(mapping) => {
            let mut object = serde_json::Map::new();
            for (key, value) in mapping {
                let Some(key) = scalar_key(key) else { continue };
                object.insert(key, yaml_to_json(value));
            }
            Value::Object(object)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// YAML allows non-string mapping keys (an unquoted `200:` under `responses`
/// is a number); scalar keys are stringified, anything else is dropped.
fn scalar_key(key: YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
