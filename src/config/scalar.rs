// ABOUTME: Lenient string decoding for config fields
// Plain YAML scalars such as 3000, true or 2024 are kept as their text

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

fn scalar_text(value: Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(value) => Ok(value.to_string()),
        Value::Number(value) => Ok(value.to_string()),
        Value::String(value) => Ok(value),
        Value::Tagged(tagged) => scalar_text(tagged.value),
        Value::Sequence(_) => Err("expected a scalar, found a sequence".to_string()),
        Value::Mapping(_) => Err("expected a scalar, found a mapping".to_string()),
    }
}

/// A single scalar as a string; null decodes as empty.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_text(Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

/// A sequence of scalars as strings; null decodes as empty.
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| scalar_text(item).map_err(D::Error::custom))
            .collect(),
        other => Err(D::Error::custom(format!(
            "expected a sequence, found {}",
            kind(&other)
        ))),
    }
}

/// A mapping of scalars to scalars as strings; null decodes as empty.
pub fn string_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::Mapping(entries) => entries
            .into_iter()
            .map(|(key, value)| {
                let key = scalar_text(key).map_err(D::Error::custom)?;
                let value = scalar_text(value).map_err(D::Error::custom)?;
                Ok((key, value))
            })
            .collect(),
        other => Err(D::Error::custom(format!(
            "expected a mapping, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
