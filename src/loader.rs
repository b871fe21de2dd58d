//! Loading templates from JSON and YAML documents.
//!
//! Plain documents have no placeholders, tuples or named records, so those
//! are spelled with single-key marker objects, in the same way `{"$ref": ..}`
//! marks a link:
//!
//! ```yaml
//! $record: Level1
//! field1: { $candidates: [1, 2, 3] }
//! field2: { $tuple: [1, { $candidates: [11, 12] }] }
//! field3:
//!   k: { $candidates: [p, q] }
//! ```
//!
//! Objects without a marker load as maps with string keys. Inside a
//! placeholder's candidates the placeholder marker is not honoured: the
//! object loads as a plain map, since candidates are never discovered.

use crate::error::TemplateError;
use crate::placeholder::Placeholder;
use crate::value::{Key, Record, Tuple, Value};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number};
use tracing::debug;

/// Marker keys recognised by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Key marking a placeholder: `{"$candidates": [..]}`.
    pub placeholder_key: String,
    /// Key marking an immutable sequence: `{"$tuple": [..]}`.
    pub tuple_key: String,
    /// Key naming a record: `{"$record": "Name", "field": ..}`.
    pub record_key: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            placeholder_key: "$candidates".to_string(),
            tuple_key: "$tuple".to_string(),
            record_key: "$record".to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn with_placeholder_key(mut self, key: impl Into<String>) -> Self {
        self.placeholder_key = key.into();
        self
    }

    pub fn with_tuple_key(mut self, key: impl Into<String>) -> Self {
        self.tuple_key = key.into();
        self
    }

    pub fn with_record_key(mut self, key: impl Into<String>) -> Self {
        self.record_key = key.into();
        self
    }
}

/// Load a template from JSON text with the default markers.
pub fn from_json_str(text: &str) -> Result<Value, TemplateError> {
    from_json_str_with(text, &LoaderConfig::default())
}

pub fn from_json_str_with(text: &str, config: &LoaderConfig) -> Result<Value, TemplateError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    debug!(bytes = text.len(), "parsed JSON template");
    from_json_value_with(json, config)
}

/// Load a template from YAML text with the default markers.
pub fn from_yaml_str(text: &str) -> Result<Value, TemplateError> {
    from_yaml_str_with(text, &LoaderConfig::default())
}

pub fn from_yaml_str_with(text: &str, config: &LoaderConfig) -> Result<Value, TemplateError> {
    let json: serde_json::Value = serde_yaml::from_str(text)?;
    debug!(bytes = text.len(), "parsed YAML template");
    from_json_value_with(json, config)
}

/// Convert an already parsed JSON value with the default markers.
pub fn from_json_value(json: serde_json::Value) -> Result<Value, TemplateError> {
    from_json_value_with(json, &LoaderConfig::default())
}

pub fn from_json_value_with(
    json: serde_json::Value,
    config: &LoaderConfig,
) -> Result<Value, TemplateError> {
    convert(json, config, true)
}

fn convert(
    json: serde_json::Value,
    config: &LoaderConfig,
    placeholders: bool,
) -> Result<Value, TemplateError> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => number(&n),
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => Value::List(convert_all(items, config, placeholders)?),
        serde_json::Value::Object(map) => convert_object(map, config, placeholders)?,
    })
}

fn convert_all(
    items: Vec<serde_json::Value>,
    config: &LoaderConfig,
    placeholders: bool,
) -> Result<Vec<Value>, TemplateError> {
    items
        .into_iter()
        .map(|item| convert(item, config, placeholders))
        .collect()
}

fn convert_object(
    mut map: Map<String, serde_json::Value>,
    config: &LoaderConfig,
    placeholders: bool,
) -> Result<Value, TemplateError> {
    if placeholders && map.contains_key(&config.placeholder_key) {
        let items = marker_array(&mut map, &config.placeholder_key)?;
        let candidates = convert_all(items, config, false)?;
        return Ok(Value::Placeholder(Placeholder::new(candidates)));
    }

    if map.contains_key(&config.tuple_key) {
        let items = marker_array(&mut map, &config.tuple_key)?;
        return Ok(Value::Tuple(Tuple::from(convert_all(
            items,
            config,
            placeholders,
        )?)));
    }

    if let Some(name) = map.get(&config.record_key) {
        let name = name
            .as_str()
            .ok_or_else(|| invalid(&config.record_key, "record name must be a string"))?
            .to_string();
        let mut record = Record::new(name);
        for (field, value) in map {
            if field == config.record_key {
                continue;
            }
            record = record.with(field, convert(value, config, placeholders)?);
        }
        return Ok(Value::Record(record));
    }

    let mut entries = indexmap::IndexMap::with_capacity(map.len());
    for (key, value) in map {
        entries.insert(Key::Str(key), convert(value, config, placeholders)?);
    }
    Ok(Value::Map(entries))
}

/// Take the array held by a single-key marker object.
fn marker_array(
    map: &mut Map<String, serde_json::Value>,
    marker: &str,
) -> Result<Vec<serde_json::Value>, TemplateError> {
    if map.len() != 1 {
        return Err(invalid(marker, "marker must be the only key of its object"));
    }
    match map.remove(marker) {
        Some(serde_json::Value::Array(items)) => Ok(items),
        _ => Err(invalid(marker, "expected an array")),
    }
}

fn invalid(marker: &str, reason: &str) -> TemplateError {
    TemplateError::InvalidMarker {
        marker: marker.to_string(),
        reason: reason.to_string(),
    }
}

fn number(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
    }
}

impl Value {
    /// Plain JSON form of this value.
    ///
    /// Records and maps become objects (map keys stringified), lists and
    /// tuples arrays, placeholders `{"$candidates": [..]}`, non-finite
    /// floats `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Record(record) => serde_json::Value::Object(
                record
                    .fields()
                    .map(|(field, value)| (field.to_string(), value.to_json()))
                    .collect(),
            ),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Tuple(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_json()))
                    .collect(),
            ),
            Value::Placeholder(placeholder) => {
                let mut marker = Map::new();
                marker.insert(
                    LoaderConfig::default().placeholder_key,
                    serde_json::Value::Array(
                        placeholder.values().iter().map(Value::to_json).collect(),
                    ),
                );
                serde_json::Value::Object(marker)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}
