//! Caller-supplied variables.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use stencil_validate::{ValidationError, ValidationResult};

/// An insertion-ordered map of variable names to untyped values.
///
/// Values arrive untyped (from JSON or YAML files, for example) so that a
/// non-string value is reported as a validation error instead of being
/// coerced. Iteration follows insertion order, which decides which invalid
/// key is reported first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct VariableMap {
    entries: Vec<(String, Value)>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another map into this one; its values win.
    pub fn extend(&mut self, other: VariableMap) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Parse a JSON object.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Parse a YAML mapping.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Convert to plain strings, failing on the first non-string value.
    pub fn to_string_map(&self) -> ValidationResult<HashMap<String, String>> {
        self.iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key.to_string(), s.clone())),
                other => Err(ValidationError::NonStringValue {
                    name: key.to_string(),
                    found: value_kind(other).to_string(),
                }),
            })
            .collect()
    }
}

impl From<Map<String, Value>> for VariableMap {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, String>> for VariableMap {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for VariableMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = VariableMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// A human-readable name for a JSON value's type.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
