//! Data objects supplied at instantiation time

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when building a data object
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read data file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse data JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to parse data TOML: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("data must be an object/table at the top level, found {found}")]
    NotAnObject { found: &'static str },
}

/// Mapping from data key to value
///
/// Values are JSON values so callers can pass strings, numbers or richer
/// structures; how a value is rendered is up to the directive handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Data {
    values: BTreeMap<String, Value>,
}

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    /// Build from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self, DataError> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(DataError::NotAnObject {
                found: value_kind(&other),
            }),
        }
    }

    /// Build from any serializable struct or map
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, DataError> {
        Self::from_value(serde_json::to_value(value)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, DataError> {
        Self::from_value(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, DataError> {
        Self::from_value(toml::from_str(content)?)
    }

    /// Load a data file: `.json` files are JSON, anything else is TOML
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Data {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Short name of a JSON value's type for error messages
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
