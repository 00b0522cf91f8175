//! Hierarchical configuration node.
//!
//! A [`Config`] is a YAML mapping that remembers where it lives in the
//! overall tree. Lookups never fail because a key is missing; they only
//! fail when a present value has the wrong shape.

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::error::{Result, VigilError};

/// Separator between the segments of a config path.
pub const PATH_SEPARATOR: char = '.';

/// A (sub-)configuration: a mapping from string keys to YAML values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    path: Option<String>,
    entries: Mapping,
}

impl Config {
    /// An empty root configuration.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already-parsed YAML value as a root configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigTypeMismatch` if the value is neither a mapping nor null.
    pub fn from_value(value: Value) -> Result<Self> {
        Self::at(None, value)
    }

    /// Parse YAML text into a root configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` when the text is not valid YAML, or
    /// `ConfigTypeMismatch` when the document is not a mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| VigilError::ConfigParse {
            path: "<inline>".into(),
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    fn at(path: Option<String>, value: Value) -> Result<Self> {
        match value {
            Value::Mapping(entries) => Ok(Self { path, entries }),
            Value::Null => Ok(Self {
                path,
                entries: Mapping::new(),
            }),
            _ => Err(VigilError::ConfigTypeMismatch {
                path: path.unwrap_or_else(|| "<root>".to_string()),
                expected: "mapping".to_string(),
            }),
        }
    }

    /// Dotted path of this node, `None` for the root.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Dotted path of a key below this node.
    pub fn key_path(&self, key: &str) -> String {
        match &self.path {
            Some(parent) => format!("{parent}{PATH_SEPARATOR}{key}"),
            None => key.to_string(),
        }
    }

    /// Whether this node has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of this node, in document order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.keys().filter_map(key_to_string)
    }

    /// Key/value pairs of this node, in document order.
    pub fn entries(&self) -> impl Iterator<Item = (String, &Value)> + '_ {
        self.entries
            .iter()
            .filter_map(|(k, v)| key_to_string(k).map(|k| (k, v)))
    }

    /// Whether `key` is present (even with a null value).
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| key_to_string(k).as_deref() == Some(key))
            .map(|(_, v)| v)
    }

    /// The underlying mapping as a YAML value.
    pub fn to_value(&self) -> Value {
        Value::Mapping(self.entries.clone())
    }

    /// Nested configuration under `key`.
    ///
    /// A missing or null key yields an empty node that still knows its path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigTypeMismatch` if the key holds a scalar or sequence.
    pub fn sub_config(&self, key: &str) -> Result<Config> {
        let value = self.get(key).cloned().unwrap_or(Value::Null);
        Self::at(Some(self.key_path(key)), value)
    }

    /// Typed value under `key`, or `default` when the key is absent or null.
    ///
    /// # Errors
    ///
    /// Returns `ConfigTypeMismatch` if the value cannot be read as `T`.
    pub fn value_or_default<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.value_or_null(key)?.unwrap_or(default))
    }

    /// Typed value under `key`, or `None` when absent or null.
    ///
    /// # Errors
    ///
    /// Returns `ConfigTypeMismatch` if the value cannot be read as `T`.
    pub fn value_or_null<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .map_err(|_| VigilError::ConfigTypeMismatch {
                    path: self.key_path(key),
                    expected: std::any::type_name::<T>().to_string(),
                }),
        }
    }
}

/// Render a YAML mapping key as a config key.
///
/// Scalar keys (strings, numbers, booleans) are accepted; anything else is
/// not addressable by path and is skipped.
pub(crate) fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
