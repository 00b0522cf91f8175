//! Deep merge of configuration trees.
//!
//! Used when a run builds upon the bundled baseline: the user config is
//! layered over the baseline so rules see every default the user did not
//! override.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences are replaced entirely (not merged)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::Value;

use super::node::Config;
use crate::error::Result;

/// Deep merge two YAML values.
///
/// Later values override earlier values at the point of conflict.
///
/// # Arguments
///
/// * `base` - The base configuration
/// * `overlay` - The overlay configuration (takes precedence)
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge multiple configs in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

impl Config {
    /// This configuration layered over `base`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigTypeMismatch` only if the merge result is not a
    /// mapping, which cannot happen for two root configurations.
    pub fn build_upon(&self, base: &Config) -> Result<Config> {
        Config::from_value(deep_merge(&base.to_value(), &self.to_value()))
    }
}
