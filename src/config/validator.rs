//! Configuration validation.
//!
//! The user configuration is walked key by key and compared against the
//! bundled baseline. Keys the baseline does not know are reported, unless
//! their dotted path matches one of the exclusion patterns:
//! - `<id>.*` for every plugin rule set, since the baseline cannot know them
//! - a fixed list of properties every rule and rule set accepts
//! - whatever the user lists under `config.excludes`
//!
//! Any matching pattern excludes a path; no pattern source takes precedence.

use regex::Regex;
use serde_yaml::Value;
use tracing::{debug, warn};

use super::node::Config;
use crate::error::{Result, VigilError};
use crate::notification::Notification;
use crate::rules::ProviderRegistry;
use crate::severity::Severity;

/// Properties accepted everywhere without being listed in the baseline.
pub const DEFAULT_PROPERTY_EXCLUDES: &[&str] = &[
    r".*\.excludes",
    r".*\.includes",
    r".*\.active",
    r".*\.autoCorrect",
    r".*\.severity",
    r"build\.weights.*",
    r".*\.ignoreAnnotated",
    r".*\.aliases",
];

/// A check over the user configuration.
pub trait ConfigValidator {
    /// Name used in logs.
    fn id(&self) -> &str;

    /// Inspect `config` and report problems.
    ///
    /// # Errors
    ///
    /// Fails only when the validator itself cannot run, e.g. on a malformed
    /// exclude pattern. Problems with the configuration are notifications.
    fn validate(&self, config: &Config) -> Result<Vec<Notification>>;
}

/// Reports user keys that are not part of the baseline.
pub struct DefaultPropertiesValidator<'a> {
    registry: &'a ProviderRegistry,
    baseline: &'a Config,
}

impl<'a> DefaultPropertiesValidator<'a> {
    pub fn new(registry: &'a ProviderRegistry, baseline: &'a Config) -> Self {
        Self { registry, baseline }
    }

    /// The union of plugin, default and user exclusion patterns.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExcludePattern` for a user pattern that is not a valid
    /// regular expression, or when `config.excludes` is neither a string nor
    /// a list of strings.
    pub fn patterns(&self, config: &Config) -> Result<Vec<Regex>> {
        let plugin = self
            .registry
            .plugin_providers()
            .map(|p| format!("{}.*", regex::escape(p.rule_set_id())));
        let defaults = DEFAULT_PROPERTY_EXCLUDES.iter().map(|p| p.to_string());
        let user = user_excludes(config)?;

        plugin
            .chain(defaults)
            .chain(user)
            .map(|pattern| compile_pattern(&pattern))
            .collect()
    }
}

impl ConfigValidator for DefaultPropertiesValidator<'_> {
    fn id(&self) -> &str {
        "DefaultPropertiesValidator"
    }

    fn validate(&self, config: &Config) -> Result<Vec<Notification>> {
        let patterns = self.patterns(config)?;
        Ok(validate_config(config, self.baseline, &patterns))
    }
}

/// Compare `config` against `baseline`, skipping paths matching `excludes`.
///
/// Both trees are only read. An unknown key is reported once; nothing below
/// it is visited.
pub fn validate_config(config: &Config, baseline: &Config, excludes: &[Regex]) -> Vec<Notification> {
    if baseline.is_empty() {
        warn!("Cannot validate configuration against an empty baseline");
        return Vec::new();
    }
    let mut notifications = Vec::new();
    walk(config, baseline, excludes, &mut notifications);
    notifications
}

fn walk(config: &Config, baseline: &Config, excludes: &[Regex], out: &mut Vec<Notification>) {
    for (key, value) in config.entries() {
        let path = config.key_path(&key);
        if excludes.iter().any(|p| p.is_match(&path)) {
            debug!("Skipping excluded property {}", path);
            continue;
        }

        let Some(expected) = baseline.get(&key) else {
            out.push(Notification::error(format!(
                "Property '{path}' is misspelled or does not exist."
            )));
            continue;
        };

        match (value, expected) {
            (Value::Mapping(_), Value::Mapping(_)) => {
                // Both sides are mappings, so neither sub_config can fail.
                if let (Ok(sub), Ok(base)) = (config.sub_config(&key), baseline.sub_config(&key)) {
                    walk(&sub, &base, excludes, out);
                }
            }
            (_, Value::Mapping(_)) => out.push(Notification::error(format!(
                "Nested config expected for '{path}'."
            ))),
            (Value::Mapping(_), _) => out.push(Notification::error(format!(
                "Unexpected nested config for '{path}'."
            ))),
            _ => {}
        }
    }
}

/// A key of the user's `config` section. A `config` that is not a mapping
/// has no keys; the walk reports its shape.
fn config_setting<'a>(config: &'a Config, key: &str) -> Option<&'a Value> {
    match config.get("config") {
        Some(Value::Mapping(section)) => section.get(key),
        _ => None,
    }
}

/// A boolean switch of the `config` section, or `default` when it is
/// missing or not a boolean.
fn config_flag(config: &Config, key: &str, default: bool) -> bool {
    match config_setting(config, key) {
        None | Some(Value::Null) => default,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            warn!("Ignoring non-boolean config.{}; using {}", key, default);
            default
        }
    }
}

fn user_excludes(config: &Config) -> Result<Vec<String>> {
    match config_setting(config, "excludes") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(pattern)) => Ok(vec![pattern.clone()]),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(pattern) => Ok(pattern.clone()),
                other => Err(invalid_excludes(other)),
            })
            .collect(),
        Some(other) => Err(invalid_excludes(other)),
    }
}

fn invalid_excludes(value: &Value) -> VigilError {
    VigilError::InvalidExcludePattern {
        pattern: serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
        message: "config.excludes must be a string or a list of strings".to_string(),
    }
}

/// Compile a pattern so that it must match the whole path.
fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| VigilError::InvalidExcludePattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Run every validator over `config`.
///
/// Does nothing when the user sets `config.validation: false`. With
/// `config.warningsAsErrors: true`, warnings count as errors. Switches that
/// are not booleans fall back to their defaults.
///
/// # Errors
///
/// Returns `InvalidConfig` carrying all notifications when any of them is
/// an error, or the first error a validator fails with.
pub fn check_configuration(
    config: &Config,
    validators: &[&dyn ConfigValidator],
) -> Result<Vec<Notification>> {
    if !config_flag(config, "validation", true) {
        debug!("Configuration validation disabled");
        return Ok(Vec::new());
    }
    let warnings_as_errors = config_flag(config, "warningsAsErrors", false);

    let mut notifications = Vec::new();
    for validator in validators {
        let found = validator.validate(config)?;
        debug!("{} reported {} notifications", validator.id(), found.len());
        notifications.extend(found);
    }

    if warnings_as_errors {
        for notification in &mut notifications {
            if notification.severity == Some(Severity::Warning) {
                notification.severity = Some(Severity::Error);
            }
        }
    }

    if notifications.iter().any(Notification::is_error) {
        return Err(VigilError::InvalidConfig { notifications });
    }
    Ok(notifications)
}

/// Validate `config` against the bundled baseline and the given providers.
///
/// # Errors
///
/// See [`check_configuration`].
pub fn validate(config: &Config, registry: &ProviderRegistry) -> Result<Vec<Notification>> {
    let baseline = Config::baseline();
    let validator = DefaultPropertiesValidator::new(registry, &baseline);
    check_configuration(config, &[&validator])
}
