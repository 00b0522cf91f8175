//! Rules bound to their configuration.
//!
//! A [`ConfiguredRule`] is a rule plus everything the engine needs to decide
//! whether and how to run it: its config sub-tree, effective severity,
//! activation and path filters. All of it is resolved once, before any unit
//! is analyzed.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use super::rule::{Analysis, Rule, RuleId};
use crate::config::Config;
use crate::engine::Settings;
use crate::error::{Result, VigilError};
use crate::severity::{parse_to_severity, Severity};

/// A rule ready to be executed.
pub struct ConfiguredRule {
    id: RuleId,
    rule: Box<dyn Rule>,
    config: Config,
    severity: Severity,
    active: bool,
    filters: PathFilters,
}

impl ConfiguredRule {
    /// Bind `rule` to its configuration inside `rule_set_config`.
    ///
    /// # Errors
    ///
    /// Fails if the rule's config has a value of the wrong type, an
    /// unrecognized `severity`, or an invalid path filter glob.
    pub fn new(rule: Box<dyn Rule>, rule_set_config: &Config, settings: &Settings) -> Result<Self> {
        let rule_set_id = rule_set_config.path().unwrap_or_default().to_string();
        let id = RuleId::new(rule_set_id, rule.name());
        let config = rule_set_config.sub_config(rule.name())?;
        let active = is_active(rule.as_ref(), rule_set_config, &config, settings)?;
        let severity = effective_severity(rule.as_ref(), rule_set_config, &config)?;
        let filters = PathFilters::from_configs(rule_set_config, &config)?;

        tracing::debug!("Rule {} active={} severity={}", id, active, severity);

        Ok(Self {
            id,
            rule,
            config,
            severity,
            active,
            filters,
        })
    }

    pub fn id(&self) -> &RuleId {
        &self.id
    }

    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn analysis(&self) -> Analysis {
        self.rule.analysis()
    }

    /// Whether the path filters allow this rule on `path`.
    pub fn applies_to(&self, path: &Path) -> bool {
        !self.filters.is_ignored(path)
    }
}

impl std::fmt::Debug for ConfiguredRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredRule")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .field("active", &self.active)
            .finish()
    }
}

/// Decide whether a rule runs.
///
/// A rule set with `active: false` disables all its rules. Otherwise an
/// explicit `active` on the rule wins; without one the rule runs when
/// `all_rules` is set or it has been active by default since a version not
/// newer than the running engine.
///
/// # Errors
///
/// Returns `ConfigTypeMismatch` if an `active` key is not a boolean.
pub fn is_active(
    rule: &dyn Rule,
    rule_set_config: &Config,
    rule_config: &Config,
    settings: &Settings,
) -> Result<bool> {
    if rule_set_config.value_or_null::<bool>("active")? == Some(false) {
        return Ok(false);
    }
    if let Some(explicit) = rule_config.value_or_null::<bool>("active")? {
        return Ok(explicit);
    }
    if settings.all_rules {
        return Ok(true);
    }
    let running = Version::parse(&settings.engine_version);
    Ok(rule
        .active_by_default()
        .is_some_and(|since| Version::parse(since) <= running))
}

fn effective_severity(rule: &dyn Rule, rule_set_config: &Config, rule_config: &Config) -> Result<Severity> {
    let configured = match rule_config.value_or_null::<String>("severity")? {
        Some(text) => Some(text),
        None => rule_set_config.value_or_null::<String>("severity")?,
    };
    match configured {
        Some(text) => parse_to_severity(&text),
        None => Ok(rule.default_severity()),
    }
}

/// A dotted `major.minor.patch` version. Pre-release suffixes are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(pub u64, pub u64, pub u64);

impl Version {
    /// Parse leniently: missing or non-numeric components count as zero.
    pub fn parse(text: &str) -> Self {
        let core = text.trim().split(['-', '+']).next().unwrap_or_default();
        let mut parts = core.split('.').map(|p| p.parse::<u64>().unwrap_or(0));
        Version(
            parts.next().unwrap_or(0),
            parts.next().unwrap_or(0),
            parts.next().unwrap_or(0),
        )
    }
}

/// `includes`/`excludes` glob filters on unit paths.
#[derive(Debug, Default)]
pub struct PathFilters {
    includes: Option<GlobSet>,
    excludes: Option<GlobSet>,
}

impl PathFilters {
    /// Rule-level `includes` replace rule-set ones; `excludes` of both apply.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPathFilter` for a pattern that is not a valid glob.
    pub fn from_configs(rule_set_config: &Config, rule_config: &Config) -> Result<Self> {
        let includes = match rule_config.value_or_null::<Vec<String>>("includes")? {
            Some(patterns) => patterns,
            None => rule_set_config.value_or_default("includes", Vec::new())?,
        };
        let mut excludes: Vec<String> = rule_set_config.value_or_default("excludes", Vec::new())?;
        excludes.extend(rule_config.value_or_default::<Vec<String>>("excludes", Vec::new())?);

        Ok(Self {
            includes: build_glob_set(&includes)?,
            excludes: build_glob_set(&excludes)?,
        })
    }

    /// Whether `path` is filtered out.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let included = self.includes.as_ref().map_or(true, |set| set.is_match(path));
        let excluded = self.excludes.as_ref().is_some_and(|set| set.is_match(path));
        !included || excluded
    }
}

fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| VigilError::InvalidPathFilter {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| VigilError::InvalidPathFilter {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })
}
