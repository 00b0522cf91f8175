//! Rule definitions.
//!
//! This module provides the core traits and types for defining rules:
//!
//! - [`Rule`] - The trait that all rules must implement
//! - [`RuleId`] - Rule-set id plus rule name
//! - [`Analysis`] - Whether a rule needs binding information
//! - [`RuleSet`] - The rules one provider contributes

use serde::Serialize;

use crate::engine::RuleContext;
use crate::severity::Severity;

/// Unique identifier for a rule: its rule set and its name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RuleId {
    pub rule_set: String,
    pub name: String,
}

impl RuleId {
    /// Create a new rule ID.
    pub fn new(rule_set: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            rule_set: rule_set.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.rule_set, self.name)
    }
}

/// What a rule needs from an analysis unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Analysis {
    /// The syntax tree is enough.
    SyntaxOnly,
    /// Needs binding/type information; skipped on units without it.
    Full,
}

/// A rule that inspects one analysis unit and reports findings.
///
/// Rules are stateless: everything produced during a run goes into the
/// [`RuleContext`] the engine creates for each (rule, unit) pair.
pub trait Rule: Send + Sync {
    /// Name of the rule, unique within its rule set.
    fn name(&self) -> &str;

    /// Description of what this rule reports.
    fn description(&self) -> &str;

    /// Severity used when the configuration does not set one.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Version since which the rule is active by default, if it is.
    fn active_by_default(&self) -> Option<&str> {
        None
    }

    /// Whether this rule needs binding information.
    fn analysis(&self) -> Analysis {
        Analysis::SyntaxOnly
    }

    /// Inspect the unit in `ctx` and report findings through it.
    fn visit(&self, ctx: &mut RuleContext<'_>) -> anyhow::Result<()>;
}

/// A named group of rules shipped together.
pub struct RuleSet {
    pub id: String,
    pub rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// Create a rule set.
    pub fn new(id: impl Into<String>, rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            id: id.into(),
            rules,
        }
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("RuleSet")
            .field("id", &self.id)
            .field("rules", &names)
            .finish()
    }
}
