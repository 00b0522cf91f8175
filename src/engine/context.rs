//! Per-invocation state handed to a rule.

use std::path::Path;

use anyhow::anyhow;

use crate::config::Config;
use crate::rules::{Entity, Finding, RuleId};
use crate::severity::Severity;
use crate::syntax::{AnalysisUnit, BindingContext, SyntaxNode, SyntaxTree};

/// What one rule sees while analyzing one unit.
///
/// A fresh context is created for every (rule, unit) pair, so findings are
/// never shared between rules or units.
pub struct RuleContext<'a> {
    rule_id: &'a RuleId,
    unit: &'a AnalysisUnit,
    config: &'a Config,
    severity: Severity,
    findings: Vec<Finding>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        rule_id: &'a RuleId,
        unit: &'a AnalysisUnit,
        config: &'a Config,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id,
            unit,
            config,
            severity,
            findings: Vec::new(),
        }
    }

    pub fn rule_id(&self) -> &RuleId {
        self.rule_id
    }

    /// The rule's own configuration.
    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn path(&self) -> &'a Path {
        self.unit.path()
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.unit.tree()
    }

    pub fn root(&self) -> &'a SyntaxNode {
        self.unit.tree().root()
    }

    /// Binding information, if the unit has any.
    pub fn bindings(&self) -> Option<&'a dyn BindingContext> {
        self.unit.bindings()
    }

    /// Binding information, failing the rule when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit was analyzed without bindings.
    pub fn require_bindings(&self) -> anyhow::Result<&'a dyn BindingContext> {
        self.bindings()
            .ok_or_else(|| anyhow!("no binding information for {}", self.unit.path().display()))
    }

    /// Report a finding for a whole node.
    pub fn report(&mut self, node: &SyntaxNode, message: impl Into<String>) {
        let entity = Entity::from_node(self.unit.path(), node);
        self.report_entity(entity, message);
    }

    /// Report a finding for an already-built entity.
    pub fn report_entity(&mut self, entity: Entity, message: impl Into<String>) {
        self.findings.push(Finding::new(
            self.rule_id.clone(),
            entity,
            message,
            self.severity,
        ));
    }

    /// Findings reported so far, in report order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}
