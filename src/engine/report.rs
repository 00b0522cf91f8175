//! Aggregated results of an analysis run.

use std::collections::BTreeMap;

use serde::Serialize;

use super::executor::{RuleFailure, SkippedRule, UnitReport};
use crate::notification::Notification;
use crate::rules::{Finding, RuleId};
use crate::severity::Severity;

/// Best-effort result of analyzing a set of units.
///
/// Always produced, even when rules failed or the run was cancelled; check
/// `failures`, `skipped` and `cancelled` to judge coverage.
#[derive(Debug, Default, Clone, Serialize)]
pub struct AnalysisReport {
    /// All findings, grouped by unit in completion order.
    pub findings: Vec<Finding>,
    /// Rules that errored or panicked.
    pub failures: Vec<RuleFailure>,
    /// Rules not run for lack of binding information.
    pub skipped: Vec<SkippedRule>,
    /// Operational notifications about the run.
    pub notifications: Vec<Notification>,
    /// Number of units that were analyzed.
    pub units_analyzed: usize,
    /// Whether the run stopped before every unit was analyzed.
    pub cancelled: bool,
}

impl AnalysisReport {
    /// Fold one unit's results into the report.
    pub fn merge(&mut self, unit: UnitReport) {
        self.units_analyzed += 1;
        self.findings.extend(unit.findings);
        self.failures.extend(unit.failures);
        self.skipped.extend(unit.skipped);
    }

    /// Add notifications describing failures and reduced coverage.
    pub(crate) fn summarize(&mut self) {
        for failure in &self.failures {
            self.notifications.push(Notification::warning(failure.to_string()));
        }
        for (rule_id, units) in self.skipped_rules() {
            self.notifications.push(Notification::warning(format!(
                "Rule '{rule_id}' requires full analysis and was skipped for {units} unit(s) without binding information."
            )));
        }
        if self.cancelled {
            self.notifications.push(Notification::warning(format!(
                "Analysis was cancelled after {} unit(s).",
                self.units_analyzed
            )));
        }
    }

    /// Findings sorted by unit, location, then rule id.
    pub fn sorted_findings(&self) -> Vec<&Finding> {
        let mut findings: Vec<_> = self.findings.iter().collect();
        findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        findings
    }

    /// How many units each skipped rule missed.
    pub fn skipped_rules(&self) -> BTreeMap<RuleId, usize> {
        let mut counts = BTreeMap::new();
        for skipped in &self.skipped {
            *counts.entry(skipped.rule_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of findings with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Whether every rule ran on every unit.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty() && !self.cancelled
    }
}
