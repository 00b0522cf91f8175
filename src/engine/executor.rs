//! Running rules over one analysis unit.
//!
//! Every rule invocation moves through [`RuleState`]:
//! `NotStarted -> Running -> Completed | Failed`, or straight to `Skipped`
//! when a full-analysis rule meets a unit without bindings. A failing rule
//! (error or panic) is recorded and the remaining rules still run.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use serde::Serialize;

use super::context::RuleContext;
use crate::rules::{Analysis, ConfiguredRule, Finding, RuleId};
use crate::syntax::AnalysisUnit;

/// Lifecycle state of one rule invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleState {
    NotStarted,
    Running,
    Completed,
    Failed,
    Skipped,
}

/// One rule applied to one unit.
#[derive(Debug, Clone, Serialize)]
pub struct RuleInvocation {
    pub rule_id: RuleId,
    pub state: RuleState,
}

impl RuleInvocation {
    fn new(rule_id: RuleId) -> Self {
        Self {
            rule_id,
            state: RuleState::NotStarted,
        }
    }

    fn transition(&mut self, to: RuleState) {
        let allowed = matches!(
            (self.state, to),
            (RuleState::NotStarted, RuleState::Running)
                | (RuleState::NotStarted, RuleState::Skipped)
                | (RuleState::Running, RuleState::Completed)
                | (RuleState::Running, RuleState::Failed)
        );
        debug_assert!(allowed, "invalid transition {:?} -> {:?}", self.state, to);
        self.state = to;
    }
}

/// A rule that errored or panicked on a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFailure {
    pub rule_id: RuleId,
    pub unit: PathBuf,
    pub cause: String,
}

impl std::fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rule '{}' failed on '{}': {}",
            self.rule_id,
            self.unit.display(),
            self.cause
        )
    }
}

/// Why a rule did not run on a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The rule needs binding information the unit does not have.
    MissingBindings,
}

/// A rule that was not run on a unit, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRule {
    pub rule_id: RuleId,
    pub unit: PathBuf,
    pub reason: SkipReason,
}

/// Everything produced by running rules over one unit.
#[derive(Debug, Clone, Serialize)]
pub struct UnitReport {
    pub unit: PathBuf,
    pub findings: Vec<Finding>,
    pub failures: Vec<RuleFailure>,
    pub skipped: Vec<SkippedRule>,
    pub invocations: Vec<RuleInvocation>,
}

impl UnitReport {
    fn new(unit: &AnalysisUnit) -> Self {
        Self {
            unit: unit.path().to_path_buf(),
            findings: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
            invocations: Vec::new(),
        }
    }

    /// Final state of a rule on this unit, if it was considered at all.
    pub fn state_of(&self, rule_id: &RuleId) -> Option<RuleState> {
        self.invocations
            .iter()
            .find(|i| &i.rule_id == rule_id)
            .map(|i| i.state)
    }
}

/// Run every active rule that applies to `unit`.
///
/// Never fails: rule errors and panics become [`RuleFailure`]s. Findings
/// of each rule keep the order the rule reported them in; rules are run in
/// the order given.
pub fn run(unit: &AnalysisUnit, rules: &[ConfiguredRule]) -> UnitReport {
    let mut report = UnitReport::new(unit);

    for rule in rules
        .iter()
        .filter(|r| r.is_active() && r.applies_to(unit.path()))
    {
        let mut invocation = RuleInvocation::new(rule.id().clone());

        if rule.analysis() == Analysis::Full && !unit.has_bindings() {
            tracing::debug!(
                "Skipping {} on {}: no binding information",
                rule.id(),
                unit.path().display()
            );
            invocation.transition(RuleState::Skipped);
            report.skipped.push(SkippedRule {
                rule_id: rule.id().clone(),
                unit: unit.path().to_path_buf(),
                reason: SkipReason::MissingBindings,
            });
            report.invocations.push(invocation);
            continue;
        }

        invocation.transition(RuleState::Running);
        match execute(unit, rule) {
            Ok(findings) => {
                invocation.transition(RuleState::Completed);
                report.findings.extend(findings);
            }
            Err(cause) => {
                tracing::warn!(
                    "Rule {} failed on {}: {}",
                    rule.id(),
                    unit.path().display(),
                    cause
                );
                invocation.transition(RuleState::Failed);
                report.failures.push(RuleFailure {
                    rule_id: rule.id().clone(),
                    unit: unit.path().to_path_buf(),
                    cause,
                });
            }
        }
        report.invocations.push(invocation);
    }

    report
}

fn execute(unit: &AnalysisUnit, rule: &ConfiguredRule) -> Result<Vec<Finding>, String> {
    let mut ctx = RuleContext::new(rule.id(), unit, rule.config(), rule.severity());
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.rule().visit(&mut ctx)));
    match outcome {
        Ok(Ok(())) => Ok(ctx.into_findings()),
        Ok(Err(err)) => Err(format!("{err:#}")),
        Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
