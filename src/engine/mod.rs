//! Rule execution.
//!
//! - [`Settings`]: run-wide switches
//! - [`RuleContext`]: what a rule sees for one unit
//! - [`run`]: every rule over one unit, with failure isolation
//! - [`Analyzer`]: configured rules over many units, optionally in parallel

pub mod analyzer;
pub mod context;
pub mod executor;
pub mod report;
pub mod settings;

pub use analyzer::Analyzer;
pub use context::RuleContext;
pub use executor::{run, RuleFailure, RuleInvocation, RuleState, SkipReason, SkippedRule, UnitReport};
pub use report::AnalysisReport;
pub use settings::Settings;
