//! Vigil - Static-analysis rule orchestration.
//!
//! Vigil loads pluggable rule sets, runs them over syntax trees (with
//! optional binding information), collects findings, and validates user
//! configuration against a bundled baseline.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration trees, loading, merging, and validation
//! - [`engine`] - Rule execution with failure isolation
//! - [`error`] - Error types and result aliases
//! - [`notification`] - Configuration and run diagnostics
//! - [`rules`] - Rules, rule sets, providers, and the built-in rule sets
//! - [`script`] - Cached compilation of configuration scripts
//! - [`severity`] - Issue severities
//! - [`syntax`] - Syntax trees and binding information consumed by rules
//!
//! # Example
//!
//! ```
//! use vigil::config::Config;
//! use vigil::engine::{Analyzer, Settings};
//! use vigil::rules::ProviderRegistry;
//! use vigil::syntax::{AnalysisUnit, NodeKind, SyntaxNode, SyntaxTree, TextRange};
//!
//! let class = SyntaxNode::new(NodeKind::ClassOrObject, "class A : Any()", TextRange::line(1))
//!     .named("A")
//!     .with_child(SyntaxNode::new(NodeKind::SuperTypeEntry, "Any()", TextRange::line(1)));
//! let root = SyntaxNode::new(NodeKind::File, "", TextRange::line(1)).with_child(class);
//! let unit = AnalysisUnit::new("src/A.kt", SyntaxTree::new(root));
//!
//! let analyzer = Analyzer::new(&ProviderRegistry::with_builtins(), &Config::empty(), Settings::default()).unwrap();
//! let report = analyzer.analyze(&[unit]);
//! assert_eq!(report.findings[0].message, "Unnecessary inheritance of 'Any'.");
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod notification;
pub mod rules;
pub mod script;
pub mod severity;
pub mod syntax;

pub use error::{Result, VigilError};
pub use notification::Notification;
pub use severity::{parse_to_severity, Severity};
