//! Error types for Vigil operations.
//!
//! This module defines [`VigilError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration and script errors are precise: they carry the offending
//!   text, pattern, or path
//! - Rule execution errors never surface here; the engine records them as
//!   [`RuleFailure`](crate::engine::RuleFailure) and keeps going
//! - Use `anyhow::Error` (via `VigilError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::notification::Notification;
use crate::script::ScriptDiagnostic;

/// Core error type for Vigil operations.
#[derive(Debug, Error)]
pub enum VigilError {
    /// A severity name did not match any known severity.
    #[error("Unrecognized severity: '{text}'")]
    UnrecognizedSeverity { text: String },

    /// A user-supplied exclude pattern is not a valid regular expression.
    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidExcludePattern { pattern: String, message: String },

    /// A rule's `includes`/`excludes` entry is not a valid glob.
    #[error("Invalid path filter '{pattern}': {message}")]
    InvalidPathFilter { pattern: String, message: String },

    /// A script failed to compile.
    #[error("Script compilation failed: {}", join_diagnostics(.diagnostics))]
    ScriptCompilation { diagnostics: Vec<ScriptDiagnostic> },

    /// A configuration value has a different type than requested.
    #[error("Config value at '{path}' is not a valid {expected}")]
    ConfigTypeMismatch { path: String, expected: String },

    /// Failed to parse a configuration document.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Configuration validation produced error-level notifications.
    #[error("Invalid configuration: {}", join_notifications(.notifications))]
    InvalidConfig { notifications: Vec<Notification> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn join_diagnostics(diagnostics: &[ScriptDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| n.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for Vigil operations.
pub type Result<T> = std::result::Result<T, VigilError>;
