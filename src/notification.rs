//! Configuration and operational notifications.
//!
//! A [`Notification`] is about the run itself (a misspelled config key, a
//! skipped rule), never about the analyzed source. Source issues are
//! [`Finding`](crate::rules::Finding)s.

use serde::Serialize;

use crate::severity::Severity;

/// A lightweight diagnostic about configuration or the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Human-readable message.
    pub message: String,
    /// Optional severity; `None` means purely informational.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Notification {
    /// Create a new notification.
    pub fn new(message: impl Into<String>, severity: Option<Severity>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    /// Create an error-level notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Some(Severity::Error))
    }

    /// Create a warning-level notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Some(Severity::Warning))
    }

    /// Whether this notification should fail a configuration check.
    pub fn is_error(&self) -> bool {
        self.severity == Some(Severity::Error)
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.severity {
            Some(severity) => write!(f, "[{}] {}", severity, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
