//! Issue severities.
//!
//! [`Severity`] is a closed set. Configuration strings are mapped onto it
//! with [`parse_to_severity`], which ignores case but otherwise requires an
//! exact name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VigilError};

/// Severity of a finding or notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, no action required.
    Info,
    /// Minor issue, usually cosmetic.
    Minor,
    /// Should be addressed.
    Warning,
    /// Likely bug in the analyzed code.
    Defect,
    /// Must be fixed.
    Error,
}

impl Severity {
    /// Every severity, in declaration order.
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Minor,
        Severity::Warning,
        Severity::Defect,
        Severity::Error,
    ];

    /// Canonical name of this severity.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Minor => "Minor",
            Severity::Warning => "Warning",
            Severity::Defect => "Defect",
            Severity::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name().to_lowercase())
    }
}

impl FromStr for Severity {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self> {
        parse_to_severity(s)
    }
}

/// Parse a severity name, ignoring case.
///
/// # Errors
///
/// Returns `UnrecognizedSeverity` when `text` is not a spelling of any
/// severity name. Surrounding whitespace is not trimmed.
pub fn parse_to_severity(text: &str) -> Result<Severity> {
    Severity::ALL
        .into_iter()
        .find(|severity| severity.name().eq_ignore_ascii_case(text))
        .ok_or_else(|| VigilError::UnrecognizedSeverity {
            text: text.to_string(),
        })
}
