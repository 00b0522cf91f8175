//! Severity command implementation.

use std::io::Write;

use crate::cli::args::SeverityArgs;
use crate::error::{Result, VigilError};
use crate::severity::parse_to_severity;

use super::dispatcher::{Command, CommandResult};

/// Prints the canonical name of a severity.
pub struct SeverityCommand {
    args: SeverityArgs,
}

impl SeverityCommand {
    pub fn new(args: SeverityArgs) -> Self {
        Self { args }
    }
}

impl Command for SeverityCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        match parse_to_severity(&self.args.text) {
            Ok(severity) => {
                writeln!(out, "{}", severity.name())?;
                Ok(CommandResult::success())
            }
            Err(err @ VigilError::UnrecognizedSeverity { .. }) => {
                writeln!(out, "{err}")?;
                Ok(CommandResult::failure(1))
            }
            Err(err) => Err(err),
        }
    }
}
