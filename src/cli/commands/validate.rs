//! Validate command implementation.
//!
//! The `vigil validate` command checks configuration files against the
//! bundled baseline and the built-in rule sets.

use std::io::Write;
use std::path::Path;

use crate::cli::args::ValidateArgs;
use crate::config::{load_config_files, validate};
use crate::error::{Result, VigilError};
use crate::notification::Notification;
use crate::rules::ProviderRegistry;

use super::dispatcher::{Command, CommandResult};

/// The validate command implementation.
pub struct ValidateCommand {
    args: ValidateArgs,
}

impl ValidateCommand {
    pub fn new(args: ValidateArgs) -> Self {
        Self { args }
    }

    fn print(&self, out: &mut dyn Write, notifications: &[Notification]) -> Result<()> {
        if self.args.json {
            let json = serde_json::to_string_pretty(notifications).map_err(anyhow::Error::from)?;
            writeln!(out, "{json}")?;
        } else if notifications.is_empty() {
            writeln!(out, "Configuration is valid.")?;
        } else {
            for notification in notifications {
                writeln!(out, "{notification}")?;
            }
        }
        Ok(())
    }
}

impl Command for ValidateCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let paths: Vec<&Path> = self.args.configs.iter().map(|p| p.as_path()).collect();
        let config = match load_config_files(&paths) {
            Ok(config) => config,
            Err(err @ (VigilError::Io(_) | VigilError::ConfigParse { .. } | VigilError::ConfigTypeMismatch { .. })) => {
                writeln!(out, "Cannot load configuration: {err}")?;
                return Ok(CommandResult::failure(2));
            }
            Err(err) => return Err(err),
        };

        let registry = ProviderRegistry::with_builtins();
        match validate(&config, &registry) {
            Ok(notifications) => {
                self.print(out, &notifications)?;
                Ok(CommandResult::success())
            }
            Err(VigilError::InvalidConfig { notifications }) => {
                tracing::debug!("Validation produced {} notifications", notifications.len());
                self.print(out, &notifications)?;
                Ok(CommandResult::failure(1))
            }
            Err(err @ VigilError::InvalidExcludePattern { .. }) => {
                writeln!(out, "{err}")?;
                Ok(CommandResult::failure(1))
            }
            Err(err) => Err(err),
        }
    }
}
