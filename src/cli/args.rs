//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vigil - Static-analysis rule orchestration.
#[derive(Debug, Parser)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate configuration files against the bundled baseline
    Validate(ValidateArgs),

    /// List the rules of every rule set
    Rules(RulesArgs),

    /// Parse a severity name
    Severity(SeverityArgs),

    /// Compile a configuration script
    Compile(CompileArgs),
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Configuration files, later ones override earlier ones
    #[arg(required = true)]
    pub configs: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `rules` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RulesArgs {
    /// Configuration file deciding which rules are active
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Activate every rule that is not explicitly disabled
    #[arg(long)]
    pub all_rules: bool,

    /// Layer the configuration over the bundled baseline
    #[arg(long)]
    pub build_upon_default_config: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `severity` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SeverityArgs {
    /// Severity name, in any letter case
    pub text: String,
}

/// Arguments for the `compile` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CompileArgs {
    /// Script file to compile
    pub script: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_validate_with_several_files() {
        let cli = Cli::parse_from(["vigil", "validate", "a.yml", "b.yml", "--json"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.configs.len(), 2);
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn debug_flag_is_global() {
        let cli = Cli::parse_from(["vigil", "severity", "warning", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn validate_requires_a_file() {
        assert!(Cli::try_parse_from(["vigil", "validate"]).is_err());
    }
}
