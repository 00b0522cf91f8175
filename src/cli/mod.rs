//! Command-line interface for Vigil.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompileArgs, RulesArgs, SeverityArgs, ValidateArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
