//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands write
//! to any [`std::io::Write`], so they can be tested without a terminal.

pub mod compile;
pub mod dispatcher;
pub mod rules;
pub mod severity;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
