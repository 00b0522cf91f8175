//! Compilation of configuration scripts.
//!
//! Scripts are small declaration files (package, imports, classes, typed
//! properties with literal values). [`ScriptCompiler`] parses and checks them
//! and caches the resulting [`CompiledScript`] by a fingerprint of the
//! normalized source.
//!
//! # Example
//!
//! ```
//! use vigil::script::ScriptCompiler;
//!
//! let compiler = ScriptCompiler::new();
//! let script = compiler.compile("package config\nval maxIssues: Int = 5\n").unwrap();
//! assert_eq!(script.qualified_name("maxIssues"), "config.maxIssues");
//! assert!(compiler.compile("val broken: Missing").is_err());
//! ```

pub mod artifact;
pub mod checker;
pub mod compiler;
pub mod parser;

pub use artifact::{CompiledScript, Declaration, Literal, ScriptDiagnostic};
pub use checker::CompilerSession;
pub use compiler::{fingerprint, ScriptCompiler, DEFAULT_CACHE_CAPACITY};
pub use parser::normalize;
