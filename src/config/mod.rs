//! Configuration trees, loading, and validation.
//!
//! - The [`Config`] node type in [`node`]
//! - The bundled baseline in [`baseline`]
//! - File loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation against the baseline in [`validator`]
//!
//! # Example
//!
//! ```
//! use vigil::config::{validate, Config};
//! use vigil::rules::ProviderRegistry;
//!
//! let config = Config::from_yaml_str("style:\n  UnnecessaryInheritance:\n    active: false\n").unwrap();
//! let notifications = validate(&config, &ProviderRegistry::with_builtins()).unwrap();
//! assert!(notifications.is_empty());
//! ```

pub mod baseline;
pub mod loader;
pub mod merger;
pub mod node;
pub mod validator;

pub use baseline::DEFAULT_CONFIG;
pub use loader::{load_config_file, load_config_files, parse_config};
pub use merger::{deep_merge, merge_configs};
pub use node::{Config, PATH_SEPARATOR};
pub use validator::{
    check_configuration, validate, validate_config, ConfigValidator, DefaultPropertiesValidator,
    DEFAULT_PROPERTY_EXCLUDES,
};
