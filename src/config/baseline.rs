//! The bundled baseline configuration.
//!
//! The baseline lists every configuration key Vigil and its built-in rule
//! sets understand. It is the schema user configurations are validated
//! against, and the fallback when a run builds upon the defaults.

use std::sync::LazyLock;

use super::node::Config;

/// Raw YAML of the bundled baseline.
pub const DEFAULT_CONFIG: &str = include_str!("default-config.yml");

static BASELINE: LazyLock<Config> = LazyLock::new(|| {
    Config::from_yaml_str(DEFAULT_CONFIG).expect("bundled default config is a valid mapping")
});

impl Config {
    /// The bundled baseline configuration.
    pub fn baseline() -> Config {
        BASELINE.clone()
    }
}
