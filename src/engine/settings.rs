//! Run-wide settings.

/// Settings that apply to a whole analysis run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Version used to decide which rules are active by default.
    pub engine_version: String,
    /// Analyze units in parallel.
    pub parallel: bool,
    /// Activate every rule that is not explicitly disabled.
    pub all_rules: bool,
    /// Layer the user configuration over the bundled baseline.
    pub build_upon_default_config: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            parallel: false,
            all_rules: false,
            build_upon_default_config: false,
        }
    }
}
