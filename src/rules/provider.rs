//! Rule-set providers and where they come from.
//!
//! A [`RuleSetProvider`] contributes one rule set. Providers are found by a
//! [`ProviderSource`]; the registry never discovers anything itself, it only
//! consumes the sequence a source hands it.

use std::sync::Arc;

use super::rule::RuleSet;
use crate::config::Config;

/// Where a provider comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOrigin {
    /// Shipped with Vigil; its keys are part of the baseline.
    Default,
    /// Supplied by the embedding environment.
    Plugin,
}

/// Contributes one rule set.
pub trait RuleSetProvider: Send + Sync {
    /// Unique id of the rule set; also its top-level config key.
    fn rule_set_id(&self) -> &str;

    /// Origin of this provider. Anything not built in is a plugin.
    fn origin(&self) -> ProviderOrigin {
        ProviderOrigin::Plugin
    }

    /// Build the rule set, given the config rooted at `<rule_set_id>`.
    fn instance(&self, config: &Config) -> RuleSet;
}

/// Supplies the providers available for a run.
pub trait ProviderSource: Send + Sync {
    fn providers(&self) -> Vec<Arc<dyn RuleSetProvider>>;
}

/// A fixed list of providers, e.g. plugins loaded by the embedder.
#[derive(Default, Clone)]
pub struct StaticProviders {
    providers: Vec<Arc<dyn RuleSetProvider>>,
}

impl StaticProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider.
    pub fn with(mut self, provider: impl RuleSetProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }
}

impl ProviderSource for StaticProviders {
    fn providers(&self) -> Vec<Arc<dyn RuleSetProvider>> {
        self.providers.clone()
    }
}

/// Several sources queried in order.
#[derive(Default)]
pub struct ChainedSource {
    sources: Vec<Box<dyn ProviderSource>>,
}

impl ChainedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source; its providers come after those already chained.
    pub fn with(mut self, source: impl ProviderSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl ProviderSource for ChainedSource {
    fn providers(&self) -> Vec<Arc<dyn RuleSetProvider>> {
        self.sources.iter().flat_map(|s| s.providers()).collect()
    }
}
