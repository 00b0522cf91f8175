//! Registry of rule-set providers.
//!
//! The [`ProviderRegistry`] holds the providers available for a run, in
//! the order their source supplied them. It is read-only once built and can
//! be shared across threads.

use std::sync::Arc;

use super::builtin::BuiltinProviders;
use super::provider::{ChainedSource, ProviderOrigin, ProviderSource, RuleSetProvider};

/// Registry of all rule-set providers for a run.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn RuleSetProvider>>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from everything `source` supplies.
    ///
    /// When two providers share a rule-set id the first one wins.
    pub fn from_source(source: &dyn ProviderSource) -> Self {
        let mut registry = Self::new();
        for provider in source.providers() {
            registry.register(provider);
        }
        tracing::debug!("Registered {} rule-set providers", registry.len());
        registry
    }

    /// A registry with the built-in rule sets only.
    pub fn with_builtins() -> Self {
        Self::from_source(&BuiltinProviders)
    }

    /// The built-in rule sets followed by the plugins from `plugins`.
    pub fn with_plugins(plugins: impl ProviderSource + 'static) -> Self {
        Self::from_source(&ChainedSource::new().with(BuiltinProviders).with(plugins))
    }

    /// Register a provider. Returns `false` if its id is already taken.
    pub fn register(&mut self, provider: Arc<dyn RuleSetProvider>) -> bool {
        if self.get(provider.rule_set_id()).is_some() {
            tracing::warn!(
                "Ignoring duplicate rule-set provider '{}'",
                provider.rule_set_id()
            );
            return false;
        }
        self.providers.push(provider);
        true
    }

    /// All providers, in registration order.
    pub fn create_rule_providers(&self) -> &[Arc<dyn RuleSetProvider>] {
        &self.providers
    }

    /// Get a provider by rule-set id.
    pub fn get(&self, rule_set_id: &str) -> Option<&dyn RuleSetProvider> {
        self.providers
            .iter()
            .find(|p| p.rule_set_id() == rule_set_id)
            .map(|p| p.as_ref())
    }

    /// Providers shipped with Vigil.
    pub fn default_providers(&self) -> impl Iterator<Item = &dyn RuleSetProvider> {
        self.with_origin(ProviderOrigin::Default)
    }

    /// Providers supplied by the embedder.
    pub fn plugin_providers(&self) -> impl Iterator<Item = &dyn RuleSetProvider> {
        self.with_origin(ProviderOrigin::Plugin)
    }

    fn with_origin(&self, origin: ProviderOrigin) -> impl Iterator<Item = &dyn RuleSetProvider> {
        self.providers
            .iter()
            .filter(move |p| p.origin() == origin)
            .map(|p| p.as_ref())
    }

    /// Get the number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rules::provider::StaticProviders;
    use crate::rules::RuleSet;

    struct MockProvider {
        id: &'static str,
        origin: ProviderOrigin,
    }

    impl RuleSetProvider for MockProvider {
        fn rule_set_id(&self) -> &str {
            self.id
        }
        fn origin(&self) -> ProviderOrigin {
            self.origin
        }
        fn instance(&self, _config: &Config) -> RuleSet {
            RuleSet::new(self.id, vec![])
        }
    }

    fn plugin(id: &'static str) -> MockProvider {
        MockProvider {
            id,
            origin: ProviderOrigin::Plugin,
        }
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_with_builtins_has_default_rule_sets() {
        let registry = ProviderRegistry::with_builtins();
        assert!(registry.get("style").is_some());
        assert!(registry.get("exceptions").is_some());
        assert_eq!(registry.plugin_providers().count(), 0);
        assert_eq!(registry.default_providers().count(), registry.len());
    }

    #[test]
    fn origin_is_structural_not_by_name() {
        // A plugin that happens to reuse a familiar-looking id is still a plugin.
        let registry = ProviderRegistry::from_source(
            &StaticProviders::new().with(plugin("style-extra")).with(MockProvider {
                id: "custom",
                origin: ProviderOrigin::Default,
            }),
        );
        let plugins: Vec<_> = registry.plugin_providers().map(|p| p.rule_set_id()).collect();
        let defaults: Vec<_> = registry.default_providers().map(|p| p.rule_set_id()).collect();
        assert_eq!(plugins, vec!["style-extra"]);
        assert_eq!(defaults, vec!["custom"]);
    }

    #[test]
    fn with_plugins_appends_after_builtins() {
        let registry = ProviderRegistry::with_plugins(StaticProviders::new().with(plugin("ktlint")));
        let ids: Vec<_> = registry
            .create_rule_providers()
            .iter()
            .map(|p| p.rule_set_id())
            .collect();
        assert_eq!(ids.last(), Some(&"ktlint"));
        assert_eq!(registry.plugin_providers().count(), 1);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let mut registry = ProviderRegistry::new();
        assert!(registry.register(Arc::new(plugin("a"))));
        assert!(!registry.register(Arc::new(MockProvider {
            id: "a",
            origin: ProviderOrigin::Default,
        })));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().origin(), ProviderOrigin::Plugin);
    }
}
