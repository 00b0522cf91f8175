//! Rule sets shipped with Vigil.
//!
//! Their configuration keys are part of the bundled baseline, so the
//! validator checks them strictly.

pub mod exceptions;
pub mod style;

use std::sync::Arc;

use super::provider::{ProviderSource, RuleSetProvider};

pub use exceptions::{ExceptionsProvider, InstanceOfCheckForException};
pub use style::{StyleProvider, UnnecessaryInheritance, UseRequireNotNull};

/// Version since which the newer built-in rules are active by default.
pub(crate) const BUILTIN_SINCE: &str = "1.21.0";

/// Source of the built-in rule-set providers.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinProviders;

impl ProviderSource for BuiltinProviders {
    fn providers(&self) -> Vec<Arc<dyn RuleSetProvider>> {
        vec![Arc::new(ExceptionsProvider), Arc::new(StyleProvider)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rules::ProviderOrigin;

    #[test]
    fn builtins_are_default_origin() {
        let providers = BuiltinProviders.providers();
        assert_eq!(providers.len(), 2);
        assert!(providers
            .iter()
            .all(|p| p.origin() == ProviderOrigin::Default));
    }

    #[test]
    fn every_builtin_rule_has_a_baseline_entry() {
        let baseline = Config::baseline();
        for provider in BuiltinProviders.providers() {
            let set_config = baseline.sub_config(provider.rule_set_id()).unwrap();
            assert!(!set_config.is_empty(), "{} missing", provider.rule_set_id());
            for rule in provider.instance(&set_config).rules {
                assert!(
                    set_config.contains(rule.name()),
                    "{}.{} missing from baseline",
                    provider.rule_set_id(),
                    rule.name()
                );
            }
        }
    }
}
