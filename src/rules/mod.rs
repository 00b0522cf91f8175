//! Rules, rule sets and the providers that contribute them.

pub mod builtin;
pub mod configured;
pub mod finding;
pub mod provider;
pub mod registry;
pub mod rule;

pub use builtin::BuiltinProviders;
pub use configured::{is_active, ConfiguredRule, PathFilters, Version};
pub use finding::{Entity, Finding};
pub use provider::{ChainedSource, ProviderOrigin, ProviderSource, RuleSetProvider, StaticProviders};
pub use registry::ProviderRegistry;
pub use rule::{Analysis, Rule, RuleId, RuleSet};
