//! Exception-handling rules.

use super::BUILTIN_SINCE;
use crate::config::Config;
use crate::engine::RuleContext;
use crate::rules::{Analysis, ProviderOrigin, Rule, RuleSet, RuleSetProvider};
use crate::syntax::{BindingContext, NodeKind, SyntaxNode};

/// Provides the `exceptions` rule set.
pub struct ExceptionsProvider;

impl RuleSetProvider for ExceptionsProvider {
    fn rule_set_id(&self) -> &str {
        "exceptions"
    }

    fn origin(&self) -> ProviderOrigin {
        ProviderOrigin::Default
    }

    fn instance(&self, _config: &Config) -> RuleSet {
        RuleSet::new(self.rule_set_id(), vec![Box::new(InstanceOfCheckForException)])
    }
}

/// Reports `is` checks and unsafe casts of a caught exception inside its
/// catch block. Catching the specific type in its own block is clearer.
pub struct InstanceOfCheckForException;

impl Rule for InstanceOfCheckForException {
    fn name(&self) -> &str {
        "InstanceOfCheckForException"
    }

    fn description(&self) -> &str {
        "Instead of catching for a general exception type and checking for a specific exception type, use multiple catch blocks."
    }

    fn active_by_default(&self) -> Option<&str> {
        Some(BUILTIN_SINCE)
    }

    fn analysis(&self) -> Analysis {
        Analysis::Full
    }

    fn visit(&self, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        let bindings = ctx.require_bindings()?;
        for catch in ctx.root().descendants_of_kind(&NodeKind::CatchClause) {
            let Some(parameter) = catch.child_of_kind(&NodeKind::Parameter) else {
                continue;
            };
            let Some(body) = catch.child_of_kind(&NodeKind::Block) else {
                continue;
            };
            for check in body.descendants().filter(|n| {
                matches!(n.kind(), NodeKind::IsExpression | NodeKind::UnsafeCast)
            }) {
                if is_check_for_subtype_of(check, parameter, bindings) {
                    ctx.report(check, self.description());
                }
            }
        }
        Ok(())
    }
}

/// `check` is `<name> is <Type>` or `<name> as <Type>`. It counts when the
/// name is the catch parameter and the type is a subtype of the caught
/// type; unresolved types count too.
fn is_check_for_subtype_of(
    check: &SyntaxNode,
    parameter: &SyntaxNode,
    bindings: &dyn BindingContext,
) -> bool {
    let (Some(left), Some(right)) = (
        check.child_of_kind(&NodeKind::NameReference),
        check.child_of_kind(&NodeKind::TypeReference),
    ) else {
        return false;
    };
    if parameter.name() != Some(left.text().trim()) {
        return false;
    }

    let checked = bindings.type_of(right.id());
    let caught = parameter
        .child_of_kind(&NodeKind::TypeReference)
        .and_then(|t| bindings.type_of(t.id()));
    match (checked, caught) {
        (Some(checked), Some(caught)) => bindings.is_subtype_of(&checked, &caught),
        _ => true,
    }
}
