//! Style rules.

use super::BUILTIN_SINCE;
use crate::config::Config;
use crate::engine::RuleContext;
use crate::rules::{Analysis, Entity, ProviderOrigin, Rule, RuleSet, RuleSetProvider};
use crate::syntax::{walk_kind, NodeKind, SyntaxNode};

/// Provides the `style` rule set.
pub struct StyleProvider;

impl RuleSetProvider for StyleProvider {
    fn rule_set_id(&self) -> &str {
        "style"
    }

    fn origin(&self) -> ProviderOrigin {
        ProviderOrigin::Default
    }

    fn instance(&self, _config: &Config) -> RuleSet {
        RuleSet::new(
            self.rule_set_id(),
            vec![Box::new(UnnecessaryInheritance), Box::new(UseRequireNotNull)],
        )
    }
}

/// Reports classes that explicitly extend `Any` or `Object`.
pub struct UnnecessaryInheritance;

impl Rule for UnnecessaryInheritance {
    fn name(&self) -> &str {
        "UnnecessaryInheritance"
    }

    fn description(&self) -> &str {
        "The extended super type is unnecessary."
    }

    fn active_by_default(&self) -> Option<&str> {
        Some("1.2.0")
    }

    fn visit(&self, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        let path = ctx.path();
        for class in ctx.root().descendants_of_kind(&NodeKind::ClassOrObject) {
            for entry in class
                .children()
                .iter()
                .filter(|c| c.kind() == &NodeKind::SuperTypeEntry)
            {
                let redundant = match entry.text().trim() {
                    "Any()" => "Any",
                    "Object()" => "Object",
                    _ => continue,
                };
                ctx.report_entity(
                    Entity::at_name(path, class),
                    format!("Unnecessary inheritance of '{redundant}'."),
                );
            }
        }
        Ok(())
    }
}

/// Reports `require(x != null)` calls that could be `requireNotNull(x)`.
pub struct UseRequireNotNull;

const REQUIRE_FQ_NAME: &str = "kotlin.require";

impl Rule for UseRequireNotNull {
    fn name(&self) -> &str {
        "UseRequireNotNull"
    }

    fn description(&self) -> &str {
        "Use requireNotNull() instead of require() for checking not-null."
    }

    fn active_by_default(&self) -> Option<&str> {
        Some(BUILTIN_SINCE)
    }

    fn analysis(&self) -> Analysis {
        Analysis::Full
    }

    fn visit(&self, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        let bindings = ctx.require_bindings()?;
        let root = ctx.root();
        walk_kind(root, &NodeKind::CallExpression, |call| {
            if bindings.resolved_call(call.id()).as_deref() == Some(REQUIRE_FQ_NAME)
                && call
                    .child_of_kind(&NodeKind::ValueArgument)
                    .is_some_and(is_not_null_check)
            {
                ctx.report(call, self.description());
            }
            Ok(())
        })
    }
}

/// Whether an argument is `<expr> != null` or `null != <expr>`.
fn is_not_null_check(argument: &SyntaxNode) -> bool {
    let Some(expr) = argument
        .child_of_kind(&NodeKind::BinaryExpression)
        .filter(|expr| expr.name() == Some("!="))
    else {
        return false;
    };
    let is_null = |operand: Option<&SyntaxNode>| operand.is_some_and(|n| n.text().trim() == "null");
    is_null(expr.children().first()) || is_null(expr.children().last())
}
