//! Running the configured rules over many units.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::executor::{self, UnitReport};
use super::report::AnalysisReport;
use super::settings::Settings;
use crate::config::Config;
use crate::error::Result;
use crate::rules::{ConfiguredRule, ProviderRegistry};
use crate::syntax::AnalysisUnit;

/// Rules resolved against one configuration, ready to analyze units.
///
/// Built once per run; shared read-only across worker threads.
#[derive(Debug)]
pub struct Analyzer {
    settings: Settings,
    rules: Vec<ConfiguredRule>,
}

impl Analyzer {
    /// Instantiate every provider's rule set and bind its rules to `config`.
    ///
    /// # Errors
    ///
    /// Fails on configuration values of the wrong type, unknown severities
    /// and invalid path filters.
    pub fn new(registry: &ProviderRegistry, config: &Config, settings: Settings) -> Result<Self> {
        let config = if settings.build_upon_default_config {
            config.build_upon(&Config::baseline())?
        } else {
            config.clone()
        };

        let mut rules = Vec::new();
        for provider in registry.create_rule_providers() {
            let rule_set_id = provider.rule_set_id();
            let rule_set_config = config.sub_config(rule_set_id)?;
            let rule_set = provider.instance(&rule_set_config);
            if rule_set.id != rule_set_id {
                warn!(
                    "Provider '{}' returned rule set '{}'; using the provider id",
                    rule_set_id, rule_set.id
                );
            }
            for rule in rule_set.rules {
                rules.push(ConfiguredRule::new(rule, &rule_set_config, &settings)?);
            }
        }

        info!(
            "Prepared {} rules ({} active)",
            rules.len(),
            rules.iter().filter(|r| r.is_active()).count()
        );
        Ok(Self { settings, rules })
    }

    /// All configured rules, active or not, in provider order.
    pub fn rules(&self) -> &[ConfiguredRule] {
        &self.rules
    }

    pub fn active_rules(&self) -> impl Iterator<Item = &ConfiguredRule> {
        self.rules.iter().filter(|r| r.is_active())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Analyze a single unit.
    pub fn run(&self, unit: &AnalysisUnit) -> UnitReport {
        executor::run(unit, &self.rules)
    }

    /// Analyze every unit.
    pub fn analyze(&self, units: &[AnalysisUnit]) -> AnalysisReport {
        self.analyze_until(units, &AtomicBool::new(false))
    }

    /// Analyze units until `cancel` is set.
    ///
    /// Cancellation is checked before each unit; a unit already started
    /// runs to completion. Findings of completed units are kept.
    pub fn analyze_until(&self, units: &[AnalysisUnit], cancel: &AtomicBool) -> AnalysisReport {
        let analyze_one = |unit: &AnalysisUnit| {
            if cancel.load(Ordering::Relaxed) {
                debug!("Cancelled before {}", unit.path().display());
                None
            } else {
                Some(self.run(unit))
            }
        };

        let results: Vec<Option<UnitReport>> = if self.settings.parallel {
            units.par_iter().map(analyze_one).collect()
        } else {
            units.iter().map(analyze_one).collect()
        };

        let mut report = AnalysisReport::default();
        for result in results {
            match result {
                Some(unit) => report.merge(unit),
                None => report.cancelled = true,
            }
        }
        report.summarize();

        info!(
            "Analyzed {} of {} units: {} findings, {} rule failures",
            report.units_analyzed,
            units.len(),
            report.findings.len(),
            report.failures.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RuleContext;
    use crate::rules::{Rule, RuleSet, RuleSetProvider, StaticProviders};
    use crate::syntax::{NodeKind, SyntaxNode, SyntaxTree, TextRange, TypeTable};
    use crate::VigilError;

    struct ClassCounter;

    impl Rule for ClassCounter {
        fn name(&self) -> &str {
            "ClassCounter"
        }
        fn description(&self) -> &str {
            "reports every class"
        }
        fn visit(&self, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
            for class in ctx.root().descendants_of_kind(&NodeKind::ClassOrObject) {
                ctx.report(class, "class");
            }
            Ok(())
        }
    }

    struct Custom;

    impl RuleSetProvider for Custom {
        fn rule_set_id(&self) -> &str {
            "custom"
        }
        fn instance(&self, _config: &Config) -> RuleSet {
            RuleSet::new("custom", vec![Box::new(ClassCounter)])
        }
    }

    fn units(count: usize) -> Vec<AnalysisUnit> {
        (0..count)
            .map(|i| {
                let root = SyntaxNode::new(NodeKind::File, "", TextRange::line(1)).with_child(
                    SyntaxNode::new(
                        NodeKind::ClassOrObject,
                        "class A : Any()",
                        TextRange::line(1),
                    )
                    .named("A")
                    .with_child(SyntaxNode::new(
                        NodeKind::SuperTypeEntry,
                        "Any()",
                        TextRange::line(1),
                    )),
                );
                AnalysisUnit::new(format!("src/File{i}.kt"), SyntaxTree::new(root))
            })
            .collect()
    }

    fn registry() -> ProviderRegistry {
        ProviderRegistry::with_plugins(StaticProviders::new().with(Custom))
    }

    fn enabled() -> Config {
        Config::from_yaml_str("custom:\n  ClassCounter:\n    active: true\n").unwrap()
    }

    #[test]
    fn builds_rules_for_every_provider() {
        let analyzer = Analyzer::new(&registry(), &enabled(), Settings::default()).unwrap();
        let ids: Vec<_> = analyzer.rules().iter().map(|r| r.id().to_string()).collect();
        assert!(ids.contains(&"custom.ClassCounter".to_string()));
        assert!(ids.contains(&"style.UnnecessaryInheritance".to_string()));
        assert!(ids.contains(&"exceptions.InstanceOfCheckForException".to_string()));
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let units = units(8);
        let sequential = Analyzer::new(&registry(), &enabled(), Settings::default())
            .unwrap()
            .analyze(&units);
        let parallel = Analyzer::new(
            &registry(),
            &enabled(),
            Settings {
                parallel: true,
                ..Settings::default()
            },
        )
        .unwrap()
        .analyze(&units);

        assert_eq!(sequential.units_analyzed, 8);
        assert_eq!(parallel.units_analyzed, 8);
        assert_eq!(sequential.sorted_findings(), parallel.sorted_findings());
        // ClassCounter plus UnnecessaryInheritance on every unit.
        assert_eq!(sequential.findings.len(), 16);
    }

    #[test]
    fn skipped_full_analysis_rules_are_summarized() {
        let analyzer = Analyzer::new(&registry(), &Config::empty(), Settings::default()).unwrap();
        let report = analyzer.analyze(&units(2));

        assert!(!report.is_complete());
        let skipped = report.skipped_rules();
        assert_eq!(skipped.len(), 2);
        assert!(report
            .notifications
            .iter()
            .any(|n| n.message.contains("style.UseRequireNotNull")));
    }

    #[test]
    fn units_with_bindings_run_full_analysis_rules() {
        let analyzer = Analyzer::new(&registry(), &Config::empty(), Settings::default()).unwrap();
        let units: Vec<_> = units(1)
            .into_iter()
            .map(|u| {
                let path = u.path().to_path_buf();
                let tree = u.tree().clone();
                AnalysisUnit::new(path, tree).with_bindings(TypeTable::new())
            })
            .collect();
        let report = analyzer.analyze(&units);
        assert!(report.skipped.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn cancelled_run_keeps_partial_results() {
        let analyzer = Analyzer::new(&registry(), &enabled(), Settings::default()).unwrap();
        let cancel = AtomicBool::new(true);
        let report = analyzer.analyze_until(&units(3), &cancel);

        assert!(report.cancelled);
        assert_eq!(report.units_analyzed, 0);
        assert!(report.findings.is_empty());
        assert!(report
            .notifications
            .iter()
            .any(|n| n.message.contains("cancelled")));
    }

    #[test]
    fn disabled_rule_set_produces_no_findings() {
        let config = Config::from_yaml_str(
            "style:\n  active: false\ncustom:\n  active: false\n  ClassCounter:\n    active: true\n",
        )
        .unwrap();
        let analyzer = Analyzer::new(&registry(), &config, Settings::default()).unwrap();
        let report = analyzer.analyze(&units(2));
        assert!(report.findings.is_empty());
    }

    #[test]
    fn building_upon_baseline_keeps_user_values() {
        let config = Config::from_yaml_str("style:\n  UnnecessaryInheritance:\n    active: false\n").unwrap();
        let analyzer = Analyzer::new(
            &ProviderRegistry::with_builtins(),
            &config,
            Settings {
                build_upon_default_config: true,
                ..Settings::default()
            },
        )
        .unwrap();
        let inheritance = analyzer
            .rules()
            .iter()
            .find(|r| r.id().name == "UnnecessaryInheritance")
            .unwrap();
        assert!(!inheritance.is_active());
        assert!(analyzer.active_rules().any(|r| r.id().name == "UseRequireNotNull"));
    }

    #[test]
    fn bad_severity_fails_construction() {
        let config = Config::from_yaml_str("style:\n  severity: loud\n").unwrap();
        let result = Analyzer::new(&ProviderRegistry::with_builtins(), &config, Settings::default());
        assert!(matches!(result, Err(VigilError::UnrecognizedSeverity { .. })));
    }
}
