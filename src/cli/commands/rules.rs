//! Rules command implementation.
//!
//! The `vigil rules` command lists every rule of every registered rule set
//! with its activation and severity under a configuration.

use std::io::Write;

use serde::Serialize;

use crate::cli::args::RulesArgs;
use crate::config::{load_config_file, Config};
use crate::engine::{Analyzer, Settings};
use crate::error::Result;
use crate::rules::{Analysis, ProviderRegistry, RuleId};
use crate::severity::Severity;

use super::dispatcher::{Command, CommandResult};

/// One row of the rule listing.
#[derive(Debug, Serialize)]
struct RuleSummary<'a> {
    id: &'a RuleId,
    active: bool,
    severity: Severity,
    analysis: Analysis,
    description: &'a str,
}

/// The rules command implementation.
pub struct RulesCommand {
    args: RulesArgs,
}

impl RulesCommand {
    pub fn new(args: RulesArgs) -> Self {
        Self { args }
    }

    fn settings(&self) -> Settings {
        Settings {
            all_rules: self.args.all_rules,
            build_upon_default_config: self.args.build_upon_default_config,
            ..Settings::default()
        }
    }
}

impl Command for RulesCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let config = match &self.args.config {
            Some(path) => load_config_file(path)?,
            None => Config::empty(),
        };
        let analyzer = Analyzer::new(&ProviderRegistry::with_builtins(), &config, self.settings())?;

        let summaries: Vec<_> = analyzer
            .rules()
            .iter()
            .map(|rule| RuleSummary {
                id: rule.id(),
                active: rule.is_active(),
                severity: rule.severity(),
                analysis: rule.analysis(),
                description: rule.rule().description(),
            })
            .collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&summaries).map_err(anyhow::Error::from)?;
            writeln!(out, "{json}")?;
        } else {
            for summary in &summaries {
                let marker = if summary.active { "+" } else { "-" };
                let full = match summary.analysis {
                    Analysis::Full => " (full analysis)",
                    Analysis::SyntaxOnly => "",
                };
                writeln!(
                    out,
                    "{marker} {} [{}]{full}",
                    summary.id, summary.severity
                )?;
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn run(args: RulesArgs) -> String {
        let mut out = Vec::new();
        let result = RulesCommand::new(args).execute(&mut out).unwrap();
        assert!(result.success);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_builtin_rules() {
        let output = run(RulesArgs::default());
        insta::assert_snapshot!(output, @r###"
        + exceptions.InstanceOfCheckForException [warning] (full analysis)
        + style.UnnecessaryInheritance [warning]
        + style.UseRequireNotNull [warning] (full analysis)
        "###);
    }

    #[test]
    fn config_controls_activation() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vigil.yml");
        fs::write(&path, "style:\n  active: false\n").unwrap();

        let output = run(RulesArgs {
            config: Some(path),
            ..RulesArgs::default()
        });
        assert!(output.contains("- style.UnnecessaryInheritance"));
        assert!(output.contains("+ exceptions.InstanceOfCheckForException"));
    }

    #[test]
    fn json_listing() {
        let output = run(RulesArgs {
            json: true,
            ..RulesArgs::default()
        });
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert_eq!(parsed[0]["id"]["rule_set"], "exceptions");
        assert_eq!(parsed[0]["analysis"], "full");
    }
}
