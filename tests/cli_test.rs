//! Integration tests for the command-line interface.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write(temp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Rule-set orchestration engine"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn validate_accepts_known_keys() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = write(&temp, "vigil.yml", "style:\n  UseRequireNotNull:\n    active: false\n");
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.arg("validate").arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid."));
    Ok(())
}

#[test]
fn validate_rejects_misspelled_keys() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = write(&temp, "vigil.yml", "style:\n  FooBarBaz:\n    active: true\n");
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.arg("validate").arg(&config);
    cmd.assert().code(1).stdout(predicate::str::contains(
        "Property 'style.FooBarBaz' is misspelled or does not exist.",
    ));
    Ok(())
}

#[test]
fn validate_later_files_can_add_excludes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let base = write(&temp, "base.yml", "build:\n  legacyKey: 1\n");
    let local = write(&temp, "local.yml", "config:\n  excludes: ['build\\..*']\n");
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.arg("validate").arg(&base).arg(&local);
    cmd.assert().success();
    Ok(())
}

#[test]
fn validate_missing_file_exits_with_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.arg("validate").arg(temp.path().join("missing.yml"));
    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("Cannot load configuration"));
    Ok(())
}

#[test]
fn rules_lists_builtin_rule_sets() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.arg("rules");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("style.UnnecessaryInheritance"))
        .stdout(predicate::str::contains("exceptions.InstanceOfCheckForException"));
    Ok(())
}

#[test]
fn rules_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.args(["rules", "--json"]);
    let output = cmd.output()?;
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert!(parsed.is_array());
    Ok(())
}

#[test]
fn severity_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.args(["severity", "mInOr"]);
    cmd.assert().success().stdout("Minor\n");
    Ok(())
}

#[test]
fn severity_rejects_unknown_names() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.args(["severity", "blocker"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Unrecognized severity: 'blocker'"));
    Ok(())
}

#[test]
fn compile_reports_diagnostics() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let script = write(&temp, "settings.vgs", "val unknownType: UnknownType\n");
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.arg("compile").arg(&script);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Unresolved reference: UnknownType"));
    Ok(())
}

#[test]
fn compile_prints_declarations() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let script = write(&temp, "settings.vgs", "package cfg\nval limit: Int = 3\n");
    let mut cmd = Command::new(cargo_bin("vigil"));
    cmd.arg("compile").arg(&script);
    cmd.assert().success().stdout("val cfg.limit: Int\n");
    Ok(())
}
