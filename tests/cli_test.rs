//! Binary-level tests for the `prodlens` CLI.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_rule(dir: &std::path::Path, name: &str, yaml: &str) {
    fs::write(dir.join(name), yaml).unwrap();
}

#[test]
fn test_scan_emits_markdown_report() {
    let repo = TempDir::new().unwrap();
    fs::write(repo.path().join("main.rs"), "fn main() {}").unwrap();

    let rules = TempDir::new().unwrap();
    write_rule(
        rules.path(),
        "clean.yaml",
        "id: always-clean\nseverity: low\ndetect:\n  any_of:\n    - file_exists: \"never-there\"\n",
    );

    Command::cargo_bin("prodlens")
        .unwrap()
        .arg("scan")
        .arg(repo.path())
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# Production Readiness Report"))
        .stdout(predicate::str::contains("**Overall Score: 100 / 100**"));
}

#[test]
fn test_scan_json_is_parseable_and_exit_code_reflects_high_finding() {
    let repo = TempDir::new().unwrap();
    fs::write(repo.path().join(".env"), "API_KEY=x").unwrap();

    let rules = TempDir::new().unwrap();
    write_rule(
        rules.path(),
        "secret.yaml",
        "id: secret\nseverity: high\ndetect:\n  any_of:\n    - file_exists: \".env\"\n",
    );

    let output = Command::cargo_bin("prodlens")
        .unwrap()
        .arg("scan")
        .arg(repo.path())
        .arg("--rules")
        .arg(rules.path())
        .arg("--format")
        .arg("json")
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["summary"]["high"], 1);
    assert_eq!(parsed["summary"]["score"], 80);
    assert_eq!(parsed["findings"]["high"][0]["id"], "secret");
}

#[test]
fn test_scan_missing_path_fails_with_error_exit_code() {
    let rules = TempDir::new().unwrap();
    write_rule(rules.path(), "r.yaml", "id: r\nseverity: low\n");

    Command::cargo_bin("prodlens")
        .unwrap()
        .arg("scan")
        .arg("/definitely/not/a/path")
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_scan_broken_rules_fail_with_clear_message() {
    let repo = TempDir::new().unwrap();
    fs::write(repo.path().join("main.rs"), "fn main() {}").unwrap();

    let rules = TempDir::new().unwrap();
    write_rule(rules.path(), "broken.yaml", "id: [unclosed\n");

    Command::cargo_bin("prodlens")
        .unwrap()
        .arg("scan")
        .arg(repo.path())
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("loading rules"));
}

#[test]
fn test_config_file_supplies_format_default() {
    let repo = TempDir::new().unwrap();
    fs::write(repo.path().join("main.rs"), "fn main() {}").unwrap();

    let rules = TempDir::new().unwrap();
    write_rule(rules.path(), "r.yaml", "id: r\nseverity: low\n");

    // The config asks for JSON; no --format flag is passed.
    fs::write(
        repo.path().join(".prodlens.toml"),
        format!("[scan]\nformat = \"json\"\nrules_dir = \"{}\"\n", rules.path().display()),
    )
    .unwrap();

    let output = Command::cargo_bin("prodlens")
        .unwrap()
        .arg("scan")
        .arg(repo.path())
        .assert()
        .get_output()
        .stdout
        .clone();

    assert!(serde_json::from_slice::<serde_json::Value>(&output).is_ok());
}
