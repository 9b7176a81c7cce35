//! Integration tests for cskills-cli.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `cskills` run from `dir` with no ambient configuration.
fn cskills(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cskills").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--root")
        .arg(dir);
    cmd
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CURSOR-SKILLS"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_color_env_accepts_any_non_empty_value() {
    let temp = TempDir::new().unwrap();
    for value in ["1", "yes", "true"] {
        cskills(temp.path())
            .env("NO_COLOR", value)
            .args(["emit-config", "php", "settings"])
            .assert()
            .success()
            .stdout(predicate::str::contains("editor.tabSize"))
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

#[test]
fn test_empty_no_color_env_is_ignored() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .env("NO_COLOR", "")
        .args(["emit-config", "php", "settings"])
        .assert()
        .success();
}

#[test]
fn test_emit_config_unknown_environment_prints_empty_object() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .args(["emit-config", "cobol", "settings"])
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"));
}

#[test]
fn test_emit_config_known_environment() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .args(["emit-config", "php", "settings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor.tabSize"));
}

#[test]
fn test_emit_config_launch_fallback_is_shaped() {
    let temp = TempDir::new().unwrap();
    let out = cskills(temp.path())
        .args(["emit-config", "cobol", "launch"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["version"], "0.2.0");
    assert_eq!(value["configurations"], serde_json::json!([]));
}

#[test]
fn test_setup_then_build_writes_site() {
    let temp = TempDir::new().unwrap();

    cskills(temp.path())
        .args(["setup", "--env", "php,node"])
        .assert()
        .success();
    assert!(temp.path().join("php/templates").is_dir());
    assert!(temp.path().join("configs/settings.json").is_file());

    cskills(temp.path())
        .args(["build", "--env", "php,node"])
        .assert()
        .success();

    let dist = temp.path().join("dist");
    assert!(dist.join("index.html").is_file());
    assert!(dist.join("assets/styles.css").is_file());
    assert!(dist.join("environments/php/index.html").is_file());
    assert!(dist.join("environments/node/index.html").is_file());
    assert!(!dist.join("environments/python").exists());

    let index = fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(index.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_build_honours_output_flag() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .args(["build", "--env", "python", "--out", "public"])
        .assert()
        .success();
    assert!(temp.path().join("public/environments/python/index.html").is_file());
    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_docs_writes_guides() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .args(["docs", "--env", "devops"])
        .assert()
        .success();
    assert!(temp.path().join("docs/README.md").is_file());
    assert!(temp.path().join("docs/guides/getting-started.md").is_file());
    assert!(temp.path().join("docs/environments/devops/setup.md").is_file());
}

#[test]
fn test_validate_json_output() {
    let temp = TempDir::new().unwrap();
    let out = cskills(temp.path())
        .args(["--output-format", "json", "validate", "--skip-tools"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["suite"], "validate");
    assert_eq!(doc["mode"], "lenient");
    let summary = &doc["summary"];
    let total = summary["total"].as_u64().unwrap();
    let parts = summary["passed"].as_u64().unwrap()
        + summary["warned"].as_u64().unwrap()
        + summary["failed"].as_u64().unwrap();
    assert_eq!(total, parts);
    assert_eq!(doc["entries"].as_array().unwrap().len() as u64, total);
}

#[test]
fn test_init_local_then_config_get() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .args(["init", "--local"])
        .assert()
        .success();
    assert!(temp.path().join(".cskills.toml").is_file());

    cskills(temp.path())
        .args(["config", "get", "build.output_dir"])
        .assert()
        .success()
        .stdout(predicate::str::diff("dist\n"));
}

#[test]
fn test_environment_variable_overrides_config() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .env("CSKILLS__BUILD__STATUS", "Beta")
        .args(["config", "get", "build.status"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Beta\n"));
}

#[test]
fn test_config_file_selects_environments() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("cskills.toml");
    fs::write(&config, "environments = [\"api\"]\n").unwrap();

    cskills(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("build")
        .assert()
        .success();
    assert!(temp.path().join("dist/environments/api/index.html").is_file());
    assert!(!temp.path().join("dist/environments/php").exists());
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    cskills(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cskills"));
}
