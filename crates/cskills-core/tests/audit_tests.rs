//! Suite behaviour against in-memory repositories.

mod common;

use std::path::Path;

use cskills_adapters::{MemoryFilesystem, StaticToolRunner};
use cskills_core::{
    application::{AuditService, CheckGroup, Filesystem, ToolOutput},
    domain::{
        CheckKind, ClassificationTable, Mode, Outcome, Registry, Report, Severity, Suite, Verdict,
    },
};

use common::{ROOT, env_rules, put, valid_repository};

fn audit(fs: &MemoryFilesystem) -> AuditService {
    AuditService::new(Box::new(fs.clone()), Box::new(StaticToolRunner::none()))
}

fn run(fs: &MemoryFilesystem, registry: &Registry, suite: Suite) -> Report {
    audit(fs).run(Path::new(ROOT), registry, &ClassificationTable::defaults(suite))
}

fn assert_arithmetic(report: &Report) {
    let t = report.tally();
    assert_eq!(t.passed + t.warned + t.failed, t.total);
    assert_eq!(t.total, report.entries().len());
}

fn outcome_of(report: &Report, label: &str) -> Outcome {
    report
        .entries()
        .iter()
        .find(|e| e.label == label)
        .unwrap_or_else(|| panic!("no entry labelled {label:?}"))
        .outcome
}

#[test]
fn test_valid_repository_passes_validate() {
    let registry = Registry::default();
    let fs = valid_repository(&registry, &[]);

    let report = run(&fs, &registry, Suite::Validate);

    assert_arithmetic(&report);
    assert_eq!(report.with_outcome(Outcome::Fail).count(), 0, "{:#?}", report.entries());
    assert_eq!(report.summary().verdict.exit_code(), 0);
}

#[test]
fn test_missing_license_fails_validate() {
    let registry = Registry::default();
    let fs = valid_repository(&registry, &["LICENSE"]);

    let report = run(&fs, &registry, Suite::Validate);

    assert_eq!(outcome_of(&report, "Required file LICENSE exists"), Outcome::Fail);
    assert!(report.tally().failed >= 1);
    assert_eq!(report.summary().verdict, Verdict::Failed);
    assert_eq!(report.summary().verdict.exit_code(), 1);
}

#[test]
fn test_single_missing_environment_readme_only_warns() {
    let registry = Registry::default();
    let fs = valid_repository(&registry, &["php/README.md"]);

    let report = run(&fs, &registry, Suite::Validate);

    assert_eq!(outcome_of(&report, "php/README.md exists"), Outcome::Warn);
    assert_eq!(report.with_outcome(Outcome::Fail).count(), 0);
    assert_eq!(report.summary().verdict, Verdict::PassedWithWarnings);
    assert_eq!(report.summary().verdict.exit_code(), 0);
}

#[test]
fn test_policy_override_turns_warning_into_failure() {
    let registry = Registry::default();
    let fs = valid_repository(&registry, &["php/README.md"]);

    let mut table = ClassificationTable::defaults(Suite::Validate);
    table.set(CheckKind::EnvReadme, Severity::Required);
    let report = audit(&fs).run(Path::new(ROOT), &registry, &table);

    assert_eq!(outcome_of(&report, "php/README.md exists"), Outcome::Fail);
    assert_eq!(report.summary().verdict, Verdict::Failed);
}

#[test]
fn test_environment_content_with_trimmed_registry() {
    let registry = Registry::from_names(&["php", "node"]).unwrap();
    let fs = MemoryFilesystem::new();
    put(&fs, "php/CURSOR.md", &env_rules("php"));
    fs.create_dir_all(&Path::new(ROOT).join("node")).unwrap();

    let report = audit(&fs).run_group(
        CheckGroup::EnvironmentContent,
        Path::new(ROOT),
        &registry,
        &ClassificationTable::defaults(Suite::Test),
    );

    let outcomes: Vec<_> = report.entries().iter().map(|e| e.outcome).collect();
    assert_eq!(outcomes, [Outcome::Pass, Outcome::Fail]);
    assert_eq!(report.tally().total, 2);
    assert!(report.entries()[1].label.starts_with("node/"));
}

#[test]
fn test_test_suite_never_warns() {
    let registry = Registry::from_names(&["python"]).unwrap();
    let fs = valid_repository(&registry, &["python/README.md", "scripts/lint.js"]);

    let report = run(&fs, &registry, Suite::Test);

    assert_eq!(report.mode(), Mode::Strict);
    assert_eq!(report.tally().warned, 0);
    assert_arithmetic(&report);
    assert_eq!(
        outcome_of(&report, "Script lint.js exists and is executable"),
        Outcome::Fail
    );
}

#[test]
fn test_non_executable_script_warns_in_validate_and_fails_in_test() {
    let registry = Registry::from_names(&["api"]).unwrap();
    let fs = valid_repository(&registry, &[]);
    cskills_core::application::Filesystem::set_permissions(
        &fs,
        &Path::new(ROOT).join("scripts/build.js"),
        false,
    )
    .unwrap();

    let validate = run(&fs, &registry, Suite::Validate);
    assert_eq!(outcome_of(&validate, "Script build.js is executable"), Outcome::Warn);

    let test = run(&fs, &registry, Suite::Test);
    assert_eq!(
        outcome_of(&test, "Script build.js exists and is executable"),
        Outcome::Fail
    );
}

#[test]
fn test_invalid_package_json_is_recorded_not_raised() {
    let registry = Registry::from_names(&["node"]).unwrap();
    let fs = valid_repository(&registry, &["package.json"]);
    put(&fs, "package.json", "{ not json");

    let report = run(&fs, &registry, Suite::Test);

    let entry = report
        .entries()
        .iter()
        .find(|e| e.label == "package.json is valid JSON")
        .unwrap();
    assert_eq!(entry.outcome, Outcome::Fail);
    assert!(entry.detail.as_deref().is_some_and(|d| d.starts_with("Error:")));
}

#[test]
fn test_lint_warns_when_linters_are_missing() {
    let registry = Registry::from_names(&["devops"]).unwrap();
    let fs = valid_repository(&registry, &[]);

    let report = run(&fs, &registry, Suite::Lint);

    assert_eq!(
        outcome_of(&report, "JavaScript files linted with eslint"),
        Outcome::Warn
    );
    assert_eq!(
        outcome_of(&report, "Markdown files linted with markdownlint"),
        Outcome::Warn
    );
    assert_eq!(outcome_of(&report, "package.json is valid JSON"), Outcome::Pass);
    assert_eq!(report.summary().verdict, Verdict::PassedWithWarnings);
}

#[test]
fn test_lint_reports_failing_linter_headline() {
    let registry = Registry::from_names(&["devops"]).unwrap();
    let fs = valid_repository(&registry, &[]);
    let tools = StaticToolRunner::none()
        .with_tool(
            "eslint",
            ToolOutput {
                success: false,
                code: Some(1),
                stdout: "scripts/build.js: line 3, col 1, Error - no-undef\n\n2 problems\n".into(),
                stderr: String::new(),
            },
        )
        .with_tool(
            "markdownlint",
            ToolOutput {
                success: true,
                code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            },
        );

    let report = AuditService::new(Box::new(fs.clone()), Box::new(tools)).run(
        Path::new(ROOT),
        &registry,
        &ClassificationTable::defaults(Suite::Lint),
    );

    let eslint = report
        .entries()
        .iter()
        .find(|e| e.label == "JavaScript files linted with eslint")
        .unwrap();
    assert_eq!(eslint.outcome, Outcome::Fail);
    assert_eq!(eslint.detail.as_deref(), Some("2 problems"));
    assert_eq!(
        outcome_of(&report, "Markdown files linted with markdownlint"),
        Outcome::Pass
    );
}

#[test]
fn test_empty_repository_counts_every_check() {
    let registry = Registry::default();
    let fs = MemoryFilesystem::new();

    for suite in [Suite::Validate, Suite::Test, Suite::Lint] {
        let report = run(&fs, &registry, suite);
        assert_arithmetic(&report);
        assert!(!report.is_empty());
        assert_eq!(report.summary().verdict, Verdict::Failed);
    }
}
