//! Formatting against in-memory and on-disk repositories.

mod common;

use std::path::Path;

use cskills_adapters::{LocalFilesystem, MemoryFilesystem, StaticToolRunner};
use cskills_core::{
    application::{Filesystem, FormatService, ToolOutput},
    domain::{Outcome, Registry, Report, Verdict},
};

use common::{ROOT, put, root};

fn format(fs: &MemoryFilesystem, registry: &Registry) -> Report {
    FormatService::new(Box::new(fs.clone()), Box::new(StaticToolRunner::none()))
        .run(Path::new(ROOT), registry)
        .unwrap()
}

fn entry<'a>(report: &'a Report, label: &str) -> &'a cskills_core::domain::ReportEntry {
    report
        .entries()
        .iter()
        .find(|e| e.label == label)
        .unwrap_or_else(|| panic!("no entry labelled {label:?}"))
}

#[test]
fn test_json_is_reindented_to_two_spaces() {
    let fs = MemoryFilesystem::new();
    put(&fs, "package.json", r#"{"name":"cursor-skills","scripts":{"build":"node scripts/build.js"}}"#);
    put(&fs, "configs/settings.json", "{\n  \"editor.tabSize\": 2\n}\n");

    let report = format(&fs, &Registry::from_names(&["php"]).unwrap());

    assert_eq!(
        fs.read_file(&root().join("package.json")).unwrap(),
        "{\n  \"name\": \"cursor-skills\",\n  \"scripts\": {\n    \"build\": \"node scripts/build.js\"\n  }\n}\n"
    );
    assert_eq!(entry(&report, "package.json formatted").detail.as_deref(), Some("formatted"));
    assert_eq!(
        entry(&report, "configs/settings.json formatted").detail.as_deref(),
        Some("already formatted")
    );
    assert_eq!(entry(&report, "configs/launch.json formatted").outcome, Outcome::Warn);
}

#[test]
fn test_invalid_json_fails_without_rewriting() {
    let fs = MemoryFilesystem::new();
    put(&fs, "package.json", "{ broken");

    let report = format(&fs, &Registry::from_names(&["php"]).unwrap());

    assert_eq!(entry(&report, "package.json formatted").outcome, Outcome::Fail);
    assert_eq!(fs.read_file(&root().join("package.json")).unwrap(), "{ broken");
    assert_eq!(report.summary().verdict, Verdict::Failed);
}

#[test]
fn test_missing_prettier_is_a_warning() {
    let fs = MemoryFilesystem::new();
    let report = format(&fs, &Registry::from_names(&["php"]).unwrap());

    let js = entry(&report, "JavaScript files formatted with prettier");
    assert_eq!(js.outcome, Outcome::Warn);
    assert_eq!(js.detail.as_deref(), Some("prettier not available"));
}

#[test]
fn test_prettier_runs_when_available() {
    let fs = MemoryFilesystem::new();
    let tools = StaticToolRunner::none().with_tool(
        "prettier",
        ToolOutput {
            success: true,
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        },
    );

    let report = FormatService::new(Box::new(fs), Box::new(tools))
        .run(Path::new(ROOT), &Registry::from_names(&["node"]).unwrap())
        .unwrap();

    assert_eq!(
        entry(&report, "Markdown files formatted with prettier").outcome,
        Outcome::Pass
    );
}

#[test]
fn test_structure_directories_are_created() {
    let fs = MemoryFilesystem::new();
    let report = format(&fs, &Registry::from_names(&["php"]).unwrap());

    assert_eq!(entry(&report, "Directory scripts/").detail.as_deref(), Some("created"));
    assert!(fs.is_dir(&root().join("scripts")));
    let again = format(&fs, &Registry::from_names(&["php"]).unwrap());
    assert_eq!(entry(&again, "Directory scripts/").detail.as_deref(), Some("exists"));
}

#[test]
fn test_markdown_is_normalised_once() {
    let fs = MemoryFilesystem::new();
    put(&fs, "README.md", "#Title\r\n\r\n\r\n\r\nSome text   \r\n");
    put(&fs, "php/CURSOR.md", "# CURSOR IDE Rules\n\n- rule\n");
    let registry = Registry::from_names(&["php"]).unwrap();

    let first = format(&fs, &registry);
    let readme = fs.read_file(&root().join("README.md")).unwrap();
    assert!(!readme.contains('\r'));
    assert!(!readme.contains("\n\n\n"));
    assert!(readme.ends_with("Some text\n"));
    assert_eq!(entry(&first, "README.md normalised").detail.as_deref(), Some("rewritten"));

    let second = format(&fs, &registry);
    assert_eq!(entry(&second, "README.md normalised").detail.as_deref(), Some("unchanged"));
    assert_eq!(fs.read_file(&root().join("README.md")).unwrap(), readme);
    assert!(second.entries().iter().any(|e| e.label == "php/CURSOR.md normalised"));
}

#[test]
fn test_format_on_local_filesystem() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("configs")).unwrap();
    std::fs::write(temp.path().join("configs/tasks.json"), r#"{"version":"2.0.0","tasks":[]}"#)
        .unwrap();

    let report = FormatService::new(Box::new(LocalFilesystem::new()), Box::new(StaticToolRunner::none()))
        .run(temp.path(), &Registry::from_names(&["php"]).unwrap())
        .unwrap();

    let text = std::fs::read_to_string(temp.path().join("configs/tasks.json")).unwrap();
    assert_eq!(text, "{\n  \"version\": \"2.0.0\",\n  \"tasks\": []\n}\n");
    assert!(temp.path().join("scripts").is_dir());
    assert_ne!(report.summary().verdict, Verdict::Failed);
}
