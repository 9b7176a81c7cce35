//! Shared repository fixtures for the service tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use cskills_adapters::MemoryFilesystem;
use cskills_core::{
    application::{AuditSettings, Filesystem, SetupService},
    domain::{Registry, SiteInfo},
};

pub const ROOT: &str = "/repo";

pub fn root() -> PathBuf {
    PathBuf::from(ROOT)
}

pub fn site() -> SiteInfo {
    SiteInfo {
        generated_at: "January 1, 2026 at 00:00".into(),
        ..SiteInfo::default()
    }
}

/// Write `content` at `rel` under the root, creating parents.
pub fn put(fs: &dyn Filesystem, rel: &str, content: &str) {
    let path = root().join(rel);
    if let Some(parent) = path.parent() {
        fs.create_dir_all(parent).unwrap();
    }
    fs.write_file(&path, content).unwrap();
}

/// An environment `CURSOR.md` long enough for every suite.
pub fn env_rules(env: &str) -> String {
    format!(
        "# CURSOR IDE Rules\n\nRules for {env}.\n\n{}",
        "- Keep functions small and names descriptive.\n".repeat(40)
    )
}

/// A repository that passes `validate`, minus any relative path in `skip`.
pub fn valid_repository(registry: &Registry, skip: &[&str]) -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    SetupService::new(Box::new(fs.clone()))
        .run(Path::new(ROOT), registry)
        .unwrap();

    let settings = AuditSettings::default();
    let keep = |rel: &str| !skip.contains(&rel);

    for dir in ["templates", "examples"] {
        fs.create_dir_all(&root().join(dir)).unwrap();
    }

    for file in &settings.required_files {
        if !keep(file) || file == "package.json" {
            continue;
        }
        put(&fs, file, &format!("# {file}\n\nCURSOR-SKILLS {}\n", "content ".repeat(300)));
    }

    if keep("package.json") {
        let scripts: serde_json::Map<String, serde_json::Value> = settings
            .package_scripts
            .iter()
            .map(|s| (s.clone(), format!("node scripts/{s}.js").into()))
            .collect();
        let manifest = serde_json::json!({
            "name": settings.package_name,
            "version": "0.3.0",
            "scripts": scripts,
        });
        put(&fs, "package.json", &cskills_core::domain::editor_config::to_pretty_json(&manifest));
    }

    for script in &settings.required_scripts {
        let rel = format!("scripts/{script}");
        if !keep(&rel) {
            continue;
        }
        put(&fs, &rel, "#!/usr/bin/env node\nconsole.log('ok');\n");
        fs.set_permissions(&root().join(&rel), true).unwrap();
    }

    for env in registry.iter() {
        let cursor = format!("{env}/CURSOR.md");
        if keep(&cursor) {
            put(&fs, &cursor, &env_rules(env.as_str()));
        }
        let readme = format!("{env}/README.md");
        if keep(&readme) {
            put(&fs, &readme, &format!("# {env}\n\nAnalysis and best practices.\n"));
        }
    }

    fs
}
