//! Docs Service - generate markdown guides from the catalog tables.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{
        ConfigKind, Environment, Registry,
        catalog::{starter_templates, tooling},
        editor_config::{emit, to_pretty_json},
    },
    error::SkillsResult,
};

pub struct DocsService {
    filesystem: Box<dyn Filesystem>,
}

impl DocsService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Write `docs/README.md`, the getting-started guide and three pages per
    /// environment. Returns the written paths in order.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn generate(&self, root: &Path, registry: &Registry) -> SkillsResult<Vec<PathBuf>> {
        let docs = root.join("docs");
        let mut written = Vec::new();

        info!("Generating main documentation");
        self.write(&mut written, docs.join("README.md"), &main_readme(registry))?;
        self.write(
            &mut written,
            docs.join("guides").join("getting-started.md"),
            &getting_started(registry),
        )?;

        info!("Generating environment documentation");
        for env in registry.iter() {
            let dir = docs.join("environments").join(env.as_str());
            self.write(&mut written, dir.join("README.md"), &environment_overview(env))?;
            self.write(&mut written, dir.join("setup.md"), &environment_setup(env))?;
            self.write(
                &mut written,
                dir.join("best-practices.md"),
                &environment_best_practices(env),
            )?;
        }

        info!(files = written.len(), "Documentation generated");
        Ok(written)
    }

    fn write(&self, written: &mut Vec<PathBuf>, path: PathBuf, content: &str) -> SkillsResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, content)?;
        debug!(path = %path.display(), "Wrote guide");
        written.push(path);
        Ok(())
    }
}

fn bullets(items: &[&str]) -> String {
    items.iter().fold(String::new(), |mut out, item| {
        let _ = writeln!(out, "- {item}");
        out
    })
}

fn main_readme(registry: &Registry) -> String {
    let environments: String = registry
        .iter()
        .map(|env| {
            format!(
                "- **[{}](environments/{env}/)** - Development rules and best practices\n",
                env.display_name()
            )
        })
        .collect();

    format!(
        "# CURSOR-SKILLS Documentation

## Overview

Welcome to the CURSOR-SKILLS community repository documentation.

## Table of Contents

- [Getting Started](guides/getting-started.md)
- [Environment Guides](environments/)

## Quick Start

1. Run `cskills setup` to create the environment tree
2. Run `cskills validate` to check the repository
3. Run `cskills build` to produce the static site

## Environments

{environments}
## Contributing

See the [Contributing Guide](../CONTRIBUTING.md).

## License

This project is licensed under the MIT License - see the [LICENSE](../LICENSE) file.
"
    )
}

fn getting_started(registry: &Registry) -> String {
    let choices: String = registry
        .iter()
        .map(|env| {
            let examples: Vec<_> = starter_templates(env).iter().map(|t| t.title).collect();
            format!(
                "- **{}**: `{env}/CURSOR.md` ({})\n",
                env.display_name(),
                examples.join(", ")
            )
        })
        .collect();

    format!(
        "# Getting Started with CURSOR-SKILLS

## Introduction

CURSOR-SKILLS is a repository of best practices, rules, and guidelines for
working with CURSOR IDE across different programming environments.

## Prerequisites

- CURSOR IDE installed
- Git
- Basic knowledge of your chosen programming environment

## Choose Your Environment

{choices}
## Use Templates

Each environment includes project templates:

```bash
cp -r php/templates/laravel-starter/ my-new-project/
```

## Follow Best Practices

Each environment includes:

- **CURSOR.md**: environment-specific rules
- **README.md**: analysis and guidelines
- **templates/**: ready-to-use project templates
- **examples/**: practical, working examples
- **configs/**: CURSOR IDE configurations
"
    )
}

fn environment_overview(env: Environment) -> String {
    let name = env.display_name();
    format!(
        "# {name} Development Environment

## Overview

This guide covers best practices and rules for {env} development using CURSOR IDE.

## Quick Start

1. **Configure CURSOR IDE** for {env} development
2. **Use project templates** to start new projects
3. **Follow best practices** for code quality
4. **Implement testing** strategies

## Resources

- [Setup Guide](setup.md)
- [Best Practices](best-practices.md)
- [Templates](../../../{env}/templates/)
- [Examples](../../../{env}/examples/)
- [Configurations](../../../{env}/configs/)
"
    )
}

fn environment_setup(env: Environment) -> String {
    let name = env.display_name();
    let notes = tooling(env);
    let extensions = bullets(notes.extensions_or_default());
    let settings = to_pretty_json(&emit(env, ConfigKind::Settings));
    let troubleshooting = bullets(notes.troubleshooting_or_default());
    let install = notes.install_command;

    format!(
        "# {name} Setup Guide

## Prerequisites

- CURSOR IDE installed
- {name} development tools
- Package manager (npm, pip, composer, etc.)

## CURSOR IDE Configuration

### Required Extensions

{extensions}
### Settings Configuration

```json
{settings}```

## Project Setup

### 1. Choose a Template

```bash
cd {env}/templates/
```

### 2. Copy Template

```bash
cp -r template-name/ my-new-project/
cd my-new-project
```

### 3. Install Dependencies

```bash
{install}
```

## Troubleshooting

{troubleshooting}"
    )
}

fn environment_best_practices(env: Environment) -> String {
    let name = env.display_name();
    let notes = tooling(env);
    let standards = bullets(notes.standards_or_default());
    let formatting = bullets(notes.formatting_or_default());
    let testing = bullets(notes.testing_or_default());

    format!(
        "# {name} Best Practices

## Code Quality

### Standards

{standards}
### Formatting

{formatting}
### Testing

{testing}
## Security

- Validate all user inputs
- Sanitize data before processing
- Keep dependencies up to date
- Use HTTPS for all communications
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_guide_embeds_environment_settings() {
        let guide = environment_setup(Environment::Php);
        assert!(guide.contains("composer install"));
        assert!(guide.contains("\"editor.tabSize\": 4"));
        assert!(guide.contains("- PHP Intelephense"));
    }

    #[test]
    fn uncurated_environment_uses_generic_notes() {
        let guide = environment_best_practices(Environment::Mobile);
        assert!(guide.contains("- Follow language-specific conventions"));
    }

    #[test]
    fn readme_lists_only_registry_environments() {
        let registry = Registry::from_names(&["node"]).unwrap();
        let readme = main_readme(&registry);
        assert!(readme.contains("environments/node/"));
        assert!(!readme.contains("environments/php/"));
    }
}
