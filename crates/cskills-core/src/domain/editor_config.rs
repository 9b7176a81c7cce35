//! Editor configuration emitter.
//!
//! `emit` is a pure lookup keyed by `(environment, kind)`. Environments with
//! no curated row get the shaped empty value for that kind, so callers can
//! always write a file that an editor will accept.

use std::fmt;
use std::str::FromStr;

use serde_json::{Value, json};

use crate::domain::environment::Environment;
use crate::domain::error::DomainError;

/// The four editor configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    Settings,
    Extensions,
    Launch,
    Tasks,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 4] = [Self::Settings, Self::Extensions, Self::Launch, Self::Tasks];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Extensions => "extensions",
            Self::Launch => "launch",
            Self::Tasks => "tasks",
        }
    }

    /// File name written under a `configs/` directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Settings => "settings.json",
            Self::Extensions => "extensions.json",
            Self::Launch => "launch.json",
            Self::Tasks => "tasks.json",
        }
    }

    /// Shaped empty value returned when no row exists.
    pub fn fallback(self) -> Value {
        match self {
            Self::Settings => json!({}),
            Self::Extensions => json!({ "recommendations": [] }),
            Self::Launch => json!({ "version": "0.2.0", "configurations": [] }),
            Self::Tasks => json!({ "version": "2.0.0", "tasks": [] }),
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let needle = needle.strip_suffix(".json").unwrap_or(&needle);
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == needle)
            .ok_or_else(|| DomainError::UnknownConfigKind { name: s.into() })
    }
}

/// Configuration for `env`, or the shaped empty value.
pub fn emit(env: Environment, kind: ConfigKind) -> Value {
    let row = match kind {
        ConfigKind::Settings => settings(env),
        ConfigKind::Extensions => extensions(env),
        ConfigKind::Launch => launch(env),
        ConfigKind::Tasks => tasks(env),
    };
    row.unwrap_or_else(|| kind.fallback())
}

/// Like [`emit`] but keyed by an arbitrary name.
///
/// Names that are not a known environment get the fallback.
pub fn emit_by_name(name: &str, kind: ConfigKind) -> Value {
    match name.parse::<Environment>() {
        Ok(env) => emit(env, kind),
        Err(_) => kind.fallback(),
    }
}

/// Repository-wide configuration written to the top-level `configs/`.
pub fn emit_shared(kind: ConfigKind) -> Value {
    match kind {
        ConfigKind::Settings => json!({
            "editor.formatOnSave": true,
            "editor.codeActionsOnSave": { "source.fixAll": true },
            "files.autoSave": "afterDelay",
            "editor.tabSize": 2,
            "editor.insertSpaces": true,
            "editor.rulers": [80, 120],
            "editor.wordWrap": "on",
            "files.exclude": {
                "**/node_modules": true,
                "**/vendor": true,
                "**/.git": true
            }
        }),
        ConfigKind::Extensions => json!({
            "recommendations": [
                "ms-vscode.vscode-json",
                "bradlc.vscode-tailwindcss",
                "esbenp.prettier-vscode",
                "ms-python.python",
                "ms-vscode.vscode-typescript-next"
            ]
        }),
        ConfigKind::Launch => json!({
            "version": "0.2.0",
            "configurations": [{
                "name": "Debug Node.js",
                "type": "node",
                "request": "launch",
                "program": "${workspaceFolder}/index.js"
            }]
        }),
        ConfigKind::Tasks => json!({
            "version": "2.0.0",
            "tasks": [
                { "label": "npm install", "type": "shell", "command": "npm install", "group": "build" },
                { "label": "npm test", "type": "shell", "command": "npm test", "group": "test" }
            ]
        }),
    }
}

/// Settings file written inside every starter template (`.cursor/settings.json`).
pub fn template_settings() -> Value {
    json!({
        "editor.formatOnSave": true,
        "editor.codeActionsOnSave": { "source.fixAll": true }
    })
}

/// Two-space indented JSON with a trailing newline.
pub fn to_pretty_json(value: &Value) -> String {
    // Serializing a `Value` cannot fail: keys are always strings.
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".into());
    out.push('\n');
    out
}

// ── Tables ────────────────────────────────────────────────────────────────────

fn settings(env: Environment) -> Option<Value> {
    match env {
        Environment::Php => Some(json!({
            "editor.formatOnSave": true,
            "editor.tabSize": 4,
            "[php]": { "editor.defaultFormatter": "bmewburn.vscode-intelephense-client" },
            "php.validate.enable": true
        })),
        Environment::Webdesign => Some(json!({
            "editor.formatOnSave": true,
            "editor.tabSize": 2,
            "editor.defaultFormatter": "esbenp.prettier-vscode",
            "emmet.includeLanguages": { "javascript": "javascriptreact" }
        })),
        Environment::Python => Some(json!({
            "editor.formatOnSave": true,
            "editor.tabSize": 4,
            "[python]": { "editor.defaultFormatter": "ms-python.black-formatter" },
            "python.testing.pytestEnabled": true
        })),
        Environment::Node => Some(json!({
            "editor.formatOnSave": true,
            "editor.tabSize": 2,
            "editor.defaultFormatter": "esbenp.prettier-vscode",
            "editor.codeActionsOnSave": { "source.fixAll.eslint": true }
        })),
        Environment::Api
        | Environment::Integrations
        | Environment::Mobile
        | Environment::Devops
        | Environment::Testing => None,
    }
}

fn extensions(env: Environment) -> Option<Value> {
    let ids: &[&str] = match env {
        Environment::Php => &[
            "bmewburn.vscode-intelephense-client",
            "xdebug.php-debug",
            "neilbrayfield.php-docblocker",
        ],
        Environment::Webdesign => &[
            "ecmel.vscode-html-css",
            "formulahendry.auto-rename-tag",
            "esbenp.prettier-vscode",
            "ritwickdey.liveserver",
        ],
        Environment::Python => &[
            "ms-python.python",
            "ms-python.vscode-pylance",
            "ms-python.black-formatter",
            "ms-toolsai.jupyter",
        ],
        Environment::Node => &[
            "dbaeumer.vscode-eslint",
            "esbenp.prettier-vscode",
            "christian-kohler.npm-intellisense",
        ],
        Environment::Api => &["humao.rest-client", "rangav.vscode-thunder-client"],
        Environment::Devops => &[
            "ms-azuretools.vscode-docker",
            "ms-kubernetes-tools.vscode-kubernetes-tools",
        ],
        Environment::Testing => &["orta.vscode-jest", "ryanluker.vscode-coverage-gutters"],
        Environment::Integrations | Environment::Mobile => return None,
    };
    Some(json!({ "recommendations": ids }))
}

fn launch(env: Environment) -> Option<Value> {
    let configuration = match env {
        Environment::Php => json!({
            "name": "Listen for Xdebug",
            "type": "php",
            "request": "launch",
            "port": 9003
        }),
        Environment::Python => json!({
            "name": "Python: Current File",
            "type": "debugpy",
            "request": "launch",
            "program": "${file}",
            "console": "integratedTerminal"
        }),
        Environment::Node => json!({
            "name": "Debug Node.js",
            "type": "node",
            "request": "launch",
            "program": "${workspaceFolder}/index.js"
        }),
        Environment::Webdesign
        | Environment::Api
        | Environment::Integrations
        | Environment::Mobile
        | Environment::Devops
        | Environment::Testing => return None,
    };
    Some(json!({ "version": "0.2.0", "configurations": [configuration] }))
}

fn tasks(env: Environment) -> Option<Value> {
    let (install, test) = match env {
        Environment::Php => ("composer install", "vendor/bin/phpunit"),
        Environment::Python => ("pip install -r requirements.txt", "pytest"),
        Environment::Node | Environment::Webdesign => ("npm install", "npm test"),
        Environment::Api
        | Environment::Integrations
        | Environment::Mobile
        | Environment::Devops
        | Environment::Testing => return None,
    };
    Some(json!({
        "version": "2.0.0",
        "tasks": [
            { "label": "install", "type": "shell", "command": install, "group": "build" },
            { "label": "test", "type": "shell", "command": test, "group": "test" }
        ]
    }))
}
