//! Required-vs-recommended classification.
//!
//! The three audit suites disagree about which facts are fatal (a missing
//! environment `README.md` is an error for one and a warning for another).
//! Instead of picking one policy, every check declares a [`CheckKind`] and the
//! suite's [`ClassificationTable`] decides its [`Severity`]. Defaults mirror
//! each suite's historical behaviour; configuration may override any row.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::report::Mode;

/// What a falsy check turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Falsy → `Fail`.
    Required,
    /// Falsy → `Warn` (or `Fail` in a strict report).
    Recommended,
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "required" | "error" | "fail" => Ok(Self::Required),
            "recommended" | "warning" | "warn" => Ok(Self::Recommended),
            other => Err(DomainError::UnknownSeverity { name: other.into() }),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Required => "required",
            Self::Recommended => "recommended",
        })
    }
}

/// The audit suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    Validate,
    Test,
    Lint,
}

impl Suite {
    pub const fn mode(self) -> Mode {
        match self {
            Self::Test => Mode::Strict,
            Self::Validate | Self::Lint => Mode::Lenient,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Test => "test",
            Self::Lint => "lint",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! check_kinds {
    ($($variant:ident => $key:literal),+ $(,)?) => {
        /// Category of a single check; the unit of classification.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum CheckKind {
            $($variant),+
        }

        impl CheckKind {
            pub const ALL: &'static [CheckKind] = &[$(Self::$variant),+];

            /// Configuration key, e.g. `env_readme`.
            pub const fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }
        }
    };
}

check_kinds! {
    MainDirectory => "main_directory",
    EnvironmentDirectory => "environment_directory",
    EnvironmentSubdirectory => "environment_subdirectory",
    RequiredFile => "required_file",
    PackageJsonValid => "package_json_valid",
    PackageName => "package_name",
    PackageScript => "package_script",
    RootReadmeContent => "root_readme_content",
    RootCursorContent => "root_cursor_content",
    DocSubstance => "doc_substance",
    EnvCursorDoc => "env_cursor_doc",
    EnvReadme => "env_readme",
    EnvCursorHeader => "env_cursor_header",
    EnvCursorSubstance => "env_cursor_substance",
    ScriptPresent => "script_present",
    ScriptExecutable => "script_executable",
    ScriptShebang => "script_shebang",
    TemplatesPresent => "templates_present",
    TemplateReadme => "template_readme",
    TemplateManifest => "template_manifest",
    ExamplesPresent => "examples_present",
    ExampleReadme => "example_readme",
    ConfigPresent => "config_present",
    JsonValid => "json_valid",
    ExternalLinter => "external_linter",
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CheckKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.key() == needle)
            .ok_or_else(|| DomainError::UnknownCheckKind { name: s.into() })
    }
}

/// Severity per check kind for one suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTable {
    suite: Suite,
    rows: BTreeMap<CheckKind, Severity>,
}

impl ClassificationTable {
    /// The suite's historical classification.
    pub fn defaults(suite: Suite) -> Self {
        use CheckKind::*;
        use Severity::*;

        let recommended: &[CheckKind] = match suite {
            Suite::Validate => &[
                EnvironmentSubdirectory,
                PackageScript,
                EnvReadme,
                EnvCursorHeader,
                EnvCursorSubstance,
                DocSubstance,
                ScriptExecutable,
                TemplatesPresent,
                TemplateReadme,
                TemplateManifest,
                ExamplesPresent,
                ExampleReadme,
                ConfigPresent,
                ExternalLinter,
            ],
            // Strict reports collapse warnings anyway; keep the table honest.
            Suite::Test => &[],
            Suite::Lint => &[
                EnvironmentSubdirectory,
                EnvReadme,
                EnvCursorHeader,
                DocSubstance,
                ConfigPresent,
                ExternalLinter,
            ],
        };

        let rows = CheckKind::ALL
            .iter()
            .map(|&kind| {
                let severity = if recommended.contains(&kind) {
                    Recommended
                } else {
                    Required
                };
                (kind, severity)
            })
            .collect();

        Self { suite, rows }
    }

    /// Apply `{check_kind: severity}` overrides from configuration.
    pub fn with_overrides<K, V>(mut self, overrides: &BTreeMap<K, V>) -> Result<Self, DomainError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in overrides {
            let kind: CheckKind = key.as_ref().parse()?;
            let severity: Severity = value.as_ref().parse()?;
            self.rows.insert(kind, severity);
        }
        Ok(self)
    }

    pub fn set(&mut self, kind: CheckKind, severity: Severity) {
        self.rows.insert(kind, severity);
    }

    pub fn severity(&self, kind: CheckKind) -> Severity {
        self.rows.get(&kind).copied().unwrap_or(Severity::Required)
    }

    pub fn suite(&self) -> Suite {
        self.suite
    }

    pub fn rows(&self) -> impl Iterator<Item = (CheckKind, Severity)> + '_ {
        self.rows.iter().map(|(k, v)| (*k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_readme_differs_between_suites() {
        assert_eq!(
            ClassificationTable::defaults(Suite::Validate).severity(CheckKind::EnvReadme),
            Severity::Recommended
        );
        assert_eq!(
            ClassificationTable::defaults(Suite::Test).severity(CheckKind::EnvReadme),
            Severity::Required
        );
    }

    #[test]
    fn required_files_are_required_everywhere() {
        for suite in [Suite::Validate, Suite::Test, Suite::Lint] {
            assert_eq!(
                ClassificationTable::defaults(suite).severity(CheckKind::RequiredFile),
                Severity::Required,
                "{suite}"
            );
        }
    }

    #[test]
    fn overrides_replace_rows() {
        let mut overrides = BTreeMap::new();
        overrides.insert("env-readme".to_string(), "required".to_string());
        let table = ClassificationTable::defaults(Suite::Validate)
            .with_overrides(&overrides)
            .unwrap();
        assert_eq!(table.severity(CheckKind::EnvReadme), Severity::Required);
    }

    #[test]
    fn unknown_override_key_is_rejected() {
        let mut overrides = BTreeMap::new();
        overrides.insert("no_such_check", "required");
        assert!(matches!(
            ClassificationTable::defaults(Suite::Lint).with_overrides(&overrides),
            Err(DomainError::UnknownCheckKind { .. })
        ));
    }

    #[test]
    fn unknown_severity_is_rejected() {
        assert!("sometimes".parse::<Severity>().is_err());
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Recommended);
    }

    #[test]
    fn check_kind_keys_round_trip() {
        for kind in CheckKind::ALL {
            assert_eq!(kind.key().parse::<CheckKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn suite_modes() {
        assert_eq!(Suite::Test.mode(), Mode::Strict);
        assert_eq!(Suite::Validate.mode(), Mode::Lenient);
        assert_eq!(Suite::Lint.mode(), Mode::Lenient);
    }
}
