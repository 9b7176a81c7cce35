//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `CSKILLS__SECTION__KEY`
//! 3. Config file (`--config`, else the user config file, else `.cskills.toml`)
//! 4. Built-in defaults (always present)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment as EnvSource, File, FileFormat};
use serde::{Deserialize, Serialize};

use cskills_core::{
    application::AuditSettings,
    domain::{ClassificationTable, Registry, SiteInfo, Suite, page::DEFAULT_REPOSITORY_URL},
};

use crate::cli::{GlobalArgs, RegistryArgs};
use crate::error::{CliError, CliResult};

/// File name of the project-local configuration.
pub const LOCAL_CONFIG_FILE: &str = ".cskills.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environments to iterate; all nine when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environments: Option<Vec<String>>,
    /// Where the documentation repository lives.
    pub project: ProjectConfig,
    /// Site build settings.
    pub build: BuildConfig,
    /// Severity overrides per suite.
    pub policy: PolicyConfig,
    /// Paths and package metadata the audits expect.
    pub audit: AuditSettings,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub root: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub output_dir: PathBuf,
    pub version: String,
    pub status: String,
    pub repository_url: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let site = SiteInfo::default();
        Self {
            output_dir: PathBuf::from("dist"),
            version: site.version,
            status: site.status,
            repository_url: DEFAULT_REPOSITORY_URL.into(),
        }
    }
}

/// `{check_kind: "required" | "recommended"}` per suite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub validate: BTreeMap<String, String>,
    pub test: BTreeMap<String, String>,
    pub lint: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| config_error("failed to seed default configuration", e))?;

        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(toml_file(path).required(true)),
            None => builder
                .add_source(toml_file(&Self::config_path()).required(false))
                .add_source(toml_file(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        let settings = builder
            .add_source(
                EnvSource::with_prefix("CSKILLS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("environments"),
            )
            .build()
            .map_err(|e| config_error("failed to read configuration", e))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| config_error("invalid configuration", e))?;

        tracing::debug!(root = %config.project.root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cskills.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "cskills", "cskills")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `config path` reports: the explicit one, else the first
    /// default location that exists.
    pub fn active_path(explicit: Option<&PathBuf>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.clone());
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        let user = Self::config_path();
        user.is_file().then_some(user)
    }

    // ── Derived values ────────────────────────────────────────────────────

    /// Repository root: `--root` wins over `project.root`.
    pub fn root(&self, global: &GlobalArgs) -> PathBuf {
        global
            .root
            .clone()
            .unwrap_or_else(|| self.project.root.clone())
    }

    /// Output directory under `root` unless `override_dir` or the
    /// configured one is absolute.
    pub fn output_dir(&self, root: &Path, override_dir: Option<&PathBuf>) -> PathBuf {
        root.join(override_dir.unwrap_or(&self.build.output_dir))
    }

    /// The registry for this run.
    ///
    /// Names from `--env` are user input; names from configuration are a
    /// configuration problem.
    pub fn registry(&self, args: &RegistryArgs) -> CliResult<Registry> {
        if !args.environments.is_empty() {
            return Registry::from_names(&args.environments).map_err(|e| CliError::InvalidInput {
                message: e.to_string(),
                source: Some(Box::new(e)),
            });
        }
        match &self.environments {
            Some(names) => Registry::from_names(names)
                .map_err(|e| config_error("invalid 'environments' list", e)),
            None => Ok(Registry::default()),
        }
    }

    /// The suite's classification table with configured overrides applied.
    pub fn classification(&self, suite: Suite) -> CliResult<ClassificationTable> {
        let overrides = match suite {
            Suite::Validate => &self.policy.validate,
            Suite::Test => &self.policy.test,
            Suite::Lint => &self.policy.lint,
        };
        ClassificationTable::defaults(suite)
            .with_overrides(overrides)
            .map_err(|e| config_error(format!("invalid [policy.{}] table", suite.as_str()), e))
    }

    /// Footer values for pages built in this run.
    pub fn site_info(&self, generated_at: impl Into<String>) -> SiteInfo {
        SiteInfo {
            generated_at: generated_at.into(),
            version: self.build.version.clone(),
            status: self.build.status.clone(),
            repository_url: self.build.repository_url.clone(),
        }
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path.to_path_buf()).format(FileFormat::Toml)
}

fn config_error<E>(message: impl Into<String>, source: E) -> CliError
where
    E: std::error::Error + Send + Sync + 'static,
{
    CliError::ConfigError {
        message: format!("{}: {source}", message.into()),
        source: Some(Box::new(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    use cskills_core::domain::{CheckKind, Environment, Severity};

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_site_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.build.output_dir, PathBuf::from("dist"));
        assert_eq!(cfg.build.version, "0.3.0");
        assert_eq!(cfg.project.root, PathBuf::from("."));
        assert!(cfg.environments.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let file = write_config(
            r#"
environments = ["php", "node"]

[build]
output_dir = "public"

[policy.validate]
env_readme = "required"
"#,
        );

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.build.output_dir, PathBuf::from("public"));
        assert_eq!(cfg.build.status, "Production Ready");

        let registry = cfg.registry(&RegistryArgs::default()).unwrap();
        assert_eq!(registry.as_slice(), &[Environment::Php, Environment::Node]);

        let table = cfg.classification(Suite::Validate).unwrap();
        assert_eq!(table.severity(CheckKind::EnvReadme), Severity::Required);
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let err = AppConfig::load(Some(&PathBuf::from("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn unknown_environment_in_config_is_a_config_error() {
        let cfg = AppConfig {
            environments: Some(vec!["cobol".into()]),
            ..AppConfig::default()
        };
        let err = cfg.registry(&RegistryArgs::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn unknown_environment_on_command_line_is_user_error() {
        let args = RegistryArgs {
            environments: vec!["cobol".into()],
        };
        let err = AppConfig::default().registry(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn command_line_environments_win_over_config() {
        let cfg = AppConfig {
            environments: Some(vec!["php".into()]),
            ..AppConfig::default()
        };
        let args = RegistryArgs {
            environments: vec!["python".into()],
        };
        let registry = cfg.registry(&args).unwrap();
        assert_eq!(registry.as_slice(), &[Environment::Python]);
    }

    #[test]
    fn bad_severity_override_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.policy.lint.insert("env_readme".into(), "optional".into());
        assert!(cfg.classification(Suite::Lint).is_err());
    }

    #[test]
    fn output_dir_joins_root_unless_absolute() {
        let cfg = AppConfig::default();
        let root = Path::new("/repo");
        assert_eq!(cfg.output_dir(root, None), PathBuf::from("/repo/dist"));
        assert_eq!(
            cfg.output_dir(root, Some(&PathBuf::from("/tmp/site"))),
            PathBuf::from("/tmp/site")
        );
    }

    #[test]
    fn site_info_carries_build_section() {
        let mut cfg = AppConfig::default();
        cfg.build.status = "Beta".into();
        let site = cfg.site_info("today");
        assert_eq!(site.generated_at, "today");
        assert_eq!(site.status, "Beta");
    }

    #[test]
    fn config_path_is_absolute_or_relative() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
