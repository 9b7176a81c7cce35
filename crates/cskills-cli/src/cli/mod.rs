//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cskills_core::domain::ConfigKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cskills",
    bin_name = "cskills",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold, build, audit and format the CURSOR-SKILLS repository",
    long_about = "cskills maintains the CURSOR-SKILLS documentation repository: \
                  it scaffolds environment folders, builds the static site, \
                  runs the validate/test/lint suites and formats sources.",
    after_help = "EXAMPLES:\n\
        \x20 cskills setup\n\
        \x20 cskills build --out dist\n\
        \x20 cskills validate --env php,node\n\
        \x20 cskills emit-config python settings\n\
        \x20 cskills completions bash > /usr/share/bash-completion/completions/cskills",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the environment tree, templates, examples and editor configs.
    #[command(about = "Scaffold the repository skeleton")]
    Setup(RegistryArgs),

    /// Build the static site.
    #[command(
        about = "Build the static site",
        after_help = "EXAMPLES:\n\
            \x20 cskills build\n\
            \x20 cskills build --out public --env php,python"
    )]
    Build(BuildArgs),

    /// Regenerate only the per-environment pages of an existing build.
    #[command(about = "Regenerate environment pages")]
    Pages(BuildArgs),

    /// Generate markdown guides under `docs/`.
    #[command(about = "Generate documentation")]
    Docs(RegistryArgs),

    /// Lenient repository audit.
    #[command(about = "Validate repository structure and content")]
    Validate(AuditArgs),

    /// Strict repository audit.
    #[command(about = "Run the strict test suite")]
    Test(AuditArgs),

    /// Linters, JSON validity and documentation checks.
    #[command(about = "Lint sources and documentation")]
    Lint(AuditArgs),

    /// Format JSON, markdown and (with prettier) JavaScript.
    #[command(visible_alias = "fmt", about = "Format sources in place")]
    Format(AuditArgs),

    /// Offline broken-link check over a built site.
    #[command(
        about = "Check internal links in the built site",
        after_help = "EXAMPLES:\n\
            \x20 cskills check-links\n\
            \x20 cskills check-links public --log"
    )]
    CheckLinks(CheckLinksArgs),

    /// Print an editor config for one environment.
    #[command(
        about = "Print an editor configuration",
        after_help = "EXAMPLES:\n\
            \x20 cskills emit-config php settings\n\
            \x20 cskills emit-config node launch > .vscode/launch.json"
    )]
    EmitConfig(EmitConfigArgs),

    /// Initialise a cskills configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cskills init           # default location\n\
            \x20 cskills init --local   # .cskills.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cskills completions bash > ~/.local/share/bash-completion/completions/cskills\n\
            \x20 cskills completions zsh  > ~/.zfunc/_cskills\n\
            \x20 cskills completions fish > ~/.config/fish/completions/cskills.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the cskills configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cskills config get build.output_dir\n\
            \x20 cskills config list\n\
            \x20 cskills config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Restrict a run to some environments.
#[derive(Debug, Clone, Default, Args)]
pub struct RegistryArgs {
    /// Comma-separated environment names; overrides `environments` from
    /// configuration.
    #[arg(
        short = 'e',
        long = "env",
        value_name = "ENV",
        value_delimiter = ',',
        help = "Only these environments (e.g. php,node)"
    )]
    pub environments: Vec<String>,
}

// ── build / pages ─────────────────────────────────────────────────────────────

/// Arguments for `cskills build` and `cskills pages`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Output directory, relative to the root unless absolute.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory (default: build.output_dir)"
    )]
    pub output: Option<PathBuf>,
}

// ── audit suites ──────────────────────────────────────────────────────────────

/// Arguments for `validate`, `test`, `lint` and `format`.
#[derive(Debug, Args)]
pub struct AuditArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Never spawn `node_modules/.bin` tools.
    #[arg(long = "skip-tools", help = "Treat external linters/formatters as unavailable")]
    pub skip_tools: bool,
}

// ── check-links ───────────────────────────────────────────────────────────────

/// Arguments for `cskills check-links`.
#[derive(Debug, Args)]
pub struct CheckLinksArgs {
    /// Built site to check (default: build.output_dir under the root).
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Write a `brokenlinks_<timestamp>.log` JSON file.
    #[arg(long = "log", help = "Write a JSON log of broken links")]
    pub log: bool,

    /// Directory for the log file (default: the root).
    #[arg(long = "log-dir", value_name = "DIR", requires = "log")]
    pub log_dir: Option<PathBuf>,
}

// ── emit-config ───────────────────────────────────────────────────────────────

/// Arguments for `cskills emit-config`.
#[derive(Debug, Args)]
pub struct EmitConfigArgs {
    /// Environment name; unknown names print the empty default.
    #[arg(value_name = "ENV")]
    pub env: String,

    /// Which config file to print.
    #[arg(value_enum, value_name = "KIND")]
    pub kind: ConfigKindArg,
}

/// Editor config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKindArg {
    Settings,
    Extensions,
    Launch,
    Tasks,
}

impl From<ConfigKindArg> for ConfigKind {
    fn from(kind: ConfigKindArg) -> Self {
        match kind {
            ConfigKindArg::Settings => ConfigKind::Settings,
            ConfigKindArg::Extensions => ConfigKind::Extensions,
            ConfigKindArg::Launch => ConfigKind::Launch,
            ConfigKindArg::Tasks => ConfigKind::Tasks,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cskills init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.cskills.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cskills completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cskills config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `build.output_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn env_flag_splits_on_commas() {
        let cli = Cli::parse_from(["cskills", "validate", "--env", "php,node"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.registry.environments, ["php", "node"]);
    }

    #[test]
    fn build_accepts_output_dir() {
        let cli = Cli::parse_from(["cskills", "build", "-o", "public"]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.output, Some(PathBuf::from("public")));
    }

    #[test]
    fn emit_config_kind_maps_to_core() {
        let cli = Cli::parse_from(["cskills", "emit-config", "php", "launch"]);
        let Commands::EmitConfig(args) = cli.command else {
            panic!("expected EmitConfig command");
        };
        assert_eq!(ConfigKind::from(args.kind), ConfigKind::Launch);
    }

    #[test]
    fn log_dir_requires_log() {
        let result = Cli::try_parse_from(["cskills", "check-links", "--log-dir", "logs"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_root_after_subcommand() {
        let cli = Cli::parse_from(["cskills", "docs", "-C", "/repo"]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/repo")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["cskills", "--quiet", "--verbose", "validate"]);
        assert!(result.is_err());
    }
}
