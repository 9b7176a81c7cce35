//! # cskills CLI
//!
//! Scaffolds, builds, audits and formats the CURSOR-SKILLS documentation
//! repository.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` and parse CLI arguments.
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! |  0   | Success, including success with warnings        |
//! |  1   | A check failed, or an I/O / internal error      |
//! |  2   | User / input error                              |
//! |  4   | Configuration error                             |

use std::process::ExitCode;

use clap::Parser;
use cskills_core::domain::Suite;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and must exit 0.
            if !e.use_stderr() {
                let _ = e.print();
                return ExitCode::SUCCESS;
            }
            eprintln!("{}", e.render().ansi());
            return ExitCode::from(2);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => return handle_error(e, verbose, cli.global.no_color),
    };
    let no_color = cli.global.no_color || config.output.no_color;

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output) {
        Ok(()) => {
            info!("cskills completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, no_color),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let global = cli.global;
    match cli.command {
        Commands::Setup(args) => commands::setup::execute(args, global, config, output),
        Commands::Build(args) => commands::build::execute(args, global, config, output),
        Commands::Pages(args) => commands::build::pages(args, global, config, output),
        Commands::Docs(args) => commands::docs::execute(args, global, config, output),
        Commands::Validate(args) => {
            commands::audit::execute(Suite::Validate, args, global, config, output)
        }
        Commands::Test(args) => commands::audit::execute(Suite::Test, args, global, config, output),
        Commands::Lint(args) => commands::audit::execute(Suite::Lint, args, global, config, output),
        Commands::Format(args) => commands::format::execute(args, global, config, output),
        Commands::CheckLinks(args) => commands::check_links::execute(args, global, config, output),
        Commands::EmitConfig(args) => commands::emit_config::execute(args, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, global, config, output),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool, no_color: bool) -> ExitCode {
    err.log();

    let msg = if colored_errors(no_color, std::io::IsTerminal::is_terminal(&std::io::stderr())) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

/// ANSI error output needs a terminal and no colour opt-out.
fn colored_errors(no_color: bool, stderr_is_terminal: bool) -> bool {
    stderr_is_terminal && !no_color
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn no_color_disables_colored_errors() {
        assert!(colored_errors(false, true));
        assert!(!colored_errors(true, true));
        assert!(!colored_errors(false, false));
    }

    #[test]
    fn no_color_flag_parses() {
        let cli = Cli::try_parse_from(["cskills", "--no-color", "emit-config", "php", "settings"])
            .unwrap();
        assert!(cli.global.no_color);
    }

    #[test]
    fn every_suite_is_a_subcommand() {
        let cmd = Cli::command();
        for name in ["validate", "test", "lint", "format", "check-links", "emit-config"] {
            assert!(cmd.find_subcommand(name).is_some(), "{name}");
        }
    }
}
