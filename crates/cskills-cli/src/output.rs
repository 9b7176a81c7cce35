//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde_json::json;

use cskills_core::domain::{Outcome, Report, Verdict};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet || resolved_format == OutputFormat::Json,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Raw payload for stdout (emitted configs, TOML listings).  Never
    /// suppressed and never decorated.
    pub fn raw(&self, payload: &str) -> io::Result<()> {
        self.term.write_line(payload)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Reports ───────────────────────────────────────────────────────────

    /// Print every entry followed by the summary block.
    ///
    /// In JSON mode the whole report is one document on stdout instead.
    pub fn report(&self, suite: &str, report: &Report) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(&report_json(suite, report));
        }

        self.header(&format!("{suite} results"))?;
        for entry in report.entries() {
            let line = entry.to_string();
            match entry.outcome {
                Outcome::Pass => self.success(&line)?,
                Outcome::Warn => self.warning(&line)?,
                Outcome::Fail => self.error(&line)?,
            }
        }

        let summary = report.summary();
        let t = summary.tally;
        self.print("")?;
        self.header("Summary")?;
        self.print(&format!("  Total:        {}", t.total))?;
        self.print(&format!("  Passed:       {}", t.passed))?;
        self.print(&format!("  Warnings:     {}", t.warned))?;
        self.print(&format!("  Failed:       {}", t.failed))?;
        self.print(&format!("  Success rate: {}%", summary.success_rate_percent))?;
        self.print("")?;

        match summary.verdict {
            Verdict::Passed => self.success(&format!("{suite} passed")),
            Verdict::PassedWithWarnings => {
                self.warning(&format!("{suite} passed with {} warning(s)", t.warned))
            }
            Verdict::Failed => self.error(&format!("{suite} failed with {} error(s)", t.failed)),
        }
    }

    /// Pretty JSON document on stdout.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// `{suite, mode, summary, entries}` document for `--output-format json`.
fn report_json(suite: &str, report: &Report) -> serde_json::Value {
    json!({
        "suite": suite,
        "mode": report.mode(),
        "summary": report.summary(),
        "entries": report.entries(),
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
