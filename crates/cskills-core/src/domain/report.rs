//! Check outcomes and their aggregation.
//!
//! A [`Report`] is a plain value: check groups build one, return it, and the
//! caller merges them in declaration order. Nothing here touches I/O.
//!
//! # Invariants
//!
//! - Every [`Report::run_check`] / [`Report::record`] call appends exactly one
//!   entry, so `passed + warned + failed == total == entries.len()`.
//! - A `Strict` report never contains [`Outcome::Warn`].
//! - A predicate error is recorded as [`Outcome::Fail`]; it never escapes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::policy::Severity;

/// Result of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Warn,
    Fail,
}

impl Outcome {
    /// Outcome for a falsy predicate at the given severity.
    pub const fn for_falsy(severity: Severity) -> Self {
        match severity {
            Severity::Required => Self::Fail,
            Severity::Recommended => Self::Warn,
        }
    }
}

/// Two-outcome (test-style) or three-outcome (validate/lint-style) report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Strict,
    Lenient,
}

/// One recorded check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub label: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} - {}", self.label, detail),
            None => f.write_str(&self.label),
        }
    }
}

/// Counters derived from a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
    pub total: usize,
}

impl Tally {
    /// `round(passed / total * 100)`, or 0 for an empty run.
    ///
    /// Warnings never count toward the numerator.
    pub fn success_rate_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let rate = (self.passed as f64 / self.total as f64 * 100.0).round();
        rate.clamp(0.0, 100.0) as u8
    }

    pub fn verdict(&self) -> Verdict {
        if self.failed > 0 {
            Verdict::Failed
        } else if self.warned > 0 {
            Verdict::PassedWithWarnings
        } else {
            Verdict::Passed
        }
    }
}

/// Overall result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    PassedWithWarnings,
    Failed,
}

impl Verdict {
    /// Process exit code: only a failure is non-zero.
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Passed | Self::PassedWithWarnings => 0,
            Self::Failed => 1,
        }
    }
}

/// Everything a caller needs to print a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(flatten)]
    pub tally: Tally,
    pub success_rate_percent: u8,
    pub verdict: Verdict,
}

/// Ordered list of check outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    mode: Mode,
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    pub fn strict() -> Self {
        Self::new(Mode::Strict)
    }

    pub fn lenient() -> Self {
        Self::new(Mode::Lenient)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Evaluate `predicate` and record exactly one entry.
    ///
    /// `Ok(true)` passes, `Ok(false)` maps through `severity`, and `Err`
    /// fails with the error text as detail.
    pub fn run_check<F, E>(&mut self, label: impl Into<String>, severity: Severity, predicate: F)
    where
        F: FnOnce() -> Result<bool, E>,
        E: fmt::Display,
    {
        let label = label.into();
        match predicate() {
            Ok(true) => self.record(label, Outcome::Pass, None),
            Ok(false) => self.record(label, Outcome::for_falsy(severity), None),
            Err(e) => {
                tracing::debug!(check = %label, error = %e, "check errored");
                self.record(label, Outcome::Fail, Some(format!("Error: {e}")));
            }
        }
    }

    /// Record an outcome decided by the caller.
    pub fn record(&mut self, label: impl Into<String>, outcome: Outcome, detail: Option<String>) {
        let outcome = match (self.mode, outcome) {
            (Mode::Strict, Outcome::Warn) => Outcome::Fail,
            (_, o) => o,
        };
        self.entries.push(ReportEntry {
            label: label.into(),
            outcome,
            detail,
        });
    }

    pub fn pass(&mut self, label: impl Into<String>) {
        self.record(label, Outcome::Pass, None);
    }

    pub fn warn(&mut self, label: impl Into<String>, detail: Option<String>) {
        self.record(label, Outcome::Warn, detail);
    }

    pub fn fail(&mut self, label: impl Into<String>, detail: Option<String>) {
        self.record(label, Outcome::Fail, detail);
    }

    /// Append `other`'s entries after ours, re-applying our mode.
    pub fn merge(&mut self, other: Report) {
        for entry in other.entries {
            self.record(entry.label, entry.outcome, entry.detail);
        }
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |e| e.outcome == outcome)
    }

    pub fn tally(&self) -> Tally {
        self.entries.iter().fold(Tally::default(), |mut t, e| {
            match e.outcome {
                Outcome::Pass => t.passed += 1,
                Outcome::Warn => t.warned += 1,
                Outcome::Fail => t.failed += 1,
            }
            t.total += 1;
            t
        })
    }

    pub fn summary(&self) -> Summary {
        let tally = self.tally();
        Summary {
            tally,
            success_rate_percent: tally.success_rate_percent(),
            verdict: tally.verdict(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_arithmetic(report: &Report) {
        let t = report.tally();
        assert_eq!(t.passed + t.warned + t.failed, t.total);
        assert_eq!(t.total, report.len());
    }

    #[test]
    fn truthy_predicate_passes() {
        let mut r = Report::lenient();
        r.run_check("exists", Severity::Required, || Ok::<_, String>(true));
        assert_eq!(r.entries()[0].outcome, Outcome::Pass);
        assert_arithmetic(&r);
    }

    #[test]
    fn falsy_predicate_follows_severity() {
        let mut r = Report::lenient();
        r.run_check("required", Severity::Required, || Ok::<_, String>(false));
        r.run_check("recommended", Severity::Recommended, || Ok::<_, String>(false));
        let outcomes: Vec<_> = r.entries().iter().map(|e| e.outcome).collect();
        assert_eq!(outcomes, [Outcome::Fail, Outcome::Warn]);
        assert_arithmetic(&r);
    }

    #[test]
    fn predicate_error_is_a_failure_with_detail() {
        let mut r = Report::lenient();
        r.run_check("parse", Severity::Recommended, || {
            Err::<bool, _>("unexpected token")
        });
        let entry = &r.entries()[0];
        assert_eq!(entry.outcome, Outcome::Fail);
        assert!(entry.detail.as_deref().unwrap().contains("unexpected token"));
        assert_arithmetic(&r);
    }

    #[test]
    fn strict_mode_has_two_outcomes() {
        let mut r = Report::strict();
        r.run_check("optional", Severity::Recommended, || Ok::<_, String>(false));
        r.warn("explicit", None);
        assert!(r.entries().iter().all(|e| e.outcome == Outcome::Fail));
        assert_eq!(r.summary().verdict, Verdict::Failed);
    }

    #[test]
    fn merge_preserves_order_and_reapplies_mode() {
        let mut child = Report::lenient();
        child.pass("a");
        child.warn("b", None);

        let mut parent = Report::strict();
        parent.pass("first");
        parent.merge(child);

        let labels: Vec<_> = parent.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["first", "a", "b"]);
        assert_eq!(parent.entries()[2].outcome, Outcome::Fail);
        assert_arithmetic(&parent);
    }

    #[test]
    fn success_rate_counts_only_passes() {
        let mut r = Report::lenient();
        r.pass("a");
        r.pass("b");
        r.warn("c", None);
        assert_eq!(r.summary().success_rate_percent, 67);
        assert_eq!(r.summary().verdict, Verdict::PassedWithWarnings);
    }

    #[test]
    fn empty_report_is_zero_percent_and_passes() {
        let r = Report::lenient();
        let s = r.summary();
        assert_eq!(s.tally.total, 0);
        assert_eq!(s.success_rate_percent, 0);
        assert_eq!(s.verdict, Verdict::Passed);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(Verdict::Passed.exit_code(), 0);
        assert_eq!(Verdict::PassedWithWarnings.exit_code(), 0);
        assert_eq!(Verdict::Failed.exit_code(), 1);
    }

    #[test]
    fn entry_display_includes_detail() {
        let entry = ReportEntry {
            label: "package.json is valid JSON".into(),
            outcome: Outcome::Fail,
            detail: Some("Error: EOF".into()),
        };
        assert_eq!(entry.to_string(), "package.json is valid JSON - Error: EOF");
    }
}
