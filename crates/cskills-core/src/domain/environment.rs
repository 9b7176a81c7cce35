//! The environment registry.
//!
//! # Design
//!
//! [`Environment`] is a closed set: every lookup table in `catalog.rs` and
//! `editor_config.rs` matches on it exhaustively, so adding a variant here
//! fails to compile until every table has a row for it.
//!
//! [`Registry`] is the ordered subset a single run iterates. It defaults to
//! [`Environment::ALL`]; configuration (and tests) may trim it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── Environment ───────────────────────────────────────────────────────────────

/// A named programming-language/domain bucket of the documentation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Php,
    Webdesign,
    Python,
    Node,
    Api,
    Integrations,
    Mobile,
    Devops,
    Testing,
}

impl Environment {
    /// Every environment, in canonical order.
    pub const ALL: [Environment; 9] = [
        Self::Php,
        Self::Webdesign,
        Self::Python,
        Self::Node,
        Self::Api,
        Self::Integrations,
        Self::Mobile,
        Self::Devops,
        Self::Testing,
    ];

    /// Directory name / slug.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Php => "php",
            Self::Webdesign => "webdesign",
            Self::Python => "python",
            Self::Node => "node",
            Self::Api => "api",
            Self::Integrations => "integrations",
            Self::Mobile => "mobile",
            Self::Devops => "devops",
            Self::Testing => "testing",
        }
    }

    /// Slug with the first letter upper-cased, as shown in page titles.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Php => "Php",
            Self::Webdesign => "Webdesign",
            Self::Python => "Python",
            Self::Node => "Node",
            Self::Api => "Api",
            Self::Integrations => "Integrations",
            Self::Mobile => "Mobile",
            Self::Devops => "Devops",
            Self::Testing => "Testing",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == needle)
            .ok_or_else(|| DomainError::UnknownEnvironment { name: s.to_string() })
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Ordered set of environments iterated by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    environments: Vec<Environment>,
}

impl Registry {
    /// Registry over an explicit ordered subset.
    ///
    /// Rejects duplicates so that "one artifact per environment" holds.
    pub fn new(environments: impl IntoIterator<Item = Environment>) -> Result<Self, DomainError> {
        let mut seen = Vec::new();
        for env in environments {
            if seen.contains(&env) {
                return Err(DomainError::DuplicateEnvironment {
                    name: env.to_string(),
                });
            }
            seen.push(env);
        }
        Ok(Self { environments: seen })
    }

    /// Parse a list of environment names, preserving their order.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, DomainError> {
        let parsed = names
            .iter()
            .map(|n| n.as_ref().parse::<Environment>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    pub fn iter(&self) -> impl Iterator<Item = Environment> + '_ {
        self.environments.iter().copied()
    }

    pub fn contains(&self, env: Environment) -> bool {
        self.environments.contains(&env)
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    pub fn as_slice(&self) -> &[Environment] {
        &self.environments
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            environments: Environment::ALL.to_vec(),
        }
    }
}
