//! core::config
//!
//! Validated run configuration.
//!
//! # Overview
//!
//! Every value the pipeline needs is known before any side effect happens.
//! [`RawConfig`] is the unvalidated shape the CLI layer fills in from flags;
//! [`Config::from_raw`] checks it and produces an immutable [`Config`].
//!
//! The four required values are the repository, the cutoff date, the output
//! path and the access token. A missing or empty one is a
//! [`ConfigError::MissingArguments`] naming every absent flag at once.
//!
//! # Example
//!
//! ```
//! use merge_changelog::core::config::{Config, RawConfig};
//!
//! let raw = RawConfig {
//!     repo: Some("octocat/hello-world".into()),
//!     after_date: Some("2024-01-01".into()),
//!     output: Some("CHANGELOG.txt".into()),
//!     token: Some("ghp_secret".into()),
//!     ..RawConfig::default()
//! };
//! let config = Config::from_raw(raw).unwrap();
//! assert_eq!(config.repo().to_string(), "octocat/hello-world");
//! assert!(!format!("{:?}", config).contains("ghp_secret"));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Organization used when `--repo` is a bare repository name.
pub const DEFAULT_ORG: &str = "AdguardTeam";

/// Default issue-tracker API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default merge marker searched for in commit messages.
pub const DEFAULT_MERGE_MARKER: &str = "to master";

/// Errors from configuration validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required flags were absent or empty.
    #[error("missing required argument(s): {}", format_flags(.0))]
    MissingArguments(Vec<&'static str>),

    /// The repository identifier is not `name` or `owner/name`.
    #[error("invalid repository '{0}': expected 'name' or 'owner/name'")]
    InvalidRepo(String),

    #[error("invalid merge marker: must not be empty")]
    EmptyMarker,
}

fn format_flags(flags: &[&'static str]) -> String {
    flags
        .iter()
        .map(|f| format!("--{}", f))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unvalidated configuration as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub repo: Option<String>,
    pub after_date: Option<String>,
    pub output: Option<PathBuf>,
    pub token: Option<String>,
    /// Owner used for a bare `repo` (defaults to [`DEFAULT_ORG`])
    pub org: Option<String>,
    /// API base URL (defaults to [`DEFAULT_API_BASE`])
    pub api_base: Option<String>,
    /// Merge marker (defaults to [`DEFAULT_MERGE_MARKER`])
    pub marker: Option<String>,
    pub strict: bool,
}

/// A repository on the issue tracker, `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Parse `owner/name`, or qualify a bare `name` with `default_owner`.
    pub fn parse(value: &str, default_owner: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepo(value.to_string());
        let value = value.trim();

        let (owner, name) = match value.split_once('/') {
            Some((owner, name)) => (owner, name),
            None => (default_owner, value),
        };

        if owner.is_empty()
            || name.is_empty()
            || name.contains('/')
            || owner.chars().any(char::is_whitespace)
            || name.chars().any(char::is_whitespace)
        {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Immutable, validated configuration for one run.
#[derive(Clone)]
pub struct Config {
    repo: RepoSlug,
    after_date: String,
    output: PathBuf,
    token: String,
    api_base: String,
    marker: String,
    strict: bool,
}

// Custom Debug to avoid exposing the token
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("repo", &self.repo.to_string())
            .field("after_date", &self.after_date)
            .field("output", &self.output)
            .field("token", &"***")
            .field("api_base", &self.api_base)
            .field("marker", &self.marker)
            .field("strict", &self.strict)
            .finish()
    }
}

impl Config {
    /// Validate raw flags.
    ///
    /// Required values that are absent, empty, or only whitespace are all
    /// reported together, in flag order.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let repo = non_empty(raw.repo);
        let after_date = non_empty(raw.after_date);
        let output = raw.output.filter(|p| !p.as_os_str().is_empty());
        let token = non_empty(raw.token);

        let mut missing = Vec::new();
        if repo.is_none() {
            missing.push("repo");
        }
        if after_date.is_none() {
            missing.push("after_date");
        }
        if output.is_none() {
            missing.push("output");
        }
        if token.is_none() {
            missing.push("token");
        }

        let (Some(repo), Some(after_date), Some(output), Some(token)) =
            (repo, after_date, output, token)
        else {
            return Err(ConfigError::MissingArguments(missing));
        };

        let org = non_empty(raw.org).unwrap_or_else(|| DEFAULT_ORG.to_string());
        let repo = RepoSlug::parse(&repo, &org)?;

        let marker = match raw.marker {
            Some(m) if m.trim().is_empty() => return Err(ConfigError::EmptyMarker),
            Some(m) => m,
            None => DEFAULT_MERGE_MARKER.to_string(),
        };

        let api_base = non_empty(raw.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            repo,
            after_date,
            output,
            token,
            api_base,
            marker,
            strict: raw.strict,
        })
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    /// Cutoff passed verbatim to `git log --after`.
    pub fn after_date(&self) -> &str {
        &self.after_date
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether a log line outside the merge-message grammar aborts the run.
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// One-line summary for echoing parsed arguments (token redacted).
    pub fn summary(&self) -> String {
        format!(
            "repo={} after_date={} output={} token=***",
            self.repo,
            self.after_date,
            self.output.display()
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
