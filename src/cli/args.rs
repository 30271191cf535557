//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Required Flags
//!
//! - `--repo <owner/name>`: Repository whose issues are looked up
//! - `--after_date <date>`: Only merges after this date (any `git log --after` format)
//! - `--output <path>`: File to write; replaced on every run
//! - `--token <token>`: Issue tracker access token
//!
//! The required flags are optional at the clap level so that a missing one
//! is reported by configuration validation with exit status 1.

use clap::Parser;
use std::path::PathBuf;

use crate::core::config::RawConfig;
use crate::engine::Context;

/// Generate a release changelog from merge-to-master history.
///
/// Scans merges after a cutoff date, extracts the issue id from each merged
/// branch name, looks the issue title up on GitHub, and writes a sorted list.
#[derive(Parser, Debug)]
#[command(name = "merge-changelog")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    merge-changelog --repo AdguardBrowserExtension --after_date 2024-01-01 \\
        --output CHANGELOG.txt --token ghp_xxx

BRANCH NAMES:
    fix/issues/42_typo   ->  * [Fix(regression)] <title>: #42
    feature/123          ->  * [Feature] <title>: #123
    chore/tidy           ->  (skipped)")]
pub struct Cli {
    /// Repository as owner/name, or a bare name qualified with --org
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Include merges committed after this date
    #[arg(long = "after_date", alias = "after-date", value_name = "DATE")]
    pub after_date: Option<String>,

    /// Output file (overwritten)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// GitHub access token
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Owner for a bare --repo name [default: AdguardTeam]
    #[arg(long, value_name = "ORG")]
    pub org: Option<String>,

    /// Issue tracker API base URL [default: https://api.github.com]
    #[arg(long = "api-base", value_name = "URL")]
    pub api_base: Option<String>,

    /// Merge marker searched for in commit messages [default: "to master"]
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Fail on history lines that do not look like a merge from a branch
    #[arg(long)]
    pub strict: bool,

    /// Run as if started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Unvalidated configuration from the flags.
    pub fn raw_config(&self) -> RawConfig {
        RawConfig {
            repo: self.repo.clone(),
            after_date: self.after_date.clone(),
            output: self.output.clone(),
            token: self.token.clone(),
            org: self.org.clone(),
            api_base: self.api_base.clone(),
            marker: self.marker.clone(),
            strict: self.strict,
        }
    }

    /// Execution context from the global flags.
    pub fn context(&self) -> Context {
        Context {
            cwd: self.cwd.clone(),
            debug: self.debug,
            quiet: self.quiet,
        }
    }
}
