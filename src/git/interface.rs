//! git::interface
//!
//! Repository discovery and merge history extraction.
//!
//! The repository is located with `git2::Repository::discover`, so a
//! directory outside any checkout fails early with [`GitError::NotARepo`].
//! History is read by running the `git` executable in the working tree,
//! which keeps `--after` date parsing identical to what users type at a
//! shell.
//!
//! # Error Handling
//!
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: Repository has no working directory
//! - [`GitError::Unavailable`]: The `git` executable could not be started
//! - [`GitError::CommandFailed`]: `git log` exited non-zero
//!
//! # Example
//!
//! ```ignore
//! use merge_changelog::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for line in git.merge_log("to master", "2024-01-01")? {
//!     println!("{}", line);
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// The git executable could not be started.
    #[error("failed to run git")]
    Unavailable {
        #[source]
        source: io::Error,
    },

    /// A git command exited with a non-zero status.
    #[error("`git {command}` failed ({status}): {stderr}")]
    CommandFailed {
        /// Subcommand and arguments, space-joined
        command: String,
        /// Exit status description
        status: String,
        /// Trimmed standard error
        stderr: String,
    },
}

/// Handle on a discovered repository working tree.
#[derive(Debug, Clone)]
pub struct Git {
    work_dir: PathBuf,
}

impl Git {
    /// Open the repository containing `path`.
    ///
    /// `path` can be any directory within the working tree.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        let work_dir = repo.workdir().ok_or(GitError::BareRepo)?.to_path_buf();
        Ok(Self { work_dir })
    }

    /// Root of the working tree.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// One-line summaries of commits after `after_date` whose message
    /// contains `marker` literally, oldest first.
    ///
    /// Equivalent to
    /// `git log --oneline --grep=<marker> --fixed-strings --reverse --after=<after_date>`.
    /// Blank lines are dropped.
    pub fn merge_log(&self, marker: &str, after_date: &str) -> Result<Vec<String>, GitError> {
        let args = merge_log_args(marker, after_date);
        let stdout = self.run(&args)?;
        Ok(stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    fn run(&self, args: &[String]) -> Result<String, GitError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|source| GitError::Unavailable { source })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn merge_log_args(marker: &str, after_date: &str) -> Vec<String> {
    vec![
        "log".to_string(),
        "--oneline".to_string(),
        "--no-color".to_string(),
        format!("--grep={}", marker),
        "--fixed-strings".to_string(),
        "--reverse".to_string(),
        format!("--after={}", after_date),
    ]
}
