//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// A real git repository on `master` with an initial commit.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init", "-b", "master"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);

        let repo = Self { dir };
        repo.commit("Initial commit");
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Record an empty commit with the given message.
    pub fn commit(&self, message: &str) {
        run_git(self.path(), &["commit", "--allow-empty", "-m", message]);
    }

    /// Record a merge-style commit for `branch`.
    pub fn merge(&self, pr: u32, branch: &str) {
        self.commit(&format!(
            "Merge pull request #{} in ADGUARD/extension from {} to master",
            pr, branch
        ));
    }
}

pub fn run_git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}
