//! Live GitHub API tests.
//!
//! Run with `--features live_github_tests` and a `GITHUB_TOKEN` in the
//! environment.

#![cfg(feature = "live_github_tests")]

use merge_changelog::core::branch::IssueId;
use merge_changelog::core::config::RepoSlug;
use merge_changelog::tracker::{GitHubTracker, IssueTracker};

#[tokio::test]
async fn fetches_a_public_issue() {
    let token = std::env::var("GITHUB_TOKEN").expect("GITHUB_TOKEN must be set");
    let repo = RepoSlug::parse("rust-lang/rust", "rust-lang").unwrap();
    let tracker = GitHubTracker::new(token, repo);

    let issue = tracker
        .get_issue(&IssueId::new("1").unwrap())
        .await
        .unwrap();

    assert_eq!(issue.number, 1);
    assert!(!issue.title.is_empty());
}
