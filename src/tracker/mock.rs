//! tracker::mock
//!
//! Mock issue tracker for deterministic testing.
//!
//! # Design
//!
//! Issues are stored in memory keyed by id. A failure can be configured for
//! a specific id, and every lookup is recorded for later verification.
//!
//! # Example
//!
//! ```
//! use merge_changelog::core::branch::IssueId;
//! use merge_changelog::tracker::mock::MockTracker;
//! use merge_changelog::tracker::IssueTracker;
//!
//! # tokio_test::block_on(async {
//! let tracker = MockTracker::new().with_issue(42, "Typo in settings");
//!
//! let issue = tracker.get_issue(&IssueId::new("42").unwrap()).await.unwrap();
//! assert_eq!(issue.title, "Typo in settings");
//! assert_eq!(tracker.requests(), vec!["42".to_string()]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{Issue, IssueTracker, TrackerError};
use crate::core::branch::IssueId;

/// Mock tracker for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockTracker {
    inner: Arc<Mutex<MockTrackerInner>>,
}

#[derive(Debug, Default)]
struct MockTrackerInner {
    /// Stored issues by id text.
    issues: HashMap<String, Issue>,
    /// Errors to return for specific ids.
    failures: HashMap<String, TrackerError>,
    /// Ids requested, in call order.
    requests: Vec<String>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue whose id is its number.
    pub fn with_issue(self, number: u64, title: impl Into<String>) -> Self {
        self.with_issue_at(number.to_string(), number, title)
    }

    /// Add an issue under an explicit id (e.g., `"007"` answering as `#7`).
    pub fn with_issue_at(
        self,
        id: impl Into<String>,
        number: u64,
        title: impl Into<String>,
    ) -> Self {
        self.lock().issues.insert(
            id.into(),
            Issue {
                number,
                title: title.into(),
            },
        );
        self
    }

    /// Make lookups of `id` fail with `error`.
    pub fn fail_on(self, id: impl Into<String>, error: TrackerError) -> Self {
        self.lock().failures.insert(id.into(), error);
        self
    }

    /// Ids requested so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockTrackerInner> {
        // A panic while holding the lock only happens inside a failing test.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_issue(&self, id: &IssueId) -> Result<Issue, TrackerError> {
        let mut inner = self.lock();
        inner.requests.push(id.to_string());

        if let Some(err) = inner.failures.get(id.as_str()) {
            return Err(err.clone());
        }

        inner
            .issues
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(format!("issue {}", id)))
    }
}
