//! tracker::traits
//!
//! IssueTracker trait definition for looking up issues on a remote service.
//!
//! # Design
//!
//! The trait is async because lookups involve network I/O. It exposes one
//! read operation: fetch an issue summary by numeric id within the
//! repository the tracker was built for. Failures are never retried here.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::branch::IssueId;

/// Errors from issue tracker operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// Authentication failed (invalid token, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested issue was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A success response whose body is not the expected JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Issue summary returned by the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue number as reported by the tracker
    pub number: u64,
    /// Issue title
    pub title: String,
}

/// Read access to a remote issue tracker for one repository.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Short provider name, for messages.
    fn name(&self) -> &'static str;

    /// Fetch the issue with the given id.
    async fn get_issue(&self, id: &IssueId) -> Result<Issue, TrackerError>;
}
