//! tracker
//!
//! Abstraction for remote issue trackers.
//!
//! # Architecture
//!
//! The [`IssueTracker`] trait defines the single read operation the
//! changelog needs. The pipeline only sees the trait, so tests swap in
//! [`mock::MockTracker`] for [`github::GitHubTracker`].
//!
//! # Modules
//!
//! - `traits`: Core `IssueTracker` trait, `Issue`, and `TrackerError`
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use github::GitHubTracker;
pub use traits::*;
