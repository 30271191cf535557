//! tracker::github
//!
//! GitHub issue lookups over the REST API.
//!
//! # Design
//!
//! One `GET /repos/{owner}/{repo}/issues/{id}` per lookup, authorized with
//! `Authorization: token <token>` and a browser-like `User-Agent`. Only
//! `number` and `title` are read from the response body.
//!
//! # Rate Limiting
//!
//! GitHub has rate limits. This implementation:
//! - Returns `TrackerError::RateLimited` on 429, or on 403 once
//!   `X-RateLimit-Remaining` reaches zero
//! - Does not retry
//!
//! # Example
//!
//! ```ignore
//! use merge_changelog::core::config::RepoSlug;
//! use merge_changelog::tracker::{GitHubTracker, IssueTracker};
//!
//! let repo = RepoSlug::parse("octocat/hello-world", "octocat")?;
//! let tracker = GitHubTracker::new("ghp_xxx", repo);
//! let issue = tracker.get_issue(&id).await?;
//! println!("#{} {}", issue.number, issue.title);
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{Issue, IssueTracker, TrackerError};
use crate::core::branch::IssueId;
use crate::core::config::{RepoSlug, DEFAULT_API_BASE};

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// GitHub issue tracker for a single repository.
pub struct GitHubTracker {
    /// HTTP client for making requests
    client: Client,
    /// Personal access token
    token: String,
    repo: RepoSlug,
    /// API base URL (configurable for GitHub Enterprise and tests)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubTracker")
            .field("repo", &self.repo.to_string())
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubTracker {
    /// Create a tracker against the public GitHub API.
    pub fn new(token: impl Into<String>, repo: RepoSlug) -> Self {
        Self::with_api_base(token, repo, DEFAULT_API_BASE)
    }

    /// Create a tracker with a custom API base URL
    /// (e.g., `https://github.example.com/api/v3`).
    pub fn with_api_base(
        token: impl Into<String>,
        repo: RepoSlug,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            repo,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build URL for an issue.
    fn issue_url(&self, id: &IssueId) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            self.api_base,
            self.repo.owner(),
            self.repo.name(),
            id
        )
    }

    fn headers(&self) -> Result<HeaderMap, TrackerError> {
        let mut auth = HeaderValue::from_str(&format!("token {}", self.token))
            .map_err(|_| TrackerError::AuthFailed("token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Map a response to an issue or a typed error.
    async fn handle_response(response: Response) -> Result<Issue, TrackerError> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_for(response, status).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;
        let issue: GitHubIssue = serde_json::from_str(&body)
            .map_err(|e| TrackerError::InvalidResponse(format!("failed to parse issue: {}", e)))?;
        Ok(issue.into())
    }

    async fn error_for(response: Response, status: StatusCode) -> TrackerError {
        let rate_limit_exhausted = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");

        // Try to get error message from body
        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED => TrackerError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN if rate_limit_exhausted => TrackerError::RateLimited,
            StatusCode::FORBIDDEN => {
                TrackerError::AuthFailed(format!("Permission denied: {}", message))
            }
            StatusCode::NOT_FOUND => TrackerError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => TrackerError::RateLimited,
            _ if status.is_server_error() => TrackerError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => TrackerError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn get_issue(&self, id: &IssueId) -> Result<Issue, TrackerError> {
        let url = self.issue_url(id);
        tracing::debug!(%url, "fetching issue");

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        Self::handle_response(response).await
    }
}

// --------------------------------------------------------------------------
// GitHub API response types
// --------------------------------------------------------------------------

/// GitHub issue response (only the fields we read).
#[derive(Deserialize)]
struct GitHubIssue {
    number: u64,
    title: String,
}

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

impl From<GitHubIssue> for Issue {
    fn from(gh: GitHubIssue) -> Self {
        Issue {
            number: gh.number,
            title: gh.title,
        }
    }
}
