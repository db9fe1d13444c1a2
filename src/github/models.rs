//! Data models representing pull requests, comments, and installations.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pull request as seen by the poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// Pull request number, increasing with creation order.
    pub number: u64,
    /// Author login; empty when GitHub omits the user.
    pub author: String,
    /// Title of the pull request.
    pub title: Option<String>,
    /// When the pull request was closed, if it has been.
    pub closed_at: Option<DateTime<Utc>>,
}

impl PullRequestSummary {
    /// Whether the pull request has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

/// Issue comment attached to a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    /// Comment body.
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    pub(super) title: Option<String>,
    pub(super) user: Option<ApiUser>,
    pub(super) closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiInstallation {
    pub(super) id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiInstallationToken {
    pub(super) token: String,
    pub(super) expires_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct ApiCommentRequest<'body> {
    pub(super) body: &'body str,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct ApiPullRequestUpdate {
    pub(super) state: &'static str,
}

impl From<ApiPullRequest> for PullRequestSummary {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            author: value.user.and_then(|user| user.login).unwrap_or_default(),
            title: value.title,
            closed_at: value.closed_at,
        }
    }
}

impl From<ApiComment> for IssueComment {
    fn from(value: ApiComment) -> Self {
        Self { body: value.body }
    }
}
