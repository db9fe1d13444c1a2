//! Per pull request failures.

use thiserror::Error;

use super::template::TemplateError;
use crate::github::GitHubError;

/// Why a single pull request could not be handled.
///
/// These never abort a run; the pull request stays above the high-water mark
/// and is retried next time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// The comment template could not be rendered for the author.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Existing comments could not be fetched.
    #[error("failed to fetch existing comments: {0}")]
    FetchComments(#[source] GitHubError),

    /// The comment could not be posted.
    #[error("failed to post comment: {0}")]
    PostComment(#[source] GitHubError),

    /// The comment was posted but the pull request could not be closed.
    #[error("failed to close pull request: {0}")]
    Close(#[source] GitHubError),
}
