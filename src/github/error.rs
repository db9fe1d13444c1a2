//! Error types exposed by the GitHub client layer.

use thiserror::Error;

/// Errors surfaced while parsing repository input or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitHubError {
    /// The API base URL could not be parsed.
    #[error("API base URL is invalid: {0}")]
    InvalidUrl(String),

    /// The repository name is not of the form `owner/name`.
    #[error("repository must be given as owner/name, got '{value}'")]
    InvalidRepositoryName {
        /// The rejected value.
        value: String,
    },

    /// The authentication credential was rejected by GitHub.
    #[error("GitHub rejected the credential: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error or an unexpected status.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },
}
