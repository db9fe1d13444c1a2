//! Failures that abort a run.

use thiserror::Error;

use crate::credentials::CredentialError;
use crate::github::GitHubError;
use crate::notify::TemplateError;
use crate::state::StateError;

/// Errors returned by [`super::run_once`]; each one ends the process with a
/// non-zero exit status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    /// A required setting is missing or malformed.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the problem.
        message: String,
    },

    /// No installation token could be obtained.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The state file could not be loaded or saved.
    #[error(transparent)]
    State(#[from] StateError),

    /// The comment template could not be loaded.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The API client could not be constructed.
    #[error("failed to build GitHub client: {0}")]
    Client(#[source] GitHubError),

    /// Pull requests could not be listed; state was still saved.
    #[error("failed to list pull requests: {0}")]
    Listing(#[source] GitHubError),
}
