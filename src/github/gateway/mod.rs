//! Gateways for talking to GitHub through Octocrab.
//!
//! The trait-based design enables mocking in tests while the Octocrab
//! implementations handle real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod installation;
mod pull_request;

pub use installation::OctocrabInstallationGateway;
pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::auth::{AppAssertion, InstallationCredential};
use crate::github::error::GitHubError;
use crate::github::locator::{RepositoryLocator, RepositoryOwner};
use crate::github::models::{IssueComment, PullRequestSummary};

/// Gateway for the pull request operations the poller needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// List open pull requests ordered by creation, oldest first.
    async fn list_pull_requests(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<PullRequestSummary>, GitHubError>;

    /// Fetch all issue comments on the pull request.
    async fn issue_comments(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<Vec<IssueComment>, GitHubError>;

    /// Post a new issue comment on the pull request.
    async fn create_comment(
        &self,
        locator: &RepositoryLocator,
        number: u64,
        body: &str,
    ) -> Result<(), GitHubError>;

    /// Transition the pull request to the closed state.
    async fn close_pull_request(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<(), GitHubError>;
}

/// Gateway for exchanging an app assertion for an installation token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstallationGateway: Send + Sync {
    /// Look up the app's installation identifier on an organisation.
    ///
    /// Anything other than `200 OK` is an error.
    async fn installation_id(
        &self,
        assertion: &AppAssertion,
        organisation: &RepositoryOwner,
    ) -> Result<u64, GitHubError>;

    /// Issue a fresh access token for the installation.
    ///
    /// Anything other than `201 Created` is an error.
    async fn create_installation_token(
        &self,
        assertion: &AppAssertion,
        installation_id: u64,
    ) -> Result<InstallationCredential, GitHubError>;
}
