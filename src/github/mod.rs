//! GitHub client layer: repository addressing, credentials, and gateways.
//!
//! This module wraps Octocrab behind small traits covering exactly the calls
//! the bot makes: the installation token exchange, listing pull requests,
//! reading and posting issue comments, and closing pull requests. Errors are
//! mapped into [`GitHubError`] so callers never see Octocrab internals.

pub mod auth;
pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use auth::{AppAssertion, InstallationCredential, InstallationToken};
pub use error::GitHubError;
pub use gateway::{
    InstallationGateway, OctocrabGateway, OctocrabInstallationGateway, PullRequestGateway,
};
pub use locator::{DEFAULT_API_BASE, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{IssueComment, PullRequestSummary};

#[cfg(test)]
pub use gateway::{MockInstallationGateway, MockPullRequestGateway};

#[cfg(test)]
mod tests;
