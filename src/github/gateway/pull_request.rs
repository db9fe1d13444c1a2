//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::github::auth::InstallationToken;
use crate::github::error::GitHubError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{
    ApiComment, ApiCommentRequest, ApiPullRequest, ApiPullRequestUpdate, IssueComment,
    PullRequestSummary,
};

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

const LIST_QUERY: [(&str, &str); 4] = [
    ("state", "open"),
    ("sort", "created"),
    ("direction", "asc"),
    ("per_page", "100"),
];

/// Octocrab-backed gateway authenticated as an app installation.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given installation token, pointed
    /// at the locator's API base.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::InvalidUrl` when the base URI cannot be parsed or
    /// `GitHubError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &InstallationToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, GitHubError> {
        let octocrab = build_octocrab_client(token.value(), locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn list_pull_requests(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<PullRequestSummary>, GitHubError> {
        let page = self
            .client
            .get::<Page<ApiPullRequest>, _, _>(locator.pulls_path(), Some(&LIST_QUERY))
            .await
            .map_err(|error| map_octocrab_error("list pulls", &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|pulls| pulls.into_iter().map(ApiPullRequest::into).collect())
            .map_err(|error| map_octocrab_error("list pulls", &error))
    }

    async fn issue_comments(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<Vec<IssueComment>, GitHubError> {
        let page = self
            .client
            .get::<Page<ApiComment>, _, _>(locator.issue_comments_path(number), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("issue comments", &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|comments| comments.into_iter().map(ApiComment::into).collect())
            .map_err(|error| map_octocrab_error("issue comments", &error))
    }

    async fn create_comment(
        &self,
        locator: &RepositoryLocator,
        number: u64,
        body: &str,
    ) -> Result<(), GitHubError> {
        let request = ApiCommentRequest { body };
        let _created: ApiComment = self
            .client
            .post(locator.issue_comments_path(number), Some(&request))
            .await
            .map_err(|error| map_octocrab_error("create comment", &error))?;
        Ok(())
    }

    async fn close_pull_request(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<(), GitHubError> {
        let update = ApiPullRequestUpdate { state: "closed" };
        let _updated: ApiPullRequest = self
            .client
            .patch(locator.pull_request_path(number), Some(&update))
            .await
            .map_err(|error| map_octocrab_error("close pull request", &error))?;
        Ok(())
    }
}
