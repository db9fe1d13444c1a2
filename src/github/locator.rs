//! Repository identity wrappers and API path construction.

use url::Url;

use super::error::GitHubError;

/// Default API base for public GitHub.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
///
/// For an app installed on an organisation this is also the organisation
/// whose installation is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    fn new(value: &str, full_name: &str) -> Result<Self, GitHubError> {
        if value.is_empty() {
            return Err(GitHubError::InvalidRepositoryName {
                value: full_name.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    fn new(value: &str, full_name: &str) -> Result<Self, GitHubError> {
        if value.is_empty() || value.contains('/') {
            return Err(GitHubError::InvalidRepositoryName {
                value: full_name.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A single repository on a GitHub API host.
///
/// # Example
///
/// ```
/// use prbot::github::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_full_name("octo/repo", "https://api.github.com")
///     .expect("should parse repository name");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Parses an `owner/name` repository identifier against an API base URL.
    ///
    /// The owner is everything before the first `/`.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::InvalidRepositoryName` when either part is empty
    /// or the name holds further `/` separators, and `GitHubError::InvalidUrl`
    /// when the API base cannot be parsed.
    pub fn from_full_name(full_name: &str, api_base: &str) -> Result<Self, GitHubError> {
        let trimmed = full_name.trim();
        let (owner_part, name_part) =
            trimmed
                .split_once('/')
                .ok_or_else(|| GitHubError::InvalidRepositoryName {
                    value: trimmed.to_owned(),
                })?;

        let owner = RepositoryOwner::new(owner_part, trimmed)?;
        let repository = RepositoryName::new(name_part, trimmed)?;
        let parsed_base =
            Url::parse(api_base).map_err(|error| GitHubError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base: parsed_base,
            owner,
            repository,
        })
    }

    /// API base URL requests are sent to.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// `owner/name` form of the repository.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.as_str(), self.repository.as_str())
    }

    pub(crate) fn pulls_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    pub(crate) fn pull_request_path(&self, number: u64) -> String {
        format!(
            "/repos/{}/{}/pulls/{number}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    pub(crate) fn issue_comments_path(&self, number: u64) -> String {
        format!(
            "/repos/{}/{}/issues/{number}/comments",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}

pub(crate) fn organisation_installation_path(owner: &RepositoryOwner) -> String {
    format!("/orgs/{}/installation", owner.as_str())
}

pub(crate) fn installation_tokens_path(installation_id: u64) -> String {
    format!("/app/installations/{installation_id}/access_tokens")
}
