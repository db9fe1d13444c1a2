//! Octocrab implementation of the installation token exchange.
//!
//! Both calls authenticate with the signed app assertion rather than an
//! installation token, so a client is built per call.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::{StatusCode, Uri};
use octocrab::Octocrab;
use url::Url;

use crate::github::auth::{AppAssertion, InstallationCredential, InstallationToken};
use crate::github::error::GitHubError;
use crate::github::locator::{
    RepositoryOwner, installation_tokens_path, organisation_installation_path,
};
use crate::github::models::{ApiInstallation, ApiInstallationToken};

use super::InstallationGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;
use super::http_utils::decode_exact_status;

/// Exchanges app assertions for installation tokens via Octocrab.
#[derive(Debug, Clone)]
pub struct OctocrabInstallationGateway {
    api_base: Url,
}

impl OctocrabInstallationGateway {
    /// Creates a gateway targeting `api_base`.
    #[must_use]
    pub const fn new(api_base: Url) -> Self {
        Self { api_base }
    }

    fn client_for(&self, assertion: &AppAssertion) -> Result<Octocrab, GitHubError> {
        build_octocrab_client(assertion.as_str(), self.api_base.as_str())
    }
}

fn parse_uri(path: &str) -> Result<Uri, GitHubError> {
    path.parse::<Uri>()
        .map_err(|error| GitHubError::InvalidUrl(error.to_string()))
}

#[async_trait]
impl InstallationGateway for OctocrabInstallationGateway {
    async fn installation_id(
        &self,
        assertion: &AppAssertion,
        organisation: &RepositoryOwner,
    ) -> Result<u64, GitHubError> {
        const OPERATION: &str = "installation lookup";

        let client = self.client_for(assertion)?;
        let uri = parse_uri(&organisation_installation_path(organisation))?;
        let response = client
            ._get_with_headers(uri, None)
            .await
            .map_err(|error| map_octocrab_error(OPERATION, &error))?;

        let status = response.status();
        let body = client
            .body_to_string(response)
            .await
            .map_err(|error| map_octocrab_error(OPERATION, &error))?;

        let installation: ApiInstallation =
            decode_exact_status(OPERATION, StatusCode::OK, status, &body)?;
        Ok(installation.id)
    }

    async fn create_installation_token(
        &self,
        assertion: &AppAssertion,
        installation_id: u64,
    ) -> Result<InstallationCredential, GitHubError> {
        const OPERATION: &str = "installation token issuance";

        let client = self.client_for(assertion)?;
        let uri = parse_uri(&installation_tokens_path(installation_id))?;
        let response = client
            ._post(uri, None::<&()>)
            .await
            .map_err(|error| map_octocrab_error(OPERATION, &error))?;

        let status = response.status();
        let body = client
            .body_to_string(response)
            .await
            .map_err(|error| map_octocrab_error(OPERATION, &error))?;

        let issued: ApiInstallationToken =
            decode_exact_status(OPERATION, StatusCode::CREATED, status, &body)?;

        let expires_at = DateTime::parse_from_rfc3339(&issued.expires_at)
            .map_err(|error| GitHubError::Api {
                message: format!(
                    "{OPERATION} returned unparseable expiry '{}': {error}",
                    issued.expires_at
                ),
            })?
            .with_timezone(&Utc);
        let token = InstallationToken::new(&issued.token).ok_or_else(|| GitHubError::Api {
            message: format!("{OPERATION} returned an empty token"),
        })?;

        Ok(InstallationCredential { token, expires_at })
    }
}
