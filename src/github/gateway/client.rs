//! Octocrab client construction helpers for gateway implementations.

use http::Uri;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

use crate::github::error::GitHubError;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client sending `bearer` as its token to `api_base`.
///
/// Installation tokens and app assertions are both presented as bearer
/// credentials, so the same construction serves both. Retries are disabled:
/// a resent comment POST could publish the same comment twice.
///
/// # Errors
///
/// Returns `GitHubError::InvalidUrl` when the base URI cannot be parsed or
/// `GitHubError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    bearer: &str,
    api_base: &str,
) -> Result<Octocrab, GitHubError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| GitHubError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .add_retry_config(RetryConfig::None)
        .personal_token(bearer.to_owned())
        .base_uri(base_uri)
        .map_err(|error| GitHubError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
