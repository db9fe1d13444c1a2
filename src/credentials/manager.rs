//! Cached installation token lookup.

use camino::Utf8Path;
use chrono::TimeDelta;
use mockable::Clock;

use super::assertion::AssertionSigner;
use super::error::CredentialError;
use crate::github::{InstallationGateway, InstallationToken, RepositoryOwner};
use crate::state::PersistedState;

/// A cached token is reused only while it has more than this many seconds
/// left.
pub const REFRESH_MARGIN_SECS: i64 = 300;

/// Hands out installation tokens, minting new ones only when the cached one
/// is missing or about to expire.
pub struct TokenManager<'run, Gateway, Clk>
where
    Gateway: InstallationGateway,
    Clk: Clock + Send + Sync,
{
    gateway: &'run Gateway,
    clock: &'run Clk,
    client_id: &'run str,
    private_key_path: &'run Utf8Path,
}

impl<'run, Gateway, Clk> TokenManager<'run, Gateway, Clk>
where
    Gateway: InstallationGateway,
    Clk: Clock + Send + Sync,
{
    /// Creates a manager for the app identified by `client_id`.
    #[must_use]
    pub const fn new(
        gateway: &'run Gateway,
        clock: &'run Clk,
        client_id: &'run str,
        private_key_path: &'run Utf8Path,
    ) -> Self {
        Self {
            gateway,
            clock,
            client_id,
            private_key_path,
        }
    }

    /// Returns a token valid for at least the refresh margin.
    ///
    /// A cached token is returned without touching the network or the key
    /// file. Otherwise a new token is issued for `organisation`'s
    /// installation and cached in `state`; persisting `state` is left to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when the key cannot be loaded, the
    /// assertion cannot be signed, or either exchange call fails. `state` is
    /// unchanged in that case.
    pub async fn obtain_token(
        &self,
        state: &mut PersistedState,
        organisation: &RepositoryOwner,
    ) -> Result<InstallationToken, CredentialError> {
        let now = self.clock.utc();

        if let Some(cached) = state.cached_credential() {
            if cached.expires_at > now + TimeDelta::seconds(REFRESH_MARGIN_SECS) {
                tracing::info!(
                    "reusing installation token valid until {}",
                    cached.expires_at
                );
                return Ok(cached.token);
            }
            tracing::info!(
                "cached installation token expires at {}, refreshing",
                cached.expires_at
            );
        }

        let signer = AssertionSigner::from_file(self.client_id, self.private_key_path)?;
        let assertion = signer.sign(now)?;

        let installation_id = self
            .gateway
            .installation_id(&assertion, organisation)
            .await
            .map_err(|source| CredentialError::InstallationLookup {
                organisation: organisation.as_str().to_owned(),
                source,
            })?;
        let credential = self
            .gateway
            .create_installation_token(&assertion, installation_id)
            .await
            .map_err(|source| CredentialError::TokenIssuance {
                installation_id,
                source,
            })?;

        tracing::info!(
            installation_id,
            "issued installation token valid until {}",
            credential.expires_at
        );
        state.store_credential(&credential);
        Ok(credential.token)
    }
}
