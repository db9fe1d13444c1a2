//! Durable record carried between runs.
//!
//! The record holds the high-water mark of handled pull requests and the
//! most recently issued installation token with its expiry. It is read once
//! at the start of a run, mutated in memory, and rewritten whole at the end.

mod error;
mod store;

pub use error::StateError;
pub use store::StateStore;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::{InstallationCredential, InstallationToken};

/// Wire format of `token_expires_at`.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Persisted state for one repository.
///
/// Field names match the on-disk JSON record. The high-water mark can only
/// move forwards through [`PersistedState::advance_to`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pull_req_number: u64,
    installation_token: Option<String>,
    token_expires_at: Option<String>,
}

impl PersistedState {
    /// State whose high-water mark starts at `number`, with no cached token.
    #[must_use]
    pub fn with_marker(number: u64) -> Self {
        Self {
            pull_req_number: number,
            ..Self::default()
        }
    }

    /// The largest pull request number already handled.
    #[must_use]
    pub const fn last_processed_number(&self) -> u64 {
        self.pull_req_number
    }

    /// Raises the high-water mark to `number` if it is higher.
    pub fn advance_to(&mut self, number: u64) {
        self.pull_req_number = self.pull_req_number.max(number);
    }

    /// The cached token and its expiry, if both are present and usable.
    ///
    /// An expiry that does not parse as `YYYY-MM-DDTHH:MM:SSZ` is treated as
    /// absent so the caller mints a fresh token.
    #[must_use]
    pub fn cached_credential(&self) -> Option<InstallationCredential> {
        let token = self
            .installation_token
            .as_deref()
            .and_then(InstallationToken::new)?;
        let raw_expiry = self.token_expires_at.as_deref()?;

        match parse_expiry(raw_expiry) {
            Some(expires_at) => Some(InstallationCredential { token, expires_at }),
            None => {
                tracing::warn!(
                    "ignoring cached token with unparseable expiry '{raw_expiry}'"
                );
                None
            }
        }
    }

    /// Replaces the cached token and expiry.
    pub fn store_credential(&mut self, credential: &InstallationCredential) {
        self.installation_token = Some(credential.token.value().to_owned());
        self.token_expires_at = Some(credential.expires_at.format(EXPIRY_FORMAT).to_string());
    }
}

fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, EXPIRY_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
