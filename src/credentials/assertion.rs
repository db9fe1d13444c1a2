//! RS256 app assertions.

use std::fmt;

use camino::Utf8Path;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

use super::error::CredentialError;
use crate::fs;
use crate::github::AppAssertion;

/// Seconds `iat` is backdated to absorb clock skew with GitHub.
const ISSUED_AT_SKEW_SECS: i64 = 60;

/// Lifetime of an assertion; GitHub rejects anything over ten minutes.
const ASSERTION_LIFETIME_SECS: i64 = 600;

#[derive(Debug, Serialize)]
struct Claims<'issuer> {
    iat: i64,
    exp: i64,
    iss: &'issuer str,
}

/// Signs app assertions with the app's private key.
#[derive(Clone)]
pub struct AssertionSigner {
    client_id: String,
    key: EncodingKey,
}

impl AssertionSigner {
    /// Builds a signer from a PEM-encoded RSA private key.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidKey`] when `pem` is not an RSA key.
    pub fn from_pem(client_id: impl Into<String>, pem: &[u8]) -> Result<Self, CredentialError> {
        let key = EncodingKey::from_rsa_pem(pem).map_err(|error| CredentialError::InvalidKey {
            message: error.to_string(),
        })?;
        Ok(Self {
            client_id: client_id.into(),
            key,
        })
    }

    /// Reads the private key at `path` and builds a signer from it.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::KeyUnreadable`] when the file cannot be read
    /// and [`CredentialError::InvalidKey`] when it is not an RSA key.
    pub fn from_file(
        client_id: impl Into<String>,
        path: &Utf8Path,
    ) -> Result<Self, CredentialError> {
        let pem = fs::read_to_string(path).map_err(|error| CredentialError::KeyUnreadable {
            path: path.to_string(),
            message: error.to_string(),
        })?;
        Self::from_pem(client_id, pem.as_bytes())
    }

    /// Signs an assertion issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Signing`] when encoding fails.
    pub fn sign(&self, now: DateTime<Utc>) -> Result<AppAssertion, CredentialError> {
        let claims = Claims {
            iat: (now - TimeDelta::seconds(ISSUED_AT_SKEW_SECS)).timestamp(),
            exp: (now + TimeDelta::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
            iss: &self.client_id,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map(AppAssertion::new)
            .map_err(|error| CredentialError::Signing {
                message: error.to_string(),
            })
    }
}

impl fmt::Debug for AssertionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertionSigner")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}
