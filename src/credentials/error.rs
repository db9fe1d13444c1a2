//! Failures while obtaining an installation token.

use thiserror::Error;

use crate::github::GitHubError;

/// Errors returned by [`super::TokenManager`]. All of them abort the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// The private key file could not be read.
    #[error("failed to read private key '{path}': {message}")]
    KeyUnreadable {
        /// Key file path.
        path: String,
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The private key is not a PEM-encoded RSA key.
    #[error("invalid private key: {message}")]
    InvalidKey {
        /// Decoder error detail.
        message: String,
    },

    /// The app assertion could not be signed.
    #[error("failed to sign app assertion: {message}")]
    Signing {
        /// Signer error detail.
        message: String,
    },

    /// The organisation's installation could not be looked up.
    #[error("failed to look up the app installation for '{organisation}': {source}")]
    InstallationLookup {
        /// Organisation whose installation was requested.
        organisation: String,
        /// Underlying API failure.
        source: GitHubError,
    },

    /// GitHub refused to issue an installation token.
    #[error("failed to issue a token for installation {installation_id}: {source}")]
    TokenIssuance {
        /// Installation the token was requested for.
        installation_id: u64,
        /// Underlying API failure.
        source: GitHubError,
    },
}
