//! Bearer credential wrappers used to authenticate against GitHub.

use std::fmt;

use chrono::{DateTime, Utc};

/// Short-lived installation access token.
///
/// The `Debug` form is redacted so the token never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct InstallationToken(String);

impl InstallationToken {
    /// Wraps a token value, trimming surrounding whitespace.
    ///
    /// Returns `None` when the supplied string is blank.
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for InstallationToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for InstallationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InstallationToken(<redacted>)")
    }
}

/// Signed app assertion (a JWT) presented when exchanging for an
/// installation token.
#[derive(Clone, PartialEq, Eq)]
pub struct AppAssertion(String);

impl AppAssertion {
    /// Wraps an encoded assertion.
    #[must_use]
    pub const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Borrow the encoded assertion.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AppAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppAssertion(<redacted>)")
    }
}

/// An installation token paired with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationCredential {
    /// Bearer token for API calls.
    pub token: InstallationToken,
    /// Instant after which the token is rejected by GitHub.
    pub expires_at: DateTime<Utc>,
}
