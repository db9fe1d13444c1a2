//! Installation token acquisition.
//!
//! GitHub Apps authenticate in two steps: a short-lived assertion signed with
//! the app's private key is exchanged for an installation token scoped to the
//! organisation owning the repository. Tokens last about an hour, so the most
//! recent one is cached in the persisted state and reused while it has more
//! than [`REFRESH_MARGIN_SECS`] seconds left.

mod assertion;
mod error;
mod manager;

pub use assertion::AssertionSigner;
pub use error::CredentialError;
pub use manager::{REFRESH_MARGIN_SECS, TokenManager};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
