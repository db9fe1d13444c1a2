//! Posts a one-time comment on new pull requests in a GitHub repository.
//!
//! The bot runs as a periodic batch job authenticated as a GitHub App. Each
//! run obtains an installation token (reusing a cached one while it is
//! fresh), walks the repository's open pull requests newest first down to a
//! persisted high-water mark, and comments on each one it has not handled
//! yet, optionally closing it afterwards. Typical use is a read-only mirror
//! telling contributors where patches should go instead.

pub mod config;
pub mod credentials;
mod fs;
pub mod github;
pub mod notify;
pub mod run;
pub mod state;

pub use config::{PrBotConfig, RunSettings};
pub use credentials::{CredentialError, TokenManager};
pub use github::{GitHubError, RepositoryLocator};
pub use notify::{Disposition, PollReport, PullRequestNotifier};
pub use run::{RunError, run_once};
pub use state::{PersistedState, StateError, StateStore};
