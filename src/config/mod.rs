//! Run configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach, lowest to highest
//! precedence:
//!
//! 1. **Defaults** – built-in values (only `api_base` and `auto_close` have
//!    one)
//! 2. **Configuration file** – `.prbot.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PRBOT_*`
//! 4. **Command-line arguments** – `--client-id`, `--repo-name`, ...
//!
//! When a required value is still missing after merging, the unprefixed
//! variable names used by existing deployments are consulted:
//! `GITHUB_APP_CLIENT_ID`, `GITHUB_APP_PRIVATE_KEY_PATH`, `MESSAGE_PATH`,
//! `STATUS_FILE`, `REPO_NAME`, and `AUTO_CLOSE`.
//!
//! # Configuration File
//!
//! ```toml
//! client_id = "Iv1.0123456789abcdef"
//! private_key_path = "/etc/prbot/app.pem"
//! message_path = "/etc/prbot/message.j2"
//! status_file = "/var/lib/prbot/linux.json"
//! repo_name = "example-org/linux"
//! auto_close = true
//! ```

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::{DEFAULT_API_BASE, RepositoryLocator};
use crate::run::RunError;

/// Layered configuration for a single run.
///
/// Every field is optional at this stage; [`PrBotConfig::resolve`] applies
/// the legacy fallbacks and validates the result.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use prbot::PrBotConfig;
///
/// let config = PrBotConfig::load().expect("failed to load configuration");
/// let settings = config.resolve().expect("configuration incomplete");
/// println!("watching {}", settings.repository.full_name());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PRBOT",
    discovery(
        dotfile_name = ".prbot.toml",
        config_file_name = "prbot.toml",
        app_name = "prbot"
    )
)]
pub struct PrBotConfig {
    /// Client identifier of the GitHub App, used as the assertion issuer.
    ///
    /// Can be provided via:
    /// - CLI: `--client-id <ID>` or `-c <ID>`
    /// - Environment: `PRBOT_CLIENT_ID` or `GITHUB_APP_CLIENT_ID` (legacy)
    /// - Config file: `client_id = "..."`
    #[ortho_config(cli_short = 'c')]
    pub client_id: Option<String>,

    /// Path of the app's PEM-encoded private key.
    ///
    /// Can be provided via:
    /// - CLI: `--private-key-path <PATH>` or `-k <PATH>`
    /// - Environment: `PRBOT_PRIVATE_KEY_PATH` or
    ///   `GITHUB_APP_PRIVATE_KEY_PATH` (legacy)
    /// - Config file: `private_key_path = "..."`
    #[ortho_config(cli_short = 'k')]
    pub private_key_path: Option<String>,

    /// Path of the Jinja2 comment template.
    ///
    /// Can be provided via:
    /// - CLI: `--message-path <PATH>` or `-m <PATH>`
    /// - Environment: `PRBOT_MESSAGE_PATH` or `MESSAGE_PATH` (legacy)
    /// - Config file: `message_path = "..."`
    #[ortho_config(cli_short = 'm')]
    pub message_path: Option<String>,

    /// Path of the JSON state file.
    ///
    /// Can be provided via:
    /// - CLI: `--status-file <PATH>` or `-s <PATH>`
    /// - Environment: `PRBOT_STATUS_FILE` or `STATUS_FILE` (legacy)
    /// - Config file: `status_file = "..."`
    #[ortho_config(cli_short = 's')]
    pub status_file: Option<String>,

    /// Watched repository in `owner/name` form.
    ///
    /// Can be provided via:
    /// - CLI: `--repo-name <OWNER/NAME>` or `-r <OWNER/NAME>`
    /// - Environment: `PRBOT_REPO_NAME` or `REPO_NAME` (legacy)
    /// - Config file: `repo_name = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo_name: Option<String>,

    /// Closes each pull request after commenting.
    ///
    /// Can be provided via:
    /// - CLI: `--auto-close` / `-a`
    /// - Environment: `AUTO_CLOSE=true` (legacy, case-insensitive)
    /// - Config file: `auto_close = true`
    ///
    /// `ortho_config` does not load boolean values from the environment, so
    /// the legacy variable is the only environment switch.
    #[ortho_config(cli_short = 'a')]
    pub auto_close: bool,

    /// GitHub API base URL.
    ///
    /// Defaults to `https://api.github.com`; set it for GitHub Enterprise.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base <URL>` or `-b <URL>`
    /// - Environment: `PRBOT_API_BASE`
    /// - Config file: `api_base = "..."`
    #[ortho_config(cli_short = 'b')]
    pub api_base: String,
}

impl Default for PrBotConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            private_key_path: None,
            message_path: None,
            status_file: None,
            repo_name: None,
            auto_close: false,
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// GitHub App client identifier.
    pub client_id: String,
    /// PEM private key path.
    pub private_key_path: Utf8PathBuf,
    /// Comment template path.
    pub message_path: Utf8PathBuf,
    /// State file path.
    pub status_file: Utf8PathBuf,
    /// Watched repository and the API host it lives on.
    pub repository: RepositoryLocator,
    /// Whether pull requests are closed after commenting.
    pub auto_close: bool,
}

impl PrBotConfig {
    /// Applies the legacy environment fallbacks and validates every value.
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Configuration`] naming the first missing setting,
    /// or describing why the repository name or API base is invalid.
    pub fn resolve(&self) -> Result<RunSettings, RunError> {
        let client_id = required(
            self.client_id.as_deref(),
            "GITHUB_APP_CLIENT_ID",
            "client-id",
        )?;
        let private_key_path = required(
            self.private_key_path.as_deref(),
            "GITHUB_APP_PRIVATE_KEY_PATH",
            "private-key-path",
        )?;
        let message_path =
            required(self.message_path.as_deref(), "MESSAGE_PATH", "message-path")?;
        let status_file = required(self.status_file.as_deref(), "STATUS_FILE", "status-file")?;
        let repo_name = required(self.repo_name.as_deref(), "REPO_NAME", "repo-name")?;

        let repository = RepositoryLocator::from_full_name(&repo_name, self.api_base.trim())
            .map_err(|error| RunError::Configuration {
                message: error.to_string(),
            })?;

        Ok(RunSettings {
            client_id,
            private_key_path: private_key_path.into(),
            message_path: message_path.into(),
            status_file: status_file.into(),
            repository,
            auto_close: self.auto_close || legacy_flag("AUTO_CLOSE"),
        })
    }
}

fn required(layered: Option<&str>, legacy: &str, flag: &str) -> Result<String, RunError> {
    non_blank(layered)
        .map(str::to_owned)
        .or_else(|| legacy_value(legacy))
        .ok_or_else(|| RunError::Configuration {
            message: format!(
                "{legacy} is not set (use --{flag} or PRBOT_{})",
                to_env_suffix(flag)
            ),
        })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn legacy_value(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    non_blank(Some(&value)).map(str::to_owned)
}

fn legacy_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

fn to_env_suffix(flag: &str) -> String {
    flag.replace('-', "_").to_ascii_uppercase()
}

#[cfg(test)]
mod tests;
