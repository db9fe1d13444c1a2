//! `prbot` entrypoint: one poll of the configured repository per invocation.

use std::io::{self, Write};
use std::process::ExitCode;

use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use prbot::{PrBotConfig, RunError, run_once};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prbot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), RunError> {
    let settings = load_config()?.resolve()?;
    run_once(&settings, &DefaultClock).await?;
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`RunError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PrBotConfig, RunError> {
    PrBotConfig::load().map_err(|error| RunError::Configuration {
        message: error.to_string(),
    })
}
