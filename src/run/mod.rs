//! One invocation of the bot, from loading state to saving it.
//!
//! The order is fixed: load state, obtain a token, load the template, poll,
//! save state. Anything that fails before polling aborts without writing
//! the state file. Once polling has started the state is always saved, even
//! when listing fails, so a freshly issued token is not thrown away.

mod error;

pub use error::RunError;

use mockable::Clock;

use crate::config::RunSettings;
use crate::credentials::TokenManager;
use crate::github::{OctocrabGateway, OctocrabInstallationGateway};
use crate::notify::{Disposition, MessageTemplate, PollReport, PullRequestNotifier};
use crate::state::{PersistedState, StateStore};

/// Runs a single poll of the configured repository.
///
/// # Errors
///
/// Returns [`RunError`] when state, credentials, or the template cannot be
/// loaded, when the state cannot be saved, or when pull requests cannot be
/// listed. Failures on individual pull requests are not errors; they are
/// recorded in the returned report.
pub async fn run_once<Clk>(settings: &RunSettings, clock: &Clk) -> Result<PollReport, RunError>
where
    Clk: Clock + Send + Sync,
{
    let repository = &settings.repository;
    tracing::info!("polling {}", repository.full_name());

    let store = StateStore::new(settings.status_file.clone());
    let mut state = store.load()?;

    let installations = OctocrabInstallationGateway::new(repository.api_base().clone());
    let token = TokenManager::new(
        &installations,
        clock,
        &settings.client_id,
        &settings.private_key_path,
    )
    .obtain_token(&mut state, repository.owner())
    .await?;

    let template = MessageTemplate::from_file(&settings.message_path)?;
    let gateway = OctocrabGateway::for_token(&token, repository).map_err(RunError::Client)?;

    let polled = PullRequestNotifier::new(&gateway, &template, repository, settings.auto_close)
        .poll(&mut state)
        .await;

    store.save(&state)?;
    let report = polled.map_err(RunError::Listing)?;
    log_summary(&report, &state);
    Ok(report)
}

fn log_summary(report: &PollReport, state: &PersistedState) {
    let failed = report.failures().count();
    tracing::info!(
        commented = report.count(Disposition::Commented),
        closed = report.count(Disposition::CommentedAndClosed),
        skipped_closed = report.count(Disposition::SkippedClosed),
        skipped_duplicate = report.count(Disposition::SkippedDuplicate),
        failed,
        "run complete, high-water mark is #{}",
        state.last_processed_number()
    );
    if failed > 0 {
        tracing::warn!("{failed} pull request(s) failed and will be retried on the next run");
    }
}
