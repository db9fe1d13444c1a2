//! The polling loop.

use crate::github::{
    GitHubError, IssueComment, PullRequestGateway, PullRequestSummary, RepositoryLocator,
};
use crate::state::PersistedState;

use super::error::NotifyError;
use super::outcome::{Disposition, PollReport, PullRequestOutcome};
use super::template::MessageRenderer;

/// Posts the one-time comment on new pull requests of one repository.
pub struct PullRequestNotifier<'run, Gateway, Renderer>
where
    Gateway: PullRequestGateway,
    Renderer: MessageRenderer,
{
    gateway: &'run Gateway,
    renderer: &'run Renderer,
    locator: &'run RepositoryLocator,
    auto_close: bool,
}

impl<'run, Gateway, Renderer> PullRequestNotifier<'run, Gateway, Renderer>
where
    Gateway: PullRequestGateway,
    Renderer: MessageRenderer,
{
    /// Creates a notifier for the repository at `locator`.
    #[must_use]
    pub const fn new(
        gateway: &'run Gateway,
        renderer: &'run Renderer,
        locator: &'run RepositoryLocator,
        auto_close: bool,
    ) -> Self {
        Self {
            gateway,
            renderer,
            locator,
            auto_close,
        }
    }

    /// Runs one polling pass, advancing `state`'s high-water mark in place.
    ///
    /// The mark read at the start of the pass is the stopping point: pull
    /// requests at or below it are never examined. Failures on individual
    /// pull requests are logged and recorded in the report without stopping
    /// the pass.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the pull requests cannot be listed; no
    /// pull request has been touched in that case.
    pub async fn poll(&self, state: &mut PersistedState) -> Result<PollReport, GitHubError> {
        let mut pulls = self.gateway.list_pull_requests(self.locator).await?;
        pulls.reverse();

        let threshold = state.last_processed_number();
        let mut report = PollReport::default();

        for pull in &pulls {
            tracing::info!(
                "pull request #{} by @{}: {}",
                pull.number,
                pull.author,
                pull.title.as_deref().unwrap_or_default()
            );
            if pull.number <= threshold {
                tracing::info!(
                    "#{} is at or below the mark ({threshold}), stopping",
                    pull.number
                );
                report.stopped_at = Some(pull.number);
                break;
            }

            let result = self.handle(pull).await;
            match &result {
                Ok(disposition) => {
                    log_disposition(pull.number, *disposition);
                    if disposition.advances_marker() {
                        state.advance_to(pull.number);
                    }
                }
                Err(error) => {
                    tracing::error!(
                        number = pull.number,
                        detail = ?error,
                        "failed to notify pull request #{}: {error}",
                        pull.number
                    );
                }
            }
            report.outcomes.push(PullRequestOutcome {
                number: pull.number,
                result,
            });
        }

        Ok(report)
    }

    async fn handle(&self, pull: &PullRequestSummary) -> Result<Disposition, NotifyError> {
        let comment = self.renderer.render(&pull.author)?;

        if pull.is_closed() {
            return Ok(Disposition::SkippedClosed);
        }

        let existing = self
            .gateway
            .issue_comments(self.locator, pull.number)
            .await
            .map_err(NotifyError::FetchComments)?;
        if already_notified(&existing, &comment) {
            return Ok(Disposition::SkippedDuplicate);
        }

        self.gateway
            .create_comment(self.locator, pull.number, &comment)
            .await
            .map_err(NotifyError::PostComment)?;

        if !self.auto_close {
            return Ok(Disposition::Commented);
        }

        self.gateway
            .close_pull_request(self.locator, pull.number)
            .await
            .map_err(NotifyError::Close)?;
        Ok(Disposition::CommentedAndClosed)
    }
}

/// Whether any existing comment already contains the rendered text.
///
/// Surrounding whitespace of the rendered text is ignored.
fn already_notified(existing: &[IssueComment], rendered: &str) -> bool {
    let needle = rendered.trim();
    existing
        .iter()
        .filter_map(|comment| comment.body.as_deref())
        .any(|body| body.contains(needle))
}

fn log_disposition(number: u64, disposition: Disposition) {
    match disposition {
        Disposition::SkippedClosed => tracing::info!("#{number} is closed, skipping"),
        Disposition::SkippedDuplicate => {
            tracing::info!("#{number} already carries the comment, skipping");
        }
        Disposition::Commented => tracing::info!("#{number} commented"),
        Disposition::CommentedAndClosed => tracing::info!("#{number} commented and closed"),
    }
}
