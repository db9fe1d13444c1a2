//! Typed results of a polling pass.

use super::error::NotifyError;

/// What happened to a pull request that was examined successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The pull request is closed; nothing was posted.
    SkippedClosed,
    /// A comment containing the rendered text already exists.
    SkippedDuplicate,
    /// The comment was posted.
    Commented,
    /// The comment was posted and the pull request closed.
    CommentedAndClosed,
}

impl Disposition {
    /// Whether this disposition moves the high-water mark.
    #[must_use]
    pub const fn advances_marker(self) -> bool {
        matches!(self, Self::Commented | Self::CommentedAndClosed)
    }
}

/// Result of handling one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestOutcome {
    /// Pull request number.
    pub number: u64,
    /// Disposition, or the error that stopped it.
    pub result: Result<Disposition, NotifyError>,
}

/// Everything a polling pass did, newest pull request first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    /// One entry per pull request examined above the high-water mark.
    pub outcomes: Vec<PullRequestOutcome>,
    /// Number of the first pull request at or below the mark, where the
    /// pass stopped; `None` when the list was exhausted.
    pub stopped_at: Option<u64>,
}

impl PollReport {
    /// Count of pull requests with the given disposition.
    #[must_use]
    pub fn count(&self, disposition: Disposition) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.as_ref().is_ok_and(|found| *found == disposition))
            .count()
    }

    /// Pull requests whose handling failed.
    pub fn failures(&self) -> impl Iterator<Item = (u64, &NotifyError)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|error| (outcome.number, error))
        })
    }
}
