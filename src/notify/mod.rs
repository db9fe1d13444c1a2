//! Poll-and-notify engine.
//!
//! Each run walks the repository's open pull requests newest first, stopping
//! at the persisted high-water mark. Every pull request above the mark is
//! either skipped (closed, or already carrying the rendered comment) or
//! commented on, optionally followed by closing it. Only a successful post
//! advances the mark; failures are reported per pull request and retried on
//! a later run.

mod engine;
mod error;
mod outcome;
pub mod template;

pub use engine::PullRequestNotifier;
pub use error::NotifyError;
pub use outcome::{Disposition, PollReport, PullRequestOutcome};
pub use template::{MessageRenderer, MessageTemplate, TemplateError};

#[cfg(test)]
pub use template::MockMessageRenderer;

#[cfg(test)]
mod tests;
