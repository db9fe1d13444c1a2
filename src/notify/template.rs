//! Comment templates using Jinja2-compatible syntax.
//!
//! The template sees a single variable, `username`, holding the login of
//! the pull request author:
//!
//! ```jinja2
//! Thanks for the pull request, @{{ username }}! This repository is a
//! read-only mirror; please send patches to the mailing list instead.
//! ```

use camino::Utf8Path;
use minijinja::{AutoEscape, Environment, context};
use thiserror::Error;

use crate::fs;

/// Errors raised while loading or rendering a comment template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("failed to read template '{path}': {message}")]
    Unreadable {
        /// Template path.
        path: String,
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The template source is not valid Jinja2.
    #[error("invalid template syntax: {message}")]
    Syntax {
        /// Parser error detail.
        message: String,
    },

    /// Rendering failed for a particular author.
    #[error("template rendering failed: {message}")]
    Render {
        /// Renderer error detail.
        message: String,
    },
}

/// Renders the notification text for a pull request author.
#[cfg_attr(test, mockall::automock)]
pub trait MessageRenderer: Send + Sync {
    /// Render the comment body addressed to `username`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] when the template cannot be
    /// evaluated.
    fn render(&self, username: &str) -> Result<String, TemplateError>;
}

/// A comment template whose syntax has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
}

impl MessageTemplate {
    /// Parses `source`, rejecting syntax errors up front.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Syntax`] when the source does not parse.
    pub fn new(source: impl Into<String>) -> Result<Self, TemplateError> {
        let template = Self {
            source: source.into(),
        };
        environment()
            .template_from_str(&template.source)
            .map_err(|error| TemplateError::Syntax {
                message: error.to_string(),
            })?;
        Ok(template)
    }

    /// Reads and parses the template file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Unreadable`] when the file cannot be read and
    /// [`TemplateError::Syntax`] when it does not parse.
    pub fn from_file(path: &Utf8Path) -> Result<Self, TemplateError> {
        let source = fs::read_to_string(path).map_err(|error| TemplateError::Unreadable {
            path: path.to_string(),
            message: error.to_string(),
        })?;
        Self::new(source)
    }
}

impl MessageRenderer for MessageTemplate {
    fn render(&self, username: &str) -> Result<String, TemplateError> {
        environment()
            .render_str(&self.source, context! { username => username })
            .map_err(|error| TemplateError::Render {
                message: error.to_string(),
            })
    }
}

fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    // Comments are Markdown, not HTML.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}
