//! Error types for loading and saving the persisted state record.

use thiserror::Error;

/// Errors returned by [`super::StateStore`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    /// The state file exists but does not hold a valid record.
    #[error("state file '{path}' is corrupt: {message}")]
    Corrupt {
        /// Path of the state file.
        path: String,
        /// Parser error detail.
        message: String,
    },

    /// The state file or its directory could not be read or written.
    #[error("state file '{path}' could not be accessed: {message}")]
    Io {
        /// Path of the state file.
        path: String,
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
