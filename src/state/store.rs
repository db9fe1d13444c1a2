//! Loads and saves [`PersistedState`] as a JSON file.

use std::io;

use camino::Utf8PathBuf;

use super::PersistedState;
use super::error::StateError;
use crate::fs::open_parent;

/// File-backed store for the persisted state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStore {
    path: Utf8PathBuf,
}

impl StateStore {
    /// Creates a store for the record at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the record, or a fresh default when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Corrupt`] when the file exists but is not a valid
    /// record, and [`StateError::Io`] when its directory cannot be opened or
    /// the file cannot be read.
    pub fn load(&self) -> Result<PersistedState, StateError> {
        let handle = open_parent(&self.path).map_err(|error| self.io_error(&error))?;

        let content = match handle.dir.read_to_string(handle.file_name) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no state file at '{}', starting fresh", self.path);
                return Ok(PersistedState::default());
            }
            Err(error) => return Err(self.io_error(&error)),
        };

        serde_json::from_str(&content).map_err(|error| StateError::Corrupt {
            path: self.path.to_string(),
            message: error.to_string(),
        })
    }

    /// Overwrites the file with the full record.
    ///
    /// The record is written to a sibling temporary file and renamed into
    /// place, so readers see either the old or the new record.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] when the record cannot be written.
    pub fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        let handle = open_parent(&self.path).map_err(|error| self.io_error(&error))?;
        let temporary = format!(".{}.tmp", handle.file_name);

        let json = serde_json::to_string_pretty(state).map_err(|error| StateError::Io {
            path: self.path.to_string(),
            message: format!("failed to serialise state: {error}"),
        })?;

        handle
            .dir
            .write(&temporary, json)
            .and_then(|()| handle.dir.rename(&temporary, &handle.dir, handle.file_name))
            .map_err(|error| self.io_error(&error))
    }

    fn io_error(&self, error: &io::Error) -> StateError {
        StateError::Io {
            path: self.path.to_string(),
            message: error.to_string(),
        }
    }
}
