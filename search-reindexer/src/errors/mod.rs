//! Error types for the search reindexer.

use search_reindexer_repository::{BulkWriteError, ClientError, ScrollError, SettingsApplyError};
use thiserror::Error;

/// Errors that can fail a reindex.
///
/// Every failure is terminal: nothing is retried at this level and nothing is
/// rolled back. Batches committed before the failure stay in the target.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// The supplied options did not pass boundary validation.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Dependency wiring or client construction failed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Settings were rejected by the source or target index.
    #[error("Settings apply error: {0}")]
    Settings(#[from] SettingsApplyError),

    /// The scroll cursor could not be opened or advanced.
    #[error("Scroll error: {0}")]
    Scroll(#[from] ScrollError),

    /// A batch write to the target was rejected wholly or partially.
    #[error("Bulk write error: {0}")]
    BulkWrite(#[from] BulkWriteError),
}

impl ReindexError {
    /// Create an invalid-options error.
    pub fn invalid_options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<ClientError> for ReindexError {
    fn from(err: ClientError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
