//! Settings apply error types.
//!
//! This module defines the errors that can occur while applying a settings
//! mapping to an index.

use thiserror::Error;

/// Errors that can occur when applying settings to an index.
///
/// A settings failure aborts the whole reindex before any documents are
/// copied, so these errors always surface to the caller unretried.
#[derive(Error, Debug, Clone)]
pub enum SettingsApplyError {
    /// The index rejected the settings mapping (e.g. invalid key, closed index).
    #[error("Settings rejected by index '{index}': {reason}")]
    Rejected { index: String, reason: String },

    /// The settings request never reached the engine.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl SettingsApplyError {
    /// Create a rejected-settings error for the given index.
    pub fn rejected(index: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            index: index.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
