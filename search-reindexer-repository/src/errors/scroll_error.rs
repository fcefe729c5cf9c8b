//! Scroll error types.
//!
//! This module defines the errors that can occur while opening or advancing a
//! scroll cursor.

use thiserror::Error;

/// Errors that can occur during scroll cursor operations.
///
/// A scroll failure terminates the batch sequence; whatever batches were
/// already committed to the target stay in place.
#[derive(Error, Debug, Clone)]
pub enum ScrollError {
    /// The initial scroll search against the source index failed.
    #[error("Failed to open scroll cursor on '{index}': {reason}")]
    CursorOpen { index: String, reason: String },

    /// A scroll continuation request was rejected by the engine.
    #[error("Failed to advance scroll cursor: {0}")]
    CursorAdvance(String),

    /// The cursor expired (or was never known) server-side.
    #[error("Scroll cursor expired or not found: {0}")]
    CursorExpired(String),

    /// The engine's response could not be interpreted as a scroll page.
    #[error("Failed to parse scroll response: {0}")]
    Parse(String),

    /// The scroll request never reached the engine.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ScrollError {
    /// Create a cursor-open error for the given index.
    pub fn cursor_open(index: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CursorOpen {
            index: index.into(),
            reason: reason.into(),
        }
    }

    /// Create a cursor-advance error.
    pub fn cursor_advance(msg: impl Into<String>) -> Self {
        Self::CursorAdvance(msg.into())
    }

    /// Create a cursor-expired error.
    pub fn cursor_expired(msg: impl Into<String>) -> Self {
        Self::CursorExpired(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
