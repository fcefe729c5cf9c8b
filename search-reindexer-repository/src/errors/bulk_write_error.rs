//! Bulk write error types.
//!
//! This module defines the errors that can occur while bulk-writing a batch of
//! documents to the target index, including per-document failure detail when
//! the engine reports it.

use thiserror::Error;

/// Failure detail for a single document inside a bulk response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemFailure {
    /// The document id, when the engine echoes it back.
    pub id: Option<String>,
    /// The HTTP-style status the engine assigned to the item.
    pub status: Option<u16>,
    /// The engine's reason for rejecting the item.
    pub reason: String,
}

/// Errors that can occur during a batch write to the target index.
///
/// A bulk failure aborts the reindex immediately; there is no partial-batch
/// retry. Batches written before the failure stay in the target.
#[derive(Error, Debug, Clone)]
pub enum BulkWriteError {
    /// The bulk request succeeded overall but individual documents were rejected.
    #[error("Bulk write to '{index}' rejected {failed} of {total} documents")]
    ItemsRejected {
        index: String,
        total: usize,
        failed: usize,
        failures: Vec<BulkItemFailure>,
    },

    /// The bulk request was rejected wholesale by the engine.
    #[error("Bulk write to '{index}' failed: {reason}")]
    Rejected { index: String, reason: String },

    /// The post-batch refresh of the target index failed.
    #[error("Refresh of '{index}' failed: {reason}")]
    RefreshFailed { index: String, reason: String },

    /// The bulk request never reached the engine.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl BulkWriteError {
    /// Create an items-rejected error carrying per-document failure detail.
    pub fn items_rejected(
        index: impl Into<String>,
        total: usize,
        failures: Vec<BulkItemFailure>,
    ) -> Self {
        Self::ItemsRejected {
            index: index.into(),
            total,
            failed: failures.len(),
            failures,
        }
    }

    /// Create a rejected-request error for the given index.
    pub fn rejected(index: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            index: index.into(),
            reason: reason.into(),
        }
    }

    /// Create a refresh-failed error for the given index.
    pub fn refresh_failed(index: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RefreshFailed {
            index: index.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
