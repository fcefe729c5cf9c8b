//! Search engine client trait definition.
//!
//! This module defines the abstract interface the reindexer consumes,
//! allowing for different backend implementations (OpenSearch, Elasticsearch,
//! mocks in tests).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{BulkWriteError, ScrollError, SettingsApplyError};
use crate::types::ScrollPage;
use search_reindexer_shared::{DocumentRecord, IndexRef};

/// Abstract interface for the search engine operations a reindex needs.
///
/// This trait covers exactly the narrow surface the reindexer consumes:
/// settings mutation, bulk writes, refresh, and scroll-cursor pagination.
/// Index CRUD, query execution beyond match-all, and transport mechanics stay
/// behind the implementation.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Apply a settings mapping to an index.
    ///
    /// Application is idempotent: applying the same mapping twice produces the
    /// same end state, so the call is safely retryable by callers.
    ///
    /// # Arguments
    ///
    /// * `index` - The index to mutate
    /// * `settings` - The settings mapping, e.g. `{"index":{"refresh_interval":"-1"}}`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the engine accepted the settings
    /// * `Err(SettingsApplyError)` - If the engine rejected them or the request failed
    async fn apply_settings(
        &self,
        index: &IndexRef,
        settings: &Value,
    ) -> Result<(), SettingsApplyError>;

    /// Write a batch of documents to an index in a single bulk request.
    ///
    /// Documents are written in slice order. Partial failures surface as
    /// `BulkWriteError::ItemsRejected` with per-document detail when the
    /// engine reports it.
    ///
    /// # Arguments
    ///
    /// * `index` - The index to write into
    /// * `documents` - The records to write, in order
    async fn bulk_write(
        &self,
        index: &IndexRef,
        documents: &[DocumentRecord],
    ) -> Result<(), BulkWriteError>;

    /// Refresh an index so recently written documents become visible to reads.
    async fn refresh(&self, index: &IndexRef) -> Result<(), BulkWriteError>;

    /// Open a scroll cursor over a match-all query against an index.
    ///
    /// Returns the first page together with the cursor id for continuation.
    /// The cursor lives server-side until `expiry_time` elapses without an
    /// advance.
    ///
    /// # Arguments
    ///
    /// * `index` - The index to scan
    /// * `expiry_time` - Cursor lifetime, e.g. `"1m"`
    /// * `size_per_shard` - Hits requested per shard per advance
    async fn open_scroll(
        &self,
        index: &IndexRef,
        expiry_time: &str,
        size_per_shard: i64,
    ) -> Result<ScrollPage, ScrollError>;

    /// Advance an open scroll cursor and return the next page.
    ///
    /// An empty page signals exhaustion. Advancing an expired cursor fails
    /// with `ScrollError::CursorExpired`.
    ///
    /// # Arguments
    ///
    /// * `cursor_id` - The cursor id from the previous page
    /// * `expiry_time` - Cursor lifetime extension for this advance
    async fn continue_scroll(
        &self,
        cursor_id: &str,
        expiry_time: &str,
    ) -> Result<ScrollPage, ScrollError>;
}
