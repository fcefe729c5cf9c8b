//! Batch writer for the reindex.
//!
//! Translates scroll hits into document records and bulk-writes each batch to
//! the target index, refreshing after every batch so the copied documents are
//! immediately visible to reads.

use std::sync::Arc;
use tracing::debug;

use search_reindexer_repository::{BulkWriteError, ScrollHit, SearchEngineClient};
use search_reindexer_shared::{DocumentRecord, IndexRef};

/// Writes result batches into the target index.
pub struct BatchWriter {
    client: Arc<dyn SearchEngineClient>,
}

impl BatchWriter {
    /// Create a new writer over the given client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self { client }
    }

    /// Write one batch of hits to the target index.
    ///
    /// Each hit becomes a `DocumentRecord` preserving id, source fields,
    /// category, and the hit's original index name. The batch goes out as a
    /// single bulk write in hit order, followed by a refresh of the target.
    /// The per-batch refresh is the visibility guarantee the bulk settings
    /// profile trades away by disabling the index's own refresh interval.
    ///
    /// # Arguments
    ///
    /// * `hits` - The batch, in engine-returned order
    /// * `target` - The index to write into
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Number of documents written
    /// * `Err(BulkWriteError)` - If the bulk write or refresh failed
    pub async fn write_batch(
        &self,
        hits: Vec<ScrollHit>,
        target: &IndexRef,
    ) -> Result<usize, BulkWriteError> {
        if hits.is_empty() {
            return Ok(0);
        }

        let records: Vec<DocumentRecord> = hits.into_iter().map(DocumentRecord::from).collect();
        let count = records.len();

        self.client.bulk_write(target, &records).await?;
        self.client.refresh(target).await?;

        debug!(target = %target, count = count, "Batch written and refreshed");
        Ok(count)
    }
}
