//! Reindex orchestrator.
//!
//! Coordinates the settings adjuster, the scroll consumer, and the batch
//! writer into a single index-to-index copy.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::ReindexError;
use crate::options::ReindexOptions;
use crate::scroll::ScrollStream;
use crate::settings::SettingsAdjuster;
use crate::writer::BatchWriter;
use search_reindexer_repository::SearchEngineClient;
use search_reindexer_shared::IndexRef;

/// Copies every document from a source index to a target index.
///
/// A reindex proceeds in two phases: settings are applied to both indices
/// (bulk-load profile unless the caller supplies a mapping), then a match-all
/// scroll over the source drives one bulk write plus refresh per batch into
/// the target until the cursor is exhausted.
///
/// Every failure is terminal and surfaces as the failure of the `reindex`
/// call; batches committed before the failure stay in the target. There is no
/// coordination between concurrent reindexes into the same target; callers
/// needing exclusivity must lock externally.
///
/// The adjusted settings are *not* restored afterwards: the target keeps
/// refresh disabled until the caller re-enables it.
pub struct Reindexer {
    client: Arc<dyn SearchEngineClient>,
    adjuster: SettingsAdjuster,
    writer: BatchWriter,
}

impl Reindexer {
    /// Create a new reindexer over the given client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        let adjuster = SettingsAdjuster::new(client.clone());
        let writer = BatchWriter::new(client.clone());

        Self {
            client,
            adjuster,
            writer,
        }
    }

    /// Copy all documents from `source` to `target`.
    ///
    /// # Arguments
    ///
    /// * `source` - The index to scroll through
    /// * `target` - The index to bulk-write into
    /// * `options` - Settings mapping, cursor expiry, and batch size
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Every batch was written; progress detail is available
    ///   through the emitted tracing events only
    /// * `Err(ReindexError)` - The first unrecovered failure; the target keeps
    ///   whatever batches were committed before it
    #[instrument(skip(self, options), fields(source = %source, target = %target))]
    pub async fn reindex(
        &self,
        source: &IndexRef,
        target: &IndexRef,
        options: ReindexOptions,
    ) -> Result<(), ReindexError> {
        options.validate()?;

        self.adjuster
            .apply(&[source, target], options.index_settings.as_ref())
            .await?;

        let mut scroll = ScrollStream::open(
            self.client.clone(),
            source.clone(),
            options.expiry_time.clone(),
            options.size_per_shard,
        );

        let mut batches = 0usize;
        let mut documents = 0usize;

        while let Some(batch) = scroll.next_batch().await? {
            documents += self.writer.write_batch(batch.hits, target).await?;
            batches += 1;
        }

        // TODO: restore the pre-copy settings (refresh_interval in
        // particular) via an optional restore hook; until then callers must
        // re-enable refresh on the target themselves.
        info!(batches, documents, "Reindex complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use search_reindexer_repository::{
        BulkWriteError, ScrollError, ScrollHit, ScrollPage, SettingsApplyError,
    };
    use search_reindexer_shared::{bulk_load_profile, DocumentRecord};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock engine serving a fixed document set in pages and recording every
    /// call the reindexer makes.
    struct MockEngine {
        pages: Mutex<Vec<Vec<ScrollHit>>>,
        settings_calls: Mutex<Vec<(String, Value)>>,
        bulk_writes: Mutex<Vec<(String, Vec<DocumentRecord>)>>,
        refresh_count: AtomicUsize,
        scroll_opens: AtomicUsize,
        scroll_advances: AtomicUsize,
        fail_bulk_on_batch: Option<usize>,
    }

    impl MockEngine {
        fn with_pages(pages: Vec<Vec<ScrollHit>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                settings_calls: Mutex::new(Vec::new()),
                bulk_writes: Mutex::new(Vec::new()),
                refresh_count: AtomicUsize::new(0),
                scroll_opens: AtomicUsize::new(0),
                scroll_advances: AtomicUsize::new(0),
                fail_bulk_on_batch: None,
            }
        }

        fn failing_on_batch(pages: Vec<Vec<ScrollHit>>, batch: usize) -> Self {
            Self {
                fail_bulk_on_batch: Some(batch),
                ..Self::with_pages(pages)
            }
        }

        fn next_page(&self) -> ScrollPage {
            let mut pages = self.pages.lock().unwrap();
            let hits = if pages.is_empty() {
                vec![]
            } else {
                pages.remove(0)
            };
            ScrollPage {
                cursor_id: "cursor-1".to_string(),
                hits,
            }
        }
    }

    #[async_trait]
    impl SearchEngineClient for MockEngine {
        async fn apply_settings(
            &self,
            index: &IndexRef,
            settings: &Value,
        ) -> Result<(), SettingsApplyError> {
            self.settings_calls
                .lock()
                .unwrap()
                .push((index.name().to_string(), settings.clone()));
            Ok(())
        }

        async fn bulk_write(
            &self,
            index: &IndexRef,
            documents: &[DocumentRecord],
        ) -> Result<(), BulkWriteError> {
            let batch_number = self.bulk_writes.lock().unwrap().len() + 1;
            if self.fail_bulk_on_batch == Some(batch_number) {
                return Err(BulkWriteError::rejected(index.name(), "disk watermark"));
            }
            self.bulk_writes
                .lock()
                .unwrap()
                .push((index.name().to_string(), documents.to_vec()));
            Ok(())
        }

        async fn refresh(&self, _index: &IndexRef) -> Result<(), BulkWriteError> {
            self.refresh_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn open_scroll(
            &self,
            _index: &IndexRef,
            _expiry_time: &str,
            _size_per_shard: i64,
        ) -> Result<ScrollPage, ScrollError> {
            self.scroll_opens.fetch_add(1, Ordering::SeqCst);
            Ok(self.next_page())
        }

        async fn continue_scroll(
            &self,
            _cursor_id: &str,
            _expiry_time: &str,
        ) -> Result<ScrollPage, ScrollError> {
            self.scroll_advances.fetch_add(1, Ordering::SeqCst);
            Ok(self.next_page())
        }
    }

    fn hit(id: usize, origin: &str) -> ScrollHit {
        let mut source = serde_json::Map::new();
        source.insert("n".to_string(), json!(id));
        ScrollHit {
            id: format!("doc-{}", id),
            index: origin.to_string(),
            category: Some("order".to_string()),
            source,
        }
    }

    /// Pages for a single-shard index: `total` documents split into pages of
    /// at most `size` hits.
    fn pages(total: usize, size: usize, origin: &str) -> Vec<Vec<ScrollHit>> {
        (0..total)
            .map(|i| hit(i, origin))
            .collect::<Vec<_>>()
            .chunks(size)
            .map(|c| c.to_vec())
            .collect()
    }

    #[tokio::test]
    async fn test_copies_2500_docs_in_three_batches() {
        let engine = Arc::new(MockEngine::with_pages(pages(2500, 1000, "orders-v1")));
        let reindexer = Reindexer::new(engine.clone());

        reindexer
            .reindex(
                &IndexRef::new("orders-v1"),
                &IndexRef::new("orders-v2"),
                ReindexOptions::default(),
            )
            .await
            .unwrap();

        let writes = engine.bulk_writes.lock().unwrap();
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0].1.len(), 1000);
        assert_eq!(writes[1].1.len(), 1000);
        assert_eq!(writes[2].1.len(), 500);
        assert!(writes.iter().all(|(index, _)| index == "orders-v2"));

        assert_eq!(engine.refresh_count.load(Ordering::SeqCst), 3);
        assert_eq!(engine.scroll_opens.load(Ordering::SeqCst), 1);
        // Two advances with hits plus the empty one signalling exhaustion
        assert_eq!(engine.scroll_advances.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_copy_preserves_document_identity() {
        let engine = Arc::new(MockEngine::with_pages(pages(3, 10, "orders-v1")));
        let reindexer = Reindexer::new(engine.clone());

        reindexer
            .reindex(
                &IndexRef::new("orders-v1"),
                &IndexRef::new("orders-v2"),
                ReindexOptions::default(),
            )
            .await
            .unwrap();

        let writes = engine.bulk_writes.lock().unwrap();
        let records = &writes[0].1;

        assert_eq!(records.len(), 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.id, format!("doc-{}", i));
            assert_eq!(record.source["n"], json!(i));
            assert_eq!(record.category.as_deref(), Some("order"));
            // Origin attribution survives even though the write targets v2
            assert_eq!(record.index, "orders-v1");
        }
    }

    #[tokio::test]
    async fn test_empty_source_is_a_no_op_after_settings() {
        let engine = Arc::new(MockEngine::with_pages(vec![]));
        let reindexer = Reindexer::new(engine.clone());

        reindexer
            .reindex(
                &IndexRef::new("orders-v1"),
                &IndexRef::new("orders-v2"),
                ReindexOptions::default(),
            )
            .await
            .unwrap();

        assert!(engine.bulk_writes.lock().unwrap().is_empty());
        assert_eq!(engine.refresh_count.load(Ordering::SeqCst), 0);

        // Settings still went to both indices
        let settings = engine.settings_calls.lock().unwrap();
        assert_eq!(settings.len(), 2);
        assert_eq!(settings[0].0, "orders-v1");
        assert_eq!(settings[1].0, "orders-v2");
    }

    #[tokio::test]
    async fn test_default_settings_profile_applied_exactly() {
        let engine = Arc::new(MockEngine::with_pages(vec![]));
        let reindexer = Reindexer::new(engine.clone());

        reindexer
            .reindex(
                &IndexRef::new("orders-v1"),
                &IndexRef::new("orders-v2"),
                ReindexOptions::default(),
            )
            .await
            .unwrap();

        let expected =
            json!({"index": {"refresh_interval": "-1", "merge.policy.merge_factor": 30}});
        assert_eq!(expected, bulk_load_profile());

        let settings = engine.settings_calls.lock().unwrap();
        assert!(settings.iter().all(|(_, mapping)| *mapping == expected));
    }

    #[tokio::test]
    async fn test_explicit_settings_override_profile() {
        let engine = Arc::new(MockEngine::with_pages(vec![]));
        let reindexer = Reindexer::new(engine.clone());

        let custom = json!({"index": {"refresh_interval": "10s"}});
        reindexer
            .reindex(
                &IndexRef::new("orders-v1"),
                &IndexRef::new("orders-v2"),
                ReindexOptions::default().with_index_settings(custom.clone()),
            )
            .await
            .unwrap();

        let settings = engine.settings_calls.lock().unwrap();
        assert!(settings.iter().all(|(_, mapping)| *mapping == custom));
    }

    #[tokio::test]
    async fn test_bulk_failure_on_batch_two_aborts() {
        let engine = Arc::new(MockEngine::failing_on_batch(
            pages(2500, 1000, "orders-v1"),
            2,
        ));
        let reindexer = Reindexer::new(engine.clone());

        let err = reindexer
            .reindex(
                &IndexRef::new("orders-v1"),
                &IndexRef::new("orders-v2"),
                ReindexOptions::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReindexError::BulkWrite(_)));

        // Batch 1 stays committed; nothing after the failure ran
        let writes = engine.bulk_writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1.len(), 1000);
        assert_eq!(engine.refresh_count.load(Ordering::SeqCst), 1);
        assert_eq!(engine.scroll_advances.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_options_rejected_before_any_call() {
        let engine = Arc::new(MockEngine::with_pages(vec![]));
        let reindexer = Reindexer::new(engine.clone());

        let err = reindexer
            .reindex(
                &IndexRef::new("orders-v1"),
                &IndexRef::new("orders-v2"),
                ReindexOptions::default().with_size_per_shard(0),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReindexError::InvalidOptions(_)));
        assert!(engine.settings_calls.lock().unwrap().is_empty());
        assert_eq!(engine.scroll_opens.load(Ordering::SeqCst), 0);
    }
}
