//! Scroll consumer for the reindex.
//!
//! Produces a lazy, finite, non-restartable sequence of result batches from a
//! match-all scroll over the source index.

use std::sync::Arc;
use tracing::debug;

use futures::stream::{self, Stream};

use search_reindexer_repository::{ScrollError, ScrollHit, SearchEngineClient};
use search_reindexer_shared::IndexRef;

/// The hits returned by one scroll advance, in engine-returned order.
#[derive(Debug, Clone)]
pub struct ResultBatch {
    /// The hits in this batch.
    pub hits: Vec<ScrollHit>,
}

impl ResultBatch {
    /// Number of hits in the batch.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether the batch carries no hits. Batches produced by a
    /// `ScrollStream` are never empty.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Cursor progression for a scroll stream.
enum CursorState {
    /// No request issued yet; holds what the first advance needs.
    Unopened { size_per_shard: i64 },
    /// Cursor open; holds the id for the next advance.
    Open(String),
    /// An advance returned zero hits; the sequence is over.
    Exhausted,
}

/// Lazy, finite, non-restartable sequence of result batches.
///
/// The cursor is opened on the first `next_batch` call, not at construction,
/// and advanced strictly sequentially from then on. Once an advance returns
/// zero hits the stream yields `None` forever. A fresh `ScrollStream` opens a
/// new, independent cursor.
///
/// No explicit cursor-close call is issued; a cursor abandoned mid-stream
/// expires server-side once its `expiry_time` elapses.
pub struct ScrollStream {
    client: Arc<dyn SearchEngineClient>,
    index: IndexRef,
    expiry_time: String,
    state: CursorState,
}

impl ScrollStream {
    /// Create a stream over a match-all scroll of the given index.
    ///
    /// # Arguments
    ///
    /// * `client` - The engine client to scroll through
    /// * `index` - The source index
    /// * `expiry_time` - Cursor lifetime, e.g. "1m"
    /// * `size_per_shard` - Hits requested per shard per advance
    pub fn open(
        client: Arc<dyn SearchEngineClient>,
        index: IndexRef,
        expiry_time: impl Into<String>,
        size_per_shard: i64,
    ) -> Self {
        Self {
            client,
            index,
            expiry_time: expiry_time.into(),
            state: CursorState::Unopened { size_per_shard },
        }
    }

    /// Advance the cursor and return the next batch, or `None` once the
    /// cursor is exhausted.
    ///
    /// A failed advance terminates the sequence with a `ScrollError`; batches
    /// already handed out are unaffected.
    pub async fn next_batch(&mut self) -> Result<Option<ResultBatch>, ScrollError> {
        let page = match &self.state {
            CursorState::Exhausted => return Ok(None),
            CursorState::Unopened { size_per_shard } => {
                self.client
                    .open_scroll(&self.index, &self.expiry_time, *size_per_shard)
                    .await?
            }
            CursorState::Open(cursor_id) => {
                self.client
                    .continue_scroll(cursor_id, &self.expiry_time)
                    .await?
            }
        };

        if page.is_empty() {
            debug!(index = %self.index, "Scroll cursor exhausted");
            self.state = CursorState::Exhausted;
            return Ok(None);
        }

        debug!(index = %self.index, hits = page.hits.len(), "Scroll batch received");
        self.state = CursorState::Open(page.cursor_id);
        Ok(Some(ResultBatch { hits: page.hits }))
    }

    /// Adapt the sequence into a `futures::Stream` of batches.
    pub fn into_stream(self) -> impl Stream<Item = Result<ResultBatch, ScrollError>> {
        stream::try_unfold(self, |mut scroll| async move {
            match scroll.next_batch().await? {
                Some(batch) => Ok(Some((batch, scroll))),
                None => Ok(None),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::TryStreamExt;
    use search_reindexer_repository::{BulkWriteError, ScrollPage, SettingsApplyError};
    use search_reindexer_shared::DocumentRecord;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn hit(id: &str) -> ScrollHit {
        ScrollHit {
            id: id.to_string(),
            index: "orders-v1".to_string(),
            category: None,
            source: serde_json::Map::new(),
        }
    }

    /// Mock client serving a fixed sequence of pages.
    struct PagedClient {
        pages: Mutex<Vec<Vec<ScrollHit>>>,
        opens: AtomicUsize,
        advances: AtomicUsize,
    }

    impl PagedClient {
        fn new(pages: Vec<Vec<ScrollHit>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                opens: AtomicUsize::new(0),
                advances: AtomicUsize::new(0),
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
    impl SearchEngineClient for PagedClient {
        async fn apply_settings(
            &self,
            _index: &IndexRef,
            _settings: &Value,
        ) -> Result<(), SettingsApplyError> {
            Ok(())
        }

        async fn bulk_write(
            &self,
            _index: &IndexRef,
            _documents: &[DocumentRecord],
        ) -> Result<(), BulkWriteError> {
            Ok(())
        }

        async fn refresh(&self, _index: &IndexRef) -> Result<(), BulkWriteError> {
            Ok(())
        }

        async fn open_scroll(
            &self,
            _index: &IndexRef,
            _expiry_time: &str,
            _size_per_shard: i64,
        ) -> Result<ScrollPage, ScrollError> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(self.next_page())
        }

        async fn continue_scroll(
            &self,
            _cursor_id: &str,
            _expiry_time: &str,
        ) -> Result<ScrollPage, ScrollError> {
            self.advances.fetch_add(1, Ordering::SeqCst);
            Ok(self.next_page())
        }
    }

    #[tokio::test]
    async fn test_stream_is_lazy() {
        let client = Arc::new(PagedClient::new(vec![vec![hit("doc-1")]]));
        let _stream = ScrollStream::open(client.clone(), IndexRef::new("orders-v1"), "1m", 10);

        // No cursor opened until the first advance is requested
        assert_eq!(client.opens.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stream_yields_batches_then_exhausts() {
        let client = Arc::new(PagedClient::new(vec![
            vec![hit("doc-1"), hit("doc-2")],
            vec![hit("doc-3")],
        ]));
        let mut stream = ScrollStream::open(client.clone(), IndexRef::new("orders-v1"), "1m", 2);

        let first = stream.next_batch().await.unwrap().unwrap();
        assert_eq!(first.len(), 2);

        let second = stream.next_batch().await.unwrap().unwrap();
        assert_eq!(second.len(), 1);

        assert!(stream.next_batch().await.unwrap().is_none());
        // Exhaustion is sticky and issues no further engine calls
        assert!(stream.next_batch().await.unwrap().is_none());

        assert_eq!(client.opens.load(Ordering::SeqCst), 1);
        assert_eq!(client.advances.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_source_yields_no_batches() {
        let client = Arc::new(PagedClient::new(vec![]));
        let mut stream = ScrollStream::open(client.clone(), IndexRef::new("orders-v1"), "1m", 10);

        assert!(stream.next_batch().await.unwrap().is_none());
        assert_eq!(client.opens.load(Ordering::SeqCst), 1);
        assert_eq!(client.advances.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_into_stream_collects_all_batches() {
        let client = Arc::new(PagedClient::new(vec![
            vec![hit("doc-1")],
            vec![hit("doc-2")],
        ]));
        let stream = ScrollStream::open(client, IndexRef::new("orders-v1"), "1m", 1);

        let batches: Vec<ResultBatch> = stream.into_stream().try_collect().await.unwrap();

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].hits[0].id, "doc-1");
        assert_eq!(batches[1].hits[0].id, "doc-2");
    }
}
