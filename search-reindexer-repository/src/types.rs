//! Scroll result types.
//!
//! This module defines the raw shapes a scroll advance hands back from the
//! engine: the page (cursor id plus hits) and the individual hit.

use serde_json::{Map, Value};

use search_reindexer_shared::DocumentRecord;

/// A single hit returned by a scroll advance.
///
/// Carries the document identity exactly as the source index reported it:
/// id, source fields, optional category (document type), and the name of the
/// index the hit came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollHit {
    /// The document id.
    pub id: String,
    /// The index the hit originated from.
    pub index: String,
    /// Optional document type/category.
    pub category: Option<String>,
    /// The raw source fields.
    pub source: Map<String, Value>,
}

impl From<ScrollHit> for DocumentRecord {
    fn from(hit: ScrollHit) -> Self {
        DocumentRecord::new(hit.id, hit.source, hit.category, hit.index)
    }
}

/// The result of one scroll advance: the cursor to continue with and the hits
/// the advance produced.
///
/// An empty `hits` list means the cursor is exhausted; the id is still present
/// because the engine returns one with every page.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPage {
    /// Opaque cursor id for the next advance.
    pub cursor_id: String,
    /// The hits in this page, in engine-returned order.
    pub hits: Vec<ScrollHit>,
}

impl ScrollPage {
    /// Whether this page carries no hits, i.e. the cursor is exhausted.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
