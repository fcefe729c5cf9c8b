//! Document record types for the reindex copy.
//!
//! This module defines the normalized unit of data written to the target
//! index. Records are built 1:1 from scroll hits and discarded once the batch
//! write succeeds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized document written to the target index during a reindex.
///
/// A record preserves the identity of the source hit it was built from: the
/// document id, the raw source fields, the optional category (document type),
/// and the name of the index the document originally came from. The origin
/// index is carried as record data and is not necessarily equal to the index
/// the record is written to.
///
/// # Fields
///
/// - `id`: The document id in the cluster
/// - `source`: The raw source fields, copied verbatim
/// - `category`: Optional document type/category
/// - `index`: Name of the index the document originated from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRecord {
    pub id: String,
    pub source: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub index: String,
}

impl DocumentRecord {
    /// Create a new record from the parts of a search hit.
    ///
    /// # Arguments
    ///
    /// * `id` - The document id
    /// * `source` - The raw source fields
    /// * `category` - Optional document type/category
    /// * `index` - The index the document originated from
    pub fn new(
        id: impl Into<String>,
        source: Map<String, Value>,
        category: Option<String>,
        index: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            category,
            index: index.into(),
        }
    }

    /// The source fields as a JSON value, suitable for a bulk-write body line.
    pub fn source_value(&self) -> Value {
        Value::Object(self.source.clone())
    }
}
