//! Index handle type.
//!
//! This module defines the lightweight handle used to name an index in the
//! cluster. Indices are created and owned server-side; the reindexer only
//! mutates their settings and writes documents through the client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A handle to a named index in the search cluster.
///
/// `IndexRef` carries only the index name. The index itself lives in the
/// cluster and is never created or deleted by the reindexer.
///
/// # Example
///
/// ```
/// use search_reindexer_shared::IndexRef;
///
/// let source = IndexRef::new("orders-v1");
/// assert_eq!(source.name(), "orders-v1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexRef {
    name: String,
}

impl IndexRef {
    /// Create a handle to the index with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The name of the index in the cluster.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for IndexRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for IndexRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for IndexRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
