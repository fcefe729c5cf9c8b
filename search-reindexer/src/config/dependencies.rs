//! Dependency initialization and wiring for the search reindexer.

use std::env;
use std::sync::Arc;
use tracing::info;

use crate::errors::ReindexError;
use crate::reindexer::Reindexer;
use search_reindexer_repository::OpenSearchClient;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured reindexer ready to run.
    pub reindexer: Reindexer,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ReindexError)` - If initialization fails
    pub async fn new() -> Result<Self, ReindexError> {
        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());

        info!(opensearch_url = %opensearch_url, "Initializing dependencies");

        let client = OpenSearchClient::new(&opensearch_url)
            .await
            .map_err(|e| ReindexError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        let reindexer = Reindexer::new(Arc::new(client));

        Ok(Self { reindexer })
    }
}
