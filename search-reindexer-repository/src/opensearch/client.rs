//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesPutSettingsParts, IndicesRefreshParts},
    BulkParts, OpenSearch, ScrollParts, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::{BulkItemFailure, BulkWriteError, ClientError, ScrollError, SettingsApplyError};
use crate::interfaces::SearchEngineClient;
use crate::types::{ScrollHit, ScrollPage};
use search_reindexer_shared::{DocumentRecord, IndexRef};

/// OpenSearch client implementation.
///
/// Implements the narrow reindex surface (settings, bulk write, refresh,
/// scroll) over the OpenSearch HTTP API.
///
/// # Example
///
/// ```ignore
/// use search_reindexer_shared::IndexRef;
///
/// let client = OpenSearchClient::new("http://localhost:9200").await?;
/// let page = client.open_scroll(&IndexRef::new("orders-v1"), "1m", 1000).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(ClientError)` - If connection setup fails
    pub async fn new(url: &str) -> Result<Self, ClientError> {
        let parsed_url = Url::parse(url).map_err(|e| ClientError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| ClientError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Wrap an already-configured OpenSearch client.
    pub fn from_client(client: OpenSearch) -> Self {
        Self { client }
    }

    /// Build the NDJSON body for a bulk request: one action line and one
    /// source line per document, in document order.
    ///
    /// The action line carries only `_id`; the write target comes from the
    /// request URL. Putting the record's origin `_index` in the action line
    /// would redirect the write back to the source index.
    fn build_bulk_body(documents: &[DocumentRecord]) -> Vec<Value> {
        let mut body: Vec<Value> = Vec::with_capacity(documents.len() * 2);

        for doc in documents {
            body.push(json!({"index": {"_id": doc.id}}));
            body.push(doc.source_value());
        }

        body
    }

    /// Inspect a bulk response body for per-item failures.
    ///
    /// The bulk endpoint answers 200 even when individual documents were
    /// rejected; the `errors` flag and `items[].index.error` entries carry
    /// the detail.
    fn check_bulk_response(
        index: &IndexRef,
        body: &Value,
        total: usize,
    ) -> Result<(), BulkWriteError> {
        if body.get("errors").and_then(|e| e.as_bool()) != Some(true) {
            return Ok(());
        }

        let empty = Vec::new();
        let items = body
            .get("items")
            .and_then(|i| i.as_array())
            .unwrap_or(&empty);

        let failures: Vec<BulkItemFailure> = items
            .iter()
            .filter_map(|item| {
                let action = item.get("index")?;
                let err = action.get("error")?;
                Some(BulkItemFailure {
                    id: action
                        .get("_id")
                        .and_then(|v| v.as_str())
                        .map(String::from),
                    status: action
                        .get("status")
                        .and_then(|v| v.as_u64())
                        .map(|s| s as u16),
                    reason: err
                        .get("reason")
                        .and_then(|v| v.as_str())
                        .unwrap_or("unknown bulk failure")
                        .to_string(),
                })
            })
            .collect();

        if failures.is_empty() {
            // errors flag set but no detail; still a failed batch
            return Err(BulkWriteError::rejected(
                index.name(),
                "bulk response flagged errors without item detail",
            ));
        }

        Err(BulkWriteError::items_rejected(index.name(), total, failures))
    }

    /// Parse a search or scroll response body into a scroll page.
    fn parse_scroll_page(body: &Value) -> Result<ScrollPage, ScrollError> {
        let cursor_id = body
            .get("_scroll_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ScrollError::parse("response missing _scroll_id"))?
            .to_string();

        let raw_hits = body
            .pointer("/hits/hits")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ScrollError::parse("response missing hits.hits"))?;

        let mut hits = Vec::with_capacity(raw_hits.len());
        for raw in raw_hits {
            hits.push(Self::parse_hit(raw)?);
        }

        Ok(ScrollPage { cursor_id, hits })
    }

    /// Parse a single hit object from a scroll page.
    fn parse_hit(raw: &Value) -> Result<ScrollHit, ScrollError> {
        let id = raw
            .get("_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ScrollError::parse("hit missing _id"))?
            .to_string();

        let index = raw
            .get("_index")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ScrollError::parse("hit missing _index"))?
            .to_string();

        // _type is only present on clusters that still carry mapping types
        let category = raw
            .get("_type")
            .and_then(|v| v.as_str())
            .filter(|t| *t != "_doc")
            .map(String::from);

        let source = match raw.get("_source") {
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err(ScrollError::parse("hit _source is not an object")),
            None => serde_json::Map::new(),
        };

        Ok(ScrollHit {
            id,
            index,
            category,
            source,
        })
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn apply_settings(
        &self,
        index: &IndexRef,
        settings: &Value,
    ) -> Result<(), SettingsApplyError> {
        let response = self
            .client
            .indices()
            .put_settings(IndicesPutSettingsParts::Index(&[index.name()]))
            .body(settings.clone())
            .send()
            .await
            .map_err(|e| SettingsApplyError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Put settings failed");
            return Err(SettingsApplyError::rejected(
                index.name(),
                format!("status {}: {}", status, error_body),
            ));
        }

        debug!(index = %index, "Settings applied");
        Ok(())
    }

    async fn bulk_write(
        &self,
        index: &IndexRef,
        documents: &[DocumentRecord],
    ) -> Result<(), BulkWriteError> {
        let body: Vec<JsonBody<Value>> = Self::build_bulk_body(documents)
            .into_iter()
            .map(JsonBody::new)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index.name()))
            .body(body)
            .send()
            .await
            .map_err(|e| BulkWriteError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Bulk request failed");
            return Err(BulkWriteError::rejected(
                index.name(),
                format!("status {}: {}", status, error_body),
            ));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| BulkWriteError::transport(e.to_string()))?;

        Self::check_bulk_response(index, &response_body, documents.len())?;

        debug!(index = %index, count = documents.len(), "Bulk write accepted");
        Ok(())
    }

    async fn refresh(&self, index: &IndexRef) -> Result<(), BulkWriteError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index.name()]))
            .send()
            .await
            .map_err(|e| BulkWriteError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Refresh failed");
            return Err(BulkWriteError::refresh_failed(
                index.name(),
                format!("status {}: {}", status, error_body),
            ));
        }

        debug!(index = %index, "Index refreshed");
        Ok(())
    }

    async fn open_scroll(
        &self,
        index: &IndexRef,
        expiry_time: &str,
        size_per_shard: i64,
    ) -> Result<ScrollPage, ScrollError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index.name()]))
            .scroll(expiry_time)
            .size(size_per_shard)
            .body(json!({
                "query": { "match_all": {} },
                "sort": ["_doc"]
            }))
            .send()
            .await
            .map_err(|e| ScrollError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Scroll open failed");
            return Err(ScrollError::cursor_open(
                index.name(),
                format!("status {}: {}", status, error_body),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ScrollError::transport(e.to_string()))?;

        let page = Self::parse_scroll_page(&body)?;
        debug!(index = %index, hits = page.hits.len(), "Scroll cursor opened");
        Ok(page)
    }

    async fn continue_scroll(
        &self,
        cursor_id: &str,
        expiry_time: &str,
    ) -> Result<ScrollPage, ScrollError> {
        let response = self
            .client
            .scroll(ScrollParts::None)
            .body(json!({
                "scroll": expiry_time,
                "scroll_id": cursor_id
            }))
            .send()
            .await
            .map_err(|e| ScrollError::transport(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ScrollError::cursor_expired(error_body));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Scroll advance failed");
            return Err(ScrollError::cursor_advance(format!(
                "status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ScrollError::transport(e.to_string()))?;

        let page = Self::parse_scroll_page(&body)?;
        debug!(hits = page.hits.len(), "Scroll cursor advanced");
        Ok(page)
    }
}
