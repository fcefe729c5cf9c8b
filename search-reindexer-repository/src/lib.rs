//! # Search Reindexer Repository
//!
//! This crate provides the boundary to the search engine for the reindexer.
//! It includes definitions for errors, the abstract client interface, the
//! scroll result types, and a concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use errors::{BulkItemFailure, BulkWriteError, ClientError, ScrollError, SettingsApplyError};
pub use interfaces::SearchEngineClient;
pub use opensearch::OpenSearchClient;
pub use types::{ScrollHit, ScrollPage};
