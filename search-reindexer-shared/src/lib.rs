//! # Search Reindexer Shared
//!
//! This crate defines shared data structures and types used across the search
//! reindexer ecosystem. It includes the index handle, the normalized document
//! record written to the target index, and the built-in bulk-load settings
//! profile.

pub mod types;

pub use types::document_record::DocumentRecord;
pub use types::index_ref::IndexRef;
pub use types::settings_profile::bulk_load_profile;
