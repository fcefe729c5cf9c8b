//! This module defines the core data structures used across the search
//! reindexer. It re-exports `IndexRef`, `DocumentRecord`, and the bulk-load
//! settings profile.

pub mod document_record;
pub mod index_ref;
pub mod settings_profile;

pub use document_record::DocumentRecord;
pub use index_ref::IndexRef;
pub use settings_profile::bulk_load_profile;
