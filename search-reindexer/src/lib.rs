//! # Search Reindexer
//!
//! This crate copies all documents from a source search index to a target
//! search index, using scroll-cursor pagination over the source and bulk
//! writes into the target.
//!
//! ## Architecture
//!
//! The reindex is composed from three collaborating steps:
//!
//! 1. **SettingsAdjuster**: Applies a bulk-load settings profile to both
//!    indices before scrolling starts
//! 2. **ScrollStream**: Produces a lazy, finite sequence of result batches
//!    from a match-all scroll over the source
//! 3. **BatchWriter**: Translates each batch into document records and bulk
//!    writes them to the target, refreshing after each batch
//! 4. **Reindexer**: Coordinates the three steps and surfaces the first error
//!
//! Note that the adjusted settings are *not* restored after the copy; callers
//! must re-enable the target's refresh interval themselves once the reindex
//! returns.

pub mod config;
pub mod errors;
pub mod options;
pub mod reindexer;
pub mod scroll;
pub mod settings;
pub mod writer;

pub use config::Dependencies;
pub use errors::ReindexError;
pub use options::ReindexOptions;
pub use reindexer::Reindexer;
pub use scroll::{ResultBatch, ScrollStream};
pub use settings::SettingsAdjuster;
pub use writer::BatchWriter;
