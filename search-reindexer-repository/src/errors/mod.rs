//! Error types for the search reindexer repository.

mod bulk_write_error;
mod client_error;
mod scroll_error;
mod settings_apply_error;

pub use bulk_write_error::{BulkItemFailure, BulkWriteError};
pub use client_error::ClientError;
pub use scroll_error::ScrollError;
pub use settings_apply_error::SettingsApplyError;
