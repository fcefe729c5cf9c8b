//! Reindex options.
//!
//! This module defines the caller-supplied configuration for a reindex call,
//! with named, typed, defaulted fields validated once at the boundary.

use serde_json::Value;

use crate::errors::ReindexError;

/// Default scroll-cursor lifetime.
const DEFAULT_EXPIRY_TIME: &str = "1m";

/// Default hits requested per shard per scroll advance.
const DEFAULT_SIZE_PER_SHARD: i64 = 1000;

/// Caller-supplied configuration for a reindex call.
///
/// Immutable once passed to `Reindexer::reindex`. All fields have defaults;
/// `index_settings` of `None` means the built-in bulk-load profile is applied
/// to both indices.
///
/// # Example
///
/// ```
/// use search_reindexer::ReindexOptions;
///
/// let options = ReindexOptions::default()
///     .with_expiry_time("5m")
///     .with_size_per_shard(500);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ReindexOptions {
    /// Settings mapping applied to both indices pre-copy. `None` selects the
    /// built-in bulk-load profile.
    pub index_settings: Option<Value>,
    /// Scroll-cursor lifetime, e.g. "30s" or "1m".
    pub expiry_time: String,
    /// Hits requested per shard per scroll advance.
    pub size_per_shard: i64,
}

impl Default for ReindexOptions {
    fn default() -> Self {
        Self {
            index_settings: None,
            expiry_time: DEFAULT_EXPIRY_TIME.to_string(),
            size_per_shard: DEFAULT_SIZE_PER_SHARD,
        }
    }
}

impl ReindexOptions {
    /// Set an explicit settings mapping to apply to both indices.
    pub fn with_index_settings(mut self, settings: Value) -> Self {
        self.index_settings = Some(settings);
        self
    }

    /// Set the scroll-cursor lifetime.
    pub fn with_expiry_time(mut self, expiry_time: impl Into<String>) -> Self {
        self.expiry_time = expiry_time.into();
        self
    }

    /// Set the per-shard batch size.
    pub fn with_size_per_shard(mut self, size_per_shard: i64) -> Self {
        self.size_per_shard = size_per_shard;
        self
    }

    /// Validate the options once at the reindex boundary.
    ///
    /// The expiry must be an engine duration (`<integer><ms|s|m|h|d>`) and the
    /// batch size must be positive.
    pub fn validate(&self) -> Result<(), ReindexError> {
        if !is_valid_duration(&self.expiry_time) {
            return Err(ReindexError::invalid_options(format!(
                "expiry_time '{}' is not a duration of the form <integer><ms|s|m|h|d>",
                self.expiry_time
            )));
        }

        if self.size_per_shard <= 0 {
            return Err(ReindexError::invalid_options(format!(
                "size_per_shard must be positive, got {}",
                self.size_per_shard
            )));
        }

        Ok(())
    }
}

/// Check that a string is an engine duration like "30s", "1m", or "500ms".
fn is_valid_duration(value: &str) -> bool {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || digits.parse::<u64>().map_or(true, |n| n == 0) {
        return false;
    }

    matches!(&value[digits.len()..], "ms" | "s" | "m" | "h" | "d")
}
