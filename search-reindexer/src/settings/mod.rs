//! Settings adjuster for the reindex.
//!
//! Applies a settings mapping to every index involved in a copy before
//! scrolling starts, substituting the built-in bulk-load profile when the
//! caller supplies none.

use std::sync::Arc;
use tracing::info;

use search_reindexer_repository::{SearchEngineClient, SettingsApplyError};
use search_reindexer_shared::{bulk_load_profile, IndexRef};
use serde_json::Value;

/// Applies index settings ahead of a bulk copy.
///
/// Settings application is idempotent per index and safely retryable. Note
/// that nothing restores the original settings after the copy: the target is
/// left with refresh disabled until the caller re-enables it.
pub struct SettingsAdjuster {
    client: Arc<dyn SearchEngineClient>,
}

impl SettingsAdjuster {
    /// Create a new adjuster over the given client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self { client }
    }

    /// Apply a settings mapping to every index, in order.
    ///
    /// `None` substitutes the bulk-load profile (refresh disabled, relaxed
    /// merge policy). The first rejection aborts; indices earlier in the
    /// sequence keep the settings already applied to them.
    ///
    /// # Arguments
    ///
    /// * `indices` - The indices to mutate, in application order
    /// * `settings` - Explicit settings mapping, or `None` for the bulk profile
    pub async fn apply(
        &self,
        indices: &[&IndexRef],
        settings: Option<&Value>,
    ) -> Result<(), SettingsApplyError> {
        let profile;
        let effective = match settings {
            Some(mapping) => mapping,
            None => {
                profile = bulk_load_profile();
                &profile
            }
        };

        for index in indices {
            self.client.apply_settings(index, effective).await?;
            info!(index = %index, "Applied index settings");
        }

        Ok(())
    }
}
