//! Built-in bulk-load settings profile.
//!
//! This module defines the index settings substituted when the caller does not
//! supply an explicit settings mapping for a reindex.

use serde_json::{json, Value};

/// Get the built-in bulk-load settings profile.
///
/// The profile tunes an index for high-volume writes:
/// - **refresh_interval: "-1"**: disables the periodic refresh so segments are
///   not published on a timer during the copy
/// - **merge.policy.merge_factor: 30**: merges segments less aggressively,
///   trading read efficiency for write throughput until restored
///
/// The profile is applied to both the source and the target index before
/// scrolling starts. Restoring the original settings after the copy is the
/// caller's responsibility.
pub fn bulk_load_profile() -> Value {
    json!({
        "index": {
            "refresh_interval": "-1",
            "merge.policy.merge_factor": 30
        }
    })
}
