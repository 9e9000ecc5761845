//! Per-artifact metadata kept by the session.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One distinct source URL that downloaded successfully.
///
/// Created exactly once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Normalized (trimmed) source URL; the dedup key.
    pub source_url: String,
    /// Version lineage this artifact belongs to.
    pub logical_name: String,
    /// `logical_name` plus the extension derived from the Content-Type.
    pub filename: String,
    /// Position within the lineage, starting at 1.
    pub version: u32,
    pub content_type: String,
    pub size_bytes: u64,
    /// Position within the whole session, starting at 1.
    pub download_order: u64,
    /// Unix seconds.
    pub created_at: i64,
}

/// Entry of the session's append-only version ledger.
pub type VersionEntry = ArtifactRecord;

/// Current time as Unix seconds.
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
