//! Session-scoped artifact state.
//!
//! A `SessionState` lives for one agent session and is passed by `&mut` into
//! every store operation, so there is exactly one writer at a time. It holds:
//! - the append-only version ledger (every stored artifact, in creation order)
//! - a URL → ledger index map for dedup
//! - the first-stored order of URLs
//! - the highest version handed out per logical name
//! - incrementally maintained totals
//!
//! Each session has its own `SessionId`; sinks key bytes by it, so one store
//! can serve many sessions without their version numbers colliding.
//!
//! Nothing is ever removed or overwritten; a record exists iff its URL was
//! downloaded successfully in this session.

mod id;
mod record;
mod stats;

pub use id::SessionId;
pub use record::{ArtifactRecord, VersionEntry};
pub use stats::SessionStats;

pub(crate) use record::unix_timestamp;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug)]
pub struct SessionState {
    id: SessionId,
    records_by_url: HashMap<String, usize>,
    url_order: Vec<String>,
    version_log: Vec<VersionEntry>,
    lineage_heads: HashMap<String, u32>,
    stats: SessionStats,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            id: SessionId::next(),
            records_by_url: HashMap::new(),
            url_order: Vec::new(),
            version_log: Vec::new(),
            lineage_heads: HashMap::new(),
            stats: SessionStats::default(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Stored record for an already-normalized URL.
    pub fn get(&self, normalized_url: &str) -> Option<&ArtifactRecord> {
        self.records_by_url
            .get(normalized_url)
            .and_then(|&i| self.version_log.get(i))
    }

    /// URLs in the order they were first stored.
    pub fn url_order(&self) -> &[String] {
        &self.url_order
    }

    /// Every assigned version, in creation order. This is the historical ledger.
    pub fn version_log(&self) -> &[VersionEntry] {
        &self.version_log
    }

    /// Ledger entries for one lineage, ascending by version.
    pub fn versions_of<'a>(
        &'a self,
        logical_name: &'a str,
    ) -> impl Iterator<Item = &'a VersionEntry> + 'a {
        self.version_log
            .iter()
            .filter(move |e| e.logical_name == logical_name)
    }

    /// Most recent entry stored under `logical_name`.
    pub fn latest_version(&self, logical_name: &str) -> Option<&VersionEntry> {
        self.version_log
            .iter()
            .rev()
            .find(|e| e.logical_name == logical_name)
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn total_count(&self) -> u64 {
        self.stats.total_count
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.stats.total_size_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.version_log.is_empty()
    }

    /// `download_order` the next stored record will receive.
    pub(crate) fn next_download_order(&self) -> u64 {
        self.version_log.len() as u64 + 1
    }

    /// Version the next record stored under `logical_name` will receive.
    pub(crate) fn next_version(&self, logical_name: &str) -> u32 {
        self.lineage_heads.get(logical_name).copied().unwrap_or(0) + 1
    }

    /// Append a freshly built record. The URL must be absent and
    /// order/version must come from `next_download_order`/`next_version`.
    pub(crate) fn commit(&mut self, record: ArtifactRecord) -> &ArtifactRecord {
        debug_assert!(!self.records_by_url.contains_key(&record.source_url));
        debug_assert_eq!(record.download_order, self.next_download_order());
        debug_assert_eq!(record.version, self.next_version(&record.logical_name));

        let index = self.version_log.len();
        self.records_by_url.insert(record.source_url.clone(), index);
        self.url_order.push(record.source_url.clone());
        self.lineage_heads
            .insert(record.logical_name.clone(), record.version);
        self.stats.add(&record);
        self.version_log.push(record);

        debug_assert_eq!(self.stats, SessionStats::recompute(&self.version_log));
        &self.version_log[index]
    }
}

/// A session behind an async mutex, for callers that may issue overlapping
/// calls. Holding the guard for a whole ingest makes check-then-act atomic.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSession {
    pub fn new(state: SessionState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().await
    }
}
