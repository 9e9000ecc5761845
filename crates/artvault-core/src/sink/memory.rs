//! In-memory sink: every version of every filename, held per session.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use super::{ArtifactSink, SinkError};
use crate::session::SessionId;

/// Bytes and media type of one stored version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

type LineageKey = (SessionId, String);

#[derive(Debug, Default)]
pub struct MemorySink {
    blobs: Mutex<HashMap<LineageKey, BTreeMap<u32, StoredBlob>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored bytes for `filename` at `version` in `session`, if any.
    pub fn get(&self, session: SessionId, filename: &str, version: u32) -> Option<StoredBlob> {
        let blobs = self.blobs.lock().ok()?;
        blobs
            .get(&(session, filename.to_string()))?
            .get(&version)
            .cloned()
    }

    /// Versions stored under `filename` in `session`, ascending.
    pub fn versions(&self, session: SessionId, filename: &str) -> Vec<u32> {
        match self.blobs.lock() {
            Ok(blobs) => blobs
                .get(&(session, filename.to_string()))
                .map(|v| v.keys().copied().collect())
                .unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.blobs
            .lock()
            .map(|b| b.values().map(BTreeMap::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactSink for MemorySink {
    fn put(
        &self,
        session: SessionId,
        filename: &str,
        version: u32,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), SinkError> {
        let mut blobs = self.blobs.lock().map_err(|_| SinkError::Poisoned)?;
        let lineage = blobs.entry((session, filename.to_string())).or_default();
        if lineage.contains_key(&version) {
            return Err(SinkError::DuplicateVersion {
                session,
                filename: filename.to_string(),
                version,
            });
        }
        lineage.insert(
            version,
            StoredBlob {
                content_type: content_type.to_string(),
                bytes: bytes.to_vec(),
            },
        );
        Ok(())
    }
}
