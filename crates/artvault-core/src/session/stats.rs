//! Session-wide aggregates over stored artifacts.

use serde::Serialize;

use super::ArtifactRecord;

/// Totals over every record in a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub total_count: u64,
    pub total_size_bytes: u64,
}

impl SessionStats {
    /// Incremental update for one newly stored record.
    pub fn add(&mut self, record: &ArtifactRecord) {
        self.total_count += 1;
        self.total_size_bytes = self.total_size_bytes.saturating_add(record.size_bytes);
    }

    /// Full rescan; must always equal the incrementally maintained value.
    pub fn recompute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ArtifactRecord>,
    {
        let mut stats = Self::default();
        for r in records {
            stats.add(r);
        }
        stats
    }
}
