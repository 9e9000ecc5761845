//! Batch orchestration: parse a free-form URL list and ingest each entry in order.
//!
//! URLs are processed strictly sequentially, so `download_order` follows input
//! order. One URL failing never stops the rest of the batch, and never rolls
//! back records already committed.

use crate::error::ParseError;
use crate::session::{SessionState, SessionStats};
use crate::store::{ArtifactStore, IngestOutcome};
use crate::url_model::parse_batch;

/// One processed URL and the session totals right after it.
#[derive(Debug)]
pub struct BatchEntry {
    pub outcome: IngestOutcome,
    pub stats_after: SessionStats,
}

#[derive(Debug)]
pub struct BatchReport {
    pub logical_name: String,
    /// Candidate URLs in input order (duplicates included).
    pub urls: Vec<String>,
    pub entries: Vec<BatchEntry>,
    /// Set when the input produced no candidate URL at all.
    pub parse_error: Option<ParseError>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.entries.len()
    }

    /// Outcomes that are `success` or `already_exists`.
    pub fn successful(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_ok()).count()
    }

    pub fn errors_count(&self) -> usize {
        self.processed() - self.successful()
    }

    /// Records newly stored by this batch.
    pub fn stored(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_stored()).count()
    }

    /// `URL <i>: <message>` for each failed entry, `i` 1-based in input order.
    pub fn error_messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| {
                e.outcome
                    .error()
                    .map(|err| format!("URL {}: {}", i + 1, err))
            })
            .collect()
    }

    /// Lowest and highest version among records newly stored by this batch.
    pub fn version_range(&self) -> Option<(u32, u32)> {
        self.entries
            .iter()
            .filter_map(|e| match &e.outcome {
                IngestOutcome::Stored(r) => Some(r.version),
                _ => None,
            })
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl ArtifactStore {
    /// Parse `raw` and ingest every candidate under the store's logical name.
    pub async fn ingest_batch(&self, session: &mut SessionState, raw: &str) -> BatchReport {
        self.ingest_batch_as(session, raw, self.logical_name()).await
    }

    pub async fn ingest_batch_as(
        &self,
        session: &mut SessionState,
        raw: &str,
        logical_name: &str,
    ) -> BatchReport {
        let mut report = BatchReport {
            logical_name: logical_name.to_string(),
            urls: Vec::new(),
            entries: Vec::new(),
            parse_error: None,
        };

        report.urls = match parse_batch(raw) {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!("batch input rejected: {}", e);
                report.parse_error = Some(e);
                return report;
            }
        };

        let total = report.urls.len();
        for (i, url) in report.urls.iter().enumerate() {
            tracing::debug!("processing URL {}/{}: {}", i + 1, total, url);
            let outcome = self.ingest_as(session, url, logical_name).await;
            report.entries.push(BatchEntry {
                outcome,
                stats_after: session.stats(),
            });
        }

        tracing::info!(
            processed = report.processed(),
            stored = report.stored(),
            errors = report.errors_count(),
            total_images = session.total_count(),
            total_size_bytes = session.total_size_bytes(),
            "batch finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DownloadStatus;
    use crate::test_support::{memory_store, StubFetcher};

    fn fetcher() -> StubFetcher {
        StubFetcher::new()
            .image("http://h/1.png", "image/png", &[1; 10])
            .image("http://h/2.png", "image/png", &[2; 20])
            .image("http://h/3.jpg", "image/jpeg", &[3; 30])
            .status("http://h/404.png", 404)
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_batch() {
        let (store, _, _) = memory_store(fetcher());
        let mut session = SessionState::new();

        let report = store
            .ingest_batch(&mut session, "http://h/1.png, http://h/404.png, http://h/2.png")
            .await;

        assert_eq!(report.processed(), 3);
        assert_eq!(report.successful(), 2);
        assert_eq!(report.errors_count(), 1);
        assert_eq!(session.total_count(), 2);
        let msgs = report.error_messages();
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].starts_with("URL 2: "), "{}", msgs[0]);
        assert!(msgs[0].contains("HTTP 404"));
        assert_eq!(report.version_range(), Some((1, 2)));
    }

    #[tokio::test]
    async fn order_continues_across_batches() {
        let (store, _, _) = memory_store(fetcher());
        let mut session = SessionState::new();

        store.ingest_batch(&mut session, "http://h/1.png http://h/2.png").await;
        let second = store
            .ingest_batch(&mut session, "http://h/2.png,http://h/3.jpg")
            .await;

        let statuses: Vec<DownloadStatus> =
            second.entries.iter().map(|e| e.outcome.status()).collect();
        assert_eq!(
            statuses,
            vec![DownloadStatus::AlreadyExists, DownloadStatus::Success]
        );
        assert_eq!(second.version_range(), Some((3, 3)));
        let orders: Vec<u64> = session
            .version_log()
            .iter()
            .map(|e| e.download_order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn duplicates_in_one_batch() {
        let (store, fetcher, _) = memory_store(fetcher());
        let mut session = SessionState::new();

        let report = store
            .ingest_batch(&mut session, "http://h/1.png http://h/1.png")
            .await;
        assert_eq!(report.successful(), 2);
        assert_eq!(report.stored(), 1);
        assert_eq!(fetcher.call_count("http://h/1.png"), 1);
        assert_eq!(report.entries[1].stats_after.total_count, 1);
    }

    #[tokio::test]
    async fn empty_input_is_parse_error() {
        let (store, fetcher, _) = memory_store(fetcher());
        let mut session = SessionState::new();

        let report = store.ingest_batch(&mut session, "   ").await;
        assert_eq!(report.parse_error, Some(ParseError::NoValidUrl));
        assert_eq!(report.processed(), 0);
        assert_eq!(report.version_range(), None);
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn stats_snapshot_follows_each_entry() {
        let (store, _, _) = memory_store(fetcher());
        let mut session = SessionState::new();

        let report = store
            .ingest_batch(&mut session, "http://h/1.png,http://h/404.png,http://h/3.jpg")
            .await;
        let sizes: Vec<u64> = report
            .entries
            .iter()
            .map(|e| e.stats_after.total_size_bytes)
            .collect();
        assert_eq!(sizes, vec![10, 10, 40]);
    }
}
