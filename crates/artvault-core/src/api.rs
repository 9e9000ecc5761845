//! Call contracts for the agent layer: `download_one` and `download_batch`.
//!
//! Both return plain serializable values; errors are reported in the result,
//! never as `Err`, so a failing URL can't abort the caller's turn.

use serde::Serialize;

use crate::batch::BatchReport;
use crate::session::{SessionState, SessionStats};
use crate::store::{ArtifactStore, DownloadStatus, IngestOutcome};

/// Result of one `download_one` call (also one entry of a batch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    pub status: DownloadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_order: Option<u64>,
    pub total_images: u64,
    pub total_versions: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<&'static str>,
    pub message: String,
}

impl DownloadResult {
    /// Build from an outcome and the session totals observed right after it.
    pub fn from_outcome(outcome: &IngestOutcome, stats: SessionStats) -> Self {
        let mut result = DownloadResult {
            status: outcome.status(),
            filename: None,
            version: None,
            source_url: outcome.url().to_string(),
            content_type: None,
            size_bytes: None,
            download_order: None,
            total_images: stats.total_count,
            total_versions: stats.total_count,
            error_type: None,
            message: String::new(),
        };

        if let Some(r) = outcome.record() {
            result.filename = Some(r.filename.clone());
            result.version = Some(r.version);
            result.content_type = Some(r.content_type.clone());
            result.size_bytes = Some(r.size_bytes);
            result.download_order = Some(r.download_order);
        }

        let message = match outcome {
            IngestOutcome::Stored(r) => format!(
                "Image #{} saved as '{}' version {} - total versions: {}",
                r.download_order, r.filename, r.version, stats.total_count
            ),
            IngestOutcome::AlreadyExists(r) => format!(
                "Image from this URL already saved as '{}' (version {})",
                r.filename, r.version
            ),
            IngestOutcome::Failed { error, .. } => {
                result.error_type = Some(error.type_name());
                error.to_string()
            }
        };
        result.message = message;
        result
    }
}

/// Result of one `download_batch` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub status: DownloadStatus,
    pub processed_urls: usize,
    pub successful_downloads: usize,
    pub errors_count: usize,
    pub total_images_in_session: u64,
    pub total_size_bytes: u64,
    /// `"lo-hi"`, a single version, or `"N/A"` when nothing new was stored.
    pub version_range: String,
    pub total_versions_saved: u64,
    pub logical_name: String,
    pub results: Vec<DownloadResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<&'static str>,
    pub message: String,
}

/// Render a version range the way callers display it.
pub fn format_version_range(range: Option<(u32, u32)>) -> String {
    match range {
        None => "N/A".to_string(),
        Some((lo, hi)) if lo == hi => lo.to_string(),
        Some((lo, hi)) => format!("{}-{}", lo, hi),
    }
}

impl BatchResult {
    pub fn from_report(report: &BatchReport, session: &SessionState) -> Self {
        let stats = session.stats();
        let version_range = format_version_range(report.version_range());
        let errors = report.error_messages();

        let status = if report.successful() > 0 {
            DownloadStatus::Success
        } else {
            DownloadStatus::Error
        };

        let (error_type, message) = match &report.parse_error {
            Some(e) => (Some("parse_error"), e.to_string()),
            None => (
                None,
                format!(
                    "{} of {} URLs ok ({} newly stored). Versions: {}. Total versions: {}",
                    report.successful(),
                    report.processed(),
                    report.stored(),
                    version_range,
                    stats.total_count
                ),
            ),
        };

        BatchResult {
            status,
            processed_urls: report.processed(),
            successful_downloads: report.successful(),
            errors_count: report.errors_count(),
            total_images_in_session: stats.total_count,
            total_size_bytes: stats.total_size_bytes,
            version_range,
            total_versions_saved: session.version_log().len() as u64,
            logical_name: report.logical_name.clone(),
            results: report
                .entries
                .iter()
                .map(|e| DownloadResult::from_outcome(&e.outcome, e.stats_after))
                .collect(),
            errors: if errors.is_empty() { None } else { Some(errors) },
            error_type,
            message,
        }
    }
}

/// Download one image into the session (or report the existing record).
pub async fn download_one(
    store: &ArtifactStore,
    session: &mut SessionState,
    image_url: &str,
) -> DownloadResult {
    let outcome = store.ingest(session, image_url).await;
    DownloadResult::from_outcome(&outcome, session.stats())
}

/// Parse `image_urls` and download every entry into the session, in order.
pub async fn download_batch(
    store: &ArtifactStore,
    session: &mut SessionState,
    image_urls: &str,
) -> BatchResult {
    let report = store.ingest_batch(session, image_urls).await;
    BatchResult::from_report(&report, session)
}
