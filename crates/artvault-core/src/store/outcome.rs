//! Result of a single ingest.

use serde::Serialize;

use crate::error::ArtifactError;
use crate::session::ArtifactRecord;

/// Wire status of an ingest, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    Success,
    AlreadyExists,
    Error,
}

#[derive(Debug)]
pub enum IngestOutcome {
    /// The URL was new and is now stored.
    Stored(ArtifactRecord),
    /// The URL was stored earlier in the session; nothing was fetched.
    AlreadyExists(ArtifactRecord),
    /// Fetch or sink failed; the session is unchanged.
    Failed { url: String, error: ArtifactError },
}

impl IngestOutcome {
    pub fn status(&self) -> DownloadStatus {
        match self {
            IngestOutcome::Stored(_) => DownloadStatus::Success,
            IngestOutcome::AlreadyExists(_) => DownloadStatus::AlreadyExists,
            IngestOutcome::Failed { .. } => DownloadStatus::Error,
        }
    }

    pub fn record(&self) -> Option<&ArtifactRecord> {
        match self {
            IngestOutcome::Stored(r) | IngestOutcome::AlreadyExists(r) => Some(r),
            IngestOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ArtifactError> {
        match self {
            IngestOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Success or already present.
    pub fn is_ok(&self) -> bool {
        !matches!(self, IngestOutcome::Failed { .. })
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, IngestOutcome::Stored(_))
    }

    pub fn url(&self) -> &str {
        match self {
            IngestOutcome::Stored(r) | IngestOutcome::AlreadyExists(r) => &r.source_url,
            IngestOutcome::Failed { url, .. } => url,
        }
    }
}
