//! Versioned artifact store.
//!
//! Dedups by normalized URL, downloads on miss, assigns the next version in
//! the logical name's lineage and the next session-wide download order, hands
//! the bytes to the sink, then commits the record. Any failure before the
//! commit leaves the session exactly as it was, so retrying a failed URL is
//! always safe.

mod outcome;


pub use outcome::{DownloadStatus, IngestOutcome};

use std::sync::Arc;

use anyhow::Result;

use crate::config::VaultConfig;
use crate::error::ArtifactError;
use crate::fetch::{CurlFetcher, FetchedImage, ImageFetcher};
use crate::session::{unix_timestamp, ArtifactRecord, SessionId, SessionState, SharedSession};
use crate::sink::{ArtifactSink, DirSink, MemorySink};
use crate::url_model::normalize;

pub struct ArtifactStore {
    fetcher: Arc<dyn ImageFetcher>,
    sink: Arc<dyn ArtifactSink>,
    logical_name: String,
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("logical_name", &self.logical_name)
            .finish_non_exhaustive()
    }
}

impl ArtifactStore {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, sink: Arc<dyn ArtifactSink>) -> Self {
        Self {
            fetcher,
            sink,
            logical_name: crate::config::DEFAULT_LOGICAL_NAME.to_string(),
        }
    }

    /// Curl fetcher plus a directory sink (if `output_dir` is set) or an in-memory one.
    pub fn from_config(cfg: &VaultConfig) -> Result<Self> {
        let sink: Arc<dyn ArtifactSink> = match &cfg.output_dir {
            Some(dir) => Arc::new(DirSink::create(dir.clone())?),
            None => Arc::new(MemorySink::new()),
        };
        let fetcher = Arc::new(CurlFetcher::from_config(cfg));
        Ok(Self::new(fetcher, sink).with_logical_name(&cfg.logical_name))
    }

    pub fn with_logical_name(mut self, logical_name: &str) -> Self {
        self.logical_name = logical_name.to_string();
        self
    }

    /// Default lineage for `ingest`.
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    /// Ingest `url` under the store's default logical name.
    pub async fn ingest(&self, session: &mut SessionState, url: &str) -> IngestOutcome {
        self.ingest_as(session, url, &self.logical_name).await
    }

    /// Ingest `url` into the `logical_name` lineage.
    pub async fn ingest_as(
        &self,
        session: &mut SessionState,
        url: &str,
        logical_name: &str,
    ) -> IngestOutcome {
        let key = normalize(url);

        if let Some(existing) = session.get(&key) {
            tracing::debug!(
                url = %key,
                filename = %existing.filename,
                version = existing.version,
                "already stored, skipping download"
            );
            return IngestOutcome::AlreadyExists(existing.clone());
        }

        tracing::info!(url = %key, "downloading image");
        let fetched = match self.fetch(&key).await {
            Ok(f) => f,
            Err(error) => {
                tracing::warn!(url = %key, "download failed: {}", error);
                return IngestOutcome::Failed { url: key, error };
            }
        };

        let version = session.next_version(logical_name);
        let filename = format!("{}{}", logical_name, fetched.extension);

        let fetched = match self.write(session.id(), &filename, version, fetched).await {
            Ok(f) => f,
            Err(error) => {
                tracing::warn!(url = %key, filename = %filename, version, "sink write failed: {}", error);
                return IngestOutcome::Failed { url: key, error };
            }
        };

        let record = ArtifactRecord {
            source_url: key,
            logical_name: logical_name.to_string(),
            filename,
            version,
            size_bytes: fetched.size_bytes(),
            content_type: fetched.content_type,
            download_order: session.next_download_order(),
            created_at: unix_timestamp(),
        };
        let stored = session.commit(record).clone();

        tracing::info!(
            url = %stored.source_url,
            filename = %stored.filename,
            version = stored.version,
            download_order = stored.download_order,
            size_bytes = stored.size_bytes,
            "image stored"
        );
        IngestOutcome::Stored(stored)
    }

    /// Ingest under a shared session. The lock is held for the whole
    /// check-fetch-commit sequence.
    pub async fn ingest_shared(&self, session: &SharedSession, url: &str) -> IngestOutcome {
        let mut guard = session.lock().await;
        self.ingest(&mut guard, url).await
    }

    async fn fetch(&self, url: &str) -> Result<FetchedImage, ArtifactError> {
        let fetcher = Arc::clone(&self.fetcher);
        let url = url.to_string();
        tokio::task::spawn_blocking(move || fetcher.fetch(&url))
            .await
            .map_err(|e| ArtifactError::Unexpected(format!("fetch task join: {}", e)))?
    }

    /// Hand the bytes to the sink off the async executor; gives the image back on success.
    async fn write(
        &self,
        session: SessionId,
        filename: &str,
        version: u32,
        image: FetchedImage,
    ) -> Result<FetchedImage, ArtifactError> {
        let sink = Arc::clone(&self.sink);
        let filename = filename.to_string();
        tokio::task::spawn_blocking(move || {
            sink.put(session, &filename, version, &image.content_type, &image.bytes)
                .map(|()| image)
        })
        .await
        .map_err(|e| ArtifactError::Unexpected(format!("sink task join: {}", e)))?
        .map_err(ArtifactError::from)
    }
}
