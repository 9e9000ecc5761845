pub mod config;
pub mod logging;

pub mod api;
pub mod batch;
pub mod error;
pub mod fetch;
pub mod retry;
pub mod session;
pub mod sink;
pub mod store;
pub mod url_model;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{download_batch, download_one, BatchResult, DownloadResult};
pub use error::{ArtifactError, NetworkCause, ParseError};
pub use session::{ArtifactRecord, SessionId, SessionState, SharedSession, VersionEntry};
pub use store::{ArtifactStore, DownloadStatus, IngestOutcome};
