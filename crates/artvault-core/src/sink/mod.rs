//! Where artifact bytes go once a version has been assigned.
//!
//! The session only keeps metadata; the sink keeps the bytes, keyed by
//! `(session, filename, version)`. A sink failure aborts that one ingest
//! before any session state changes.

mod dir;
mod memory;

pub use dir::{versioned_file_name, DirSink};
pub use memory::{MemorySink, StoredBlob};

use std::path::PathBuf;
use thiserror::Error;

use crate::session::SessionId;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("version {version} of {filename} already stored in {session}")]
    DuplicateVersion {
        session: SessionId,
        filename: String,
        version: u32,
    },

    #[error("artifact sink lock poisoned")]
    Poisoned,
}

/// Destination for artifact bytes.
pub trait ArtifactSink: Send + Sync {
    fn put(
        &self,
        session: SessionId,
        filename: &str,
        version: u32,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), SinkError>;
}
