//! Directory sink: one subdirectory per session, one file per version,
//! written to `.part` then renamed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{ArtifactSink, SinkError};
use crate::session::SessionId;

const TEMP_SUFFIX: &str = ".part";

/// `downloaded_images.png`, 3 → `downloaded_images.v3.png`.
pub fn versioned_file_name(filename: &str, version: u32) -> String {
    let safe = sanitize(filename);
    match safe.rfind('.') {
        Some(dot) if dot > 0 => format!("{}.v{}{}", &safe[..dot], version, &safe[dot..]),
        _ => format!("{}.v{}", safe, version),
    }
}

/// Replaces path separators, NUL and control characters with `_`.
fn sanitize(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c == '\0' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = out.trim_start_matches('.');
    if trimmed.is_empty() {
        "artifact".to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Sink rooted at `dir`; the directory is created if missing.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SinkError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<session>`, created on the session's first write.
    pub fn session_dir(&self, session: SessionId) -> PathBuf {
        self.dir.join(session.to_string())
    }

    pub fn path_for(&self, session: SessionId, filename: &str, version: u32) -> PathBuf {
        self.session_dir(session)
            .join(versioned_file_name(filename, version))
    }
}

fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

fn write_atomic(final_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = temp_path(final_path);
    let result = (|| {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
        fs::rename(&tmp, final_path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

impl ArtifactSink for DirSink {
    fn put(
        &self,
        session: SessionId,
        filename: &str,
        version: u32,
        _content_type: &str,
        bytes: &[u8],
    ) -> Result<(), SinkError> {
        let session_dir = self.session_dir(session);
        fs::create_dir_all(&session_dir).map_err(|source| SinkError::Io {
            path: session_dir.clone(),
            source,
        })?;
        let path = self.path_for(session, filename, version);
        write_atomic(&path, bytes).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "artifact written");
        Ok(())
    }
}
