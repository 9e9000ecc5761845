//! Error taxonomy for the artifact download path.
//!
//! Every failure is captured where it happens and handed back to the caller
//! as a value; nothing here is allowed to abort a batch.

use thiserror::Error;

use crate::sink::SinkError;

/// Why a network fetch failed.
#[derive(Debug, Error)]
pub enum NetworkCause {
    /// Curl reported an error (timeout, connection refused, DNS, ...).
    #[error("{0}")]
    Curl(#[source] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Batch input could not be turned into any candidate URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no valid URL provided")]
    NoValidUrl,
}

/// Failure of a single artifact operation.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("download failed for {url}: {cause}")]
    Network {
        url: String,
        #[source]
        cause: NetworkCause,
    },

    #[error("URL does not point to a valid image (Content-Type: {content_type})")]
    InvalidContentType { content_type: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ArtifactError {
    pub(crate) fn curl(url: &str, e: curl::Error) -> Self {
        ArtifactError::Network {
            url: url.to_string(),
            cause: NetworkCause::Curl(e),
        }
    }

    pub(crate) fn http(url: &str, code: u32) -> Self {
        ArtifactError::Network {
            url: url.to_string(),
            cause: NetworkCause::Http(code),
        }
    }

    /// Stable snake_case tag used in serialized results.
    pub fn type_name(&self) -> &'static str {
        match self {
            ArtifactError::Network { .. } => "network_error",
            ArtifactError::InvalidContentType { .. } => "invalid_content_type",
            ArtifactError::Parse(_) => "parse_error",
            ArtifactError::Unexpected(_) => "unexpected_error",
        }
    }
}

impl From<SinkError> for ArtifactError {
    fn from(e: SinkError) -> Self {
        ArtifactError::Unexpected(e.to_string())
    }
}
