//! Image download pipeline.
//!
//! One blocking HTTP GET per call via the curl crate (libcurl). The response
//! must be 2xx and carry an image Content-Type; the body is buffered in memory
//! and an extension is derived from the media type. No retries happen here.

mod mime;
mod parse;

pub use mime::{essence, extension_for, is_image, DEFAULT_CONTENT_TYPE, DEFAULT_EXTENSION};

use std::str;
use std::time::Duration;

use crate::config::VaultConfig;
use crate::error::ArtifactError;

/// A successfully fetched image body and what we learned about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Content-Type as sent by the server (or the default when absent).
    pub content_type: String,
    /// Derived file extension, with leading dot.
    pub extension: &'static str,
}

impl FetchedImage {
    /// Validate a raw response into a `FetchedImage`.
    ///
    /// A missing Content-Type is treated as `image/jpeg`; anything that does
    /// not mention `image` is rejected with the observed value.
    pub fn from_response(
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ArtifactError> {
        let content_type = content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        if !is_image(&content_type) {
            return Err(ArtifactError::InvalidContentType { content_type });
        }
        let extension = extension_for(&content_type);
        Ok(Self {
            bytes,
            content_type,
            extension,
        })
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Source of image bytes for the artifact store.
///
/// Implementations block; the store runs them on `spawn_blocking`.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<FetchedImage, ArtifactError>;
}

/// Transfer knobs for [`CurlFetcher`].
#[derive(Debug, Clone)]
pub struct CurlOptions {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirections: u32,
    pub user_agent: String,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self::from_config(&VaultConfig::default())
    }
}

impl CurlOptions {
    pub fn from_config(cfg: &VaultConfig) -> Self {
        Self {
            timeout: cfg.request_timeout(),
            connect_timeout: cfg.connect_timeout(),
            max_redirections: cfg.max_redirections,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// libcurl-backed fetcher: GET, follow redirects, bounded timeout.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: CurlOptions,
}

struct RawResponse {
    code: u32,
    headers: Vec<String>,
    body: Vec<u8>,
}

impl CurlFetcher {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }

    pub fn from_config(cfg: &VaultConfig) -> Self {
        Self::new(CurlOptions::from_config(cfg))
    }

    fn perform_get(&self, url: &str) -> Result<RawResponse, curl::Error> {
        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirections)?;
        easy.useragent(&self.opts.user_agent)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok(RawResponse {
            code,
            headers,
            body,
        })
    }
}

impl ImageFetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage, ArtifactError> {
        let resp = self
            .perform_get(url)
            .map_err(|e| ArtifactError::curl(url, e))?;

        if !(200..300).contains(&resp.code) {
            return Err(ArtifactError::http(url, resp.code));
        }

        let content_type = parse::content_type_from_headers(&resp.headers);
        FetchedImage::from_response(content_type, resp.body)
    }
}
