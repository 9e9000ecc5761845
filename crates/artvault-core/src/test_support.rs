//! In-process fetcher and store builders for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::ArtifactError;
use crate::fetch::{FetchedImage, ImageFetcher};
use crate::sink::{ArtifactSink, MemorySink};
use crate::store::ArtifactStore;

#[derive(Debug, Clone)]
pub(crate) enum StubResponse {
    /// 200 with the given Content-Type and body.
    Ok(String, Vec<u8>),
    /// Non-2xx status.
    Status(u32),
}

/// Serves canned responses per URL; unknown URLs get HTTP 404. Records every call.
#[derive(Debug, Default)]
pub(crate) struct StubFetcher {
    routes: HashMap<String, StubResponse>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn image(mut self, url: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.routes.insert(
            url.to_string(),
            StubResponse::Ok(content_type.to_string(), bytes.to_vec()),
        );
        self
    }

    pub(crate) fn status(mut self, url: &str, code: u32) -> Self {
        self.routes
            .insert(url.to_string(), StubResponse::Status(code));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

impl ImageFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage, ArtifactError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            Some(StubResponse::Ok(ct, body)) => {
                FetchedImage::from_response(Some(ct.clone()), body.clone())
            }
            Some(StubResponse::Status(code)) => Err(ArtifactError::http(url, *code)),
            None => Err(ArtifactError::http(url, 404)),
        }
    }
}

/// Store over `fetcher` with an in-memory sink; returns handles to both for assertions.
pub(crate) fn memory_store(fetcher: StubFetcher) -> (ArtifactStore, Arc<StubFetcher>, Arc<MemorySink>) {
    let fetcher = Arc::new(fetcher);
    let sink = Arc::new(MemorySink::new());
    let store = ArtifactStore::new(
        Arc::clone(&fetcher) as Arc<dyn ImageFetcher>,
        Arc::clone(&sink) as Arc<dyn ArtifactSink>,
    );
    (store, fetcher, sink)
}
