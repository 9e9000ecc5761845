//! Caller-side retry and backoff.
//!
//! The store never retries on its own. Callers that want resilience re-issue
//! `download_one` for failed URLs; this is safe because a failed URL leaves no
//! trace in the session. This module classifies `ArtifactError`s and decides
//! whether and when to try again.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{download_one_with_retry, RetriedDownload};
