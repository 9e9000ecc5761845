//! Re-issue `download_one` while failures look transient.

use crate::api::DownloadResult;
use crate::retry::classify::classify;
use crate::retry::policy::{RetryDecision, RetryPolicy};
use crate::session::SessionState;
use crate::store::{ArtifactStore, IngestOutcome};

/// Final result plus how many attempts it took.
#[derive(Debug, Clone)]
pub struct RetriedDownload {
    pub result: DownloadResult,
    pub attempts: u32,
}

/// Calls the store until the URL is stored/known or the policy says stop.
/// Sleeps for the backoff delay between attempts.
pub async fn download_one_with_retry(
    store: &ArtifactStore,
    session: &mut SessionState,
    image_url: &str,
    policy: &RetryPolicy,
) -> RetriedDownload {
    let mut attempt = 1u32;
    loop {
        let outcome = store.ingest(session, image_url).await;
        let decision = match &outcome {
            IngestOutcome::Failed { error, .. } => policy.decide(attempt, classify(error)),
            _ => RetryDecision::NoRetry,
        };
        match decision {
            RetryDecision::NoRetry => {
                return RetriedDownload {
                    result: DownloadResult::from_outcome(&outcome, session.stats()),
                    attempts: attempt,
                };
            }
            RetryDecision::RetryAfter(delay) => {
                tracing::info!(
                    url = %outcome.url(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
