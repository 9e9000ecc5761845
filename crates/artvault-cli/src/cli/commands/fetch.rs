//! `artvault fetch <url>...` – one `download_one` per URL, shared session.

use anyhow::Result;
use artvault_core::config::VaultConfig;
use artvault_core::retry::{download_one_with_retry, RetryPolicy};
use artvault_core::{ArtifactStore, SessionState};

use super::ensure_any_ok;
use super::ledger::print_version_log;

pub async fn run_fetch(cfg: &VaultConfig, urls: &[String], retry: bool) -> Result<()> {
    let store = ArtifactStore::from_config(cfg)?;
    let policy = if retry {
        cfg.retry_policy()
    } else {
        RetryPolicy::none()
    };
    let mut session = SessionState::new();
    let mut statuses = Vec::with_capacity(urls.len());

    for url in urls {
        let r = download_one_with_retry(&store, &mut session, url, &policy).await;
        if r.attempts > 1 {
            tracing::info!(url = %url, attempts = r.attempts, "finished after retries");
        }
        statuses.push(r.result.status);
        println!("{}", serde_json::to_string_pretty(&r.result)?);
    }

    print_version_log(&session);
    ensure_any_ok(&statuses)
}
