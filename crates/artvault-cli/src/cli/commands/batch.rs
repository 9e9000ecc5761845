//! `artvault batch <list>...` – one `download_batch` per argument, shared session.

use anyhow::Result;
use artvault_core::config::VaultConfig;
use artvault_core::{download_batch, ArtifactStore, SessionState};

use super::ensure_any_ok;
use super::ledger::print_version_log;

pub async fn run_batch(cfg: &VaultConfig, inputs: &[String]) -> Result<()> {
    let store = ArtifactStore::from_config(cfg)?;
    let mut session = SessionState::new();
    let mut statuses = Vec::with_capacity(inputs.len());

    for input in inputs {
        let r = download_batch(&store, &mut session, input).await;
        statuses.push(r.status);
        println!("{}", serde_json::to_string_pretty(&r)?);
    }

    print_version_log(&session);
    ensure_any_ok(&statuses)
}
