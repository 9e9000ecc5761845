//! CLI command handlers, one per file.

mod batch;
mod fetch;
mod ledger;
mod split;

pub use batch::run_batch;
pub use fetch::run_fetch;
pub use split::run_split;

use anyhow::Result;
use artvault_core::DownloadStatus;

/// Fails the command when every call in the run ended in `error`.
pub(crate) fn ensure_any_ok(statuses: &[DownloadStatus]) -> Result<()> {
    if !statuses.is_empty() && statuses.iter().all(|s| *s == DownloadStatus::Error) {
        anyhow::bail!("no image could be downloaded");
    }
    Ok(())
}
