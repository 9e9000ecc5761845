//! Identity of one session, used to keep sink entries of different sessions apart.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::record::unix_timestamp;

static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Unique per session within a process; start time and pid make it unique
/// across processes sharing an output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId {
    started_at: i64,
    pid: u32,
    seq: u64,
}

impl SessionId {
    pub(crate) fn next() -> Self {
        Self {
            started_at: unix_timestamp(),
            pid: std::process::id(),
            seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// `session-<started_at>-<pid>-<seq>`, safe as a directory name.
impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}-{}-{}", self.started_at, self.pid, self.seq)
    }
}
