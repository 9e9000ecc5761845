//! Version ledger printed to stderr when a session ends.

use artvault_core::SessionState;

pub(super) fn print_version_log(session: &SessionState) {
    if session.is_empty() {
        eprintln!("No artifacts stored in this session.");
        return;
    }
    eprintln!(
        "{:<6} {:<8} {:<28} {:<10} {}",
        "ORDER", "VERSION", "FILENAME", "SIZE", "URL"
    );
    for e in session.version_log() {
        eprintln!(
            "{:<6} {:<8} {:<28} {:<10} {}",
            e.download_order, e.version, e.filename, e.size_bytes, e.source_url
        );
    }
    eprintln!(
        "{} artifact(s), {} bytes",
        session.total_count(),
        session.total_size_bytes()
    );
}
