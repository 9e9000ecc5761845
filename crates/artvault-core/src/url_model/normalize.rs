//! Dedup key for a source URL.

/// Canonical dedup key for `raw`: leading/trailing whitespace removed, nothing else.
///
/// No case folding, percent-decoding, or query reordering happens here, so
/// `http://h/A.png` and `http://h/a.png` are distinct artifacts.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_string()
}
