//! Pull the effective Content-Type out of collected response header lines.

/// Content-Type of the final response in `lines`.
///
/// With redirects followed, libcurl reports the headers of every hop; a new
/// status line resets what was seen so only the last response counts.
pub(crate) fn content_type_from_headers(lines: &[String]) -> Option<String> {
    let mut content_type = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_type = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                let value = value.trim();
                if !value.is_empty() {
                    content_type = Some(value.to_string());
                }
            }
        }
    }
    content_type
}
