//! Classify artifact errors into retry policy error kinds.

use crate::error::{ArtifactError, NetworkCause};
use crate::retry::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Other,
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Only network failures can be transient; content-type, parse and sink
/// errors will fail the same way again.
pub fn classify(e: &ArtifactError) -> ErrorKind {
    match e {
        ArtifactError::Network { cause, .. } => match cause {
            NetworkCause::Curl(ce) => classify_curl_error(ce),
            NetworkCause::Http(code) => classify_http_status(*code),
        },
        ArtifactError::InvalidContentType { .. }
        | ArtifactError::Parse(_)
        | ArtifactError::Unexpected(_) => ErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    #[test]
    fn http_429_and_503_throttled() {
        assert_eq!(classify_http_status(429), ErrorKind::Throttled);
        assert_eq!(classify_http_status(503), ErrorKind::Throttled);
    }

    #[test]
    fn http_5xx_retryable() {
        assert!(matches!(classify_http_status(500), ErrorKind::Http5xx(500)));
        assert!(matches!(classify_http_status(502), ErrorKind::Http5xx(502)));
    }

    #[test]
    fn http_4xx_other() {
        assert_eq!(classify_http_status(404), ErrorKind::Other);
        assert_eq!(classify_http_status(403), ErrorKind::Other);
    }

    #[test]
    fn non_network_errors_are_permanent() {
        let ct = ArtifactError::InvalidContentType {
            content_type: "text/html".into(),
        };
        assert_eq!(classify(&ct), ErrorKind::Other);
        assert_eq!(classify(&ParseError::NoValidUrl.into()), ErrorKind::Other);
        assert_eq!(
            classify(&ArtifactError::Unexpected("disk".into())),
            ErrorKind::Other
        );
        assert_eq!(classify(&ArtifactError::http("u", 503)), ErrorKind::Throttled);
    }
}
