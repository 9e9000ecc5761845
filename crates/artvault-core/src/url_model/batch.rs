//! Split a free-form batch string into candidate URLs.
//!
//! Precedence, first match wins:
//! 1. the input contains `", "`: split on that exact separator, no prefix filter;
//! 2. the input contains whitespace and no comma: split on whitespace, keep `http*` only;
//! 3. otherwise: split on `,` and glue non-`http` fragments back onto the URL before them.
//!
//! Branch 1 does not filter on the `http` prefix while branch 2 does. The
//! asymmetry is intentional.

use crate::error::ParseError;

const URL_PREFIX: &str = "http";

/// Parse `raw` into an ordered, possibly duplicated list of candidate URLs.
///
/// Returns `ParseError::NoValidUrl` when nothing usable is found (empty or
/// whitespace-only input included).
pub fn parse_batch(raw: &str) -> Result<Vec<String>, ParseError> {
    let urls = split_candidates(raw);
    if urls.is_empty() {
        return Err(ParseError::NoValidUrl);
    }
    Ok(urls)
}

/// Same as [`parse_batch`] but returns an empty list instead of an error.
pub fn split_candidates(raw: &str) -> Vec<String> {
    if raw.contains(", ") {
        split_comma_space(raw)
    } else if raw.contains(char::is_whitespace) && !raw.contains(',') {
        split_whitespace(raw)
    } else {
        split_commas_rejoined(raw)
    }
}

fn split_comma_space(raw: &str) -> Vec<String> {
    raw.split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_whitespace(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .filter(|s| s.starts_with(URL_PREFIX))
        .map(str::to_string)
        .collect()
}

fn split_commas_rejoined(raw: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for part in raw.split(',').map(str::trim) {
        if part.starts_with(URL_PREFIX) {
            if let Some(done) = current.take() {
                urls.push(done);
            }
            current = Some(part.to_string());
        } else if let Some(url) = current.as_mut() {
            // Fragment of a URL that had a comma in it (query value, path segment).
            if !part.is_empty() {
                url.push(',');
                url.push_str(part);
            }
        }
        // Leading fragments with no URL in front of them are dropped.
    }
    if let Some(done) = current {
        urls.push(done);
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_space_separated() {
        assert_eq!(
            parse_batch("http://a.jpg, http://b.jpg").unwrap(),
            vec!["http://a.jpg", "http://b.jpg"]
        );
    }

    #[test]
    fn whitespace_separated() {
        assert_eq!(
            parse_batch("http://a.jpg http://b.jpg").unwrap(),
            vec!["http://a.jpg", "http://b.jpg"]
        );
        assert_eq!(
            parse_batch("http://a.jpg\n\thttp://b.jpg\n").unwrap(),
            vec!["http://a.jpg", "http://b.jpg"]
        );
    }

    #[test]
    fn empty_and_blank_input_is_parse_error() {
        assert_eq!(parse_batch(""), Err(ParseError::NoValidUrl));
        assert_eq!(parse_batch("   \n "), Err(ParseError::NoValidUrl));
        assert!(split_candidates("").is_empty());
    }

    #[test]
    fn whitespace_branch_filters_non_http_segments() {
        assert_eq!(
            parse_batch("see http://a.jpg and http://b.jpg").unwrap(),
            vec!["http://a.jpg", "http://b.jpg"]
        );
        assert_eq!(parse_batch("no urls here"), Err(ParseError::NoValidUrl));
    }

    #[test]
    fn comma_space_branch_keeps_non_http_segments_verbatim() {
        assert_eq!(
            parse_batch("http://a.jpg, not-a-url, http://b.jpg").unwrap(),
            vec!["http://a.jpg", "not-a-url", "http://b.jpg"]
        );
        assert_eq!(
            parse_batch("http://a.jpg, , http://b.jpg").unwrap(),
            vec!["http://a.jpg", "http://b.jpg"]
        );
    }

    #[test]
    fn bare_commas_split() {
        assert_eq!(
            parse_batch("http://a.jpg,http://b.jpg,https://c.png").unwrap(),
            vec!["http://a.jpg", "http://b.jpg", "https://c.png"]
        );
    }

    #[test]
    fn bare_commas_rejoin_query_fragments() {
        assert_eq!(
            parse_batch("http://x/img?size=1,2,http://y/b.png").unwrap(),
            vec!["http://x/img?size=1,2", "http://y/b.png"]
        );
        assert_eq!(
            parse_batch("http://x/a.jpg?crop=0,0,10,10").unwrap(),
            vec!["http://x/a.jpg?crop=0,0,10,10"]
        );
    }

    #[test]
    fn bare_commas_drop_leading_fragments_and_trailing_empties() {
        assert_eq!(
            parse_batch("junk,http://a.jpg,").unwrap(),
            vec!["http://a.jpg"]
        );
    }

    #[test]
    fn single_url_without_delimiters() {
        assert_eq!(parse_batch("http://a.jpg").unwrap(), vec!["http://a.jpg"]);
    }

    #[test]
    fn duplicates_are_kept_for_downstream_dedup() {
        assert_eq!(
            parse_batch("http://a.jpg http://a.jpg").unwrap(),
            vec!["http://a.jpg", "http://a.jpg"]
        );
    }

    #[test]
    fn comma_space_takes_precedence_over_query_commas() {
        // `", "` wins even though the first URL carries a bare comma.
        assert_eq!(
            parse_batch("http://x/a?c=1,2, http://y/b").unwrap(),
            vec!["http://x/a?c=1,2", "http://y/b"]
        );
    }
}
