//! Free-form header text parsing

use crate::models::{Header, HeaderSet};

/// Parse `Key: Value` lines into a header list.
///
/// Each line is split on its first colon; key and value are trimmed. Lines
/// without a colon are dropped. Header names are not validated here.
pub fn parse_headers(text: &str) -> HeaderSet {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| Header::new(key.trim(), value.trim()))
        .collect()
}

/// Render headers one per line as `key: value`
pub fn format_headers(headers: &[Header]) -> String {
    headers
        .iter()
        .map(|h| format!("{}: {}\n", h.key, h.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_lines() {
        let headers = parse_headers("A: 1\nB:2\nbad-line\nC : 3 ");
        assert_eq!(
            headers,
            vec![Header::new("A", "1"), Header::new("B", "2"), Header::new("C", "3")]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_headers("").is_empty());
        assert!(parse_headers("   \n\t\n").is_empty());
    }

    #[test]
    fn test_split_on_first_colon_only() {
        let headers = parse_headers("Referer: http://example.com:8080/x");
        assert_eq!(headers, vec![Header::new("Referer", "http://example.com:8080/x")]);
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let headers = parse_headers("X-Tag: a\r\nX-Tag: b\n\nX-Tag: c");
        let values: Vec<_> = headers.iter().map(|h| h.value.as_str()).collect();
        assert_eq!(values, ["a", "b", "c"]);
    }

    #[test]
    fn test_no_name_validation() {
        let headers = parse_headers("bad name!: ok\n: empty-key");
        assert_eq!(
            headers,
            vec![Header::new("bad name!", "ok"), Header::new("", "empty-key")]
        );
    }

    #[test]
    fn test_format_headers() {
        let text = format_headers(&[Header::new("a", "1"), Header::new("a", "2")]);
        assert_eq!(text, "a: 1\na: 2\n");
    }
}
