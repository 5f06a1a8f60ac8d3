//! OpenSearch response decoding.
//!
//! The service answers with `[term, [titles...], [descriptions...], [urls...]]`.
//! Only the second element matters here.

use serde_json::Value;

/// Extract the ordered title list from an OpenSearch response body.
///
/// Decoding is lenient: a body that is not JSON, is not an array, has fewer
/// than two elements, or whose second element is not an array yields an empty
/// list. Non-string titles are skipped.
pub fn decode_titles(body: &[u8]) -> Vec<String> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("undecodable search response treated as empty: {}", e);
            return Vec::new();
        }
    };

    let Value::Array(mut items) = value else {
        return Vec::new();
    };
    if items.len() < 2 {
        return Vec::new();
    }

    match items.swap_remove(1) {
        Value::Array(titles) => titles
            .into_iter()
            .filter_map(|title| match title {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"[
        "Albert",
        ["Albert Einstein", "Albert Camus", "Albert II, Prince of Monaco"],
        ["", "", ""],
        [
            "https://en.wikipedia.org/wiki/Albert_Einstein",
            "https://en.wikipedia.org/wiki/Albert_Camus",
            "https://en.wikipedia.org/wiki/Albert_II,_Prince_of_Monaco"
        ]
    ]"#;

    #[test]
    fn test_decode_titles_in_order() {
        let titles = decode_titles(FIXTURE_JSON.as_bytes());
        assert_eq!(titles, vec!["Albert Einstein", "Albert Camus", "Albert II, Prince of Monaco"]);
    }

    #[test]
    fn test_two_element_response() {
        let titles = decode_titles(br#"["dog", ["Dog"]]"#);
        assert_eq!(titles, vec!["Dog"]);
    }

    #[test]
    fn test_no_matches() {
        assert!(decode_titles(br#"["zzqx", [], [], []]"#).is_empty());
    }

    #[test]
    fn test_unexpected_shapes_yield_empty() {
        assert!(decode_titles(br#"{"error": {"code": "badvalue"}}"#).is_empty());
        assert!(decode_titles(br#"["only-term"]"#).is_empty());
        assert!(decode_titles(br#"["term", "not-a-list"]"#).is_empty());
        assert!(decode_titles(b"<html>oops</html>").is_empty());
        assert!(decode_titles(b"").is_empty());
    }

    #[test]
    fn test_non_string_titles_skipped() {
        let titles = decode_titles(br#"["x", ["X", 42, null, "X-ray"]]"#);
        assert_eq!(titles, vec!["X", "X-ray"]);
    }
}
