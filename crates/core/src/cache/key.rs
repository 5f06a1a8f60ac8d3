//! Cache key normalization.

/// Normalize a query term into its cache key.
///
/// Surrounding whitespace is trimmed and the term is lowercased, so
/// `"  Albert "` and `"albert"` share one entry.
pub fn normalize_key(term: &str) -> String {
    term.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize_key("  Albert "), "albert");
        assert_eq!(normalize_key("ALBERT"), normalize_key("albert"));
    }

    #[test]
    fn test_inner_whitespace_preserved() {
        assert_eq!(normalize_key(" Albert  Camus "), "albert  camus");
    }

    #[test]
    fn test_unicode_lowercase() {
        assert_eq!(normalize_key("ÉMILE"), "émile");
    }

    #[test]
    fn test_blank_is_empty() {
        assert!(normalize_key(" \t\n").is_empty());
    }
}
