//! OpenSearch request parameters and validation.

use serde::Serialize;

use super::SearchError;

/// Longest term the remote service accepts, in characters.
pub const MAX_TERM_CHARS: usize = 300;

/// Query parameters for a MediaWiki `action=opensearch` lookup.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OpenSearchRequest {
    pub action: &'static str,
    pub format: &'static str,
    /// Trimmed query term.
    pub search: String,
    /// Maximum number of titles to return.
    pub limit: u8,
    /// Content namespace to restrict matches to.
    pub namespace: u32,
    /// CORS origin marker required for anonymous requests.
    pub origin: &'static str,
}

impl OpenSearchRequest {
    pub fn new(term: &str, limit: u8, namespace: u32) -> Self {
        Self {
            action: "opensearch",
            format: "json",
            search: term.trim().to_string(),
            limit,
            namespace,
            origin: "*",
        }
    }

    /// Validate the request parameters.
    ///
    /// Returns an error if the term is blank or too long, or the limit is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.search.is_empty() {
            return Err(SearchError::InvalidQuery("query cannot be empty".to_string()));
        }

        let chars = self.search.chars().count();
        if chars > MAX_TERM_CHARS {
            return Err(SearchError::InvalidQuery(format!(
                "query too long: {} chars (max {})",
                chars, MAX_TERM_CHARS
            )));
        }

        if self.limit == 0 {
            return Err(SearchError::InvalidQuery("limit must be at least 1".to_string()));
        }

        Ok(())
    }
}
