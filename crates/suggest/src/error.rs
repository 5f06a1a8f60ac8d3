//! Errors surfaced to the presentation layer.

use titleseek_client::SearchError;

/// Message shown when no suggestions could be produced.
pub const UNAVAILABLE_MESSAGE: &str = "Failed to fetch results. Please try again.";

/// Structured errors for the suggestion pipeline.
///
/// The display text is always the generic retry prompt; the underlying
/// transport failure is kept as the error source for logging.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// Remote lookup failed and the cache had nothing for the term.
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable { term: String, source: SearchError },
}

impl SuggestError {
    pub fn term(&self) -> &str {
        match self {
            SuggestError::Unavailable { term, .. } => term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_is_generic() {
        let err = SuggestError::Unavailable { term: "xyz".into(), source: SearchError::HttpError { status: 502 } };
        assert_eq!(err.to_string(), UNAVAILABLE_MESSAGE);
        assert!(!err.to_string().contains("502"));
        assert_eq!(err.term(), "xyz");
    }

    #[test]
    fn test_source_retained() {
        let err = SuggestError::Unavailable { term: "xyz".into(), source: SearchError::Timeout };
        let source = err.source().expect("transport cause");
        assert!(source.to_string().contains("timeout"));
    }
}
