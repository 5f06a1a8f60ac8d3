//! Title-search client error types.

use std::sync::Arc;

/// Errors from the remote title-search client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// The lookup was superseded before it completed.
    #[error("search cancelled")]
    Cancelled,

    /// Endpoint URL is unusable.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Invalid search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),
}

impl SearchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchError::Cancelled)
    }

    /// Any failure other than cancellation counts as a transport failure.
    pub fn is_transport(&self) -> bool {
        !self.is_cancelled()
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SearchError::Timeout } else { SearchError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::HttpError { status: 503 };
        assert!(err.to_string().contains("503"));

        let err = SearchError::InvalidQuery("test".to_string());
        assert!(err.to_string().contains("invalid query"));
    }

    #[test]
    fn test_classification() {
        assert!(SearchError::Cancelled.is_cancelled());
        assert!(!SearchError::Cancelled.is_transport());
        assert!(SearchError::Timeout.is_transport());
        assert!(SearchError::HttpError { status: 500 }.is_transport());
    }
}
