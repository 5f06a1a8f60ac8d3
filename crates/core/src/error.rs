//! Unified error types for titleseek.
//!
//! Everything here is a storage-side failure. Callers on the lookup path treat
//! these as a cache miss rather than surfacing them.

use tokio_rusqlite::rusqlite;

/// Unified error types for the titleseek cache and configuration layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., a blank cache key).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Filesystem access for the database file failed.
    #[error("CACHE_ERROR: {0}")]
    Io(#[from] std::io::Error),

    /// A stored result list could not be encoded or decoded.
    #[error("CACHE_ERROR: malformed entry: {0}")]
    Encoding(String),
}

impl Error {
    /// Whether this error originated in the durable store.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Database(_) | Error::MigrationFailed(_) | Error::Io(_) | Error::Encoding(_))
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("key cannot be empty".to_string());
        assert!(err.to_string().contains("INVALID_INPUT"));
        assert!(err.to_string().contains("key cannot be empty"));
    }

    #[test]
    fn test_storage_classification() {
        assert!(Error::Encoding("bad".into()).is_storage());
        assert!(Error::MigrationFailed("v1".into()).is_storage());
        assert!(!Error::InvalidInput("blank".into()).is_storage());
    }

    #[test]
    fn test_from_serde_json() {
        let err: Error = serde_json::from_str::<Vec<String>>("not json").unwrap_err().into();
        assert!(matches!(err, Error::Encoding(_)));
    }
}
