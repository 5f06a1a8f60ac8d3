//! Offline answers from the persistent cache.

use titleseek_core::CacheDb;

/// Best-effort lookup used when the remote service is unreachable.
///
/// Matches on the same normalized key as the primary path. Never fails:
/// storage errors degrade to an empty list.
#[derive(Debug, Clone)]
pub struct FallbackResolver {
    cache: CacheDb,
}

impl FallbackResolver {
    pub fn new(cache: CacheDb) -> Self {
        Self { cache }
    }

    pub async fn resolve(&self, term: &str) -> Vec<String> {
        match self.cache.get(term).await {
            Ok(Some(titles)) => {
                tracing::debug!(term, count = titles.len(), "fallback served from cache");
                titles
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(term, "fallback cache read failed: {}", e);
                Vec::new()
            }
        }
    }
}
