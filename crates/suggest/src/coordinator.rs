//! Request coordination: cache, remote lookup, write-through and fallback.
//!
//! Every lookup is issued as a [`SearchRequest`] with a generation number.
//! Issuing a request cancels the previous one and makes it ineligible to
//! produce any observable effect: it will not write the cache and its
//! outcome is reported as [`Resolution::Superseded`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use titleseek_client::{CancelToken, TitleSearch};
use titleseek_core::CacheDb;

use crate::error::SuggestError;
use crate::fallback::FallbackResolver;

/// A lookup issued by the coordinator.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    term: String,
    generation: u64,
    token: CancelToken,
}

impl SearchRequest {
    /// Trimmed term this request answers.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

/// Where a result list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Term was blank; nothing was looked up.
    Blank,
    Cache,
    Remote,
    Fallback,
}

/// Outcome of a lookup that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Titles the presentation layer may show.
    Titles { titles: Vec<String>, source: Source },
    /// A newer request was issued first; nothing may be shown.
    Superseded,
}

impl Resolution {
    pub fn titles(&self) -> Option<&[String]> {
        match self {
            Resolution::Titles { titles, .. } => Some(titles),
            Resolution::Superseded => None,
        }
    }

    pub fn source(&self) -> Option<Source> {
        match self {
            Resolution::Titles { source, .. } => Some(*source),
            Resolution::Superseded => None,
        }
    }
}

/// The currently active request slot.
#[derive(Debug)]
struct Active {
    generation: u64,
    token: CancelToken,
}

fn lock_active(active: &Mutex<Active>) -> MutexGuard<'_, Active> {
    active.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Orchestrates lookups so only the latest request's outcome is observable.
///
/// The active slot sits behind a plain mutex that is only held for
/// synchronous bookkeeping, never across an await.
pub struct Coordinator {
    cache: CacheDb,
    search: Arc<dyn TitleSearch>,
    fallback: FallbackResolver,
    active: Arc<Mutex<Active>>,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("cache", &self.cache)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    pub fn new(cache: CacheDb, search: Arc<dyn TitleSearch>) -> Self {
        let fallback = FallbackResolver::new(cache.clone());
        Self { cache, search, fallback, active: Arc::new(Mutex::new(Active { generation: 0, token: CancelToken::new() })) }
    }

    fn active(&self) -> MutexGuard<'_, Active> {
        lock_active(&self.active)
    }

    /// Resolve a term end to end.
    ///
    /// A blank term returns an empty list without touching the cache or the
    /// remote service. Otherwise a new request is issued, superseding any
    /// earlier one, and run to completion.
    pub async fn resolve(&self, term: &str) -> Result<Resolution, SuggestError> {
        if term.trim().is_empty() {
            return Ok(Resolution::Titles { titles: Vec::new(), source: Source::Blank });
        }
        let request = self.issue(term);
        self.run(&request).await
    }

    /// Issue a new request for `term`, retiring the active one.
    pub fn issue(&self, term: &str) -> SearchRequest {
        let mut active = self.active();
        active.token.cancel();
        active.generation += 1;
        active.token = CancelToken::new();

        tracing::trace!(generation = active.generation, term = term.trim(), "issued search request");

        SearchRequest { term: term.trim().to_string(), generation: active.generation, token: active.token.clone() }
    }

    /// Retire the active request without issuing a new one.
    pub fn retire(&self) {
        let mut active = self.active();
        active.token.cancel();
        active.generation += 1;
        active.token = CancelToken::new();
    }

    /// Whether `request` is still the latest issued request.
    pub fn is_current(&self, request: &SearchRequest) -> bool {
        self.active().generation == request.generation
    }

    /// Run `emit` only if `request` is still current.
    ///
    /// The currency check and `emit` happen under the same lock as
    /// [`issue`](Self::issue), so no newer request can be issued in between.
    /// Returns whether `emit` ran.
    pub fn publish(&self, request: &SearchRequest, emit: impl FnOnce()) -> bool {
        let active = self.active();
        if active.generation != request.generation {
            return false;
        }
        emit();
        true
    }

    /// Run an issued request: cache, then remote with write-through, then fallback.
    pub async fn run(&self, request: &SearchRequest) -> Result<Resolution, SuggestError> {
        let term = request.term();

        match self.cache.get(term).await {
            Ok(Some(titles)) => {
                if !self.is_current(request) {
                    return Ok(Resolution::Superseded);
                }
                tracing::debug!(term, count = titles.len(), "cache hit");
                return Ok(Resolution::Titles { titles, source: Source::Cache });
            }
            Ok(None) => tracing::debug!(term, "cache miss"),
            Err(e) => tracing::warn!(term, "cache read failed, treating as miss: {}", e),
        }

        if !self.is_current(request) {
            return Ok(Resolution::Superseded);
        }

        let outcome = self.search.search(term, request.token()).await;

        if !self.is_current(request) {
            tracing::debug!(term, generation = request.generation, "discarding superseded lookup");
            return Ok(Resolution::Superseded);
        }

        match outcome {
            Ok(titles) => {
                if !titles.is_empty() && !self.write_through(request, &titles).await {
                    return Ok(Resolution::Superseded);
                }
                Ok(Resolution::Titles { titles, source: Source::Remote })
            }
            Err(e) if e.is_cancelled() => Ok(Resolution::Superseded),
            Err(e) => {
                tracing::warn!(term, "remote search failed, trying cache fallback: {}", e);
                let titles = self.fallback.resolve(term).await;

                if !self.is_current(request) {
                    return Ok(Resolution::Superseded);
                }
                if titles.is_empty() {
                    return Err(SuggestError::Unavailable { term: term.to_string(), source: e });
                }
                Ok(Resolution::Titles { titles, source: Source::Fallback })
            }
        }
    }

    /// Cache a remote answer unless `request` has been superseded.
    ///
    /// The currency check runs on the cache's database thread immediately
    /// before the upsert, so a request issued on another worker after the
    /// check in [`run`](Self::run) still prevents the write. Returns false
    /// only when the write was skipped for that reason; a failed write is
    /// logged and leaves any prior entry in place.
    async fn write_through(&self, request: &SearchRequest, titles: &[String]) -> bool {
        let active = Arc::clone(&self.active);
        let generation = request.generation;
        let still_current = move || lock_active(&active).generation == generation;

        match self.cache.set_if(request.term(), titles, still_current).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::debug!(term = request.term(), generation, "skipped cache write for superseded lookup");
                false
            }
            Err(e) => {
                tracing::warn!(term = request.term(), "failed to cache search result: {}", e);
                true
            }
        }
    }
}
