//! Suggestion pipeline for titleseek.
//!
//! Input text flows through the [`DebounceGate`] into the [`Coordinator`],
//! which answers from the persistent cache, the remote title search, or the
//! [`FallbackResolver`], and publishes [`SuggestEvent`]s for the presentation
//! layer.

pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod event;
pub mod fallback;
pub mod sweeper;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{Coordinator, Resolution, SearchRequest, Source};
pub use debounce::{DEFAULT_QUIET_PERIOD, DebounceGate};
pub use error::SuggestError;
pub use event::SuggestEvent;
pub use fallback::FallbackResolver;
pub use sweeper::spawn_expiry_sweeper;
