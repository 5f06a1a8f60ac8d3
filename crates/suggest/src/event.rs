//! Events emitted to the presentation layer.

use serde::Serialize;

/// One update for the suggestion list.
///
/// Serializes as `"loading"`, `{"results": [...]}`, `{"error": "..."}` or
/// `"cleared"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestEvent {
    /// A lookup was issued for the latest input.
    Loading,
    /// Titles for the latest input, in ranked order.
    Results(Vec<String>),
    /// User-facing failure message.
    Error(String),
    /// Input became blank; drop results and error state.
    Cleared,
}
