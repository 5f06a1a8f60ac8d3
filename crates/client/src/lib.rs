//! Client code for titleseek.
//!
//! This crate provides the remote title-search client, the [`TitleSearch`]
//! seam the suggestion pipeline is written against, and the cancellation
//! token used to abandon superseded lookups.

pub mod cancel;
pub mod opensearch;

pub use cancel::CancelToken;
pub use opensearch::{OpenSearchClient, OpenSearchConfig, OpenSearchRequest, SearchError, TitleSearch, decode_titles};
