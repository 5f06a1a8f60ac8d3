//! SQLite-backed cache for search suggestions.
//!
//! This module provides a persistent key -> title-list store using SQLite
//! with async access via tokio-rusqlite. It supports:
//!
//! - Normalized keys (trimmed, lowercased query terms)
//! - Per-entry expiry against a store-wide TTL, enforced lazily on read
//!   and eagerly by `clear_expired`
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod connection;
pub mod key;
pub mod migrations;
pub mod search;

pub use crate::Error;

pub use connection::{CacheDb, DEFAULT_TTL};
pub use key::normalize_key;
pub use search::CacheEntry;
