//! Core types and shared functionality for titleseek.
//!
//! This crate provides:
//! - Persistent search-result cache with SQLite backend and per-entry expiry
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheDb, CacheEntry, DEFAULT_TTL, normalize_key};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
