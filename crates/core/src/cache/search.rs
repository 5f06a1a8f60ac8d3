//! Search result cache operations.
//!
//! Each row maps a normalized query term to the ordered list of titles the
//! remote service returned for it. Rows carry only their write time; the
//! deadline is `created_at + ttl` where `ttl` belongs to the [`CacheDb`].

use super::connection::CacheDb;
use super::key::normalize_key;
use crate::Error;
use chrono::Utc;
use std::time::Duration;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::OptionalExtension;

/// A stored result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Normalized query term.
    pub key: String,
    /// Titles in the order the remote service ranked them.
    pub value: Vec<String>,
    /// Write time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl CacheEntry {
    /// Millisecond timestamp at which the entry stops being readable.
    pub fn expires_at(&self, ttl: Duration) -> i64 {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        self.created_at.saturating_add(ttl_ms)
    }

    pub fn is_expired_at(&self, now_ms: i64, ttl: Duration) -> bool {
        now_ms >= self.expires_at(ttl)
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl CacheDb {
    /// Get the live result list for a term.
    ///
    /// Returns None if no entry exists or the entry has expired. An expired
    /// entry is deleted in the same call.
    pub async fn get(&self, term: &str) -> Result<Option<Vec<String>>, Error> {
        Ok(self.get_entry(term).await?.map(|entry| entry.value))
    }

    /// Get the live entry for a term, including its write time.
    pub async fn get_entry(&self, term: &str) -> Result<Option<CacheEntry>, Error> {
        let key = normalize_key(term);
        if key.is_empty() {
            return Ok(None);
        }

        let ttl = self.ttl;
        let now = now_millis();
        self.conn
            .call(move |conn| -> Result<Option<CacheEntry>, Error> {
                let row: Option<(String, i64)> = conn
                    .query_row(
                        "SELECT value, created_at FROM search_results WHERE key = ?1",
                        params![key],
                        |row| Ok((row.get(0)?, row.get(1)?)),
                    )
                    .optional()?;

                let Some((value_json, created_at)) = row else {
                    return Ok(None);
                };

                let entry = CacheEntry { key, value: serde_json::from_str(&value_json)?, created_at };

                if entry.is_expired_at(now, ttl) {
                    conn.execute("DELETE FROM search_results WHERE key = ?1", params![entry.key])?;
                    tracing::debug!(key = %entry.key, "dropped expired cache entry on read");
                    return Ok(None);
                }

                Ok(Some(entry))
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or replace the result list for a term, stamping the current time.
    ///
    /// Uses UPSERT semantics: a prior entry for the same key is fully replaced
    /// and its timestamp refreshed.
    pub async fn set(&self, term: &str, value: &[String]) -> Result<(), Error> {
        self.set_at(term, value, now_millis()).await
    }

    /// Like [`set`](Self::set), but skips the write unless `still_wanted`
    /// returns true.
    ///
    /// `still_wanted` runs on the database thread right before the upsert,
    /// after every cache call queued ahead of it has completed. Returns
    /// whether the row was written.
    pub async fn set_if<F>(&self, term: &str, value: &[String], still_wanted: F) -> Result<bool, Error>
    where
        F: FnOnce() -> bool + Send + 'static,
    {
        self.upsert(term, value, now_millis(), still_wanted).await
    }

    pub(crate) async fn set_at(&self, term: &str, value: &[String], created_at: i64) -> Result<(), Error> {
        self.upsert(term, value, created_at, || true).await?;
        Ok(())
    }

    async fn upsert<F>(&self, term: &str, value: &[String], created_at: i64, still_wanted: F) -> Result<bool, Error>
    where
        F: FnOnce() -> bool + Send + 'static,
    {
        let key = normalize_key(term);
        if key.is_empty() {
            return Err(Error::InvalidInput("cache key cannot be empty".into()));
        }
        let value_json = serde_json::to_string(value)?;

        self.conn
            .call(move |conn| -> Result<bool, Error> {
                if !still_wanted() {
                    return Ok(false);
                }
                conn.execute(
                    "INSERT INTO search_results (key, value, created_at)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        created_at = excluded.created_at",
                    params![key, value_json, created_at],
                )?;
                Ok(true)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete the entry for a term.
    ///
    /// Returns whether a row was removed.
    pub async fn remove(&self, term: &str) -> Result<bool, Error> {
        let key = normalize_key(term);
        if key.is_empty() {
            return Ok(false);
        }

        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count = conn.execute("DELETE FROM search_results WHERE key = ?1", params![key])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every entry whose deadline has passed.
    ///
    /// Returns the number of deleted entries.
    pub async fn clear_expired(&self) -> Result<u64, Error> {
        let cutoff = now_millis().saturating_sub(self.ttl_millis());
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM search_results WHERE created_at <= ?1", params![cutoff])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Number of stored rows, expired or not.
    pub async fn len(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM search_results", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    pub async fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len().await? == 0)
    }
}
