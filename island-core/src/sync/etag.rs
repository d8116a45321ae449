// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Validation tag storage
//!
//! Maps a resolved resource URL to the last ETag the server returned for
//! it. Keys are namespaced with [`TAG_KEY_PREFIX`] so the table can share a
//! database with unrelated preferences.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;
use url::Url;

/// Prefix applied to every tag key.
pub const TAG_KEY_PREFIX: &str = "eetag::";

/// Durable URL → ETag mapping.
///
/// A single logical writer is assumed; implementations need no external
/// locking.
pub trait TagStore: Send + Sync {
    /// Returns the known tag for `url`, if any.
    fn get(&self, url: &Url) -> Result<Option<String>, TagStoreError>;

    /// Stores `tag` for `url`, or removes the entry when `tag` is `None`.
    fn set(&self, tag: Option<&str>, url: &Url) -> Result<(), TagStoreError>;
}

fn tag_key(url: &Url) -> String {
    format!("{TAG_KEY_PREFIX}{}", url.as_str())
}

/// SQLite-backed tag store.
///
/// Persists tags in a `preferences` key/value table.
pub struct SqliteTagStore {
    conn: Mutex<Connection>,
}

impl SqliteTagStore {
    /// Opens or creates a tag database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TagStoreError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Creates an in-memory tag store (for testing).
    pub fn in_memory() -> Result<Self, TagStoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, TagStoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl TagStore for SqliteTagStore {
    fn get(&self, url: &Url) -> Result<Option<String>, TagStoreError> {
        let conn = self.conn.lock();
        let tag = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [tag_key(url)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(tag)
    }

    fn set(&self, tag: Option<&str>, url: &Url) -> Result<(), TagStoreError> {
        let conn = self.conn.lock();
        let key = tag_key(url);
        match tag {
            Some(tag) => {
                conn.execute(
                    "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
                    (&key, tag),
                )?;
            }
            None => {
                conn.execute("DELETE FROM preferences WHERE key = ?1", [&key])?;
            }
        }
        Ok(())
    }
}

/// Process-local tag store.
#[derive(Default)]
pub struct MemoryTagStore {
    tags: Mutex<HashMap<String, String>>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tags.
    pub fn len(&self) -> usize {
        self.tags.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.lock().is_empty()
    }
}

impl TagStore for MemoryTagStore {
    fn get(&self, url: &Url) -> Result<Option<String>, TagStoreError> {
        Ok(self.tags.lock().get(&tag_key(url)).cloned())
    }

    fn set(&self, tag: Option<&str>, url: &Url) -> Result<(), TagStoreError> {
        let mut tags = self.tags.lock();
        match tag {
            Some(tag) => {
                tags.insert(tag_key(url), tag.to_string());
            }
            None => {
                tags.remove(&tag_key(url));
            }
        }
        Ok(())
    }
}

/// Tag store error types.
#[derive(Debug, Error)]
pub enum TagStoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
