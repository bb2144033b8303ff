//! # Storage Layer
//!
//! Notes live in a flat key-value store: a mapping from string keys to small
//! values, scoped to the application and surviving restarts. There is no
//! schema and no transactions. The [`KeyValueStore`] trait is the only
//! contract the rest of the crate has with persistence, and it is injected
//! into whatever needs it (see [`crate::api::NotesApi`]).
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage
//!   - The whole store is a single JSON object in `notes.json`
//!   - Writes replace the file atomically (temp file + rename)
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!   - No persistence
//!   - Ordered, so listings in tests are deterministic
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── notes.json      # {"note_1000_Shopping": "milk, eggs", "timestamp_Shopping": 1000, ...}
//! └── config.json     # NotesConfig
//! ```
//!
//! How note titles and timestamps become keys is the business of
//! [`crate::codec`]; the store never interprets keys.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod fs;
pub mod memory;

/// A value held under a store key.
///
/// Serialized untagged, so the on-disk document is a plain JSON object of
/// strings and integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Integer(i64),
    Text(String),
}

impl StoredValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoredValue::Text(s) => Some(s),
            StoredValue::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            StoredValue::Integer(n) => Some(*n),
            StoredValue::Text(_) => None,
        }
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Integer(value)
    }
}

/// One write in a batch passed to [`KeyValueStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Put(String, StoredValue),
    Remove(String),
}

impl Change {
    pub fn put(key: impl Into<String>, value: impl Into<StoredValue>) -> Self {
        Change::Put(key.into(), value.into())
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Change::Remove(key.into())
    }
}

/// Abstract interface for the key-value store.
pub trait KeyValueStore {
    /// Get the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<StoredValue>>;

    /// Store `value` under `key`, replacing whatever was there
    fn put(&mut self, key: &str, value: StoredValue) -> Result<()>;

    /// Remove `key`. Returns whether it was present.
    fn remove(&mut self, key: &str) -> Result<bool>;

    /// Snapshot of every entry, ordered by key
    fn all(&self) -> Result<BTreeMap<String, StoredValue>>;

    /// Applies `changes` in order.
    ///
    /// The default writes them one at a time. Stores that can persist a
    /// batch in a single write override it, so a failure leaves either all
    /// of the batch or none of it.
    fn apply(&mut self, changes: Vec<Change>) -> Result<()> {
        for change in changes {
            match change {
                Change::Put(key, value) => self.put(&key, value)?,
                Change::Remove(key) => {
                    self.remove(&key)?;
                }
            }
        }
        Ok(())
    }
}

/// Applies a batch to an in-memory snapshot.
pub(crate) fn apply_to_map(entries: &mut BTreeMap<String, StoredValue>, changes: Vec<Change>) {
    for change in changes {
        match change {
            Change::Put(key, value) => {
                entries.insert(key, value);
            }
            Change::Remove(key) => {
                entries.remove(&key);
            }
        }
    }
}
