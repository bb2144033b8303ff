use super::{apply_to_map, Change, KeyValueStore, StoredValue};
use crate::error::Result;
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: BTreeMap<String, StoredValue>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: StoredValue) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn all(&self) -> Result<BTreeMap<String, StoredValue>> {
        Ok(self.entries.clone())
    }

    fn apply(&mut self, changes: Vec<Change>) -> Result<()> {
        apply_to_map(&mut self.entries, changes);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::codec::encode;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds a note entry directly, bypassing the create command.
        pub fn with_note(mut self, title: &str, created_at: i64, content: &str) -> Self {
            self.store
                .put(&encode(title, created_at), StoredValue::from(content))
                .unwrap();
            self
        }

        /// Adds `count` notes, one second apart, titled "Note 1".."Note N".
        pub fn with_notes(mut self, count: usize, start: i64) -> Self {
            for i in 0..count {
                let title = format!("Note {}", i + 1);
                let content = format!("Content for note {}", i + 1);
                self = self.with_note(&title, start + (i as i64) * 1000, &content);
            }
            self
        }

        /// Adds an arbitrary raw entry.
        pub fn with_entry(mut self, key: &str, value: StoredValue) -> Self {
            self.store.put(key, value).unwrap();
            self
        }
    }
}
