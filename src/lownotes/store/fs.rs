use super::{apply_to_map, Change, KeyValueStore, StoredValue};
use crate::error::{NotesError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

const STORE_FILENAME: &str = "notes.json";

/// File-backed key-value store: one JSON object in `<root>/notes.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(STORE_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotesError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, StoredValue>> {
        let path = self.path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(NotesError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let entries: BTreeMap<String, StoredValue> =
            serde_json::from_str(&content).map_err(NotesError::Serialization)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded store");
        Ok(entries)
    }

    fn save(&self, entries: &BTreeMap<String, StoredValue>) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path();
        let content = serde_json::to_string_pretty(entries).map_err(NotesError::Serialization)?;

        // Atomic write
        let tmp_path = self
            .root
            .join(format!(".notes-{}.tmp", std::process::id()));
        fs::write(&tmp_path, content).map_err(NotesError::Io)?;
        fs::rename(&tmp_path, &path).map_err(NotesError::Io)?;

        tracing::debug!(path = %path.display(), entries = entries.len(), "saved store");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>> {
        Ok(self.load()?.remove(key))
    }

    fn put(&mut self, key: &str, value: StoredValue) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value);
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }

    fn all(&self) -> Result<BTreeMap<String, StoredValue>> {
        self.load()
    }

    /// One load and one atomic save for the whole batch.
    fn apply(&mut self, changes: Vec<Change>) -> Result<()> {
        let mut entries = self.load()?;
        apply_to_map(&mut entries, changes);
        self.save(&entries)
    }
}
