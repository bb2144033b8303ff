use crate::codec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note as it is identified in the store: its title and creation time.
///
/// `created_at` is milliseconds since the Unix epoch. It is assigned once,
/// when the note is first saved, and kept across edits.
///
/// `key` is the storage key the note was found under. It is usually
/// `codec::encode(title, created_at)`, but keys written by other clients
/// may spell the timestamp differently (`note_0007_...`), so lookups go
/// through `key` rather than re-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteRef {
    pub title: String,
    pub created_at: i64,
    pub key: String,
}

impl NoteRef {
    pub fn new(title: impl Into<String>, created_at: i64) -> Self {
        let title = title.into();
        let key = codec::encode(&title, created_at);
        Self {
            title,
            created_at,
            key,
        }
    }

    /// A note found under `key`, which need not be the canonical encoding.
    pub fn with_key(title: impl Into<String>, created_at: i64, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created_at,
            key: key.into(),
        }
    }

    /// Creation time as a UTC datetime, `None` if the timestamp is out of range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub created_at: i64,
    pub content: String,
}

impl Note {
    pub fn new(title: String, created_at: i64, content: String) -> Self {
        Self {
            title,
            created_at,
            content,
        }
    }

    pub fn note_ref(&self) -> NoteRef {
        NoteRef::new(self.title.clone(), self.created_at)
    }
}

/// Current time in the resolution notes are keyed with.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_converts_from_millis() {
        let note = NoteRef::new("Todo", 1_700_000_000_123);
        let dt = note.created_at_utc().unwrap();
        assert_eq!(dt.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn new_uses_canonical_key() {
        assert_eq!(NoteRef::new("Todo", 2000).key, "note_2000_Todo");
        let legacy = NoteRef::with_key("Legacy", 7, "note_0007_Legacy");
        assert_ne!(legacy, NoteRef::new("Legacy", 7));
    }

    #[test]
    fn note_ref_drops_content() {
        let note = Note::new("Todo".into(), 2000, "call mom".into());
        assert_eq!(note.note_ref(), NoteRef::new("Todo", 2000));
    }
}
