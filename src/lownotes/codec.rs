//! # Note Key Codec
//!
//! A note is filed in the key-value store under a single string key built
//! from its creation timestamp and title:
//!
//! ```text
//! note_{created_at}_{title}  ->  content
//! ```
//!
//! The title is inserted verbatim, with no escaping. Decoding strips the
//! `note_` prefix and splits the rest on the *first* `_`. Since the
//! timestamp is a decimal integer it never contains `_`, so titles that do
//! contain `_` still decode to themselves:
//!
//! ```text
//! note_2000_my_list  ->  ("my_list", 2000)
//! ```
//!
//! Keys that don't fit the pattern are not errors. They are skipped during
//! [`enumerate`] and only show up in debug logs.
//!
//! Creating a note also writes two lookup entries, [`timestamp_key`] and
//! [`title_key`]. Enumeration ignores them.

use crate::model::NoteRef;
use crate::store::StoredValue;
use std::collections::BTreeMap;

pub const NOTE_PREFIX: &str = "note_";
pub const DELIMITER: char = '_';

const TIMESTAMP_PREFIX: &str = "timestamp_";
const TITLE_PREFIX: &str = "title_";

/// Encodes a note's title and creation time into its storage key.
pub fn encode(title: &str, created_at: i64) -> String {
    format!("{}{}{}{}", NOTE_PREFIX, created_at, DELIMITER, title)
}

/// Decodes a storage key back into the note it names.
///
/// Returns `None` for anything that isn't a note key. The returned note
/// remembers `key` verbatim, even when its timestamp isn't written the way
/// [`encode`] would write it.
pub fn decode(key: &str) -> Option<NoteRef> {
    let rest = key.strip_prefix(NOTE_PREFIX)?;
    let (timestamp, title) = rest.split_once(DELIMITER)?;
    let created_at = timestamp.parse::<i64>().ok()?;
    Some(NoteRef::with_key(title, created_at, key))
}

/// Lookup entry mapping a title to its latest creation time.
pub fn timestamp_key(title: &str) -> String {
    format!("{}{}", TIMESTAMP_PREFIX, title)
}

/// Lookup entry mapping a creation time to its title.
pub fn title_key(created_at: i64) -> String {
    format!("{}{}", TITLE_PREFIX, created_at)
}

/// Lists every note in a store snapshot, newest first.
///
/// Only text-valued entries whose key decodes are included. The sort is
/// stable, so notes sharing a timestamp keep key order.
pub fn enumerate(entries: &BTreeMap<String, StoredValue>) -> Vec<NoteRef> {
    let mut notes: Vec<NoteRef> = entries
        .iter()
        .filter(|(key, value)| {
            if value.as_text().is_none() {
                if key.starts_with(NOTE_PREFIX) {
                    tracing::debug!(key = %key, "skipping note key with non-text value");
                }
                return false;
            }
            true
        })
        .filter_map(|(key, _)| {
            let decoded = decode(key);
            if decoded.is_none() && key.starts_with(NOTE_PREFIX) {
                tracing::debug!(key = %key, "skipping malformed note key");
            }
            decoded
        })
        .collect();

    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::KeyValueStore;

    fn entries(pairs: &[(&str, StoredValue)]) -> BTreeMap<String, StoredValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn encodes_timestamp_then_title() {
        assert_eq!(encode("Todo", 2000), "note_2000_Todo");
    }

    #[test]
    fn decodes_simple_key() {
        assert_eq!(decode("note_2000_Todo"), Some(NoteRef::new("Todo", 2000)));
    }

    #[test]
    fn rejects_keys_without_prefix() {
        assert_eq!(decode("garbage_key"), None);
        assert_eq!(decode("2000_Todo"), None);
        assert_eq!(decode("Note_2000_Todo"), None);
        assert_eq!(decode(""), None);
    }

    #[test]
    fn rejects_missing_delimiter() {
        assert_eq!(decode("note_2000"), None);
        assert_eq!(decode("note_"), None);
    }

    #[test]
    fn rejects_non_numeric_timestamp() {
        assert_eq!(decode("note_abc_Todo"), None);
        assert_eq!(decode("note__Todo"), None);
        assert_eq!(decode("note_12x_Todo"), None);
    }

    #[test]
    fn title_may_contain_delimiter() {
        let key = encode("my_list_2024", 1234);
        assert_eq!(key, "note_1234_my_list_2024");
        assert_eq!(decode(&key), Some(NoteRef::new("my_list_2024", 1234)));
    }

    #[test]
    fn title_may_look_numeric() {
        let key = encode("99_problems", 5);
        assert_eq!(decode(&key), Some(NoteRef::new("99_problems", 5)));
    }

    #[test]
    fn roundtrips_assorted_titles() {
        let titles = ["Todo", "", "with space", "ünïcödé", "_leading", "trailing_", "a_b_c"];
        for (i, title) in titles.iter().enumerate() {
            let ts = 1_700_000_000_000 + i as i64;
            assert_eq!(
                decode(&encode(title, ts)),
                Some(NoteRef::new(*title, ts)),
                "title {:?}",
                title
            );
        }
    }

    #[test]
    fn non_canonical_timestamps_keep_their_key() {
        let note = decode("note_0007_Legacy").unwrap();
        assert_eq!((note.title.as_str(), note.created_at), ("Legacy", 7));
        assert_eq!(note.key, "note_0007_Legacy");

        let note = decode("note_+9_Plus").unwrap();
        assert_eq!(note.created_at, 9);
        assert_eq!(note.key, "note_+9_Plus");
    }

    #[test]
    fn negative_timestamps_roundtrip() {
        assert_eq!(decode(&encode("old", -5)), Some(NoteRef::new("old", -5)));
    }

    #[test]
    fn enumerates_newest_first() {
        let store = entries(&[
            ("note_1000_Shopping", StoredValue::from("milk, eggs")),
            ("note_2000_Todo", StoredValue::from("call mom")),
        ]);
        assert_eq!(
            enumerate(&store),
            vec![NoteRef::new("Todo", 2000), NoteRef::new("Shopping", 1000)]
        );
    }

    #[test]
    fn enumeration_skips_foreign_and_malformed_keys() {
        let store = entries(&[
            ("note_1000_Shopping", StoredValue::from("milk, eggs")),
            ("garbage_key", StoredValue::from("x")),
            ("note_oops_Title", StoredValue::from("x")),
            ("timestamp_Shopping", StoredValue::from(1000)),
            ("title_1000", StoredValue::from("Shopping")),
            ("1700000000000", StoredValue::from("untitled quick note")),
        ]);
        assert_eq!(enumerate(&store), vec![NoteRef::new("Shopping", 1000)]);
    }

    #[test]
    fn enumeration_skips_integer_values() {
        let store = entries(&[("note_1000_Count", StoredValue::from(3))]);
        assert!(enumerate(&store).is_empty());
    }

    #[test]
    fn enumeration_returns_every_well_formed_note() {
        let fixture = StoreFixture::new().with_notes(25, 10_000);
        let notes = enumerate(&fixture.store.all().unwrap());

        assert_eq!(notes.len(), 25);
        assert!(notes
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(notes[0].title, "Note 25");
    }

    #[test]
    fn timestamp_ties_keep_key_order() {
        let store = entries(&[
            ("note_1000_B", StoredValue::from("")),
            ("note_1000_A", StoredValue::from("")),
            ("note_2000_C", StoredValue::from("")),
        ]);
        let titles: Vec<_> = enumerate(&store).into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn lookup_keys() {
        assert_eq!(timestamp_key("Todo"), "timestamp_Todo");
        assert_eq!(title_key(2000), "title_2000");
        assert_eq!(decode(&timestamp_key("Todo")), None);
        assert_eq!(decode(&title_key(2000)), None);
    }
}
