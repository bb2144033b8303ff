use crate::codec;
use crate::commands::{normalize_title, CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::model::{Note, NoteRef};
use crate::store::{Change, KeyValueStore};

/// Saves new title and content for an existing note, keeping its creation time.
///
/// The note is written under its canonical key. If that differs from the key
/// it was found under (a new title, or a timestamp spelled differently), the
/// old key is removed so the note isn't listed twice, and so is the old
/// title's lookup entry when it still points at this note. Everything goes
/// to the store as one batch, with the old key removed last.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    target: &NoteRef,
    title: &str,
    content: String,
) -> Result<CmdResult> {
    let title = normalize_title(title)?;

    if store.get(&target.key)?.is_none() {
        return Err(NotesError::NoteNotFound {
            title: target.title.clone(),
            created_at: target.created_at,
        });
    }

    let new_key = codec::encode(&title, target.created_at);
    let mut changes = Vec::new();

    if new_key != target.key {
        let old_lookup = codec::timestamp_key(&target.title);
        if title != target.title
            && store.get(&old_lookup)?.and_then(|v| v.as_integer()) == Some(target.created_at)
        {
            changes.push(Change::remove(old_lookup));
        }
        changes.push(Change::put(codec::timestamp_key(&title), target.created_at));
        changes.push(Change::put(codec::title_key(target.created_at), title.clone()));
    }
    changes.push(Change::put(new_key.clone(), content.clone()));
    if new_key != target.key {
        changes.push(Change::remove(target.key.clone()));
    }

    store.apply(changes)?;

    if title != target.title {
        tracing::info!(from = %target.title, to = %title, created_at = target.created_at, "note renamed");
    } else {
        tracing::info!(title = %title, created_at = target.created_at, "note updated");
    }

    let mut result = CmdResult::default().with_affected_notes(vec![Note::new(
        title,
        target.created_at,
        content,
    )]);
    result.add_message(CmdMessage::success("Note saved successfully"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, list, view};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::store::StoredValue;
    use std::collections::BTreeMap;

    /// Counts single writes and batches separately.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryStore,
        single_writes: usize,
        batches: usize,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<StoredValue>> {
            self.inner.get(key)
        }

        fn put(&mut self, key: &str, value: StoredValue) -> Result<()> {
            self.single_writes += 1;
            self.inner.put(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<bool> {
            self.single_writes += 1;
            self.inner.remove(key)
        }

        fn all(&self) -> Result<BTreeMap<String, StoredValue>> {
            self.inner.all()
        }

        fn apply(&mut self, changes: Vec<Change>) -> Result<()> {
            self.batches += 1;
            self.inner.apply(changes)
        }
    }

    #[test]
    fn updates_content_in_place() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, "Todo", "old".into(), 2000).unwrap();

        run(&mut store, &NoteRef::new("Todo", 2000), "Todo", "new".into()).unwrap();

        let note = view::load_note(&store, &NoteRef::new("Todo", 2000)).unwrap();
        assert_eq!(note.content, "new");
        assert_eq!(list::listed_notes(&store).unwrap().len(), 1);
    }

    #[test]
    fn rename_keeps_timestamp_and_drops_old_key() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, "Todo", "call mom".into(), 2000).unwrap();

        run(&mut store, &NoteRef::new("Todo", 2000), "Calls", "call mom".into()).unwrap();

        let listed = list::listed_notes(&store).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].note, NoteRef::new("Calls", 2000));
        assert_eq!(store.get("note_2000_Todo").unwrap(), None);
        assert_eq!(store.get("timestamp_Todo").unwrap(), None);
        assert_eq!(
            store.get("timestamp_Calls").unwrap(),
            Some(StoredValue::Integer(2000))
        );
        assert_eq!(
            store.get("title_2000").unwrap(),
            Some(StoredValue::Text("Calls".into()))
        );
    }

    #[test]
    fn rename_keeps_lookup_owned_by_newer_note() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, "Todo", "".into(), 1000).unwrap();
        create::run(&mut store, "Todo", "".into(), 2000).unwrap();

        run(&mut store, &NoteRef::new("Todo", 1000), "Older", "".into()).unwrap();

        assert_eq!(
            store.get("timestamp_Todo").unwrap(),
            Some(StoredValue::Integer(2000))
        );
    }

    #[test]
    fn rename_is_written_as_one_batch() {
        let mut store = CountingStore::default();
        create::run(&mut store.inner, "Todo", "call mom".into(), 2000).unwrap();

        run(&mut store, &NoteRef::new("Todo", 2000), "Calls", "call dad".into()).unwrap();

        assert_eq!(store.batches, 1);
        assert_eq!(store.single_writes, 0);
        let listed = list::listed_notes(&store).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].note.title, "Calls");
    }

    #[test]
    fn updates_note_with_padded_timestamp() {
        let fixture = StoreFixture::new().with_entry("note_0007_Legacy", StoredValue::from("old"));
        let mut store = fixture.store;
        let target = list::listed_notes(&store).unwrap()[0].note.clone();
        assert_eq!(target.key, "note_0007_Legacy");

        run(&mut store, &target, "Legacy", "new".into()).unwrap();

        assert_eq!(store.get("note_0007_Legacy").unwrap(), None);
        assert_eq!(
            store.get("note_7_Legacy").unwrap(),
            Some(StoredValue::Text("new".into()))
        );
        let listed = list::listed_notes(&store).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].note, NoteRef::new("Legacy", 7));
    }

    #[test]
    fn renames_note_with_padded_timestamp() {
        let fixture = StoreFixture::new().with_entry("note_0007_Legacy", StoredValue::from("old"));
        let mut store = fixture.store;
        let target = list::listed_notes(&store).unwrap()[0].note.clone();

        run(&mut store, &target, "Renamed", "old".into()).unwrap();

        let keys: Vec<_> = store
            .all()
            .unwrap()
            .into_keys()
            .filter(|k| k.starts_with("note_"))
            .collect();
        assert_eq!(keys, vec!["note_7_Renamed".to_string()]);
    }

    #[test]
    fn rejects_empty_title() {
        let mut store = InMemoryStore::new();
        create::run(&mut store, "Todo", "x".into(), 1).unwrap();

        let err = run(&mut store, &NoteRef::new("Todo", 1), " ", "y".into()).unwrap_err();
        assert!(matches!(err, NotesError::EmptyTitle));
        let note = view::load_note(&store, &NoteRef::new("Todo", 1)).unwrap();
        assert_eq!(note.content, "x");
    }

    #[test]
    fn missing_note_is_an_error() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, &NoteRef::new("Nope", 1), "Nope", "".into()).unwrap_err();
        assert!(matches!(err, NotesError::NoteNotFound { .. }));
        assert!(store.is_empty());
    }
}
