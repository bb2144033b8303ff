use crate::commands::{list, resolve_selectors, CmdResult};
use crate::error::{NotesError, Result};
use crate::index::NoteSelector;
use crate::model::{Note, NoteRef};
use crate::store::KeyValueStore;

/// Loads a single note's content from the key it was listed under.
pub fn load_note<S: KeyValueStore>(store: &S, note: &NoteRef) -> Result<Note> {
    let not_found = || NotesError::NoteNotFound {
        title: note.title.clone(),
        created_at: note.created_at,
    };

    let value = store.get(&note.key)?.ok_or_else(not_found)?;
    let content = value.as_text().ok_or_else(not_found)?.to_string();

    Ok(Note::new(note.title.clone(), note.created_at, content))
}

pub fn run<S: KeyValueStore>(store: &S, selectors: &[NoteSelector]) -> Result<CmdResult> {
    let listed = list::listed_notes(store)?;
    let selected = resolve_selectors(&listed, selectors)?;

    let notes = selected
        .iter()
        .map(|dn| load_note(store, &dn.note))
        .collect::<Result<Vec<_>>>()?;

    Ok(CmdResult::default()
        .with_listed_notes(selected)
        .with_affected_notes(notes))
}
