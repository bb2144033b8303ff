//! # API Facade
//!
//! The single entry point for note operations, whatever the UI. It
//! dispatches to the command layer, turns raw user selectors ("2",
//! "shopping list") into notes, and stamps new notes with the current time.
//! It does no printing and holds no business rules of its own.
//!
//! `NotesApi<S: KeyValueStore>` is generic over storage:
//! - Production: `NotesApi<FileStore>`
//! - Testing: `NotesApi<InMemoryStore>`

use crate::commands;
use crate::config::NotesConfig;
use crate::error::{NotesError, Result};
use crate::export::{DestinationPicker, ExportFormat};
use crate::index::{parse_selectors, DisplayNote};
use crate::model::{now_millis, Note, NoteRef};
use crate::store::KeyValueStore;

/// The main API facade for note operations.
pub struct NotesApi<S: KeyValueStore> {
    store: S,
    paths: commands::NotesPaths,
}

impl<S: KeyValueStore> NotesApi<S> {
    pub fn new(store: S, paths: commands::NotesPaths) -> Self {
        Self { store, paths }
    }

    /// Saves a new note stamped with the current time.
    pub fn create_note(&mut self, title: &str, content: String) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, title, content, now_millis())
    }

    pub fn list_notes(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_notes<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs);
        commands::view::run(&self.store, &selectors)
    }

    /// Resolves user input to exactly one note.
    pub fn resolve_note<I: AsRef<str>>(&self, inputs: &[I]) -> Result<DisplayNote> {
        let selectors = parse_selectors(inputs);
        if selectors.len() != 1 {
            return Err(NotesError::Api(
                "Select exactly one note for this command".to_string(),
            ));
        }
        let listed = commands::list::listed_notes(&self.store)?;
        let mut resolved = commands::resolve_selectors(&listed, &selectors)?;
        resolved
            .pop()
            .ok_or_else(|| NotesError::Api("No note selected".to_string()))
    }

    pub fn load_note(&self, note: &NoteRef) -> Result<Note> {
        commands::view::load_note(&self.store, note)
    }

    pub fn update_note(
        &mut self,
        target: &NoteRef,
        title: &str,
        content: String,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, target, title, content)
    }

    /// Exports the selected note's content through `picker`.
    pub fn export_note<I: AsRef<str>, P: DestinationPicker + ?Sized>(
        &self,
        inputs: &[I],
        format: ExportFormat,
        picker: &mut P,
    ) -> Result<commands::CmdResult> {
        let selected = self.resolve_note(inputs)?;
        let note = self.load_note(&selected.note)?;
        commands::export::run(&note.content, format, picker)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn load_config(&self) -> Result<NotesConfig> {
        NotesConfig::load(&self.paths.data_dir)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, NotesPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Destination;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;

    fn api_with(store: InMemoryStore) -> NotesApi<InMemoryStore> {
        NotesApi::new(store, NotesPaths::new(PathBuf::from("/nonexistent")))
    }

    fn sample() -> NotesApi<InMemoryStore> {
        let fixture = StoreFixture::new()
            .with_note("Shopping", 1000, "milk, eggs")
            .with_note("Todo", 2000, "call mom");
        api_with(fixture.store)
    }

    struct CancelPicker;

    impl DestinationPicker for CancelPicker {
        fn pick(&mut self, _suggested_name: &str) -> Result<Option<Destination>> {
            Ok(None)
        }
    }

    #[test]
    fn create_stamps_current_time() {
        let mut api = api_with(InMemoryStore::new());
        let before = now_millis();
        let result = api.create_note("Todo", "call mom".into()).unwrap();
        let after = now_millis();

        let created = result.affected_notes[0].created_at;
        assert!(before <= created && created <= after);
        assert_eq!(api.list_notes().unwrap().listed_notes.len(), 1);
    }

    #[test]
    fn create_rejects_empty_title() {
        let mut api = api_with(InMemoryStore::new());
        assert!(matches!(
            api.create_note("", "x".into()),
            Err(NotesError::EmptyTitle)
        ));
        assert!(api.store().is_empty());
    }

    #[test]
    fn view_dispatches_selectors() {
        let api = sample();
        let result = api.view_notes(&["Shopping"]).unwrap();
        assert_eq!(result.affected_notes[0].content, "milk, eggs");

        let result = api.view_notes(&["1", "2"]).unwrap();
        assert_eq!(result.affected_notes.len(), 2);
    }

    #[test]
    fn resolve_requires_a_single_note() {
        let api = sample();
        assert!(api.resolve_note(&["1", "2"]).is_err());
        assert_eq!(api.resolve_note(&["2"]).unwrap().note.title, "Shopping");
    }

    #[test]
    fn update_goes_through_resolved_note() {
        let mut api = sample();
        let target = api.resolve_note(&["Todo"]).unwrap().note;
        api.update_note(&target, "Todo", "call dad".into()).unwrap();
        assert_eq!(api.load_note(&target).unwrap().content, "call dad");
    }

    #[test]
    fn export_resolves_before_picking() {
        let api = sample();
        assert!(api
            .export_note(&["99"], ExportFormat::Text, &mut CancelPicker)
            .is_err());

        let result = api
            .export_note(&["1"], ExportFormat::Text, &mut CancelPicker)
            .unwrap();
        assert!(result.exported_to.is_none());
    }
}
