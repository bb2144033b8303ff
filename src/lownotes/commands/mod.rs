use crate::config::NotesConfig;
use crate::error::{NotesError, Result};
use crate::index::{self, DisplayNote, NoteSelector};
use crate::model::Note;
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod export;
pub mod list;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub struct NotesPaths {
    pub data_dir: PathBuf,
}

impl NotesPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<DisplayNote>,
    pub config: Option<NotesConfig>,
    pub exported_to: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_config(mut self, config: NotesConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// Resolves selectors against the current listing, in selector order.
pub fn resolve_selectors(
    listed: &[DisplayNote],
    selectors: &[NoteSelector],
) -> Result<Vec<DisplayNote>> {
    selectors
        .iter()
        .map(|selector| {
            index::find(listed, selector)
                .cloned()
                .ok_or_else(|| NotesError::Api(format!("No note matches {}", selector)))
        })
        .collect()
}

/// Trims a title and rejects it if nothing is left.
pub(crate) fn normalize_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(NotesError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
