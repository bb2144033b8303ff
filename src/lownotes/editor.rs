use crate::error::{NotesError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// A note as laid out in an editor buffer: the first line is the title,
/// then a blank line, then the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub content: String,
}

impl EditorContent {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }

    pub fn to_buffer(&self) -> String {
        format!("{}\n\n{}", self.title, self.content)
    }

    /// Parses an editor buffer back into title and body.
    /// A missing blank separator line is tolerated.
    pub fn from_buffer(buffer: &str) -> Self {
        let buffer = buffer.trim_start_matches(['\n', '\r']);
        let (title, rest) = buffer.split_once('\n').unwrap_or((buffer, ""));
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);

        Self {
            title: title.trim().to_string(),
            content: rest.trim_end().to_string(),
        }
    }
}

fn get_editor() -> Result<String> {
    for var in ["LOWNOTES_EDITOR", "EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(NotesError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();
    tracing::debug!(editor = %editor, path = %path.display(), "launching editor");

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| NotesError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(NotesError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(NotesError::Io)
}

/// Opens an editor on `initial` and returns what the user saved.
pub fn edit_content(initial: &EditorContent) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!("lownotes_edit_{}.txt", std::process::id()));

    fs::write(&temp_file, initial.to_buffer()).map_err(NotesError::Io)?;
    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&result?))
}
