//! # Export
//!
//! A note body can be written out as plain text, a PDF, or a Word (DOCX)
//! document. Where it goes is decided by a [`DestinationPicker`]. It gets a
//! suggested file name (`note.txt`, `note.pdf`, `note.docx`) and hands back
//! a writable [`Destination`], or nothing if the user backed out.
//!
//! The writers themselves are thin: [`text`] writes raw bytes, [`pdf`]
//! drives `printpdf`, [`docx`] packages a minimal WordprocessingML document
//! with `zip`.

use crate::error::{NotesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

pub mod docx;
pub mod pdf;
pub mod text;

/// Output path meaning "write to stdout"
pub const STDOUT_MARKER: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    /// File name offered to the destination picker
    pub fn suggested_file_name(&self) -> String {
        format!("note.{}", self.extension())
    }

    /// Picks the format from a destination name. Anything that isn't
    /// `.pdf` or `.docx` is written as plain text.
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            ExportFormat::Pdf
        } else if lower.ends_with(".docx") {
            ExportFormat::Docx
        } else {
            ExportFormat::Text
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            ExportFormat::Text => "File saved successfully",
            ExportFormat::Pdf => "PDF saved successfully",
            ExportFormat::Docx => "DOC saved successfully",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            ExportFormat::Text => "Error saving file",
            ExportFormat::Pdf => "Error saving PDF",
            ExportFormat::Docx => "Error saving DOC",
        }
    }

    /// Writes `content` to `writer` in this format.
    pub fn write<W: Write>(&self, writer: W, content: &str) -> Result<()> {
        match self {
            ExportFormat::Text => text::write(writer, content),
            ExportFormat::Pdf => pdf::write(writer, content),
            ExportFormat::Docx => docx::write(writer, content),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Text => "text",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" | "doc" => Ok(ExportFormat::Docx),
            other => Err(format!(
                "Unknown export format: {} (expected text, pdf or docx)",
                other
            )),
        }
    }
}

/// A writable export target. Dropping it releases the underlying resource.
pub struct Destination {
    pub name: String,
    pub writer: Box<dyn Write>,
}

impl Destination {
    pub fn new(name: impl Into<String>, writer: Box<dyn Write>) -> Self {
        Self {
            name: name.into(),
            writer,
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Provides a destination for an export, given a suggested file name.
///
/// `Ok(None)` means the user cancelled; nothing is written.
pub trait DestinationPicker {
    fn pick(&mut self, suggested_name: &str) -> Result<Option<Destination>>;
}

/// Filesystem picker: an explicit output path, or the suggested name inside
/// a directory. An output of `-` writes to stdout.
#[derive(Debug, Clone)]
pub struct FsDestinationPicker {
    output: Option<PathBuf>,
    dir: PathBuf,
}

impl FsDestinationPicker {
    pub fn new(output: Option<PathBuf>, dir: PathBuf) -> Self {
        Self { output, dir }
    }

    /// Where a pick with this suggested name would write
    pub fn target(&self, suggested_name: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.dir.join(suggested_name))
    }
}

impl DestinationPicker for FsDestinationPicker {
    fn pick(&mut self, suggested_name: &str) -> Result<Option<Destination>> {
        let target = self.target(suggested_name);
        if target.as_os_str() == STDOUT_MARKER {
            return Ok(Some(Destination::new(
                "stdout",
                Box::new(std::io::stdout()),
            )));
        }

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(NotesError::Io)?;
            }
        }
        let file = File::create(&target).map_err(NotesError::Io)?;
        Ok(Some(Destination::new(
            target.display().to_string(),
            Box::new(file),
        )))
    }
}
