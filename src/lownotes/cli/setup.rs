use clap::{Parser, Subcommand};
use lownotes::export::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lownotes", bin_name = "lownotes", version)]
#[command(about = "Keep short text notes and export them as text, PDF or DOCX", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "n")]
    Create {
        /// Title of the note
        title: String,

        /// Content of the note (opens the editor if omitted)
        #[arg(num_args = 0..)]
        content: Vec<String>,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// List notes, newest first
    #[command(alias = "ls")]
    List,

    /// View one or more notes
    #[command(alias = "v")]
    View {
        /// Indexes (e.g. 1 3) or a title
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Edit a note in the editor, or set its title/content directly
    #[command(alias = "e")]
    Edit {
        /// Index or title of the note
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// New title (skips the editor)
        #[arg(long)]
        title: Option<String>,

        /// New content (skips the editor)
        #[arg(long)]
        content: Option<String>,
    },

    /// Export a note as text, PDF or DOCX
    Export {
        /// Index or title of the note
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Output format: text, pdf or docx
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Output file ("-" for stdout); defaults to note.<ext> in the export dir
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (export-format, export-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
