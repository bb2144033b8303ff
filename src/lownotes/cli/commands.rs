//! # CLI Layer
//!
//! One possible client of [`NotesApi`]. This is the only place that reads
//! the environment, talks to the terminal and decides exit codes.
//!
//! - `run()`: parses arguments, sets up logging and the store, dispatches
//! - `handle_*()`: one per subcommand, calls the API and prints the result
//!
//! Output formatting lives in `render.rs`.

use super::render::{
    eprint_messages, print_config, print_full_notes, print_messages, print_notes,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use lownotes::api::{CmdResult, ConfigAction, NotesApi, NotesPaths};
use lownotes::editor::{edit_content, EditorContent};
use lownotes::error::{NotesError, Result};
use lownotes::export::{ExportFormat, FsDestinationPicker, STDOUT_MARKER};
use lownotes::store::fs::FileStore;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "LOWNOTES_HOME";
const LOG_ENV: &str = "LOWNOTES_LOG";

struct AppContext {
    api: NotesApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;

    let result = match cli.command {
        Some(Commands::Create {
            title,
            content,
            no_editor,
        }) => handle_create(&mut ctx, title, content, no_editor),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::View { selectors }) => handle_view(&ctx, selectors),
        Some(Commands::Edit {
            selectors,
            title,
            content,
        }) => handle_edit(&mut ctx, selectors, title, content),
        Some(Commands::Export {
            selectors,
            format,
            output,
        }) => handle_export(&ctx, selectors, format, output),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }?;

    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

/// Logs go to stderr. `--verbose` forces debug, otherwise `LOWNOTES_LOG`
/// is read as an `EnvFilter` directive, defaulting to `warn`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    ProjectDirs::from("com", "normanfr", "lownotes")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            NotesError::Api(format!(
                "Could not determine a data directory; set ${}",
                HOME_ENV
            ))
        })
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    tracing::debug!(data_dir = %data_dir.display(), "opening note store");

    let store = FileStore::new(data_dir.clone());
    Ok(AppContext {
        api: NotesApi::new(store, NotesPaths::new(data_dir)),
    })
}

fn read_piped_stdin() -> Option<String> {
    if std::io::stdin().is_terminal() {
        return None;
    }
    let mut buffer = String::new();
    match std::io::stdin().read_to_string(&mut buffer) {
        Ok(_) if !buffer.trim().is_empty() => Some(buffer),
        _ => None,
    }
}

fn handle_create(
    ctx: &mut AppContext,
    title: String,
    content: Vec<String>,
    no_editor: bool,
) -> Result<CmdResult> {
    // Checked up front so a blank title never opens the editor.
    if title.trim().is_empty() {
        return Err(NotesError::EmptyTitle);
    }

    let (title, body) = if !content.is_empty() {
        (title, content.join(" "))
    } else if no_editor {
        (title, String::new())
    } else if let Some(piped) = read_piped_stdin() {
        (title, piped.trim_end().to_string())
    } else {
        let edited = edit_content(&EditorContent::new(title, String::new()))?;
        (edited.title, edited.content)
    };

    let result = ctx.api.create_note(&title, body)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_list(ctx: &AppContext) -> Result<CmdResult> {
    let result = ctx.api.list_notes()?;
    print_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(result)
}

fn handle_view(ctx: &AppContext, selectors: Vec<String>) -> Result<CmdResult> {
    let result = ctx.api.view_notes(&selectors)?;
    print_full_notes(&result.listed_notes, &result.affected_notes);
    print_messages(&result.messages);
    Ok(result)
}

fn handle_edit(
    ctx: &mut AppContext,
    selectors: Vec<String>,
    title: Option<String>,
    content: Option<String>,
) -> Result<CmdResult> {
    let selected = ctx.api.resolve_note(&selectors)?;
    let note = ctx.api.load_note(&selected.note)?;

    let (new_title, new_content) = if title.is_some() || content.is_some() {
        (
            title.unwrap_or_else(|| note.title.clone()),
            content.unwrap_or_else(|| note.content.clone()),
        )
    } else {
        let edited = edit_content(&EditorContent::new(
            note.title.clone(),
            note.content.clone(),
        ))?;
        (edited.title, edited.content)
    };

    let result = ctx
        .api
        .update_note(&selected.note, &new_title, new_content)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_export(
    ctx: &AppContext,
    selectors: Vec<String>,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> Result<CmdResult> {
    let config = ctx.api.load_config()?;
    let to_stdout = output
        .as_ref()
        .is_some_and(|p| p.as_os_str() == STDOUT_MARKER);

    let format = format
        .or_else(|| {
            output
                .as_ref()
                .filter(|_| !to_stdout)
                .map(|p| ExportFormat::from_file_name(&p.to_string_lossy()))
        })
        .unwrap_or(config.export_format);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut picker = FsDestinationPicker::new(output, config.export_dir_or(&cwd));

    let result = ctx.api.export_note(&selectors, format, &mut picker)?;
    if to_stdout {
        eprint_messages(&result.messages);
    } else {
        print_messages(&result.messages);
    }
    Ok(result)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<CmdResult> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(result)
}
