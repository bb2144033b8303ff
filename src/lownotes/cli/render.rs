use chrono::{Local, Utc};
use colored::Colorize;
use lownotes::api::{CmdMessage, MessageLevel};
use lownotes::config::NotesConfig;
use lownotes::index::DisplayNote;
use lownotes::model::{Note, NoteRef};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const DATE_WIDTH: usize = 19;
const TIME_WIDTH: usize = 16;
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", colorize(message));
    }
}

/// Same as [`print_messages`], for commands whose stdout is the payload.
pub(super) fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", colorize(message));
    }
}

fn colorize(message: &CmdMessage) -> colored::ColoredString {
    match message.level {
        MessageLevel::Info => message.content.dimmed(),
        MessageLevel::Success => message.content.green(),
        MessageLevel::Error => message.content.red(),
    }
}

pub(super) fn print_notes(notes: &[DisplayNote]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for dn in notes {
        let idx_str = format!("{:>3}. ", dn.index);
        let date = format_date(&dn.note);
        let ago = format_time_ago(&dn.note);

        let fixed_width = idx_str.width() + DATE_WIDTH + TIME_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&dn.note.title, available);
        let padding = available.saturating_sub(title.width());

        println!(
            "{}{}{}  {}{}",
            idx_str.yellow(),
            title,
            " ".repeat(padding),
            date.dimmed(),
            ago.dimmed()
        );
    }
}

pub(super) fn print_full_notes(listed: &[DisplayNote], notes: &[Note]) {
    for (i, (dn, note)) in listed.iter().zip(notes).enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {}  {}",
            format!("{}.", dn.index).yellow(),
            note.title.bold(),
            format_date(&dn.note).dimmed()
        );
        println!("--------------------------------");
        println!("{}", note.content);
    }
}

pub(super) fn print_config(config: &NotesConfig) {
    for key in NotesConfig::keys() {
        println!("{} = {}", key, config.get(key).unwrap_or_default());
    }
}

fn format_date(note: &NoteRef) -> String {
    match note.created_at_utc() {
        Some(dt) => dt.with_timezone(&Local).format(DATE_FORMAT).to_string(),
        None => format!("{:>width$}", "?", width = DATE_WIDTH),
    }
}

fn format_time_ago(note: &NoteRef) -> String {
    let Some(created) = note.created_at_utc() else {
        return String::new();
    };
    let duration = Utc::now().signed_duration_since(created);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
