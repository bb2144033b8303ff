use crate::codec;
use crate::commands::{normalize_title, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Note;
use crate::store::{Change, KeyValueStore};

/// Saves a new note created at `created_at` (milliseconds since epoch).
///
/// The title is trimmed and must not be empty; nothing is written otherwise.
/// Saving the same title twice in the same millisecond overwrites the first.
pub fn run<S: KeyValueStore>(
    store: &mut S,
    title: &str,
    content: String,
    created_at: i64,
) -> Result<CmdResult> {
    let title = normalize_title(title)?;

    store.apply(vec![
        Change::put(codec::encode(&title, created_at), content.clone()),
        Change::put(codec::timestamp_key(&title), created_at),
        Change::put(codec::title_key(created_at), title.clone()),
    ])?;

    tracing::info!(title = %title, created_at, "note created");

    let mut result =
        CmdResult::default().with_affected_notes(vec![Note::new(title, created_at, content)]);
    result.add_message(CmdMessage::success("Note saved successfully"));
    Ok(result)
}
