use crate::codec;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{index_notes, DisplayNote};
use crate::store::KeyValueStore;

/// Every note in the store, newest first, with display indexes.
pub fn listed_notes<S: KeyValueStore>(store: &S) -> Result<Vec<DisplayNote>> {
    let entries = store.all()?;
    Ok(index_notes(codec::enumerate(&entries)))
}

pub fn run<S: KeyValueStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_notes(listed_notes(store)?))
}
