//! # Display Indexes
//!
//! Storage keys are not something a user wants to type. Listings number the
//! notes `1..=N` in enumeration order (newest first), and commands accept
//! either those numbers or a title query.
//!
//! Indexes are positional: creating a note shifts every older note down by
//! one. They are meant for the list you just looked at, not as stable ids.

use crate::model::NoteRef;
use std::fmt;
use std::str::FromStr;

/// A listed note with its 1-based display position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNote {
    pub index: usize,
    pub note: NoteRef,
}

/// A user input selecting a note, either by display index or by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSelector {
    Index(usize),
    Title(String),
}

impl fmt::Display for NoteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteSelector::Index(idx) => write!(f, "{}", idx),
            NoteSelector::Title(t) => write!(f, "\"{}\"", t),
        }
    }
}

impl FromStr for NoteSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<usize>() {
            Ok(0) => Err("Indexes start at 1".to_string()),
            Ok(n) => Ok(NoteSelector::Index(n)),
            Err(_) => Err(format!("Invalid index format: {}", s)),
        }
    }
}

/// Assigns display indexes to an already ordered note list.
pub fn index_notes(notes: Vec<NoteRef>) -> Vec<DisplayNote> {
    notes
        .into_iter()
        .enumerate()
        .map(|(i, note)| DisplayNote { index: i + 1, note })
        .collect()
}

/// Turns raw user arguments into selectors.
///
/// If every argument is an index they are all indexes. Otherwise the
/// arguments are joined with spaces into one title query, so
/// `view shopping list` finds the note titled "shopping list".
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<NoteSelector> {
    let all_indexes: Result<Vec<NoteSelector>, _> = inputs
        .iter()
        .map(|s| NoteSelector::from_str(s.as_ref()))
        .collect();

    if let Ok(selectors) = all_indexes {
        return selectors;
    }

    let query = inputs
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");

    vec![NoteSelector::Title(query)]
}

/// Finds the note a selector points at within an indexed listing.
///
/// Title queries try an exact match first, then a case-insensitive
/// substring match. The listing is newest first, so the newest match wins.
pub fn find<'a>(listed: &'a [DisplayNote], selector: &NoteSelector) -> Option<&'a DisplayNote> {
    match selector {
        NoteSelector::Index(idx) => listed.iter().find(|dn| dn.index == *idx),
        NoteSelector::Title(query) => {
            if let Some(exact) = listed.iter().find(|dn| &dn.note.title == query) {
                return Some(exact);
            }
            let needle = query.to_lowercase();
            listed
                .iter()
                .find(|dn| dn.note.title.to_lowercase().contains(&needle))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<DisplayNote> {
        index_notes(vec![
            NoteRef::new("Shopping list", 3000),
            NoteRef::new("Todo", 2000),
            NoteRef::new("Shopping", 1000),
        ])
    }

    #[test]
    fn indexes_start_at_one() {
        let listed = listing();
        let indexes: Vec<_> = listed.iter().map(|dn| dn.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(listed[0].note.title, "Shopping list");
    }

    #[test]
    fn parses_all_indexes() {
        assert_eq!(
            parse_selectors(&["1", "3"]),
            vec![NoteSelector::Index(1), NoteSelector::Index(3)]
        );
    }

    #[test]
    fn mixed_input_becomes_title_query() {
        assert_eq!(
            parse_selectors(&["shopping", "2"]),
            vec![NoteSelector::Title("shopping 2".into())]
        );
    }

    #[test]
    fn zero_is_not_an_index() {
        assert_eq!(
            parse_selectors(&["0"]),
            vec![NoteSelector::Title("0".into())]
        );
    }

    #[test]
    fn find_by_index() {
        let listed = listing();
        let found = find(&listed, &NoteSelector::Index(2)).unwrap();
        assert_eq!(found.note.title, "Todo");
        assert!(find(&listed, &NoteSelector::Index(9)).is_none());
    }

    #[test]
    fn exact_title_beats_substring() {
        let listed = listing();
        let found = find(&listed, &NoteSelector::Title("Shopping".into())).unwrap();
        assert_eq!(found.note.created_at, 1000);
    }

    #[test]
    fn substring_match_is_case_insensitive_and_newest_first() {
        let listed = listing();
        let found = find(&listed, &NoteSelector::Title("shop".into())).unwrap();
        assert_eq!(found.note.title, "Shopping list");
    }

    #[test]
    fn selector_display() {
        assert_eq!(NoteSelector::Index(4).to_string(), "4");
        assert_eq!(NoteSelector::Title("Todo".into()).to_string(), "\"Todo\"");
    }
}
