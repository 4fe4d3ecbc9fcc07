//! # Note Collection
//!
//! The ordered set of notes held by a session. Display order is creation
//! order, and the collection only ever grows.
//!
//! Invariants, enforced on every path that produces a collection:
//! - ids are pairwise distinct
//! - no note has an empty (after trimming) title or text
//!
//! The collection is persisted as one blob, a JSON array of notes in order:
//!
//! ```text
//! [{"id":"…","title":"Sum","text":"2+2","created_at":"…"}, …]
//! ```
//!
//! `created_at` is optional so blobs written without it still load.

use crate::error::{Result, VaultError};
use crate::model::{Note, NoteId};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a new note, returning a copy of it.
    ///
    /// Title and text are stored trimmed. On a validation error the
    /// collection is left untouched.
    pub fn create(&mut self, title: &str, text: &str) -> Result<Note> {
        let title = title.trim();
        let text = text.trim();
        if title.is_empty() {
            return Err(VaultError::Validation("Title cannot be empty.".into()));
        }
        if text.is_empty() {
            return Err(VaultError::Validation("Text cannot be empty.".into()));
        }

        let mut note = Note::new(title.to_string(), text.to_string());
        while self.find(&note.id).is_some() {
            note.id = NoteId::generate();
        }

        self.notes.push(note.clone());
        Ok(note)
    }

    /// Rebuilds a collection from a blob produced by [`serialize`](Self::serialize).
    ///
    /// Malformed JSON and blobs that break the collection invariants are both
    /// reported as [`VaultError::PersistenceRead`].
    pub fn load(blob: &str) -> Result<Self> {
        let notes: Vec<Note> = serde_json::from_str(blob)
            .map_err(|e| VaultError::PersistenceRead(format!("malformed notes blob: {}", e)))?;

        let mut seen = HashSet::with_capacity(notes.len());
        for note in &notes {
            if !seen.insert(&note.id) {
                return Err(VaultError::PersistenceRead(format!(
                    "duplicate note id {}",
                    note.id
                )));
            }
            if note.title.trim().is_empty() || note.text.trim().is_empty() {
                return Err(VaultError::PersistenceRead(format!(
                    "note {} has an empty title or text",
                    note.id
                )));
            }
        }

        Ok(Self { notes })
    }

    pub fn serialize(&self) -> Result<String> {
        serde_json::to_string(&self.notes).map_err(VaultError::Serialization)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Note at a 0-based position in display order.
    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_appends_in_order() {
        let mut notes = NoteCollection::new();
        notes.create("First", "1+1").unwrap();
        notes.create("Second", "2+2").unwrap();

        let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn create_returns_the_stored_note() {
        let mut notes = NoteCollection::new();
        let created = notes.create("  Padded  ", " 3*3 ").unwrap();
        assert_eq!(created.title, "Padded");
        assert_eq!(created.text, "3*3");
        assert!(created.created_at.is_some());
        assert_eq!(notes.get(0), Some(&created));
    }

    #[test]
    fn empty_fields_are_rejected_without_change() {
        let mut notes = NoteCollection::new();
        notes.create("Keep", "1").unwrap();

        for (title, text) in [("", "1"), ("t", ""), ("   ", "1"), ("t", "\n\t"), ("", "")] {
            let err = notes.create(title, text).unwrap_err();
            assert!(matches!(err, VaultError::Validation(_)));
        }
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn back_to_back_ids_are_distinct() {
        let mut notes = NoteCollection::new();
        for i in 0..1000 {
            notes.create(&format!("n{}", i), "1").unwrap();
        }
        let ids: HashSet<_> = notes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn load_of_serialize_is_identity() {
        let mut notes = NoteCollection::new();
        notes.create("A", "2+2").unwrap();
        notes.create("B", "not math").unwrap();
        notes.create("C", "sqrt(2)").unwrap();

        let blob = notes.serialize().unwrap();
        let loaded = NoteCollection::load(&blob).unwrap();
        assert_eq!(loaded, notes);
    }

    #[test]
    fn empty_collection_round_trips() {
        let blob = NoteCollection::new().serialize().unwrap();
        assert_eq!(blob, "[]");
        assert!(NoteCollection::load(&blob).unwrap().is_empty());
    }

    #[test]
    fn loads_blobs_without_timestamps() {
        let blob = r#"[{"id":"1712345678901","title":"Sum","text":"2+2"},
                      {"id":"1712345678902","title":"Product","text":"3*4"}]"#;
        let notes = NoteCollection::load(blob).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes.get(1).unwrap().title, "Product");
        assert!(notes.find(&NoteId::from("1712345678901")).is_some());
    }

    #[test]
    fn corrupt_blob_is_a_read_error() {
        let err = NoteCollection::load("{not json").unwrap_err();
        assert!(matches!(err, VaultError::PersistenceRead(_)));
    }

    #[test]
    fn duplicate_ids_are_a_read_error() {
        let blob = r#"[{"id":"1","title":"A","text":"1"},{"id":"1","title":"B","text":"2"}]"#;
        let err = NoteCollection::load(blob).unwrap_err();
        assert!(matches!(err, VaultError::PersistenceRead(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn empty_fields_in_blob_are_a_read_error() {
        let blob = r#"[{"id":"1","title":"","text":"1"}]"#;
        assert!(matches!(
            NoteCollection::load(blob),
            Err(VaultError::PersistenceRead(_))
        ));
    }
}
