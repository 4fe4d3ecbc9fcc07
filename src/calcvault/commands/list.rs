use crate::commands::{CmdMessage, CmdResult, DisplayNote};
use crate::error::Result;
use crate::report::Reporter;
use crate::session::Session;
use crate::store::BlobStore;

pub fn run<B: BlobStore, R: Reporter>(session: &Session<B, R>) -> Result<CmdResult> {
    let notes = session.notes()?;
    let listed: Vec<DisplayNote> = notes
        .iter()
        .enumerate()
        .map(|(i, note)| DisplayNote {
            index: i + 1,
            note: note.clone(),
        })
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No notes found."));
    }
    Ok(result.with_listed_notes(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, MessageLevel};
    use crate::config::VaultConfig;
    use crate::report::RecordingReporter;
    use crate::store::memory::InMemoryBlobStore;

    #[test]
    fn lists_in_creation_order_with_one_based_indexes() {
        let store = InMemoryBlobStore::new();
        let reporter = RecordingReporter::new();
        let (mut session, _) = Session::open(&store, &reporter, VaultConfig::default());
        create::run(&mut session, "A", "1").unwrap();
        create::run(&mut session, "B", "2").unwrap();

        let result = run(&session).unwrap();
        let rows: Vec<(usize, &str)> = result
            .listed_notes
            .iter()
            .map(|dn| (dn.index, dn.note.title.as_str()))
            .collect();
        assert_eq!(rows, vec![(1, "A"), (2, "B")]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_vault_lists_nothing() {
        let store = InMemoryBlobStore::new();
        let reporter = RecordingReporter::new();
        let (session, _) = Session::open(&store, &reporter, VaultConfig::default());
        let result = run(&session).unwrap();
        assert!(result.listed_notes.is_empty());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(result.messages[0].content, "No notes found.");
    }
}
