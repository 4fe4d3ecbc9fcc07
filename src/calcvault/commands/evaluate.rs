use crate::commands::{CmdMessage, CmdResult, Evaluation};
use crate::error::{Result, VaultError};
use crate::eval;
use crate::report::Reporter;
use crate::session::Session;
use crate::store::BlobStore;

/// Evaluates the notes at the given 1-based indexes, or every note when
/// `indexes` is empty.
///
/// An invalid expression is not an error of the command: it shows up as a
/// failed [`Evaluation`] plus an error message, and the notes are untouched.
/// Only an index that does not exist fails the command.
pub fn run<B: BlobStore, R: Reporter>(
    session: &Session<B, R>,
    indexes: &[usize],
) -> Result<CmdResult> {
    let notes = session.notes()?;
    let selected: Vec<usize> = if indexes.is_empty() {
        (1..=notes.len()).collect()
    } else {
        indexes.to_vec()
    };

    let mut result = CmdResult::default();
    if selected.is_empty() {
        result.add_message(CmdMessage::warning("No notes to evaluate."));
    }
    for index in selected {
        let note = index
            .checked_sub(1)
            .and_then(|i| notes.get(i))
            .ok_or(VaultError::NoteNotFound(index))?;

        let outcome = eval::evaluate(&note.text);
        match &outcome {
            Ok(value) => result.add_message(CmdMessage::success(format!(
                "{}. {}: Result: {}",
                index, note.title, value
            ))),
            Err(e) => result.add_message(CmdMessage::error(format!(
                "{}. {}: Invalid mathematical expression ({}). Please ensure it is correctly formatted.",
                index, note.title, e
            ))),
        }

        result.evaluations.push(Evaluation {
            index,
            note_id: note.id.clone(),
            expression: note.text.clone(),
            outcome,
        });
    }

    Ok(result)
}
