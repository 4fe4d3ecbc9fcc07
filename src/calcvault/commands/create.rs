use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::report::Reporter;
use crate::session::Session;
use crate::store::BlobStore;

pub fn run<B: BlobStore, R: Reporter>(
    session: &mut Session<B, R>,
    title: &str,
    text: &str,
) -> Result<CmdResult> {
    let note = session.create(title, text)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Note created: {}", note.title)));
    Ok(result.with_affected_notes(vec![note]))
}
