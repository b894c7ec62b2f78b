use super::DispatchResult;
use crate::EditKind;
use core_state::Session;

pub(crate) fn handle_edit(kind: &EditKind, count: usize, session: &mut Session) -> DispatchResult {
    match kind {
        EditKind::InsertChar(c) => {
            let mut buf = [0u8; 4];
            session.insert(c.encode_utf8(&mut buf));
        }
        EditKind::InsertText(text) => session.insert(text),
        EditKind::InsertNewline => session.insert_newline(),
        EditKind::InsertTab => session.insert("\t"),
        EditKind::Delete(delete) => session.delete(*delete, count),
    }
    DispatchResult::dirty()
}
