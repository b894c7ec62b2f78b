use super::DispatchResult;
use crate::{Clipboard, ClipboardOp};
use core_state::{DeleteKind, Session};

pub(crate) fn handle_clipboard(
    op: ClipboardOp,
    session: &mut Session,
    clipboard: &mut dyn Clipboard,
) -> DispatchResult {
    match op {
        ClipboardOp::Copy | ClipboardOp::Cut => {
            if !session.cursor().has_selection() {
                return DispatchResult::clean();
            }
            let text = session.selected_text();
            clipboard.write(&text);
            if op == ClipboardOp::Cut {
                session.delete(DeleteKind::BackspaceOne, 1);
            }
            tracing::trace!(target: "actions.dispatch", ?op, chars = text.chars().count(), "clipboard");
            DispatchResult::dirty()
        }
        ClipboardOp::Paste => match clipboard.read() {
            Some(text) => {
                session.insert(&text);
                DispatchResult::dirty()
            }
            None => DispatchResult::clean(),
        },
    }
}
