use super::DispatchResult;
use core_state::Session;

pub(crate) fn handle_undo(session: &mut Session) -> DispatchResult {
    if session.undo() {
        tracing::trace!(target: "actions.dispatch", op = "undo", undo_depth = session.history().undo_depth(), "undo");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(session: &mut Session) -> DispatchResult {
    if session.redo() {
        tracing::trace!(target: "actions.dispatch", op = "redo", redo_depth = session.history().redo_depth(), "redo");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
