use super::DispatchResult;
use crate::ModeChange;
use core_state::{Mode, Session};
use core_text::Motion;

pub(crate) fn handle_mode_change(
    change: ModeChange,
    extend: bool,
    session: &mut Session,
) -> DispatchResult {
    match change {
        ModeChange::EnterInsert => {}
        ModeChange::AppendLineEnd => session.move_cursor(Motion::LineEnd, extend, 1),
        ModeChange::OpenLineBelow => {
            session.move_cursor(Motion::LineEnd, false, 1);
            session.insert_newline();
        }
        ModeChange::LeaveInsert => {
            session.set_mode(Mode::Normal);
            tracing::trace!(target: "actions.dispatch", mode = "normal", "mode_change");
            return DispatchResult::dirty();
        }
    }
    session.set_mode(Mode::Insert);
    tracing::trace!(target: "actions.dispatch", mode = "insert", ?change, "mode_change");
    DispatchResult::dirty()
}
