use super::DispatchResult;
use crate::Resolved;
use core_state::Session;
use core_text::Motion;

pub(crate) fn handle_motion(
    motion: Motion,
    reset_anchor: bool,
    resolved: &Resolved,
    session: &mut Session,
) -> DispatchResult {
    let before = *session.cursor();
    let keep_anchor = resolved.extend && !reset_anchor;
    session.move_cursor(motion, keep_anchor, resolved.count);
    if *session.cursor() == before {
        DispatchResult::clean()
    } else {
        DispatchResult::dirty()
    }
}

pub(crate) fn handle_select_all(session: &mut Session) -> DispatchResult {
    session.select_all();
    DispatchResult::dirty()
}

pub(crate) fn handle_goto(count: usize, session: &mut Session) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", line = count, "goto_line");
    session.goto_line(count);
    DispatchResult::dirty()
}
