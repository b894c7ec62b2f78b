//! Dispatcher applying a [`Resolved`] action to a [`Session`].
//!
//! Split by concern:
//! * `motion`    - cursor movement, select all, goto line
//! * `mode`      - Normal <-> Insert transitions
//! * `edit`      - text mutation
//! * `undo`      - undo / redo
//! * `clipboard` - copy / cut / paste through a [`Clipboard`]
//!
//! Workspace commands pass straight through in [`DispatchResult::command`].

use core_state::Session;

use crate::{Action, Clipboard, Resolved, WorkspaceCommand};

mod clipboard;
mod edit;
mod mode;
mod motion;
mod undo;

/// Result of dispatching a single action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    /// Set when the action belongs to the enclosing workspace.
    pub command: Option<WorkspaceCommand>,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            command: None,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            command: None,
        }
    }
    pub fn delegate(command: WorkspaceCommand) -> Self {
        Self {
            dirty: true,
            command: Some(command),
        }
    }
}

pub fn dispatch(
    resolved: &Resolved,
    session: &mut Session,
    clipboard: &mut dyn Clipboard,
) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", action = ?resolved.action, count = resolved.count, "dispatch");
    match &resolved.action {
        Action::Motion {
            motion,
            reset_anchor,
        } => motion::handle_motion(*motion, *reset_anchor, resolved, session),
        Action::SelectAll => motion::handle_select_all(session),
        Action::GotoLine => motion::handle_goto(resolved.count, session),
        Action::Edit(kind) => edit::handle_edit(kind, resolved.count, session),
        Action::ModeChange(change) => mode::handle_mode_change(*change, resolved.extend, session),
        Action::Undo => undo::handle_undo(session),
        Action::Redo => undo::handle_redo(session),
        Action::Clipboard(op) => clipboard::handle_clipboard(*op, session, clipboard),
        Action::Workspace(command) => DispatchResult::delegate(*command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClipboardOp, EditKind, MemoryClipboard, ModeChange};
    use core_state::{DeleteKind, Mode};
    use core_text::{Buffer, Motion, Position};
    use pretty_assertions::assert_eq;

    fn session(lines: &[&str]) -> Session {
        let mut s = Session::from_buffer(Buffer::from_lines(lines.iter().copied()));
        s.set_mode(Mode::Normal);
        s
    }

    fn run(s: &mut Session, action: Action, count: usize, extend: bool) -> DispatchResult {
        let mut clip = MemoryClipboard::new();
        dispatch(
            &Resolved {
                action,
                count,
                extend,
            },
            s,
            &mut clip,
        )
    }

    #[test]
    fn counted_motion_moves_repeatedly_and_clamps() {
        let mut s = session(&["a", "b", "c"]);
        run(&mut s, Action::motion(Motion::Down), 5, false);
        assert_eq!(s.position(), Position::new(2, 0));
    }

    #[test]
    fn shift_motion_builds_selection_and_reset_anchor_collapses_it() {
        let mut s = session(&["hello"]);
        run(&mut s, Action::motion(Motion::Right), 3, true);
        assert_eq!(s.selected_text(), "hel");
        let reset = Action::Motion {
            motion: Motion::LineStart,
            reset_anchor: true,
        };
        run(&mut s, reset, 1, false);
        assert!(!s.cursor().has_selection());
    }

    #[test]
    fn goto_uses_count_as_line_number() {
        let mut s = session(&["1", "2", "3", "4"]);
        run(&mut s, Action::GotoLine, 3, false);
        assert_eq!(s.position().row, 2);
    }

    #[test]
    fn normal_mode_delete_honours_count() {
        let mut s = session(&["abcdef"]);
        run(&mut s, Action::motion(Motion::LineEnd), 1, false);
        run(&mut s, Action::Edit(EditKind::Delete(DeleteKind::BackspaceOne)), 3, false);
        assert_eq!(s.text(), "abc");
    }

    #[test]
    fn append_moves_to_line_end_then_inserts() {
        let mut s = session(&["abc", "de"]);
        run(&mut s, Action::ModeChange(ModeChange::AppendLineEnd), 1, false);
        assert_eq!(s.mode(), Mode::Insert);
        assert_eq!(s.position(), Position::new(0, 3));
    }

    #[test]
    fn open_line_below_auto_indents() {
        let mut s = session(&["\tif x {", "}"]);
        run(&mut s, Action::ModeChange(ModeChange::OpenLineBelow), 1, false);
        assert_eq!(s.text(), "\tif x {\n\t\t\n}");
        assert_eq!(s.position(), Position::new(1, 2));
        assert_eq!(s.mode(), Mode::Insert);
    }

    #[test]
    fn workspace_commands_are_delegated() {
        let mut s = session(&["x"]);
        let r = run(&mut s, Action::Workspace(WorkspaceCommand::Quit), 1, false);
        assert_eq!(r.command, Some(WorkspaceCommand::Quit));
        assert_eq!(s.text(), "x");
    }

    #[test]
    fn copy_without_selection_is_a_noop() {
        let mut s = session(&["abc"]);
        let mut clip = MemoryClipboard::new();
        let r = dispatch(
            &Resolved::once(Action::Clipboard(ClipboardOp::Copy)),
            &mut s,
            &mut clip,
        );
        assert!(!r.dirty);
        assert_eq!(clip.contents(), None);
    }
}
