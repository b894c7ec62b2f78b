//! Key event -> resolved action.
//!
//! Normal mode keeps a decimal repeat string: an unmodified digit extends it
//! and produces no action; any other key consumes it (default 1) whether or
//! not that key is bound. Insert mode never counts and falls back to
//! inserting any printable key literally.

use core_events::{KeyCode, KeyEvent};
use core_state::{Mode, Session};

use crate::{Action, EditKind, EditorKeymap};

/// An action ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub action: Action,
    pub count: usize,
    /// Motions keep the anchor (extend the selection).
    pub extend: bool,
}

impl Resolved {
    pub fn once(action: Action) -> Self {
        Self {
            action,
            count: 1,
            extend: false,
        }
    }
}

pub fn translate(keymap: &EditorKeymap, session: &mut Session, key: &KeyEvent) -> Option<Resolved> {
    let mode = session.mode();
    let count = match mode {
        Mode::Normal => {
            if let KeyCode::Char(d) = key.code
                && d.is_ascii_digit()
                && key.mods.is_empty()
            {
                session.push_repeat_digit(d);
                tracing::trace!(target: "actions.translate", pending = session.repeat_string(), "count_digit");
                return None;
            }
            session.take_repeat()
        }
        Mode::Insert => 1,
    };

    let action = match keymap.resolve(mode, key) {
        Some(action) => action.clone(),
        None => match (mode, key.printable()) {
            (Mode::Insert, Some(c)) => Action::Edit(EditKind::InsertChar(c)),
            _ => {
                tracing::trace!(target: "actions.translate", key = %key, ?mode, "unbound");
                return None;
            }
        },
    };
    let extend = key.shift() && !matches!(action, Action::Motion { reset_anchor: true, .. });
    tracing::trace!(target: "actions.translate", key = %key, ?action, count, extend, "resolved");
    Some(Resolved {
        action,
        count,
        extend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WorkspaceCommand, default_keymap};
    use core_events::KeyModifiers;
    use core_text::Motion;

    fn normal() -> Session {
        let mut s = Session::new();
        s.set_mode(Mode::Normal);
        s
    }

    #[test]
    fn digits_accumulate_then_feed_the_next_command() {
        let km = default_keymap();
        let mut s = normal();
        assert_eq!(translate(&km, &mut s, &KeyEvent::char('1')), None);
        assert_eq!(translate(&km, &mut s, &KeyEvent::char('2')), None);
        assert_eq!(s.repeat_string(), "12");
        let r = translate(&km, &mut s, &KeyEvent::char('j')).unwrap();
        assert_eq!(r.action, Action::motion(Motion::Down));
        assert_eq!(r.count, 12);
        assert_eq!(s.repeat_string(), "");
    }

    #[test]
    fn unbound_key_still_resets_count() {
        let km = default_keymap();
        let mut s = normal();
        translate(&km, &mut s, &KeyEvent::char('5'));
        assert_eq!(translate(&km, &mut s, &KeyEvent::char('z')), None);
        assert_eq!(s.repeat_string(), "");
    }

    #[test]
    fn insert_mode_types_printables_and_ignores_counts() {
        let km = default_keymap();
        let mut s = Session::new();
        let r = translate(&km, &mut s, &KeyEvent::char('7')).unwrap();
        assert_eq!(r.action, Action::Edit(EditKind::InsertChar('7')));
        let upper = KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT);
        let r = translate(&km, &mut s, &upper).unwrap();
        assert_eq!(r.action, Action::Edit(EditKind::InsertChar('J')));
        assert_eq!(s.repeat_string(), "");
    }

    #[test]
    fn shift_extends_except_for_anchor_resetting_motions() {
        let km = default_keymap();
        let mut s = normal();
        let r = translate(&km, &mut s, &KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT)).unwrap();
        assert!(r.extend);
        let r = translate(&km, &mut s, &KeyEvent::new(KeyCode::Char('^'), KeyModifiers::SHIFT)).unwrap();
        assert!(!r.extend);
    }

    #[test]
    fn globals_resolve_in_both_modes() {
        let km = default_keymap();
        for mode in [Mode::Normal, Mode::Insert] {
            let mut s = Session::new();
            s.set_mode(mode);
            let r = translate(&km, &mut s, &KeyEvent::ctrl('s')).unwrap();
            assert_eq!(r.action, Action::Workspace(WorkspaceCommand::Save));
        }
    }
}
