//! Key handling for a single editing session.
//!
//! A key event flows through three steps:
//! 1. `key_translator::translate` consumes Normal-mode count digits and looks
//!    the key up in the [`EditorKeymap`], yielding a [`Resolved`] action with
//!    its repeat count and whether Shift extends the selection.
//! 2. `dispatcher::dispatch` applies the action to the [`Session`]. Clipboard
//!    commands call out to a [`Clipboard`]; workspace commands (save, quit,
//!    find, ...) are handed back to the caller untouched.
//! 3. [`run_action`] re-highlights dirty lines and offers history a
//!    checkpoint (skipped for undo/redo themselves).
//!
//! [`process_key`] bundles all three and is what the editor model calls for
//! each key delivered to a focused session.

use core_events::KeyEvent;
use core_keymap::Keymap;
use core_state::{DeleteKind, Mode, Session};
use core_text::Motion;

pub mod clipboard;
pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;
pub mod keymap;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::{Resolved, translate};
pub use keymap::default_keymap;

/// The table consulted for every key.
pub type EditorKeymap = Keymap<Mode, Action>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Cursor motion. `reset_anchor` ignores Shift and always collapses.
    Motion { motion: Motion, reset_anchor: bool },
    SelectAll,
    /// Jump to the line given by the repeat count.
    GotoLine,
    Edit(EditKind),
    ModeChange(ModeChange),
    Undo,
    Redo,
    Clipboard(ClipboardOp),
    /// Handled by the workspace that owns the session.
    Workspace(WorkspaceCommand),
}

impl Action {
    pub fn motion(motion: Motion) -> Self {
        Action::Motion {
            motion,
            reset_anchor: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    InsertText(String),
    InsertNewline,
    InsertTab,
    Delete(DeleteKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    EnterInsert,
    /// Move to the end of the line, then enter Insert.
    AppendLineEnd,
    /// Open an auto-indented line below, then enter Insert.
    OpenLineBelow,
    LeaveInsert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    Copy,
    Cut,
    Paste,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkspaceCommand {
    Quit,
    Save,
    SaveAs,
    OpenSettings,
    OpenFind,
    ToggleReplace,
}

/// What handling one key did to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// A repaint is needed.
    pub dirty: bool,
    /// Command the session could not handle itself.
    pub command: Option<WorkspaceCommand>,
}

/// Translate and run one key against `session`.
pub fn process_key(
    keymap: &EditorKeymap,
    session: &mut Session,
    key: &KeyEvent,
    clipboard: &mut dyn Clipboard,
) -> KeyOutcome {
    match translate(keymap, session, key) {
        Some(resolved) => run_action(session, resolved, clipboard),
        // count digits and unbound keys still change what the title bar shows
        None => KeyOutcome {
            dirty: true,
            command: None,
        },
    }
}

/// Dispatch an already-resolved action, then re-highlight and checkpoint.
pub fn run_action(
    session: &mut Session,
    resolved: Resolved,
    clipboard: &mut dyn Clipboard,
) -> KeyOutcome {
    let is_history = matches!(resolved.action, Action::Undo | Action::Redo);
    let result = dispatch(&resolved, session, clipboard);
    session.refresh_highlight();
    if !is_history {
        session.checkpoint();
    }
    KeyOutcome {
        dirty: result.dirty,
        command: result.command,
    }
}
