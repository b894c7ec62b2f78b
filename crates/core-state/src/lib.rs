//! Per-session editing state: buffer, cursor, mode, repeat accumulator and
//! undo history bundled into one [`Session`].
//!
//! Every box the editor shows (main text, find, replace, the input prompt) is
//! an independent `Session`; nothing mutable is shared between them. All
//! operations are total over valid state: indices are derived from the cursor
//! and clamped to the buffer, so none of them return errors.
//!
//! Module map:
//! - `cursor`: cursor/anchor model and normalized selections.
//! - `motion`: cursor motions with sticky visual column handling.
//! - `edit`: selection-aware insert and delete.
//! - `search`: find/replace helpers over the session text.
//! - `undo`: snapshot history with time-based coalescing.

pub mod cursor;
mod edit;
mod motion;
mod search;
pub mod undo;

pub use cursor::{Cursor, Selection};
pub use edit::DeleteKind;
pub use undo::{COALESCE_WINDOW, Checkpoint, History, UNDO_HISTORY_MAX};

use core_text::{Buffer, Position};
use std::time::{Duration, Instant};

/// Editing mode. New sessions start in `Insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Normal,
    #[default]
    Insert,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    buffer: Buffer,
    cursor: Cursor,
    mode: Mode,
    repeat: String,
    history: History,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::from_buffer(Buffer::new())
    }

    pub fn from_buffer(buffer: Buffer) -> Self {
        let cursor = Cursor::default();
        let history = History::new(&buffer, cursor);
        Self {
            buffer,
            cursor,
            mode: Mode::default(),
            repeat: String::new(),
            history,
        }
    }

    /// Replace the history limits. Existing history is dropped.
    pub fn with_history_limits(mut self, window: Duration, max_depth: usize) -> Self {
        self.history = History::with_limits(&self.buffer, self.cursor, window, max_depth);
        self
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode. Any pending repeat count is discarded.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.repeat.clear();
    }

    /// Pending repeat-count digits.
    pub fn repeat_string(&self) -> &str {
        &self.repeat
    }

    pub fn push_repeat_digit(&mut self, digit: char) {
        debug_assert!(digit.is_ascii_digit());
        self.repeat.push(digit);
    }

    /// Consume the pending count. Empty or non-positive counts are 1.
    pub fn take_repeat(&mut self) -> usize {
        let n = self.repeat.parse::<usize>().unwrap_or(0);
        self.repeat.clear();
        n.max(1)
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Text of the normalized selection; empty when nothing is selected.
    pub fn selected_text(&self) -> String {
        match self.cursor.selection() {
            Some(sel) => self.buffer.text_between(sel.start, sel.end),
            None => String::new(),
        }
    }

    /// Replace the whole buffer, put the cursor at the origin and start a
    /// fresh history from the new content.
    pub fn replace_all(&mut self, buffer: Buffer) {
        self.buffer = buffer;
        self.cursor = Cursor::default();
        self.repeat.clear();
        self.history.reset(&self.buffer, self.cursor);
    }

    /// Place a previously saved cursor, clamped to the buffer.
    pub fn restore_cursor(&mut self, mut cursor: Cursor) {
        cursor.clamp_to(&self.buffer);
        cursor.refresh_preferred(&self.buffer);
        self.cursor = cursor;
    }

    /// Re-tag dirty lines. Returns how many were tokenized.
    pub fn refresh_highlight(&mut self) -> usize {
        core_syntax::highlight(&mut self.buffer)
    }

    pub fn checkpoint(&mut self) -> Checkpoint {
        self.checkpoint_at(Instant::now())
    }

    pub fn checkpoint_at(&mut self, now: Instant) -> Checkpoint {
        self.history.checkpoint(&self.buffer, self.cursor, now)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.buffer, &mut self.cursor)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.buffer, &mut self.cursor)
    }

    pub fn position(&self) -> Position {
        self.cursor.position()
    }
}
