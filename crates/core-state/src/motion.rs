use core_text::motion::{self, Motion};
use core_text::Position;

use crate::Session;

impl Session {
    /// Move the cursor `repeat` times. Vertical motion resolves the column
    /// from the sticky visual column and leaves it unchanged; every other
    /// motion refreshes it. `keep_anchor` extends the selection.
    pub fn move_cursor(&mut self, motion: Motion, keep_anchor: bool, repeat: usize) {
        let mut pos = motion::apply(&self.buffer, self.cursor.position(), motion, repeat.max(1));
        if motion.is_vertical() {
            pos.col = self
                .buffer
                .logical_col(pos.row, self.cursor.preferred_visual_col);
        }
        self.cursor.set_position(pos);
        if !keep_anchor {
            self.cursor.collapse();
        }
        if !motion.is_vertical() {
            self.cursor.refresh_preferred(&self.buffer);
        }
        tracing::trace!(target: "state.motion", ?motion, row = pos.row, col = pos.col, keep_anchor, "move_cursor");
    }

    /// Anchor at the origin, cursor at the end of the document.
    pub fn select_all(&mut self) {
        self.cursor.set_anchor(Position::origin());
        self.cursor.set_position(self.buffer.end());
        self.cursor.refresh_preferred(&self.buffer);
    }

    /// Jump to 1-based line `line`, clamped to the buffer.
    pub fn goto_line(&mut self, line: usize) {
        let row = line.clamp(1, self.buffer.line_count()) - 1;
        self.set_cursor(Position::new(row, 0), false);
    }

    /// Place the cursor directly (mouse clicks), clamped to the buffer.
    pub fn set_cursor(&mut self, pos: Position, keep_anchor: bool) {
        self.cursor.set_position(self.buffer.clamp(pos));
        if !keep_anchor {
            self.cursor.collapse();
        }
        self.cursor.refresh_preferred(&self.buffer);
    }

    /// Move only the anchor by one step of `motion`.
    pub(crate) fn move_anchor(&mut self, motion: Motion) {
        let anchor = motion::apply(&self.buffer, self.cursor.anchor(), motion, 1);
        self.cursor.set_anchor(anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mode;
    use core_text::Buffer;

    fn session(lines: &[&str]) -> Session {
        let mut s = Session::from_buffer(Buffer::from_lines(lines.iter().copied()));
        s.set_mode(Mode::Normal);
        s
    }

    #[test]
    fn vertical_motion_keeps_sticky_column() {
        let mut s = session(&["abcdef", "ab", "abcdef"]);
        s.move_cursor(Motion::LineEnd, false, 1);
        s.move_cursor(Motion::Down, false, 1);
        assert_eq!(s.position(), Position::new(1, 2));
        s.move_cursor(Motion::Down, false, 1);
        assert_eq!(s.position(), Position::new(2, 6), "sticky column survives the short row");
    }

    #[test]
    fn sticky_column_maps_through_tabs() {
        let mut s = session(&["abcde", "\tx"]);
        s.set_cursor(Position::new(0, 2), false); // visual 2, tie inside the tab
        s.move_cursor(Motion::Down, false, 1);
        assert_eq!(s.position(), Position::new(1, 1));
    }

    #[test]
    fn repeat_down_clamps_at_last_row() {
        let mut s = session(&["a", "b", "c"]);
        s.move_cursor(Motion::Down, false, 10);
        assert_eq!(s.position().row, 2);
    }

    #[test]
    fn shift_motion_extends_selection() {
        let mut s = session(&["hello world"]);
        s.move_cursor(Motion::WordRight, true, 1);
        assert_eq!(s.selected_text(), "hello");
        s.move_cursor(Motion::Right, false, 1);
        assert!(!s.cursor().has_selection());
    }

    #[test]
    fn select_all_and_goto_line() {
        let mut s = session(&["ab", "cd", "ef"]);
        s.select_all();
        assert_eq!(s.selected_text(), "ab\ncd\nef");
        s.goto_line(2);
        assert_eq!(s.position(), Position::new(1, 0));
        assert!(!s.cursor().has_selection());
        s.goto_line(0);
        assert_eq!(s.position().row, 0);
        s.goto_line(99);
        assert_eq!(s.position().row, 2);
    }
}
