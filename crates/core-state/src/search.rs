//! Plain-text find and replace over a session's full text.

use core_text::Position;

use crate::Session;

fn matches_at(hay: &[char], needle: &[char], at: usize) -> bool {
    hay.get(at..at + needle.len()) == Some(needle)
}

impl Session {
    /// Select the next occurrence of `needle` after the selection (or before
    /// it when `backwards`), wrapping around the document. Returns false when
    /// there is no occurrence at all.
    pub fn select_next(&mut self, needle: &str, backwards: bool) -> bool {
        if needle.is_empty() {
            return false;
        }
        let hay: Vec<char> = self.buffer.text().chars().collect();
        let needle: Vec<char> = needle.chars().collect();
        if needle.len() > hay.len() {
            return false;
        }
        let (lo, hi) = match self.cursor.selection() {
            Some(sel) => (sel.start, sel.end),
            None => (self.cursor.position(), self.cursor.position()),
        };
        let last_start = hay.len() - needle.len();
        let found = if backwards {
            let before = self.buffer.offset_of(lo);
            (0..before.min(last_start + 1))
                .rev()
                .chain((0..=last_start).rev())
                .find(|&i| matches_at(&hay, &needle, i))
        } else {
            let after = self.buffer.offset_of(hi);
            (after..=last_start)
                .chain(0..=last_start)
                .find(|&i| matches_at(&hay, &needle, i))
        };
        let Some(start) = found else {
            return false;
        };
        let from: Position = self.buffer.position_of(start);
        let to = self.buffer.position_of(start + needle.len());
        self.cursor.set_anchor(from);
        self.cursor.set_position(to);
        self.cursor.refresh_preferred(&self.buffer);
        tracing::debug!(target: "state.search", row = from.row, col = from.col, backwards, "match_selected");
        true
    }

    /// Replace the selection with `replacement` when it currently equals
    /// `needle`.
    pub fn replace_selection(&mut self, needle: &str, replacement: &str) -> bool {
        if needle.is_empty() || self.selected_text() != needle {
            return false;
        }
        self.insert(replacement);
        true
    }
}
