//! Line-oriented text buffer.
//!
//! The buffer is an owned `Vec<Line>` that is never empty. Each line keeps its
//! own highlight cache (see [`Line`]) so the syntax pass can re-tag only what
//! changed. All coordinates are logical columns (character indices); visual
//! columns are derived through [`columns`].
//!
//! Invariants:
//! * `line_count() >= 1`.
//! * Every text write through the buffer marks the touched lines dirty.
//! * `splice` builds the replacement rows before swapping them in; no caller
//!   ever holds a view into rows that are being replaced.

pub mod class;
pub mod columns;
pub mod line;
pub mod motion;

pub use class::CharClass;
pub use line::{Line, TokenClass};
pub use motion::Motion;

/// A position inside a buffer expressed as (row, logical column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<Line>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// One empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new("")],
        }
    }

    /// Build from already-split lines. An empty iterator yields one empty line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<Line> = lines.into_iter().map(Line::new).collect();
        if lines.is_empty() {
            lines.push(Line::new(""));
        }
        Self { lines }
    }

    /// Build from a block of text split on `\n`.
    pub fn from_text(content: &str) -> Self {
        Self::from_lines(content.split('\n'))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Borrow row `row`. Rows come from clamped cursor state; out of range is a defect.
    pub fn line(&self, row: usize) -> &Line {
        debug_assert!(row < self.lines.len(), "row {row} out of range");
        &self.lines[row.min(self.lines.len() - 1)]
    }

    pub fn line_mut(&mut self, row: usize) -> &mut Line {
        debug_assert!(row < self.lines.len(), "row {row} out of range");
        let last = self.lines.len() - 1;
        &mut self.lines[row.min(last)]
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    /// Length of `row` in characters.
    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).len()
    }

    pub fn set_line_text(&mut self, row: usize, text: impl Into<String>) {
        self.line_mut(row).set_text(text);
    }

    /// Replace rows `at..at + remove` with `insert`.
    pub fn splice(&mut self, at: usize, remove: usize, insert: Vec<Line>) {
        let end = (at + remove).min(self.lines.len());
        let at = at.min(end);
        tracing::trace!(
            target: "text.splice",
            at,
            removed = end - at,
            inserted = insert.len(),
            "splice"
        );
        self.lines.splice(at..end, insert);
        if self.lines.is_empty() {
            self.lines.push(Line::new(""));
        }
    }

    /// Full text, rows joined with `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, l) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(l.text());
        }
        out
    }

    pub fn mark_all_dirty(&mut self) {
        for l in &mut self.lines {
            l.dirty = true;
        }
    }

    /// Clamp a position into the buffer.
    pub fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.lines.len() - 1);
        let col = pos.col.min(self.line_len(row));
        Position { row, col }
    }

    pub fn end(&self) -> Position {
        let row = self.lines.len() - 1;
        Position::new(row, self.line_len(row))
    }

    /// Visual column of logical `col` on `row`.
    pub fn visual_col(&self, row: usize, col: usize) -> usize {
        columns::logical_to_visual(self.line(row).text(), col)
    }

    /// Logical column on `row` for visual column `visual`.
    pub fn logical_col(&self, row: usize, visual: usize) -> usize {
        columns::visual_to_logical(self.line(row).text(), visual)
    }

    /// Text between two ordered positions, rows joined with `\n`.
    pub fn text_between(&self, start: Position, end: Position) -> String {
        if start.row == end.row {
            return self.line(start.row).slice(start.col, end.col).to_string();
        }
        let mut out = String::from(self.line(start.row).tail(start.col));
        for row in start.row + 1..end.row {
            out.push('\n');
            out.push_str(self.line(row).text());
        }
        out.push('\n');
        out.push_str(self.line(end.row).head(end.col));
        out
    }

    /// Character offset of `pos` in `text()`.
    pub fn offset_of(&self, pos: Position) -> usize {
        let pos = self.clamp(pos);
        self.lines[..pos.row].iter().map(|l| l.len() + 1).sum::<usize>() + pos.col
    }

    /// Position of character offset `offset` in `text()`, clamped to the end.
    pub fn position_of(&self, mut offset: usize) -> Position {
        for (row, l) in self.lines.iter().enumerate() {
            let len = l.len();
            if offset <= len {
                return Position::new(row, offset);
            }
            offset -= len + 1;
        }
        self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn never_empty() {
        assert_eq!(Buffer::new().line_count(), 1);
        assert_eq!(Buffer::from_lines(Vec::<String>::new()).line_count(), 1);
        let mut b = Buffer::from_lines(["a", "b"]);
        b.splice(0, 2, Vec::new());
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.text(), "");
    }

    #[test]
    fn from_text_splits_and_joins() {
        let b = Buffer::from_text("one\r\ntwo\n");
        assert_eq!(b.line_count(), 3);
        assert_eq!(b.line(0).text(), "one");
        assert_eq!(b.text(), "one\ntwo\n");
    }

    #[test]
    fn splice_replaces_range() {
        let mut b = Buffer::from_lines(["a", "b", "c"]);
        b.splice(1, 1, vec![Line::new("x"), Line::new("y")]);
        assert_eq!(b.text(), "a\nx\ny\nc");
    }

    #[test]
    fn text_between_spans_rows() {
        let b = Buffer::from_lines(["hello", "big", "world"]);
        assert_eq!(
            b.text_between(Position::new(0, 3), Position::new(2, 2)),
            "lo\nbig\nwo"
        );
        assert_eq!(b.text_between(Position::new(1, 1), Position::new(1, 3)), "ig");
    }

    #[test]
    fn offsets_round_trip() {
        let b = Buffer::from_lines(["ab", "", "cde"]);
        for pos in [
            Position::new(0, 0),
            Position::new(0, 2),
            Position::new(1, 0),
            Position::new(2, 3),
        ] {
            assert_eq!(b.position_of(b.offset_of(pos)), pos);
        }
        assert_eq!(b.position_of(999), Position::new(2, 3));
    }
}
