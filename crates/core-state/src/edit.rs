//! Selection-aware insert and delete.
//!
//! Every mutation leaves the cursor collapsed (anchor == active point) with a
//! refreshed sticky column. Multi-row changes go through `Buffer::splice` with
//! freshly built rows.

use core_text::motion::Motion;
use core_text::Line;

use crate::Session;

/// Characters that open an indented block when they end a line.
const BLOCK_OPENERS: &str = ":([{";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteKind {
    BackspaceOne,
    DeleteOne,
    BackspaceWord,
    DeleteWord,
}

impl Session {
    /// Insert `text` at the cursor, replacing the selection if there is one.
    /// `\r` is dropped; `\n` splits rows.
    pub fn insert(&mut self, text: &str) {
        self.delete_selection();
        let cleaned: String = text.chars().filter(|&c| c != '\r').collect();
        let mut parts = cleaned.split('\n');
        let first = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        let (row, col) = (self.cursor.row, self.cursor.col);
        let line = self.buffer.line(row);
        let head = line.head(col).to_string();
        let tail = line.tail(col).to_string();

        match rest.split_last() {
            None => {
                self.buffer.set_line_text(row, format!("{head}{first}{tail}"));
                self.cursor.col = col + first.chars().count();
            }
            Some((last, middle)) => {
                self.buffer.set_line_text(row, format!("{head}{first}"));
                let mut rows: Vec<Line> = middle.iter().map(|s| Line::new(*s)).collect();
                rows.push(Line::new(format!("{last}{tail}")));
                self.buffer.splice(row + 1, 0, rows);
                self.cursor.row = row + rest.len();
                self.cursor.col = last.chars().count();
            }
        }
        self.settle();
    }

    /// Newline carrying the current row's leading tabs, plus one more when
    /// the row ends with a block opener.
    pub fn insert_newline(&mut self) {
        let line = self.buffer.line(self.cursor.row);
        let mut tabs = line.leading_tabs();
        if line.last_char().is_some_and(|c| BLOCK_OPENERS.contains(c)) {
            tabs += 1;
        }
        let mut text = String::with_capacity(tabs + 1);
        text.push('\n');
        text.extend(std::iter::repeat_n('\t', tabs));
        self.insert(&text);
    }

    /// Delete the selection, or `repeat` units of `kind` when nothing is
    /// selected.
    pub fn delete(&mut self, kind: DeleteKind, repeat: usize) {
        if self.delete_selection() {
            return;
        }
        for _ in 0..repeat.max(1) {
            match kind {
                DeleteKind::BackspaceOne => self.backspace_one(),
                DeleteKind::DeleteOne => {
                    self.move_cursor(Motion::Right, false, 1);
                    self.backspace_one();
                }
                DeleteKind::BackspaceWord => {
                    self.move_anchor(Motion::WordLeft);
                    if !self.delete_selection() {
                        self.backspace_one();
                    }
                }
                DeleteKind::DeleteWord => {
                    self.move_anchor(Motion::WordRight);
                    if !self.delete_selection() {
                        self.backspace_one();
                    }
                }
            }
            self.settle();
        }
    }

    /// Remove the normalized selection. Returns false when there is none.
    pub(crate) fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.cursor.selection() else {
            return false;
        };
        let merged = format!(
            "{}{}",
            self.buffer.line(sel.start.row).head(sel.start.col),
            self.buffer.line(sel.end.row).tail(sel.end.col)
        );
        self.buffer.splice(
            sel.start.row,
            sel.end.row - sel.start.row + 1,
            vec![Line::new(merged)],
        );
        self.cursor.set_position(sel.start);
        self.settle();
        true
    }

    fn backspace_one(&mut self) {
        let (row, col) = (self.cursor.row, self.cursor.col);
        if col == 0 {
            if row == 0 {
                return;
            }
            let prev = self.buffer.line(row - 1);
            let prev_len = prev.len();
            let joined = format!("{}{}", prev.text(), self.buffer.line(row).text());
            self.buffer.splice(row - 1, 2, vec![Line::new(joined)]);
            self.cursor.row = row - 1;
            self.cursor.col = prev_len;
        } else {
            let line = self.buffer.line(row);
            let text = format!("{}{}", line.head(col - 1), line.tail(col));
            self.buffer.set_line_text(row, text);
            self.cursor.col = col - 1;
        }
    }

    fn settle(&mut self) {
        self.cursor.collapse();
        self.cursor.refresh_preferred(&self.buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Buffer, Position};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn session(lines: &[&str]) -> Session {
        Session::from_buffer(Buffer::from_lines(lines.iter().copied()))
    }

    fn lines(s: &Session) -> Vec<String> {
        s.buffer().lines().iter().map(|l| l.text().to_string()).collect()
    }

    #[test]
    fn insert_single_line_advances_cursor() {
        let mut s = session(&["ad"]);
        s.set_cursor(Position::new(0, 1), false);
        s.insert("bc");
        assert_eq!(lines(&s), vec!["abcd"]);
        assert_eq!(s.position(), Position::new(0, 3));
        assert_eq!(s.cursor().preferred_visual_col, 3);
    }

    #[test]
    fn insert_multi_line_splices_rows() {
        let mut s = session(&["head|tail", "next"]);
        s.set_cursor(Position::new(0, 5), false);
        s.insert("one\r\ntwo\nthree");
        assert_eq!(lines(&s), vec!["head|one", "two", "threetail", "next"]);
        assert_eq!(s.position(), Position::new(2, 5));
        assert!(!s.cursor().has_selection());
    }

    #[test]
    fn insert_replaces_selection() {
        let mut s = session(&["hello world"]);
        s.set_cursor(Position::new(0, 6), false);
        s.set_cursor(Position::new(0, 11), true);
        s.insert("there");
        assert_eq!(lines(&s), vec!["hello there"]);
    }

    #[test]
    fn delete_multi_row_selection_merges_endpoints() {
        let mut s = session(&["alpha", "beta", "gamma", "delta"]);
        s.set_cursor(Position::new(2, 3), false);
        s.set_cursor(Position::new(0, 2), true);
        s.delete(DeleteKind::DeleteWord, 5);
        assert_eq!(lines(&s), vec!["alma", "delta"]);
        assert_eq!(s.buffer().line_count(), 4 - 2);
        assert_eq!(s.position(), Position::new(0, 2));
    }

    #[test]
    fn backspace_joins_rows_and_stops_at_origin() {
        let mut s = session(&["ab", "cd"]);
        s.set_cursor(Position::new(1, 0), false);
        s.delete(DeleteKind::BackspaceOne, 1);
        assert_eq!(lines(&s), vec!["abcd"]);
        assert_eq!(s.position(), Position::new(0, 2));
        s.delete(DeleteKind::BackspaceOne, 10);
        assert_eq!(lines(&s), vec!["cd"]);
        assert_eq!(s.position(), Position::origin());
    }

    #[test]
    fn delete_one_removes_char_under_cursor() {
        let mut s = session(&["abc", "d"]);
        s.set_cursor(Position::new(0, 1), false);
        s.delete(DeleteKind::DeleteOne, 1);
        assert_eq!(lines(&s), vec!["ac", "d"]);
        s.set_cursor(Position::new(0, 2), false);
        s.delete(DeleteKind::DeleteOne, 1);
        assert_eq!(lines(&s), vec!["acd"], "at line end it joins the next row");
    }

    #[test]
    fn word_deletes_follow_class_boundaries() {
        let mut s = session(&["foo bar(baz)"]);
        s.set_cursor(Position::new(0, 7), false);
        s.delete(DeleteKind::BackspaceWord, 1);
        assert_eq!(lines(&s), vec!["foo (baz)"]);
        s.delete(DeleteKind::DeleteWord, 2);
        assert_eq!(lines(&s), vec!["foo )"]);
    }

    #[test]
    fn backspace_word_at_column_zero_joins_rows() {
        let mut s = session(&["ab", "cd"]);
        s.set_cursor(Position::new(1, 0), false);
        s.delete(DeleteKind::BackspaceWord, 1);
        assert_eq!(lines(&s), vec!["abcd"]);
    }

    #[test]
    fn newline_auto_indents_after_block_opener() {
        let mut s = session(&["\tif x {"]);
        s.move_cursor(Motion::LineEnd, false, 1);
        s.insert_newline();
        assert_eq!(lines(&s), vec!["\tif x {", "\t\t"]);
        assert_eq!(s.position(), Position::new(1, 2));

        let mut plain = session(&["fn main() {"]);
        plain.move_cursor(Motion::LineEnd, false, 1);
        plain.insert_newline();
        assert_eq!(plain.buffer().line(1).text(), "\t");

        let mut flat = session(&["x = 1"]);
        flat.move_cursor(Motion::LineEnd, false, 1);
        flat.insert_newline();
        assert_eq!(flat.buffer().line(1).text(), "");
    }

    proptest! {
        #[test]
        fn insert_then_backspace_restores(
            rows in proptest::collection::vec("[a-z \t(]{0,8}", 1..4),
            row in 0usize..4,
            col in 0usize..10,
            text in "[a-z\t\n]{0,12}",
        ) {
            let mut s = Session::from_buffer(Buffer::from_lines(rows.clone()));
            let row = row.min(rows.len() - 1);
            s.set_cursor(Position::new(row, col), false);
            let before_text = s.text();
            let before_pos = s.position();
            s.insert(&text);
            s.delete(DeleteKind::BackspaceOne, text.chars().count());
            prop_assert_eq!(s.text(), before_text);
            prop_assert_eq!(s.position(), before_pos);
        }
    }
}
