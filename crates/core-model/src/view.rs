//! Per-pane viewport and scrolling.

use core_text::{Buffer, Position};

/// Rows kept between the cursor and the top/bottom edge when scrolling.
pub const SCROLL_MARGIN: usize = 7;

/// Width of the line-number gutter: the digits of the line count plus one
/// separator column.
pub fn gutter_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len() + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct View {
    pub first_line: usize,
    /// First visible visual column of the text area.
    pub left_col: usize,
    pub width: usize,
    pub height: usize,
    /// Draw relative line numbers (main pane only).
    pub line_numbers: bool,
}

impl View {
    pub fn new(width: usize, height: usize, line_numbers: bool) -> Self {
        Self {
            first_line: 0,
            left_col: 0,
            width,
            height,
            line_numbers,
        }
    }

    pub fn gutter(&self, line_count: usize) -> usize {
        if self.line_numbers {
            gutter_width(line_count)
        } else {
            0
        }
    }

    pub fn text_width(&self, line_count: usize) -> usize {
        self.width.saturating_sub(self.gutter(line_count))
    }

    /// Bring `pos` into view, keeping [`SCROLL_MARGIN`] rows of context where
    /// the buffer allows.
    pub fn scroll_to(&mut self, buffer: &Buffer, pos: Position) {
        let lines = buffer.line_count();
        if self.height > 0 {
            let margin = SCROLL_MARGIN.min(self.height.saturating_sub(1) / 2);
            if pos.row < self.first_line + margin {
                self.first_line = pos.row.saturating_sub(margin);
            } else if pos.row + margin >= self.first_line + self.height {
                self.first_line = pos.row + margin + 1 - self.height;
            }
            self.first_line = self.first_line.min(lines.saturating_sub(self.height));
        }

        let text_width = self.text_width(lines).max(1);
        let visual = buffer.visual_col(pos.row, pos.col);
        if visual < self.left_col {
            self.left_col = visual;
        } else if visual >= self.left_col + text_width {
            self.left_col = visual + 1 - text_width;
        }
    }

    /// Scroll by whole rows without moving the cursor.
    pub fn scroll_by(&mut self, rows: isize, line_count: usize) {
        let max_first = line_count.saturating_sub(self.height);
        self.first_line = self
            .first_line
            .saturating_add_signed(rows)
            .min(max_first);
    }

    /// Buffer position under a cell relative to this pane's origin.
    pub fn position_at(&self, buffer: &Buffer, x: usize, y: usize) -> Position {
        let row = (self.first_line + y).min(buffer.line_count() - 1);
        let visual = x.saturating_sub(self.gutter(buffer.line_count())) + self.left_col;
        Position::new(row, buffer.logical_col(row, visual))
    }
}
