//! Frame composition and terminal emission.
//!
//! Rendering is two steps. [`compose::compose`] paints the whole editor (title
//! bar, main pane, find bar, overlays or the splash) into a [`Frame`] of
//! fully-resolved [`Cell`]s; [`writer::Writer`] then turns a frame into
//! crossterm commands, batching runs of equal style, and flushes once.
//!
//! Invariants:
//! - `cells.len() == width * height`; writes outside the grid are dropped.
//! - Every cell carries concrete colors; the writer never consults the theme.
//! - One cell per visual column. Tabs are expanded by the composer.

use bitflags::bitflags;
use core_config::Rgb;

pub mod compose;
pub mod status;
pub mod theme;
pub mod writer;

pub use compose::compose;
pub use theme::Theme;
pub use writer::Writer;

bitflags! {
    /// Semantic markers carried alongside colors (useful for tests and future
    /// attribute emission).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const CURSOR    = 0b0000_0001;
        const SELECTED  = 0b0000_0010;
        const GUTTER    = 0b0000_0100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub flags: CellFlags,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            flags: CellFlags::empty(),
        }
    }

    pub fn with(mut self, flags: CellFlags) -> Self {
        self.flags |= flags;
        self
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(theme::WHITE, theme::BLACK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { ch, style };
        }
    }

    /// Write `text` starting at (x, y), clipped at the right edge. Returns the
    /// column after the last char written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: CellStyle) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            self.set(col, y, ch, style);
            col += 1;
        }
        col
    }

    /// Paint a `width` x `height` block of blanks.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, height: u16, style: CellStyle) {
        for row in y..y.saturating_add(height) {
            for col in x..x.saturating_add(width) {
                self.set(col, row, ' ', style);
            }
        }
    }

    /// Text of one row (testing / diagnostics).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y).map(|c| c.ch))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut f = Frame::new(4, 2);
        let end = f.put_str(2, 1, "abc", CellStyle::default());
        assert_eq!(end, 4);
        assert_eq!(f.row_text(1), "  ab");
        assert_eq!(f.row_text(0), "    ");
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut f = Frame::new(2, 2);
        f.set(5, 5, 'x', CellStyle::default());
        f.fill(1, 1, 10, 10, CellStyle::new([1, 1, 1], [2, 2, 2]));
        assert_eq!(f.cells.len(), 4);
        assert_eq!(f.cell(1, 1).map(|c| c.style.bg), Some([2, 2, 2]));
        assert_eq!(f.cell(0, 0).map(|c| c.style.bg), Some(theme::BLACK));
    }
}
