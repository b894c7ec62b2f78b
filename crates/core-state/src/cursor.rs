//! Cursor + anchor model.

use core_text::{Buffer, Position};

/// Active point, selection anchor and the sticky visual column used by
/// vertical motion. `position() == anchor()` means no selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
    pub anchor_row: usize,
    pub anchor_col: usize,
    pub preferred_visual_col: usize,
}

impl Cursor {
    /// Collapsed cursor at `pos`. The preferred column is left at zero; callers
    /// holding a buffer should use [`Cursor::refresh_preferred`].
    pub fn at(pos: Position) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
            anchor_row: pos.row,
            anchor_col: pos.col,
            preferred_visual_col: 0,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn anchor(&self) -> Position {
        Position::new(self.anchor_row, self.anchor_col)
    }

    pub fn set_position(&mut self, pos: Position) {
        self.row = pos.row;
        self.col = pos.col;
    }

    pub fn set_anchor(&mut self, pos: Position) {
        self.anchor_row = pos.row;
        self.anchor_col = pos.col;
    }

    /// Move the anchor onto the active point, ending any selection.
    pub fn collapse(&mut self) {
        self.anchor_row = self.row;
        self.anchor_col = self.col;
    }

    pub fn has_selection(&self) -> bool {
        self.position() != self.anchor()
    }

    /// Normalized selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.has_selection()
            .then(|| Selection::new(self.anchor(), self.position()))
    }

    pub fn refresh_preferred(&mut self, buffer: &Buffer) {
        self.preferred_visual_col = buffer.visual_col(self.row, self.col);
    }

    /// Pull both endpoints back inside `buffer`.
    pub fn clamp_to(&mut self, buffer: &Buffer) {
        self.set_position(buffer.clamp(self.position()));
        self.set_anchor(buffer.clamp(self.anchor()));
    }
}

/// A selection with `start <= end` ordered by row then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Whether the character at `pos` lies inside the selection.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }
}
