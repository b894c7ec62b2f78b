//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair and are free of editor
//! state. Sticky-column handling for vertical motion belongs to the cursor
//! owner; `up`/`down` here only carry the current visual column across.

use crate::class::CharClass;
use crate::{Buffer, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Up,
    Down,
    Left,
    Right,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    DocumentEnd,
}

impl Motion {
    pub fn is_vertical(self) -> bool {
        matches!(self, Motion::Up | Motion::Down)
    }
}

/// Apply `motion` `repeat` times starting from `pos`.
pub fn apply(buf: &Buffer, pos: Position, motion: Motion, repeat: usize) -> Position {
    let mut pos = buf.clamp(pos);
    match motion {
        Motion::LineStart => line_start(buf, &mut pos),
        Motion::LineEnd => line_end(buf, &mut pos),
        Motion::DocumentEnd => document_end(buf, &mut pos),
        _ => {
            for _ in 0..repeat {
                match motion {
                    Motion::Up => up(buf, &mut pos),
                    Motion::Down => down(buf, &mut pos),
                    Motion::Left => left(buf, &mut pos),
                    Motion::Right => right(buf, &mut pos),
                    Motion::WordLeft => word_left(buf, &mut pos),
                    Motion::WordRight => word_right(buf, &mut pos),
                    Motion::LineStart | Motion::LineEnd | Motion::DocumentEnd => {}
                }
            }
        }
    }
    pos
}

/// Move left one character, wrapping to the end of the previous line.
pub fn left(buf: &Buffer, pos: &mut Position) {
    if pos.col > 0 {
        pos.col -= 1;
    } else if pos.row > 0 {
        pos.row -= 1;
        pos.col = buf.line_len(pos.row);
    }
}

/// Move right one character, wrapping to the start of the next line.
pub fn right(buf: &Buffer, pos: &mut Position) {
    if pos.col < buf.line_len(pos.row) {
        pos.col += 1;
    } else if pos.row + 1 < buf.line_count() {
        pos.row += 1;
        pos.col = 0;
    }
}

pub fn line_start(_buf: &Buffer, pos: &mut Position) {
    pos.col = 0;
}

pub fn line_end(buf: &Buffer, pos: &mut Position) {
    pos.col = buf.line_len(pos.row);
}

pub fn document_end(buf: &Buffer, pos: &mut Position) {
    pos.row = buf.line_count() - 1;
    pos.col = buf.line_len(pos.row);
}

/// Move up one row keeping the current visual column. No-op on the first row.
pub fn up(buf: &Buffer, pos: &mut Position) {
    if pos.row == 0 {
        return;
    }
    let visual = buf.visual_col(pos.row, pos.col);
    pos.row -= 1;
    pos.col = buf.logical_col(pos.row, visual);
}

/// Move down one row keeping the current visual column. No-op on the last row.
pub fn down(buf: &Buffer, pos: &mut Position) {
    if pos.row + 1 >= buf.line_count() {
        return;
    }
    let visual = buf.visual_col(pos.row, pos.col);
    pos.row += 1;
    pos.col = buf.logical_col(pos.row, visual);
}

/// Move to the previous Normal/non-Normal boundary. At column 0 this is a
/// single `left`, which lets word motion cross lines.
pub fn word_left(buf: &Buffer, pos: &mut Position) {
    if pos.col == 0 {
        left(buf, pos);
        return;
    }
    let chars: Vec<char> = buf.line(pos.row).chars().take(pos.col).collect();
    let start = CharClass::of(chars[pos.col - 1]).is_normal();
    let mut col = pos.col - 1;
    while col > 0 && CharClass::of(chars[col - 1]).is_normal() == start {
        col -= 1;
    }
    pos.col = col;
}

/// Move to the next Normal/non-Normal boundary. At line end this is a single
/// `right`.
pub fn word_right(buf: &Buffer, pos: &mut Position) {
    let chars: Vec<char> = buf.line(pos.row).chars().collect();
    if pos.col >= chars.len() {
        right(buf, pos);
        return;
    }
    let start = CharClass::of(chars[pos.col]).is_normal();
    let mut col = pos.col + 1;
    while col < chars.len() && CharClass::of(chars[col]).is_normal() == start {
        col += 1;
    }
    pos.col = col;
}
