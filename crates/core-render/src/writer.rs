//! Translate frames into batched terminal commands.
//!
//! * Commands preserve ordering; nothing is flushed mid-frame.
//! * Positions are absolute with a (0,0) origin.
//! * A color change is emitted only when the style differs from the
//!   previous cell, so a row of uniform text is one `Print`.
//! * Rows equal to the previously flushed frame are skipped entirely when
//!   built with [`Writer::from_diff`].

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Colors, Print, ResetColor, SetColors},
};
use std::io::{Write, stdout};

use core_config::Rgb;

use crate::{Cell, Frame};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    SetColors { fg: Rgb, bg: Rgb },
    Print(String),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    /// Every row of `frame`.
    pub fn from_frame(frame: &Frame) -> Self {
        Self::from_diff(None, frame)
    }

    /// Rows of `next` that differ from `prev`. A size change repaints all.
    pub fn from_diff(prev: Option<&Frame>, next: &Frame) -> Self {
        let prev = prev.filter(|p| p.width == next.width && p.height == next.height);
        let mut w = Self::new();
        let width = usize::from(next.width);
        for y in 0..next.height {
            let start = usize::from(y) * width;
            let row = &next.cells[start..start + width];
            if prev.is_some_and(|p| &p.cells[start..start + width] == row) {
                continue;
            }
            w.push_row(y, row);
        }
        w
    }

    fn push_row(&mut self, y: u16, row: &[Cell]) {
        self.move_to(0, y);
        let mut run = String::new();
        let mut current: Option<(Rgb, Rgb)> = None;
        for cell in row {
            let colors = (cell.style.fg, cell.style.bg);
            if current != Some(colors) {
                self.print(std::mem::take(&mut run));
                self.cmds.push(Command::SetColors {
                    fg: colors.0,
                    bg: colors.1,
                });
                current = Some(colors);
            }
            run.push(cell.ch);
        }
        self.print(run);
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn flush(self) -> Result<()> {
        let mut out = stdout();
        self.flush_to(&mut out)
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        if self.cmds.is_empty() {
            return Ok(());
        }
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::SetColors { fg, bg } => {
                    queue!(out, SetColors(Colors::new(rgb(fg), rgb(bg))))?
                }
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

fn rgb([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}
