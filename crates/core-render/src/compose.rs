//! Paint an [`EditorModel`] into a [`Frame`].
//!
//! Draw order: main pane, overlay (prompt or yes/no), find bar, title bar.
//! Later layers simply overwrite earlier cells.

use core_model::{EditorModel, Focus, LayoutRegion, Overlay, Pane};
use core_state::Mode;
use core_text::columns::char_width;
use core_text::{Line, Position};
use tracing::trace;

use crate::status::{TitleContext, build_title};
use crate::{CellFlags, CellStyle, Frame, Theme};

pub const FIND_LABEL: &str = "Find Text";
pub const REPLACE_LABEL: &str = "Replace With";

pub fn compose(model: &EditorModel, theme: &Theme) -> Frame {
    let layout = model.layout();
    let mut frame = Frame::new(layout.width, layout.height);
    frame.fill(0, 0, layout.width, layout.height, theme.text());

    if model.is_splash() {
        draw_splash(&mut frame, theme);
        return frame;
    }

    let focus = model.focus();
    draw_pane(&mut frame, theme, model.main(), layout.main, focus == Focus::Main);

    match model.overlay() {
        Overlay::None => {}
        Overlay::Prompt { label, .. } => {
            draw_outline(&mut frame, theme, layout.prompt, label);
            draw_pane(&mut frame, theme, model.prompt(), layout.prompt, focus == Focus::Prompt);
        }
        Overlay::Confirm { label, yes } => {
            draw_outline(&mut frame, theme, layout.prompt, label);
            draw_yes_no(&mut frame, theme, layout.prompt, *yes);
        }
    }

    if let (Some(find), Some(replace)) = (layout.find, layout.replace) {
        draw_pane(&mut frame, theme, model.find(), find, focus == Focus::Find);
        draw_pane(&mut frame, theme, model.replace(), replace, focus == Focus::Replace);
        draw_outline(&mut frame, theme, find, FIND_LABEL);
        draw_outline(&mut frame, theme, replace, REPLACE_LABEL);
    }

    draw_title_bar(&mut frame, theme, model);
    trace!(target: "render.compose", width = frame.width, height = frame.height, focus = ?focus, "composed");
    frame
}

fn draw_title_bar(frame: &mut Frame, theme: &Theme, model: &EditorModel) {
    let session = &model.main().session;
    let ctx = TitleContext {
        title: &model.document().title,
        dirty: model.is_dirty(),
        mode: session.mode(),
        repeat: session.repeat_string(),
    };
    let (left, right) = build_title(&ctx);
    let style = theme.title();
    frame.fill(0, 0, frame.width, 1, style);
    frame.put_str(0, 0, &left, style);
    let right_len = right.chars().count() as u16;
    frame.put_str(frame.width.saturating_sub(right_len), 0, &right, style);
}

fn draw_splash(frame: &mut Frame, theme: &Theme) {
    let lines = [
        format!("mage v{}", env!("CARGO_PKG_VERSION")),
        "a small modal editor".to_string(),
    ];
    for (i, line) in lines.iter().enumerate() {
        let len = line.chars().count() as u16;
        let x = frame.width.saturating_sub(len) / 2;
        let y = (frame.height / 2 + i as u16).saturating_sub(1);
        frame.put_str(x, y, line, theme.splash());
    }
}

/// Label row above, blank row below and two columns each side of `region`.
fn draw_outline(frame: &mut Frame, theme: &Theme, region: LayoutRegion, label: &str) {
    let style = theme.title();
    let x = region.x.saturating_sub(2);
    let outer = region.width + 4;
    if let Some(top) = region.y.checked_sub(1) {
        frame.fill(x, top, outer, 1, style);
        frame.put_str(x, top, label, style);
    }
    frame.fill(x, region.y + region.height, outer, 1, style);
    for row in region.y..region.y + region.height {
        frame.fill(x, row, 2, 1, style);
        frame.fill(region.x + region.width, row, 2, 1, style);
    }
}

fn draw_yes_no(frame: &mut Frame, theme: &Theme, region: LayoutRegion, yes: bool) {
    frame.fill(region.x, region.y, region.width, region.height, theme.text());
    let (yes_style, no_style) = if yes {
        (theme.inverted(), theme.text())
    } else {
        (theme.text(), theme.inverted())
    };
    frame.put_str(region.x + 2, region.y + 1, "Yes", yes_style);
    frame.put_str(region.x + region.width.saturating_sub(4), region.y + 1, "No", no_style);
}

/// Gutter text for `row`: the cursor row shows its 1-based number left
/// aligned, every other row its distance to the cursor right aligned.
fn line_number(row: usize, cursor_row: usize, gutter: usize) -> String {
    let digits = gutter.saturating_sub(1);
    if row == cursor_row {
        format!("{:<gutter$}", row + 1)
    } else {
        format!("{:>digits$} ", row.abs_diff(cursor_row))
    }
}

fn draw_pane(frame: &mut Frame, theme: &Theme, pane: &Pane, region: LayoutRegion, focused: bool) {
    let session = &pane.session;
    let buffer = session.buffer();
    let cursor = session.cursor();
    let cursor_pos = cursor.position();
    let selection = cursor.selection();
    let view = &pane.view;
    let gutter = view.gutter(buffer.line_count());
    let text_width = usize::from(region.width).saturating_sub(gutter);
    let cursor_style = match session.mode() {
        Mode::Insert => theme.insert_cursor(),
        Mode::Normal => theme.normal_cursor(),
    }
    .with(CellFlags::CURSOR);
    let gutter_style = theme.gutter().with(CellFlags::GUTTER);

    for screen_row in 0..region.height {
        let y = region.y + screen_row;
        let row = view.first_line + usize::from(screen_row);
        frame.fill(region.x, y, region.width, 1, theme.text());

        if row >= buffer.line_count() {
            if gutter > 0 {
                let tilde = format!("{:>w$} ", "~", w = gutter - 1);
                frame.put_str(region.x, y, &tilde, gutter_style);
            }
            continue;
        }
        if gutter > 0 {
            frame.put_str(region.x, y, &line_number(row, cursor_pos.row, gutter), gutter_style);
        }

        let line = buffer.line(row);
        let line_len = line.len();
        let style_for = |col: usize| -> CellStyle {
            let pos = Position::new(row, col);
            if focused && pos == cursor_pos {
                cursor_style
            } else if selection.is_some_and(|s| s.contains(pos)) {
                theme.selection().with(CellFlags::SELECTED)
            } else if col < line_len {
                theme.token(line.style_at(col))
            } else {
                theme.text()
            }
        };
        draw_line(
            frame,
            line,
            line_len,
            (region.x + gutter as u16, y),
            view.left_col,
            text_width,
            theme,
            style_for,
        );
    }
}

/// Paint one buffer row starting at visual column `left_col`. A tab spans
/// several cells: the first takes the char's style, the rest keep only the
/// selection. The cell after the last char shows the cursor or a selected
/// line break.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    frame: &mut Frame,
    line: &Line,
    line_len: usize,
    (x, y): (u16, u16),
    left_col: usize,
    width: usize,
    theme: &Theme,
    style_for: impl Fn(usize) -> CellStyle,
) {
    let mut visual = 0usize;
    let mut put = |visual: usize, ch: char, style: CellStyle| {
        if visual >= left_col && visual - left_col < width {
            frame.set(x + (visual - left_col) as u16, y, ch, style);
        }
    };
    for (col, ch) in line.chars().enumerate() {
        if visual >= left_col + width {
            return;
        }
        let style = style_for(col);
        if ch == '\t' {
            let rest = if style.flags.contains(CellFlags::SELECTED) {
                style
            } else {
                theme.text()
            };
            for i in 0..char_width(ch) {
                put(visual + i, ' ', if i == 0 { style } else { rest });
            }
        } else {
            put(visual, ch, style);
        }
        visual += char_width(ch);
    }
    put(visual, ' ', style_for(line_len));
}
