//! Title bar composition.
//!
//! Built in two stages like any other status line: `compose_title` yields
//! ordered segments, `format_title` turns them into the left and right
//! strings. Left is `mage · <title>` with `*` while unsaved; right is the
//! pending repeat count (if any) followed by the mode label.

use core_state::Mode;

pub const APP_NAME: &str = "mage";

pub struct TitleContext<'a> {
    pub title: &'a str,
    pub dirty: bool,
    pub mode: Mode,
    pub repeat: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSegment<'a> {
    App,
    Document { title: &'a str, dirty: bool },
    Repeat(&'a str),
    Mode(&'static str),
}

pub fn compose_title<'a>(ctx: &TitleContext<'a>) -> Vec<TitleSegment<'a>> {
    let mut segs = vec![
        TitleSegment::App,
        TitleSegment::Document {
            title: ctx.title,
            dirty: ctx.dirty,
        },
    ];
    if !ctx.repeat.is_empty() {
        segs.push(TitleSegment::Repeat(ctx.repeat));
    }
    segs.push(TitleSegment::Mode(ctx.mode.label()));
    segs
}

/// (left, right) strings for the title bar.
pub fn format_title(segments: &[TitleSegment<'_>]) -> (String, String) {
    let mut left = String::new();
    let mut right: Vec<&str> = Vec::new();
    for seg in segments {
        match seg {
            TitleSegment::App => left.push_str(APP_NAME),
            TitleSegment::Document { title, dirty } => {
                left.push_str(" · ");
                left.push_str(title);
                if *dirty {
                    left.push('*');
                }
            }
            TitleSegment::Repeat(r) => right.push(*r),
            TitleSegment::Mode(m) => right.push(*m),
        }
    }
    (left, right.join(" "))
}

pub fn build_title(ctx: &TitleContext) -> (String, String) {
    format_title(&compose_title(ctx))
}
