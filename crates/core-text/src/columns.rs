//! Logical column <-> visual column translation.
//!
//! Tabs occupy a fixed `TAB_WIDTH` columns with no realignment to tab stops;
//! every other character occupies one column. The mapping back to a logical
//! column loses information across tabs: a visual column inside a tab resolves
//! to whichever edge of the tab is closer, ties going to the edge after it.

/// Visual width of a tab character.
pub const TAB_WIDTH: usize = 4;

/// Visual width of a single character.
#[inline]
pub fn char_width(c: char) -> usize {
    if c == '\t' { TAB_WIDTH } else { 1 }
}

/// Visual column of logical column `col` in `text`.
pub fn logical_to_visual(text: &str, col: usize) -> usize {
    text.chars().take(col).map(char_width).sum()
}

/// Logical column whose visual extent contains `visual`.
pub fn visual_to_logical(text: &str, visual: usize) -> usize {
    if visual == 0 {
        return 0;
    }
    let mut acc = 0usize;
    let mut len = 0usize;
    for (i, c) in text.chars().enumerate() {
        len = i + 1;
        if c == '\t' {
            let next = acc + TAB_WIDTH;
            if next == visual {
                return i + 1;
            }
            if next < visual {
                acc = next;
                continue;
            }
            return if visual - acc < next - visual { i } else { i + 1 };
        }
        acc += 1;
        if acc == visual {
            return i + 1;
        }
    }
    len
}

/// Visual width of the whole line.
pub fn visual_len(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Expand tabs to spaces for display.
pub fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\t' {
            out.extend(std::iter::repeat_n(' ', TAB_WIDTH));
        } else {
            out.push(c);
        }
    }
    out
}
