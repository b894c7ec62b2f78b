//! Screen geometry for the editor's panes.
//!
//! Row 0 is the title bar. The main pane fills the rest, giving up its bottom
//! six rows while the find bar is open: each of the Find and Replace boxes is
//! one text row framed by a label row above and a blank row below. The prompt
//! box is a fixed 30x3 region centred on screen. All coordinates are terminal
//! cells; degenerate sizes clamp instead of underflowing.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

pub const PROMPT_WIDTH: u16 = 30;
pub const PROMPT_HEIGHT: u16 = 3;
/// Rows taken from the main pane by the find bar.
pub const FIND_BAR_ROWS: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    pub main: LayoutRegion,
    pub find: Option<LayoutRegion>,
    pub replace: Option<LayoutRegion>,
    pub prompt: LayoutRegion,
}

impl Layout {
    pub fn compute(width: u16, height: u16, find_open: bool) -> Self {
        let main_height = if find_open {
            height.saturating_sub(FIND_BAR_ROWS).max(1)
        } else {
            height.saturating_sub(1)
        };
        let box_width = width.saturating_sub(4);
        let (find, replace) = if find_open {
            (
                Some(LayoutRegion::new(2, height.saturating_sub(4), box_width, 1)),
                Some(LayoutRegion::new(2, height.saturating_sub(2), box_width, 1)),
            )
        } else {
            (None, None)
        };
        let prompt = LayoutRegion::new(
            width.saturating_sub(PROMPT_WIDTH) / 2,
            (height / 2).saturating_sub(1),
            PROMPT_WIDTH,
            PROMPT_HEIGHT,
        );
        Self {
            width,
            height,
            main: LayoutRegion::new(0, 1, width, main_height),
            find,
            replace,
            prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_pane_fills_below_title() {
        let l = Layout::compute(80, 24, false);
        assert_eq!(l.main, LayoutRegion::new(0, 1, 80, 23));
        assert!(l.find.is_none());
        assert_eq!(l.prompt, LayoutRegion::new(25, 11, 30, 3));
    }

    #[test]
    fn find_bar_shrinks_main_and_places_boxes() {
        let l = Layout::compute(80, 24, true);
        assert_eq!(l.main.height, 18);
        assert_eq!(l.find, Some(LayoutRegion::new(2, 20, 76, 1)));
        assert_eq!(l.replace, Some(LayoutRegion::new(2, 22, 76, 1)));
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let l = Layout::compute(3, 2, true);
        assert_eq!(l.main.height, 1);
        assert_eq!(l.prompt.x, 0);
        assert!(l.find.is_some_and(|r| r.width == 0));
    }

    #[test]
    fn contains_is_half_open() {
        let r = LayoutRegion::new(2, 3, 4, 1);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 3));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 4));
    }
}
