//! Colors resolved from the `[theme]` config table.

use core_config::{Rgb, ThemeConfig};
use core_text::TokenClass;

use crate::CellStyle;

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];
pub const SELECTION: Rgb = [100, 100, 100];
pub const NORMAL_CURSOR: Rgb = [205, 0, 0];
pub const SPLASH: Rgb = [219, 150, 53];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    colors: ThemeConfig,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            colors: config.clone(),
        }
    }

    pub fn background(&self) -> Rgb {
        self.colors.background
    }

    pub fn token(&self, class: TokenClass) -> CellStyle {
        let c = &self.colors;
        let fg = match class {
            TokenClass::Plain => WHITE,
            TokenClass::Name => c.name,
            TokenClass::Keyword => c.keyword,
            TokenClass::Function => c.function,
            TokenClass::StringStart | TokenClass::String | TokenClass::StringEnd => c.string,
            TokenClass::Punctuation => c.punctuation,
            TokenClass::Comment => c.comment,
            TokenClass::Literal => c.literal,
        };
        CellStyle::new(fg, c.background)
    }

    pub fn text(&self) -> CellStyle {
        CellStyle::new(WHITE, self.colors.background)
    }

    pub fn title(&self) -> CellStyle {
        CellStyle::new(WHITE, self.colors.title)
    }

    pub fn gutter(&self) -> CellStyle {
        CellStyle::new(WHITE, self.colors.gutter)
    }

    pub fn selection(&self) -> CellStyle {
        CellStyle::new(WHITE, SELECTION)
    }

    pub fn insert_cursor(&self) -> CellStyle {
        CellStyle::new(BLACK, WHITE)
    }

    pub fn normal_cursor(&self) -> CellStyle {
        CellStyle::new(BLACK, NORMAL_CURSOR)
    }

    pub fn inverted(&self) -> CellStyle {
        CellStyle::new(BLACK, WHITE)
    }

    pub fn splash(&self) -> CellStyle {
        CellStyle::new(SPLASH, self.colors.background)
    }
}
