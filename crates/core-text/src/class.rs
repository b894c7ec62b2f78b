//! Coarse character classes used by word motion, word deletion and the
//! highlighter.

/// Characters treated as punctuation.
pub const PUNCTUATION: &str = "./>,<-=+[]{}|\\)(*&^%$#@!`~:;'\"?";

/// Characters treated as whitespace.
pub const WHITESPACE: &str = " \t";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Normal,
    Whitespace,
    Punctuation,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        if WHITESPACE.contains(c) {
            CharClass::Whitespace
        } else if PUNCTUATION.contains(c) {
            CharClass::Punctuation
        } else {
            CharClass::Normal
        }
    }

    /// Word boundaries only distinguish `Normal` from everything else.
    #[inline]
    pub fn is_normal(self) -> bool {
        self == CharClass::Normal
    }
}

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(c)
}

pub fn is_whitespace(c: char) -> bool {
    WHITESPACE.contains(c)
}
