//! A single buffer line plus the highlight cache the syntax pass keeps on it.
//!
//! Text is addressed by *logical column* (character index). Byte offsets never
//! leave this module; callers slice with `head`/`tail`/`slice`.

/// Per-character token tag written by the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenClass {
    /// Whitespace and anything not yet tagged.
    #[default]
    Plain,
    Name,
    Keyword,
    Function,
    /// Opening quote of a string literal.
    StringStart,
    String,
    /// Closing quote of a string literal.
    StringEnd,
    Punctuation,
    Comment,
    Literal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    text: String,
    /// One tag per character once the line is clean.
    pub styles: Vec<TokenClass>,
    /// Set by every text write; cleared by the highlighter.
    pub dirty: bool,
    /// Delimiter of the string this line starts inside, if any.
    pub starts_in: Option<char>,
    /// Delimiter of the string still open at the end of this line, if any.
    pub ends_in: Option<char>,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.ends_with('\r') {
            text.pop();
        }
        Self {
            text,
            styles: Vec::new(),
            dirty: true,
            starts_in: None,
            ends_in: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Always marks the line dirty.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Last character of the line.
    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    /// Byte offset of logical column `col`, clamped to the end.
    fn byte_of(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Text before `col`.
    pub fn head(&self, col: usize) -> &str {
        &self.text[..self.byte_of(col)]
    }

    /// Text from `col` to the end.
    pub fn tail(&self, col: usize) -> &str {
        &self.text[self.byte_of(col)..]
    }

    /// Text in `[start, end)` (logical columns, clamped).
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let a = self.byte_of(start);
        let b = self.byte_of(end).max(a);
        &self.text[a..b]
    }

    /// Number of leading tab characters.
    pub fn leading_tabs(&self) -> usize {
        self.text.chars().take_while(|&c| c == '\t').count()
    }

    /// Style for `col`, `Plain` when the cache is stale or short.
    pub fn style_at(&self, col: usize) -> TokenClass {
        self.styles.get(col).copied().unwrap_or_default()
    }
}
