//! Incremental lexical highlighter.
//!
//! Each line is tagged with one [`TokenClass`] per character. The only state
//! that crosses a line boundary is whether the line ends inside an open string
//! literal (and which quote opened it); that becomes the next line's starting
//! state. `highlight` walks the buffer top to bottom and re-tokenizes a line
//! when it is dirty or when the state it inherits no longer matches the state
//! it was last tokenized with, so an edit that opens or closes a string keeps
//! propagating forward until some line's inherited state is unchanged.
//!
//! Tokenizer rules per character, first match wins:
//! 1. inside a comment: `Comment`
//! 2. inside a string: `String`, or `StringEnd` for an unescaped matching quote
//! 3. `"` / `'`: `StringStart`
//! 4. punctuation (except `.` directly after a literal): `Comment` for `#` or
//!    a second `/`, otherwise `Punctuation`
//! 5. whitespace: `Plain`
//! 6. a digit outside a name, or `.` continuing a literal: `Literal`
//! 7. anything else: `Name`
//!
//! When a name run ends, a `(` terminator retags the run `Function`; a keyword
//! match retags it `Keyword`.
//!
//! Escapes use a two-state flag rather than counting backslash runs: a
//! backslash flips it and any other character resets it.

use core_text::class::{is_punctuation, is_whitespace};
use core_text::{Buffer, TokenClass};

mod keywords;
pub use keywords::{KEYWORDS, is_keyword};

/// Result of tokenizing a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub styles: Vec<TokenClass>,
    /// Delimiter of a string still open at the end of the line.
    pub ends_in: Option<char>,
}

/// Tokenize one line given the string state it starts in.
pub fn tokenize_line(text: &str, starts_in: Option<char>) -> Tokenized {
    let mut styles: Vec<TokenClass> = Vec::with_capacity(text.len());
    let mut in_string = starts_in;
    let mut real = true;
    let mut in_comment = false;
    let mut prev = ' ';
    let mut run: Option<(usize, String)> = None;
    let mut was_literal = false;

    for (i, c) in text.chars().enumerate() {
        let mut is_name = false;
        let mut is_literal = false;

        if in_comment {
            styles.push(TokenClass::Comment);
        } else if let Some(delim) = in_string {
            if c == delim && real {
                in_string = None;
                styles.push(TokenClass::StringEnd);
            } else {
                styles.push(TokenClass::String);
            }
            real = if c == '\\' { !real } else { true };
        } else if c == '"' || c == '\'' {
            in_string = Some(c);
            real = true;
            styles.push(TokenClass::StringStart);
        } else if is_punctuation(c) && !(c == '.' && was_literal) {
            if c == '#' {
                in_comment = true;
                styles.push(TokenClass::Comment);
            } else if c == '/' && prev == '/' {
                in_comment = true;
                if let Some(last) = styles.last_mut() {
                    *last = TokenClass::Comment;
                }
                styles.push(TokenClass::Comment);
            } else {
                styles.push(TokenClass::Punctuation);
            }
        } else if is_whitespace(c) {
            styles.push(TokenClass::Plain);
        } else if (c.is_ascii_digit() && run.is_none()) || (c == '.' && was_literal) {
            is_literal = true;
            styles.push(TokenClass::Literal);
        } else {
            styles.push(TokenClass::Name);
            run.get_or_insert_with(|| (i, String::new())).1.push(c);
            is_name = true;
        }

        if !is_name {
            if let Some((start, name)) = run.take() {
                // `i` is the terminator; the run is `start..i`.
                if c == '(' {
                    styles[start..i].fill(TokenClass::Function);
                } else if is_keyword(&name) {
                    styles[start..i].fill(TokenClass::Keyword);
                }
            }
        }

        was_literal = is_literal;
        prev = c;
    }

    if let Some((start, name)) = run {
        if is_keyword(&name) {
            styles[start..].fill(TokenClass::Keyword);
        }
    }

    Tokenized {
        styles,
        ends_in: in_string,
    }
}

/// Re-tag every line that needs it. Returns how many lines were tokenized.
pub fn highlight(buffer: &mut Buffer) -> usize {
    let mut inherited: Option<char> = None;
    let mut retokenized = 0usize;
    for line in buffer.lines_mut() {
        if line.dirty || line.starts_in != inherited {
            let out = tokenize_line(line.text(), inherited);
            line.styles = out.styles;
            line.ends_in = out.ends_in;
            line.starts_in = inherited;
            line.dirty = false;
            retokenized += 1;
        }
        inherited = line.ends_in;
    }
    if retokenized > 0 {
        tracing::trace!(target: "syntax.highlight", retokenized, "highlight");
    }
    retokenized
}
