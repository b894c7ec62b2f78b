#![allow(dead_code)] // Each test binary uses a subset of helpers.

use core_actions::{EditorKeymap, KeyOutcome, MemoryClipboard, default_keymap, process_key};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::{Mode, Session};
use core_text::Buffer;

/// A session plus everything needed to feed it keys.
pub struct Harness {
    pub keymap: EditorKeymap,
    pub session: Session,
    pub clipboard: MemoryClipboard,
}

impl Harness {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            keymap: default_keymap(),
            session: Session::from_buffer(Buffer::from_lines(lines.iter().copied())),
            clipboard: MemoryClipboard::new(),
        }
    }

    pub fn normal(lines: &[&str]) -> Self {
        let mut h = Self::new(lines);
        h.session.set_mode(Mode::Normal);
        h
    }

    pub fn key(&mut self, key: KeyEvent) -> KeyOutcome {
        process_key(&self.keymap, &mut self.session, &key, &mut self.clipboard)
    }

    /// Feed each character as an unmodified key (uppercase gets Shift).
    pub fn keys(&mut self, s: &str) {
        for c in s.chars() {
            let mods = if c.is_ascii_uppercase() {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::empty()
            };
            self.key(KeyEvent::new(KeyCode::Char(c), mods));
        }
    }

    pub fn press(&mut self, code: KeyCode) -> KeyOutcome {
        self.key(KeyEvent::plain(code))
    }

    pub fn lines(&self) -> Vec<String> {
        self.session
            .buffer()
            .lines()
            .iter()
            .map(|l| l.text().to_string())
            .collect()
    }
}

pub fn shift(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}
