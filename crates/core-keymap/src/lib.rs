//! core-keymap: layered `(mode, key) -> action` tables.
//!
//! A [`Keymap`] holds one layer per mode plus a global layer consulted after
//! the mode layer. Lookup is pure and deterministic:
//!
//! 1. the exact chord (code + modifiers) in the mode layer, then globally;
//! 2. the *loose* chord: Shift dropped and a character key lowercased, in the
//!    mode layer, then globally.
//!
//! The loose step is what lets Shift accompany a binding without being part
//! of it (Shift+`j` still resolves `j`); callers read Shift off the original
//! event to decide whether a motion extends the selection.

use core_events::{KeyCode, KeyEvent, KeyModifiers};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::trace;

/// Key descriptor used as the table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyChord {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    /// Shift dropped and a character code lowercased. `None` when identical
    /// to `self`.
    fn loosened(self) -> Option<Self> {
        let code = match self.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_lowercase().next().unwrap_or(c)),
            other => other,
        };
        let loose = Self::new(code, self.mods - KeyModifiers::SHIFT);
        (loose != self).then_some(loose)
    }
}

impl From<KeyEvent> for KeyChord {
    fn from(ev: KeyEvent) -> Self {
        Self::new(ev.code, ev.mods)
    }
}

#[derive(Debug, Clone)]
pub struct Keymap<M, A> {
    layers: HashMap<M, HashMap<KeyChord, A>>,
    global: HashMap<KeyChord, A>,
}

impl<M, A> Default for Keymap<M, A> {
    fn default() -> Self {
        Self {
            layers: HashMap::new(),
            global: HashMap::new(),
        }
    }
}

impl<M, A> Keymap<M, A>
where
    M: Copy + Eq + Hash + std::fmt::Debug,
    A: std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `chord` in `mode`. A later binding for the same chord wins.
    pub fn bind(&mut self, mode: M, chord: KeyChord, action: A) -> &mut Self {
        self.layers.entry(mode).or_default().insert(chord, action);
        self
    }

    /// Bind `chord` in every mode, below the mode layers.
    pub fn bind_global(&mut self, chord: KeyChord, action: A) -> &mut Self {
        self.global.insert(chord, action);
        self
    }

    pub fn resolve(&self, mode: M, key: &KeyEvent) -> Option<&A> {
        let exact = KeyChord::from(*key);
        let mut candidates: SmallVec<[KeyChord; 2]> = SmallVec::new();
        candidates.push(exact);
        candidates.extend(exact.loosened());
        let layer = self.layers.get(&mode);
        let found = candidates.iter().find_map(|chord| {
            layer
                .and_then(|l| l.get(chord))
                .or_else(|| self.global.get(chord))
        });
        trace!(target: "input.keymap", ?mode, key = %key, hit = found.is_some(), "resolve");
        found
    }

    /// Number of bindings in `mode` (excluding global ones).
    pub fn len(&self, mode: M) -> usize {
        self.layers.get(&mode).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.layers.values().all(HashMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Mode {
        A,
        B,
    }

    fn map() -> Keymap<Mode, &'static str> {
        let mut km = Keymap::new();
        km.bind(Mode::A, KeyChord::char('j'), "down")
            .bind(Mode::A, KeyChord::ctrl(KeyCode::Left), "word-left")
            .bind(Mode::A, KeyChord::plain(KeyCode::Left), "left")
            .bind_global(KeyChord::ctrl(KeyCode::Char('q')), "quit")
            .bind_global(KeyChord::char('j'), "global-j");
        km
    }

    #[test]
    fn mode_layer_shadows_global() {
        let km = map();
        assert_eq!(km.resolve(Mode::A, &KeyEvent::char('j')), Some(&"down"));
        assert_eq!(km.resolve(Mode::B, &KeyEvent::char('j')), Some(&"global-j"));
    }

    #[test]
    fn shift_and_case_are_loose() {
        let km = map();
        let shifted = KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT);
        assert_eq!(km.resolve(Mode::A, &shifted), Some(&"down"));
        let sel_word = KeyEvent::new(KeyCode::Left, KeyModifiers::CTRL | KeyModifiers::SHIFT);
        assert_eq!(km.resolve(Mode::A, &sel_word), Some(&"word-left"));
        let ctrl_q_upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::CTRL);
        assert_eq!(km.resolve(Mode::B, &ctrl_q_upper), Some(&"quit"));
    }

    #[test]
    fn modifiers_other_than_shift_are_strict() {
        let km = map();
        assert_eq!(km.resolve(Mode::A, &KeyEvent::ctrl('j')), None);
        assert_eq!(km.resolve(Mode::B, &KeyEvent::char('q')), None);
        assert_eq!(km.len(Mode::A), 3);
        assert_eq!(km.len(Mode::B), 0);
    }
}
