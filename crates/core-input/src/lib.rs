//! Terminal input service.
//!
//! A Tokio task reads `crossterm::EventStream`, maps each event into
//! `core_events` types and forwards it over a bounded channel. Key releases
//! and focus changes are dropped; bracketed paste arrives as one
//! [`InputEvent::Paste`].

mod async_service;
pub use async_service::AsyncInputShutdown;

use async_service::spawn_async_event_task;

use core_events::{
    Event, InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKind,
    KeyModifiers as CMods, MouseButton as CButton, MouseEvent as CMouseEvent,
    MouseEventKind as CMouseKind,
};
use tokio::task::JoinHandle;

#[inline]
pub(crate) fn log_paste(text: &str) {
    tracing::trace!(target: "input.paste", len = text.len(), lines = text.lines().count(), "paste");
}

/// Spawn the async input service backed by `crossterm::EventStream`.
///
/// Returns the `JoinHandle` for the background task alongside a shutdown handle
/// that can be used to request immediate termination.
pub fn spawn_async_input(
    sender: tokio::sync::mpsc::Sender<Event>,
) -> (JoinHandle<()>, AsyncInputShutdown) {
    spawn_async_event_task(sender)
}

/// Owns the running input task.
pub struct AsyncInputService {
    handle: JoinHandle<()>,
    shutdown: AsyncInputShutdown,
}

impl AsyncInputService {
    pub fn start(sender: tokio::sync::mpsc::Sender<Event>) -> Self {
        let (handle, shutdown) = spawn_async_input(sender);
        Self { handle, shutdown }
    }

    /// Signal the task and wait briefly for it to finish.
    pub async fn stop(self) {
        self.shutdown.signal();
        match tokio::time::timeout(std::time::Duration::from_millis(200), self.handle).await {
            Ok(Ok(())) => tracing::debug!(target: "input.thread", "input_task_joined"),
            Ok(Err(err)) => tracing::warn!(target: "input.thread", ?err, "input_task_join_error"),
            Err(_) => tracing::warn!(target: "input.thread", "input_task_join_timeout"),
        }
    }
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

/// `None` for releases and keys the editor has no name for.
pub fn map_key(key: &CKeyEvent) -> Option<KeyEvent> {
    if !matches!(key.kind, CKind::Press | CKind::Repeat) {
        return None;
    }
    let mut mods = map_mods(key.modifiers);
    let code = match key.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::BackTab => {
            mods |= KeyModifiers::SHIFT;
            KeyCode::Tab
        }
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    Some(KeyEvent::new(code, mods))
}

fn map_button(b: CButton) -> MouseButton {
    match b {
        CButton::Left => MouseButton::Left,
        CButton::Middle => MouseButton::Middle,
        CButton::Right => MouseButton::Right,
    }
}

pub fn map_mouse(ev: &CMouseEvent) -> Option<MouseEvent> {
    let kind = match ev.kind {
        CMouseKind::Down(b) => MouseEventKind::Down(map_button(b)),
        CMouseKind::Up(b) => MouseEventKind::Up(map_button(b)),
        CMouseKind::Drag(b) => MouseEventKind::Drag(map_button(b)),
        CMouseKind::ScrollUp => MouseEventKind::ScrollUp,
        CMouseKind::ScrollDown => MouseEventKind::ScrollDown,
        CMouseKind::Moved => MouseEventKind::Moved,
        CMouseKind::ScrollLeft | CMouseKind::ScrollRight => return None,
    };
    Some(MouseEvent {
        kind,
        column: ev.column,
        row: ev.row,
        mods: map_mods(ev.modifiers),
    })
}

pub fn map_event(ev: CEvent) -> Option<InputEvent> {
    match ev {
        CEvent::Key(k) => map_key(&k).map(InputEvent::Key),
        CEvent::Mouse(m) => map_mouse(&m).map(InputEvent::Mouse),
        CEvent::Resize(w, h) => Some(InputEvent::Resize(w, h)),
        CEvent::Paste(text) => Some(InputEvent::Paste(text)),
        CEvent::FocusGained | CEvent::FocusLost => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: CKeyCode, mods: CMods, kind: CKind) -> CKeyEvent {
        CKeyEvent::new_with_kind_and_state(code, mods, kind, KeyEventState::NONE)
    }

    #[test]
    fn releases_are_dropped() {
        assert_eq!(map_key(&key(CKeyCode::Char('a'), CMods::NONE, CKind::Release)), None);
        assert_eq!(
            map_key(&key(CKeyCode::Char('a'), CMods::NONE, CKind::Repeat)),
            Some(KeyEvent::char('a'))
        );
    }

    #[test]
    fn modifiers_and_backtab_map() {
        assert_eq!(
            map_key(&key(CKeyCode::Char('s'), CMods::CONTROL | CMods::ALT, CKind::Press)),
            Some(KeyEvent::new(
                KeyCode::Char('s'),
                KeyModifiers::CTRL | KeyModifiers::ALT
            ))
        );
        assert_eq!(
            map_key(&key(CKeyCode::BackTab, CMods::NONE, CKind::Press)),
            Some(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT))
        );
        assert_eq!(map_key(&key(CKeyCode::Insert, CMods::NONE, CKind::Press)), None);
    }

    #[test]
    fn mouse_and_focus_events() {
        let m = CMouseEvent {
            kind: CMouseKind::Drag(CButton::Left),
            column: 3,
            row: 4,
            modifiers: CMods::SHIFT,
        };
        assert_eq!(
            map_event(CEvent::Mouse(m)),
            Some(InputEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Drag(MouseButton::Left),
                column: 3,
                row: 4,
                mods: KeyModifiers::SHIFT,
            }))
        );
        assert_eq!(map_event(CEvent::FocusLost), None);
        assert_eq!(
            map_event(CEvent::Paste("x\ny".into())),
            Some(InputEvent::Paste("x\ny".into()))
        );
    }
}
