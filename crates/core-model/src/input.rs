//! Key, mouse and paste routing.

use core_actions::io_ops::Storage;
use core_actions::{
    Action, Clipboard, EditKind, Resolved, WorkspaceCommand, process_key, run_action,
};
use core_events::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use core_state::Mode;

use crate::{EditorModel, Focus, Overlay};

impl EditorModel {
    /// Handle one key. Returns true when the editor should terminate.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        clipboard: &mut dyn Clipboard,
        storage: &dyn Storage,
    ) -> bool {
        core_events::KEYPRESS_TOTAL.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        if self.splash {
            self.start_new(None);
        }
        match self.focus {
            Focus::Confirm => self.confirm_key(key, storage),
            Focus::Prompt => self.prompt_key(key, clipboard, storage),
            Focus::Find | Focus::Replace => self.find_bar_key(key, clipboard, storage),
            Focus::Main => {
                let outcome =
                    process_key(&self.keymap, &mut self.main.session, key, clipboard);
                if let Some(command) = outcome.command {
                    self.run_command(command, storage);
                }
            }
        }
        self.scroll_all();
        self.exit
    }

    fn run_command(&mut self, command: WorkspaceCommand, storage: &dyn Storage) {
        tracing::debug!(target: "model.command", ?command, focus = ?self.focus, "workspace_command");
        match command {
            WorkspaceCommand::Quit => self.request_quit(storage),
            WorkspaceCommand::Save => {
                self.save(Default::default(), storage);
            }
            WorkspaceCommand::SaveAs => self.open_save_as(Default::default()),
            WorkspaceCommand::OpenSettings => self.open_settings(storage),
            WorkspaceCommand::OpenFind => self.open_find(),
            WorkspaceCommand::ToggleReplace => {
                if self.find_open {
                    self.toggle_replace();
                }
            }
        }
    }

    fn prompt_key(&mut self, key: &KeyEvent, clipboard: &mut dyn Clipboard, storage: &dyn Storage) {
        match key.code {
            KeyCode::Enter => self.submit_prompt(storage),
            KeyCode::Esc if self.cancel_prompt() => {}
            _ => {
                let message = matches!(
                    self.overlay,
                    Overlay::Prompt {
                        purpose: crate::PromptPurpose::Message,
                        ..
                    }
                );
                if !message {
                    // workspace commands are not available from the prompt
                    process_key(&self.keymap, &mut self.prompt.session, key, clipboard);
                }
            }
        }
    }

    fn find_bar_key(&mut self, key: &KeyEvent, clipboard: &mut dyn Clipboard, storage: &dyn Storage) {
        let mode = self.focused_pane_mut().session.mode();
        let plain_char = match key.code {
            KeyCode::Char(c) if !key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
                Some(c.to_ascii_lowercase())
            }
            _ => None,
        };
        match (key.code, mode, plain_char) {
            (KeyCode::Esc, Mode::Normal, _) => self.close_find(),
            (_, Mode::Normal, Some('r' | 'f')) => {
                let _ = self.focused_pane_mut().session.take_repeat();
                self.toggle_replace();
            }
            (KeyCode::Enter, _, _) => {
                if self.focus == Focus::Replace {
                    self.replace_next();
                } else {
                    self.find_next(key.shift());
                }
            }
            _ => {
                let keymap = &self.keymap;
                let pane = match self.focus {
                    Focus::Replace => &mut self.replace,
                    _ => &mut self.find,
                };
                let outcome = process_key(keymap, &mut pane.session, key, clipboard);
                if let Some(command) = outcome.command {
                    self.run_command(command, storage);
                }
            }
        }
    }

    /// Bracketed paste into the focused pane.
    pub fn handle_paste(&mut self, text: &str, clipboard: &mut dyn Clipboard) {
        if self.splash {
            self.start_new(None);
        }
        if self.focus == Focus::Confirm {
            return;
        }
        let pane = self.focused_pane_mut();
        run_action(
            &mut pane.session,
            Resolved::once(Action::Edit(EditKind::InsertText(text.to_string()))),
            clipboard,
        );
        pane.scroll_to_cursor();
    }

    /// Handle one mouse event. Returns true when a repaint is needed.
    pub fn handle_mouse(&mut self, ev: &MouseEvent) -> bool {
        if self.splash {
            return false;
        }
        let overlay_open = !matches!(self.overlay, Overlay::None);
        let line_count = self.main.session.buffer().line_count();
        let rows = self.scroll_sensitivity as isize;
        match ev.kind {
            MouseEventKind::ScrollUp => {
                self.main.view.scroll_by(-rows, line_count);
                true
            }
            MouseEventKind::ScrollDown => {
                self.main.view.scroll_by(rows, line_count);
                true
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if overlay_open {
                    return false;
                }
                let l = self.layout;
                if l.find.is_some_and(|r| r.contains(ev.column, ev.row)) {
                    self.focus = Focus::Find;
                    return true;
                }
                if l.replace.is_some_and(|r| r.contains(ev.column, ev.row)) {
                    self.focus = Focus::Replace;
                    return true;
                }
                if !l.main.contains(ev.column, ev.row) {
                    return false;
                }
                self.focus = Focus::Main;
                self.mouse_down = true;
                self.place_main_cursor(ev, false);
                true
            }
            MouseEventKind::Drag(MouseButton::Left) if self.mouse_down && !overlay_open => {
                self.place_main_cursor(ev, true);
                true
            }
            MouseEventKind::Up(_) => {
                self.mouse_down = false;
                false
            }
            _ => false,
        }
    }

    fn place_main_cursor(&mut self, ev: &MouseEvent, keep_anchor: bool) {
        let region = self.layout.main;
        let x = usize::from(ev.column.saturating_sub(region.x));
        let y = usize::from(ev.row.saturating_sub(region.y));
        let pos = self.main.view.position_at(self.main.session.buffer(), x, y);
        self.main.session.set_cursor(pos, keep_anchor);
        self.main.scroll_to_cursor();
        tracing::trace!(target: "model.mouse", row = pos.row, col = pos.col, keep_anchor, "cursor_placed");
    }
}
