//! Document flows: quit, save, save-as and open, including the confirm and
//! prompt overlays they raise.

use std::path::{Path, PathBuf};

use core_actions::io_ops::{OpenFileResult, Storage, WriteFileResult, open_file, write_file};
use core_config::SavedPlace;
use core_events::{KeyCode, KeyEvent};
use core_state::{Cursor, Mode};
use core_text::Buffer;

use crate::{
    AfterSave, CONFIRM_UNSAVED, Document, EditorModel, Focus, Overlay, PromptPurpose,
    SAVE_AS_LABEL,
};

impl EditorModel {
    pub(crate) fn request_quit(&mut self, storage: &dyn Storage) {
        if self.is_dirty() {
            self.confirm_unsaved(AfterSave::Exit);
        } else {
            self.finish(storage);
        }
    }

    /// Record the place for the current document and flag exit.
    fn finish(&mut self, storage: &dyn Storage) {
        self.remember_place(storage);
        self.exit = true;
        tracing::info!(target: "model.exit", title = %self.document.title, "exit_requested");
    }

    pub fn remember_place(&mut self, storage: &dyn Storage) {
        let Some(path) = self.document.path.as_deref() else {
            return;
        };
        let c = self.main.session.cursor();
        self.places.remember(SavedPlace {
            path: storage.absolute(path),
            row: c.row,
            col: c.col,
            anchor_row: c.anchor_row,
            anchor_col: c.anchor_col,
        });
    }

    fn confirm_unsaved(&mut self, then: AfterSave) {
        self.after_save = then;
        self.open_overlay(
            Overlay::Confirm {
                label: CONFIRM_UNSAVED.to_string(),
                yes: true,
            },
            Focus::Confirm,
        );
    }

    pub(crate) fn confirm_key(&mut self, key: &KeyEvent, storage: &dyn Storage) {
        let Overlay::Confirm { yes, .. } = &mut self.overlay else {
            return;
        };
        let lower = match key.code {
            KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
            _ => None,
        };
        match (key.code, lower) {
            (_, Some('y' | 'h')) | (KeyCode::Left, _) => *yes = true,
            (_, Some('n' | 'l')) | (KeyCode::Right, _) => *yes = false,
            (KeyCode::Tab, _) => *yes = !*yes,
            (KeyCode::Esc, _) => {
                self.after_save = AfterSave::Nothing;
                self.close_overlay();
            }
            (KeyCode::Enter, _) => {
                let answer = *yes;
                self.close_overlay();
                let then = std::mem::take(&mut self.after_save);
                tracing::debug!(target: "model.save", answer, ?then, "confirm_answered");
                if answer {
                    self.save(then, storage);
                } else {
                    self.run_after_save(then, storage);
                }
            }
            _ => {}
        }
    }

    /// Write the document, then run `then`. Without a path this opens the
    /// save-as prompt instead. Returns true when the text was written.
    pub(crate) fn save(&mut self, then: AfterSave, storage: &dyn Storage) -> bool {
        let text = self.main.session.text();
        match write_file(storage, self.document.path.as_deref(), &text) {
            WriteFileResult::Written => {
                self.document.last_saved = text;
                tracing::info!(target: "model.save", title = %self.document.title, "saved");
                self.run_after_save(then, storage);
                true
            }
            WriteFileResult::NoFilename => {
                self.open_save_as(then);
                false
            }
            WriteFileResult::Error(msg) => {
                self.after_save = AfterSave::Nothing;
                self.show_message(format!("Error writing file: {msg}"));
                false
            }
        }
    }

    fn run_after_save(&mut self, then: AfterSave, storage: &dyn Storage) {
        match then {
            AfterSave::Nothing => {}
            AfterSave::Exit => self.finish(storage),
            AfterSave::Open(path) => self.load_path(&path, storage),
        }
    }

    pub(crate) fn open_save_as(&mut self, then: AfterSave) {
        self.after_save = then;
        self.prompt.session = self.fresh_session();
        self.open_overlay(
            Overlay::Prompt {
                label: SAVE_AS_LABEL.to_string(),
                purpose: PromptPurpose::SaveAs,
            },
            Focus::Prompt,
        );
    }

    /// Enter in the prompt box.
    pub(crate) fn submit_prompt(&mut self, storage: &dyn Storage) {
        let Overlay::Prompt { purpose, .. } = &self.overlay else {
            return;
        };
        let purpose = *purpose;
        self.close_overlay();
        if purpose == PromptPurpose::Message {
            return;
        }
        let then = std::mem::take(&mut self.after_save);
        let name = self.prompt.session.text();
        if name.is_empty() {
            tracing::debug!(target: "model.save", "save_as_cancelled");
            return;
        }
        let previous = std::mem::replace(&mut self.document.path, Some(PathBuf::from(&name)));
        if self.save(then, storage) {
            self.document.title = crate::title_for(Path::new(&name));
        } else {
            self.document.path = previous;
        }
    }

    /// Esc in the prompt box. Returns true when the overlay was dismissed.
    pub(crate) fn cancel_prompt(&mut self) -> bool {
        let Overlay::Prompt { purpose, .. } = &self.overlay else {
            return false;
        };
        let dismiss = *purpose == PromptPurpose::Message || self.prompt.session.mode() == Mode::Normal;
        if dismiss {
            self.after_save = AfterSave::Nothing;
            self.close_overlay();
        }
        dismiss
    }

    /// Open `path`, asking first when there are unsaved changes.
    pub fn open_path(&mut self, path: PathBuf, storage: &dyn Storage) {
        if self.is_dirty() {
            self.confirm_unsaved(AfterSave::Open(path));
        } else {
            self.load_path(&path, storage);
        }
    }

    /// Replace the main buffer with the contents of `path`.
    pub fn load_path(&mut self, path: &Path, storage: &dyn Storage) {
        self.splash = false;
        let lines = match open_file(storage, path) {
            OpenFileResult::Opened { lines } => lines,
            OpenFileResult::Error(msg) => {
                self.show_message(format!("Error opening file: {msg}"));
                return;
            }
        };
        let session = &mut self.main.session;
        session.replace_all(Buffer::from_lines(lines));
        session.set_mode(Mode::Insert);
        session.refresh_highlight();
        self.document = Document::at(Some(path.to_path_buf()));
        self.document.last_saved = session.text();
        self.main.view.first_line = 0;
        self.main.view.left_col = 0;

        let key = storage.absolute(path);
        if let Some(place) = self.places.get(&key) {
            session.restore_cursor(Cursor {
                row: place.row,
                col: place.col,
                anchor_row: place.anchor_row,
                anchor_col: place.anchor_col,
                preferred_visual_col: 0,
            });
        }
        self.main.scroll_to_cursor();
        tracing::info!(
            target: "model.open",
            title = %self.document.title,
            lines = self.main.session.buffer().line_count(),
            "document_opened"
        );
    }

    pub(crate) fn open_settings(&mut self, storage: &dyn Storage) {
        let path = self.settings_path.clone();
        self.open_path(path, storage);
    }
}
