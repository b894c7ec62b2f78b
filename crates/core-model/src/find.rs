//! Find / replace bar.

use core_text::Buffer;

use crate::{EditorModel, Focus};

impl EditorModel {
    /// Open the bar with focus on the find box. A selection in the main pane
    /// becomes the (selected) search text.
    pub(crate) fn open_find(&mut self) {
        let selected = self.main.session.selected_text();
        if !selected.is_empty() {
            let mut session = self.fresh_session();
            session.replace_all(Buffer::from_text(&selected));
            session.select_all();
            session.refresh_highlight();
            self.find.session = session;
        }
        self.find_open = true;
        self.focus = Focus::Find;
        self.apply_layout();
        tracing::debug!(target: "model.find", prefilled = !selected.is_empty(), "find_opened");
    }

    pub(crate) fn close_find(&mut self) {
        self.find_open = false;
        self.focus = Focus::Main;
        self.apply_layout();
    }

    pub(crate) fn toggle_replace(&mut self) {
        self.focus = match self.focus {
            Focus::Find => Focus::Replace,
            _ => Focus::Find,
        };
    }

    /// Select the next match of the find text in the main pane.
    pub(crate) fn find_next(&mut self, backwards: bool) -> bool {
        let needle = self.find.session.text();
        let found = self.main.session.select_next(&needle, backwards);
        if found {
            self.main.session.checkpoint();
            self.main.scroll_to_cursor();
        }
        tracing::debug!(target: "model.find", found, backwards, "find_next");
        found
    }

    /// Replace the current match, then move on to the next one.
    pub(crate) fn replace_next(&mut self) -> bool {
        let needle = self.find.session.text();
        let replacement = self.replace.session.text();
        let replaced = self.main.session.replace_selection(&needle, &replacement);
        if replaced {
            self.main.session.refresh_highlight();
            self.main.session.checkpoint();
        }
        self.find_next(false);
        replaced
    }
}
