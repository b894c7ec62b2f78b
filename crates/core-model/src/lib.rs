//! The editor workspace: one main document plus the find, replace and prompt
//! boxes, each an independent [`Session`] with its own [`View`].
//!
//! Keys are routed to whichever pane has [`Focus`]. Panes run the shared
//! keymap through `core_actions::process_key`; the workspace commands that a
//! single session cannot handle (save, quit, find, ...) come back here and
//! drive the flows in `flows.rs`, which may raise an [`Overlay`] and park an
//! [`AfterSave`] continuation until the user answers it.
//!
//! Invariants after every public call:
//! * `focus == Prompt` iff the overlay is a prompt, `focus == Confirm` iff it
//!   is a confirm.
//! * `Find`/`Replace` focus implies the find bar is open.
//! * Every view's size matches the current [`Layout`].

use std::path::PathBuf;
use std::time::Duration;

use core_actions::{EditorKeymap, default_keymap};
use core_config::{Config, PlaceBook};
use core_state::{COALESCE_WINDOW, Session, UNDO_HISTORY_MAX};

mod find;
mod flows;
mod input;
mod layout;
mod view;

pub use layout::{FIND_BAR_ROWS, Layout, LayoutRegion, PROMPT_HEIGHT, PROMPT_WIDTH};
pub use view::{SCROLL_MARGIN, View, gutter_width};

pub const UNTITLED: &str = "untitled";
pub const CONFIRM_UNSAVED: &str = "Unsaved, changes save?";
pub const SAVE_AS_LABEL: &str = "File name?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Main,
    Find,
    Replace,
    Prompt,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    SaveAs,
    /// Read-only notice; the prompt text is the message.
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Prompt {
        label: String,
        purpose: PromptPurpose,
    },
    Confirm {
        label: String,
        yes: bool,
    },
}

/// What to do once a save succeeds (or is declined at the confirm).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AfterSave {
    #[default]
    Nothing,
    Exit,
    Open(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: Option<PathBuf>,
    pub title: String,
    /// Text as of the last successful load or save.
    pub last_saved: String,
}

impl Document {
    fn untitled() -> Self {
        Self::at(None)
    }

    fn at(path: Option<PathBuf>) -> Self {
        let title = path
            .as_deref()
            .map(title_for)
            .unwrap_or_else(|| UNTITLED.to_string());
        Self {
            path,
            title,
            last_saved: String::new(),
        }
    }
}

fn title_for(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Debug, Clone)]
pub struct Pane {
    pub session: Session,
    pub view: View,
}

impl Pane {
    fn new(session: Session, line_numbers: bool) -> Self {
        Self {
            session,
            view: View::new(0, 0, line_numbers),
        }
    }

    fn scroll_to_cursor(&mut self) {
        let pos = self.session.position();
        self.view.scroll_to(self.session.buffer(), pos);
    }
}

pub struct EditorModel {
    keymap: EditorKeymap,
    main: Pane,
    find: Pane,
    replace: Pane,
    prompt: Pane,
    focus: Focus,
    /// Where focus returns when an overlay closes.
    return_focus: Focus,
    overlay: Overlay,
    find_open: bool,
    document: Document,
    after_save: AfterSave,
    places: PlaceBook,
    settings_path: PathBuf,
    scroll_sensitivity: u16,
    history_window: Duration,
    history_depth: usize,
    layout: Layout,
    splash: bool,
    mouse_down: bool,
    exit: bool,
}

impl EditorModel {
    pub fn new(width: u16, height: u16) -> Self {
        let mut model = Self {
            keymap: default_keymap(),
            main: Pane::new(Session::new(), true),
            find: Pane::new(Session::new(), false),
            replace: Pane::new(Session::new(), false),
            prompt: Pane::new(Session::new(), false),
            focus: Focus::Main,
            return_focus: Focus::Main,
            overlay: Overlay::None,
            find_open: false,
            document: Document::untitled(),
            after_save: AfterSave::Nothing,
            places: PlaceBook::default(),
            settings_path: PathBuf::from(core_config::CONFIG_FILE_NAME),
            scroll_sensitivity: 3,
            history_window: COALESCE_WINDOW,
            history_depth: UNDO_HISTORY_MAX,
            layout: Layout::compute(width, height, false),
            splash: false,
            mouse_down: false,
            exit: false,
        };
        model.apply_layout();
        model
    }

    /// Take scroll and history tuning plus the settings file location from
    /// `config`. Call before any document is opened.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.scroll_sensitivity = config.file.scroll.sensitivity;
        self.history_window = config.file.history.coalesce_window();
        self.history_depth = config.file.history.max_depth.max(1);
        self.settings_path = config.path.clone();
        self.main.session = self.fresh_session();
        self
    }

    pub fn with_places(mut self, places: PlaceBook) -> Self {
        self.places = places;
        self
    }

    pub(crate) fn fresh_session(&self) -> Session {
        Session::new().with_history_limits(self.history_window, self.history_depth)
    }

    pub fn main(&self) -> &Pane {
        &self.main
    }

    pub fn find(&self) -> &Pane {
        &self.find
    }

    pub fn replace(&self) -> &Pane {
        &self.replace
    }

    pub fn prompt(&self) -> &Pane {
        &self.prompt
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn find_open(&self) -> bool {
        self.find_open
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn places(&self) -> &PlaceBook {
        &self.places
    }

    pub fn is_splash(&self) -> bool {
        self.splash
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// Unsaved changes exist.
    pub fn is_dirty(&self) -> bool {
        self.main.session.text() != self.document.last_saved
    }

    /// Show the splash screen until the first key.
    pub fn show_splash(&mut self) {
        self.splash = true;
    }

    /// Start an empty document, optionally bound to a path that does not
    /// exist yet.
    pub fn start_new(&mut self, path: Option<PathBuf>) {
        self.splash = false;
        self.main.session = self.fresh_session();
        self.main.view.first_line = 0;
        self.main.view.left_col = 0;
        self.document = Document::at(path);
        self.document.last_saved = self.main.session.text();
        tracing::info!(target: "model.open", title = %self.document.title, "new_document");
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = Layout::compute(width, height, self.find_open);
        self.apply_layout();
        tracing::debug!(target: "model.layout", width, height, "resize");
    }

    pub(crate) fn apply_layout(&mut self) {
        self.layout = Layout::compute(self.layout.width, self.layout.height, self.find_open);
        let l = self.layout;
        let size = |r: LayoutRegion| (usize::from(r.width), usize::from(r.height));
        (self.main.view.width, self.main.view.height) = size(l.main);
        (self.prompt.view.width, self.prompt.view.height) = size(l.prompt);
        let find = l.find.unwrap_or_default();
        (self.find.view.width, self.find.view.height) = size(find);
        let replace = l.replace.unwrap_or_default();
        (self.replace.view.width, self.replace.view.height) = size(replace);
        self.scroll_all();
    }

    pub(crate) fn scroll_all(&mut self) {
        for pane in [
            &mut self.main,
            &mut self.find,
            &mut self.replace,
            &mut self.prompt,
        ] {
            pane.scroll_to_cursor();
        }
    }

    /// Show `message` in the prompt overlay.
    pub fn show_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "model.message", %message, "show_message");
        let mut session = self.fresh_session();
        session.insert(&message);
        session.refresh_highlight();
        self.prompt.session = session;
        self.open_overlay(
            Overlay::Prompt {
                label: String::new(),
                purpose: PromptPurpose::Message,
            },
            Focus::Prompt,
        );
    }

    pub(crate) fn open_overlay(&mut self, overlay: Overlay, focus: Focus) {
        if !matches!(self.focus, Focus::Prompt | Focus::Confirm) {
            self.return_focus = self.focus;
        }
        self.overlay = overlay;
        self.focus = focus;
    }

    pub(crate) fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
        self.focus = match self.return_focus {
            Focus::Find | Focus::Replace if !self.find_open => Focus::Main,
            f => f,
        };
    }

    pub(crate) fn focused_pane_mut(&mut self) -> &mut Pane {
        match self.focus {
            Focus::Main | Focus::Confirm => &mut self.main,
            Focus::Find => &mut self.find,
            Focus::Replace => &mut self.replace,
            Focus::Prompt => &mut self.prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_model_is_clean_untitled_insert() {
        let m = EditorModel::new(80, 24);
        assert_eq!(m.document().title, UNTITLED);
        assert!(!m.is_dirty());
        assert_eq!(m.focus(), Focus::Main);
        assert_eq!(m.main().view.height, 23);
        assert_eq!(m.main().session.mode(), core_state::Mode::Insert);
    }

    #[test]
    fn config_tunes_history_and_settings_path() {
        let mut config = core_config::load_from(Some(PathBuf::from("/nonexistent/mage.toml"))).unwrap();
        config.file.history.max_depth = 2;
        config.file.scroll.sensitivity = 5;
        let m = EditorModel::new(80, 24).with_config(&config);
        assert_eq!(m.scroll_sensitivity, 5);
        assert_eq!(m.history_depth, 2);
        assert_eq!(m.settings_path, PathBuf::from("/nonexistent/mage.toml"));
    }

    #[test]
    fn message_overlay_round_trip_restores_focus() {
        let mut m = EditorModel::new(80, 24);
        m.show_message("boom");
        assert_eq!(m.focus(), Focus::Prompt);
        assert_eq!(m.prompt().session.text(), "boom");
        m.close_overlay();
        assert_eq!(m.focus(), Focus::Main);
        assert_eq!(m.overlay(), &Overlay::None);
    }

    #[test]
    fn title_uses_file_name() {
        let d = Document::at(Some(PathBuf::from("/tmp/dir/notes.txt")));
        assert_eq!(d.title, "notes.txt");
    }
}
