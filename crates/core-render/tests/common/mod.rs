#![allow(dead_code)]

use core_actions::MemoryClipboard;
use core_actions::io_ops::FsStorage;
use core_events::{KeyCode, KeyEvent};
use core_model::EditorModel;
use core_render::{Frame, Theme, compose};

pub struct Screen {
    pub model: EditorModel,
    pub clipboard: MemoryClipboard,
    pub theme: Theme,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            model: EditorModel::new(width, height),
            clipboard: MemoryClipboard::default(),
            theme: Theme::default(),
        }
    }

    pub fn with_text(width: u16, height: u16, text: &str) -> Self {
        let mut s = Self::new(width, height);
        s.model.handle_paste(text, &mut s.clipboard);
        s
    }

    pub fn key(&mut self, key: KeyEvent) {
        self.model.handle_key(&key, &mut self.clipboard, &FsStorage);
    }

    pub fn press(&mut self, code: KeyCode) {
        self.key(KeyEvent::plain(code));
    }

    pub fn frame(&self) -> Frame {
        compose(&self.model, &self.theme)
    }
}
