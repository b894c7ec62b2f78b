#![allow(dead_code)] // Each test binary uses a subset of helpers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use core_actions::MemoryClipboard;
use core_actions::io_ops::{Storage, StorageError};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_model::EditorModel;

/// In-memory files; writes can be made to fail.
#[derive(Default)]
pub struct MemStorage {
    pub files: RefCell<HashMap<PathBuf, String>>,
    pub fail_writes: Cell<bool>,
}

impl MemStorage {
    pub fn with_file(path: &str, text: &str) -> Self {
        let s = Self::default();
        s.files.borrow_mut().insert(PathBuf::from(path), text.to_string());
        s
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }
}

impl Storage for MemStorage {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        match self.files.borrow().get(path) {
            Some(text) => Ok(text.split('\n').map(str::to_string).collect()),
            None => Err(StorageError::Read {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.files.borrow_mut().insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub model: EditorModel,
    pub storage: MemStorage,
    pub clipboard: MemoryClipboard,
}

impl Harness {
    pub fn new(storage: MemStorage) -> Self {
        Self {
            model: EditorModel::new(80, 24),
            storage,
            clipboard: MemoryClipboard::new(),
        }
    }

    pub fn opened(path: &str, text: &str) -> Self {
        let mut h = Self::new(MemStorage::with_file(path, text));
        h.model.load_path(Path::new(path), &h.storage);
        h
    }

    pub fn key(&mut self, key: KeyEvent) -> bool {
        self.model.handle_key(&key, &mut self.clipboard, &self.storage)
    }

    pub fn press(&mut self, code: KeyCode) -> bool {
        self.key(KeyEvent::plain(code))
    }

    pub fn ctrl(&mut self, c: char) -> bool {
        self.key(KeyEvent::ctrl(c))
    }

    pub fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            let mods = if c.is_ascii_uppercase() {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::empty()
            };
            self.key(KeyEvent::new(KeyCode::Char(c), mods));
        }
    }

    pub fn main_text(&self) -> String {
        self.model.main().session.text()
    }
}
