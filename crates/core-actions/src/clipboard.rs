//! Clipboard collaborator.
//!
//! Implementations never fail outward: an unavailable clipboard reads as
//! `None` and silently drops writes.

pub trait Clipboard {
    fn read(&mut self) -> Option<String>;
    fn write(&mut self, text: &str);
}

/// In-process clipboard, used in tests and when no system clipboard exists.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Option<String> {
        self.contents.clone()
    }

    fn write(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }
}
