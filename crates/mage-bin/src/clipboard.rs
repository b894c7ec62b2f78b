//! System clipboard through `arboard`, with an in-process fallback.

use core_actions::{Clipboard, MemoryClipboard};
use tracing::{debug, warn};

pub struct SystemClipboard {
    system: Option<arboard::Clipboard>,
    local: MemoryClipboard,
}

impl SystemClipboard {
    /// Falls back to a process-local clipboard when no system one exists
    /// (headless sessions, missing display server).
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(c) => Some(c),
            Err(error) => {
                warn!(target: "runtime.clipboard", %error, "system_clipboard_unavailable");
                None
            }
        };
        Self {
            system,
            local: MemoryClipboard::new(),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn read(&mut self) -> Option<String> {
        if let Some(system) = self.system.as_mut() {
            match system.get_text() {
                Ok(text) => return Some(text),
                Err(error) => debug!(target: "runtime.clipboard", %error, "read_failed"),
            }
        }
        self.local.read()
    }

    fn write(&mut self, text: &str) {
        self.local.write(text);
        if let Some(system) = self.system.as_mut()
            && let Err(error) = system.set_text(text.to_string())
        {
            debug!(target: "runtime.clipboard", %error, "write_failed");
        }
    }
}
