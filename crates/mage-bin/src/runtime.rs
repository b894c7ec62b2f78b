//! Event loop: one event at a time, a redraw after each.

use anyhow::Result;
use core_actions::Clipboard;
use core_actions::io_ops::FsStorage;
use core_events::{Event, InputEvent};
use core_model::EditorModel;
use core_render::{Frame, Theme, Writer, compose};
use std::fmt;
use std::io::Write;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{error, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Quit,
    InputClosed,
}

impl ShutdownReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Quit => "quit",
            ShutdownReason::InputClosed => "input_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue { redraw: bool },
    Break { reason: ShutdownReason },
}

pub struct EditorRuntime<W: Write> {
    model: EditorModel,
    clipboard: Box<dyn Clipboard>,
    storage: FsStorage,
    theme: Theme,
    out: W,
    last_frame: Option<Frame>,
}

impl<W: Write> EditorRuntime<W> {
    pub fn new(model: EditorModel, clipboard: Box<dyn Clipboard>, theme: Theme, out: W) -> Self {
        Self {
            model,
            clipboard,
            storage: FsStorage,
            theme,
            out,
            last_frame: None,
        }
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    pub async fn run(&mut self, rx: &mut mpsc::Receiver<Event>) -> Result<ShutdownReason> {
        self.render()?;
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();
        while let Some(event) = rx.recv().await {
            match self.handle_event(&event) {
                LoopControl::Continue { redraw } => {
                    if redraw {
                        self.render()?;
                    }
                }
                LoopControl::Break { reason } => return Ok(reason),
            }
        }
        Ok(ShutdownReason::InputClosed)
    }

    pub fn handle_event(&mut self, event: &Event) -> LoopControl {
        let input = match event {
            Event::Input(input) => input,
            Event::Shutdown => {
                return LoopControl::Break {
                    reason: ShutdownReason::Quit,
                };
            }
        };
        let redraw = match input {
            InputEvent::Key(key) => {
                trace!(target: "runtime", %key, "key");
                if self
                    .model
                    .handle_key(key, self.clipboard.as_mut(), &self.storage)
                {
                    return LoopControl::Break {
                        reason: ShutdownReason::Quit,
                    };
                }
                true
            }
            InputEvent::Mouse(ev) => self.model.handle_mouse(ev),
            InputEvent::Resize(w, h) => {
                self.model.resize(*w, *h);
                true
            }
            InputEvent::Paste(text) => {
                self.model.handle_paste(text, self.clipboard.as_mut());
                true
            }
        };
        LoopControl::Continue { redraw }
    }

    /// Compose and flush the rows that changed since the last frame.
    pub fn render(&mut self) -> Result<()> {
        let frame = compose(&self.model, &self.theme);
        Writer::from_diff(self.last_frame.as_ref(), &frame).flush_to(&mut self.out)?;
        self.last_frame = Some(frame);
        Ok(())
    }

    /// Record the cursor place for the open document and persist the book.
    pub fn finish(&mut self, places_path: &Path, reason: ShutdownReason) {
        self.model.remember_place(&self.storage);
        match self.model.places().save(places_path) {
            Ok(()) => info!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                places = self.model.places().len(),
                "places_saved"
            ),
            Err(error) => error!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                error = %format!("{error:#}"),
                "places_save_failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_actions::MemoryClipboard;
    use core_config::PlaceBook;
    use core_events::{KeyCode, KeyEvent};
    use pretty_assertions::assert_eq;

    fn runtime(model: EditorModel) -> EditorRuntime<Vec<u8>> {
        EditorRuntime::new(
            model,
            Box::new(MemoryClipboard::new()),
            Theme::default(),
            Vec::new(),
        )
    }

    fn key(rt: &mut EditorRuntime<Vec<u8>>, key: KeyEvent) -> LoopControl {
        rt.handle_event(&Event::Input(InputEvent::Key(key)))
    }

    #[test]
    fn unsaved_quit_needs_an_answer() {
        let mut rt = runtime(EditorModel::new(40, 12));
        for c in "hi".chars() {
            key(&mut rt, KeyEvent::char(c));
        }
        assert_eq!(
            key(&mut rt, KeyEvent::ctrl('q')),
            LoopControl::Continue { redraw: true }
        );
        key(&mut rt, KeyEvent::char('n'));
        assert_eq!(
            key(&mut rt, KeyEvent::plain(KeyCode::Enter)),
            LoopControl::Break {
                reason: ShutdownReason::Quit
            }
        );
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let mut rt = runtime(EditorModel::new(20, 5));
        rt.render().unwrap();
        let first = rt.out.len();
        assert!(first > 0);
        rt.render().unwrap();
        assert_eq!(rt.out.len(), first);
        rt.handle_event(&Event::Input(InputEvent::Paste("x".into())));
        rt.render().unwrap();
        assert!(rt.out.len() > first);
    }

    #[test]
    fn resize_repaints_the_new_size() {
        let mut rt = runtime(EditorModel::new(20, 5));
        rt.render().unwrap();
        rt.handle_event(&Event::Input(InputEvent::Resize(30, 8)));
        assert_eq!(rt.model().layout().width, 30);
        rt.render().unwrap();
        assert_eq!(rt.last_frame.as_ref().map(|f| f.height), Some(8));
    }

    #[tokio::test]
    async fn closed_channel_ends_the_loop() {
        let mut rt = runtime(EditorModel::new(20, 5));
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(Event::Input(InputEvent::Key(KeyEvent::char('a'))))
            .await
            .unwrap();
        drop(tx);
        let reason = rt.run(&mut rx).await.unwrap();
        assert_eq!(reason, ShutdownReason::InputClosed);
        assert_eq!(rt.model().main().session.text(), "a");
    }

    #[test]
    fn finish_persists_the_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        let places = dir.path().join("places.toml");
        let mut model = EditorModel::new(40, 12);
        model.start_new(Some(file.clone()));
        let mut rt = runtime(model);
        rt.handle_event(&Event::Input(InputEvent::Paste("one\ntwo".into())));
        rt.finish(&places, ShutdownReason::InputClosed);

        let book = PlaceBook::load(&places);
        let place = book.get(&file).expect("place recorded");
        assert_eq!((place.row, place.col), (1, 3));
    }
}
