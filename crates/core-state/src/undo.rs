use core_text::Buffer;
use std::time::{Duration, Instant};
use tracing::trace;

use crate::Cursor;

/// Window inside which a new snapshot overwrites the previous one.
pub const COALESCE_WINDOW: Duration = Duration::from_millis(300);

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 1000;

/// A full-state snapshot for undo/redo.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub buffer: Buffer,
    pub cursor: Cursor,
    /// `None` for baselines, which are never coalesced into.
    pub taken_at: Option<Instant>,
    /// Full text at capture.
    pub fingerprint: String,
}

impl Snapshot {
    fn capture(buffer: &Buffer, cursor: Cursor, taken_at: Option<Instant>) -> Self {
        Self {
            buffer: buffer.clone(),
            cursor,
            taken_at,
            fingerprint: buffer.text(),
        }
    }
}

/// What a checkpoint did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    Skipped,
    Pushed,
    Coalesced,
}

#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// State most recently applied by undo/redo, pushed lazily before the next edit.
    restored: Option<Snapshot>,
    window: Duration,
    max_depth: usize,
}

impl History {
    /// Start a history whose only entry is the given baseline.
    pub fn new(buffer: &Buffer, cursor: Cursor) -> Self {
        Self::with_limits(buffer, cursor, COALESCE_WINDOW, UNDO_HISTORY_MAX)
    }

    pub fn with_limits(buffer: &Buffer, cursor: Cursor, window: Duration, max_depth: usize) -> Self {
        Self {
            undo_stack: vec![Snapshot::capture(buffer, cursor, None)],
            redo_stack: Vec::new(),
            restored: None,
            window,
            max_depth: max_depth.max(1),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history and record a new baseline.
    pub fn reset(&mut self, buffer: &Buffer, cursor: Cursor) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.restored = None;
        self.undo_stack.push(Snapshot::capture(buffer, cursor, None));
        trace!(target: "state.undo", "history_reset");
    }

    /// Offer the current state to history.
    pub fn checkpoint(&mut self, buffer: &Buffer, cursor: Cursor, now: Instant) -> Checkpoint {
        let text = buffer.text();
        if self.undo_stack.last().is_some_and(|s| s.fingerprint == text) {
            return Checkpoint::Skipped;
        }
        if let Some(restored) = self.restored.take() {
            if restored.fingerprint == text {
                self.restored = Some(restored);
                return Checkpoint::Skipped;
            }
            // after a redo the restored entry is already on top; it must
            // not absorb the next edit
            if let Some(top) = self
                .undo_stack
                .last_mut()
                .filter(|s| s.fingerprint == restored.fingerprint)
            {
                top.taken_at = None;
            } else {
                self.push(restored);
            }
        }

        let snap = Snapshot {
            buffer: buffer.clone(),
            cursor,
            taken_at: Some(now),
            fingerprint: text,
        };
        let recent = self.undo_stack.last().and_then(|s| s.taken_at).is_some_and(|t| {
            now.saturating_duration_since(t) < self.window
        });
        let outcome = if recent {
            if let Some(top) = self.undo_stack.last_mut() {
                *top = snap;
            }
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "snapshot_coalesced");
            Checkpoint::Coalesced
        } else {
            self.push(snap);
            Checkpoint::Pushed
        };
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
        outcome
    }

    fn push(&mut self, snap: Snapshot) {
        self.undo_stack.push(snap);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "push_snapshot");
        if self.undo_stack.len() > self.max_depth {
            let _ = self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
    }

    pub fn undo(&mut self, buffer: &mut Buffer, cursor: &mut Cursor) -> bool {
        let applied = step(&mut self.undo_stack, &mut self.redo_stack, buffer);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), applied = applied.is_some(), "undo");
        self.restore(applied, buffer, cursor)
    }

    pub fn redo(&mut self, buffer: &mut Buffer, cursor: &mut Cursor) -> bool {
        let applied = step(&mut self.redo_stack, &mut self.undo_stack, buffer);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), applied = applied.is_some(), "redo");
        self.restore(applied, buffer, cursor)
    }

    fn restore(&mut self, applied: Option<Snapshot>, buffer: &mut Buffer, cursor: &mut Cursor) -> bool {
        let Some(snap) = applied else {
            return false;
        };
        *buffer = snap.buffer.clone();
        buffer.mark_all_dirty();
        *cursor = snap.cursor;
        self.restored = Some(Snapshot {
            taken_at: None,
            ..snap
        });
        true
    }
}

/// Move the top of `from` onto `to`, skipping past an entry identical to the
/// live text when another one remains. Returns the entry to apply.
fn step(from: &mut Vec<Snapshot>, to: &mut Vec<Snapshot>, buffer: &Buffer) -> Option<Snapshot> {
    let mut popped = from.pop()?;
    if popped.fingerprint == buffer.text()
        && let Some(next) = from.pop()
    {
        to.push(popped);
        popped = next;
    }
    to.push(popped.clone());
    Some(popped)
}
