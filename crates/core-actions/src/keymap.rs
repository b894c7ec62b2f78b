//! Default key bindings.

use core_events::KeyCode;
use core_keymap::KeyChord;
use core_state::{DeleteKind, Mode};
use core_text::Motion;

use crate::{Action, ClipboardOp, EditKind, EditorKeymap, ModeChange, WorkspaceCommand};

/// Bindings shared by both modes: arrows, Home/End, deletion keys, select all.
fn bind_common(km: &mut EditorKeymap, mode: Mode) {
    let motions = [
        (KeyCode::Up, Motion::Up),
        (KeyCode::Down, Motion::Down),
        (KeyCode::Left, Motion::Left),
        (KeyCode::Right, Motion::Right),
        (KeyCode::Home, Motion::LineStart),
        (KeyCode::End, Motion::LineEnd),
    ];
    for (code, motion) in motions {
        km.bind(mode, KeyChord::plain(code), Action::motion(motion));
    }
    km.bind(mode, KeyChord::ctrl(KeyCode::Left), Action::motion(Motion::WordLeft))
        .bind(mode, KeyChord::ctrl(KeyCode::Right), Action::motion(Motion::WordRight))
        .bind(mode, KeyChord::ctrl(KeyCode::End), Action::motion(Motion::DocumentEnd));

    let deletes = [
        (KeyChord::plain(KeyCode::Backspace), DeleteKind::BackspaceOne),
        (KeyChord::ctrl(KeyCode::Backspace), DeleteKind::BackspaceWord),
        (KeyChord::plain(KeyCode::Delete), DeleteKind::DeleteOne),
        (KeyChord::ctrl(KeyCode::Delete), DeleteKind::DeleteWord),
    ];
    for (chord, kind) in deletes {
        km.bind(mode, chord, Action::Edit(EditKind::Delete(kind)));
    }
    km.bind(mode, KeyChord::plain(KeyCode::Enter), Action::Edit(EditKind::InsertNewline))
        .bind(mode, KeyChord::ctrl(KeyCode::Char('a')), Action::SelectAll);
}

pub fn default_keymap() -> EditorKeymap {
    let mut km = EditorKeymap::new();

    let globals = [
        ('q', Action::Workspace(WorkspaceCommand::Quit)),
        ('z', Action::Undo),
        ('y', Action::Redo),
        ('s', Action::Workspace(WorkspaceCommand::Save)),
        ('f', Action::Workspace(WorkspaceCommand::OpenFind)),
        ('r', Action::Workspace(WorkspaceCommand::ToggleReplace)),
        ('g', Action::Workspace(WorkspaceCommand::OpenSettings)),
    ];
    for (c, action) in globals {
        km.bind_global(KeyChord::ctrl(KeyCode::Char(c)), action);
    }
    km.bind_global(
        KeyChord::alt(KeyCode::Char('s')),
        Action::Workspace(WorkspaceCommand::SaveAs),
    );

    bind_common(&mut km, Mode::Normal);
    bind_common(&mut km, Mode::Insert);

    let normal = [
        ('h', Action::motion(Motion::Left)),
        ('j', Action::motion(Motion::Down)),
        ('k', Action::motion(Motion::Up)),
        ('l', Action::motion(Motion::Right)),
        ('e', Action::motion(Motion::WordRight)),
        ('w', Action::motion(Motion::WordLeft)),
        (
            '^',
            Action::Motion {
                motion: Motion::LineStart,
                reset_anchor: true,
            },
        ),
        ('g', Action::GotoLine),
        ('i', Action::ModeChange(ModeChange::EnterInsert)),
        ('a', Action::ModeChange(ModeChange::AppendLineEnd)),
        ('o', Action::ModeChange(ModeChange::OpenLineBelow)),
        ('c', Action::Clipboard(ClipboardOp::Copy)),
        ('x', Action::Clipboard(ClipboardOp::Cut)),
        ('v', Action::Clipboard(ClipboardOp::Paste)),
        ('f', Action::Workspace(WorkspaceCommand::OpenFind)),
    ];
    for (c, action) in normal {
        km.bind(Mode::Normal, KeyChord::char(c), action);
    }
    km.bind(Mode::Normal, KeyChord::plain(KeyCode::Tab), Action::Edit(EditKind::InsertTab));

    km.bind(
        Mode::Insert,
        KeyChord::plain(KeyCode::Esc),
        Action::ModeChange(ModeChange::LeaveInsert),
    );
    km
}
