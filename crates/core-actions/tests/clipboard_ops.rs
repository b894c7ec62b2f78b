mod common;

use common::{Harness, shift};
use core_actions::WorkspaceCommand;
use core_events::{KeyCode, KeyEvent};
use pretty_assertions::assert_eq;

#[test]
fn cut_then_paste_round_trips() {
    let mut h = Harness::normal(&["alpha beta"]);
    h.keys("E");
    h.keys("x");
    assert_eq!(h.lines(), vec![" beta"]);
    assert_eq!(h.clipboard.contents(), Some("alpha"));
    h.press(KeyCode::End);
    h.keys("v");
    assert_eq!(h.lines(), vec![" betaalpha"]);
}

#[test]
fn copy_keeps_text_and_multiline_paste_splits_rows() {
    let mut h = Harness::normal(&["one", "two"]);
    h.key(shift(KeyCode::Down));
    h.key(shift(KeyCode::End));
    h.keys("c");
    assert_eq!(h.clipboard.contents(), Some("one\ntwo"));
    assert_eq!(h.lines(), vec!["one", "two"]);
    h.press(KeyCode::End);
    h.keys("v");
    assert_eq!(h.lines(), vec!["one", "twoone", "two"]);
}

#[test]
fn workspace_keys_are_handed_back() {
    let mut h = Harness::new(&["x"]);
    let out = h.key(KeyEvent::ctrl('q'));
    assert_eq!(out.command, Some(WorkspaceCommand::Quit));
    let out = h.key(KeyEvent::alt('s'));
    assert_eq!(out.command, Some(WorkspaceCommand::SaveAs));
    assert_eq!(h.lines(), vec!["x"]);
}
