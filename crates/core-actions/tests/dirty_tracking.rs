//! In-place edits dirty exactly their row; line-count changes force a full
//! redraw.

mod common;
use common::*;

use core_events::{KeyEvent, NamedKey};

fn dirty(st: &core_state::EditorState) -> Vec<usize> {
    st.dirty.dirty_rows().collect()
}

#[test]
fn char_insert_dirties_only_its_row() {
    let mut st = edit_state_at("aa\nbb\ncc", 1, 1);
    settle(&mut st);
    feed(&mut st, "x");
    assert_eq!(dirty(&st), vec![1]);
    assert!(!st.dirty.is_forced());
}

#[test]
fn in_line_deletes_dirty_only_their_row() {
    let mut st = edit_state_at("aa\nbb\ncc", 2, 1);
    settle(&mut st);
    feed_keys(&mut st, &[KeyEvent::named(NamedKey::Backspace)]);
    assert_eq!(dirty(&st), vec![2]);
    assert!(!st.dirty.is_forced());

    settle(&mut st);
    feed_keys(&mut st, &[KeyEvent::named(NamedKey::Delete)]);
    assert_eq!(dirty(&st), vec![2]);
    assert!(!st.dirty.is_forced());
}

#[test]
fn view_mode_symbol_ops_dirty_only_their_row() {
    let mut st = state_at("aa\nfoo bar\ncc", 1, 5);
    settle(&mut st);
    feed(&mut st, "d");
    assert_eq!(dirty(&st), vec![1]);
    assert!(!st.dirty.is_forced());
}

#[test]
fn split_and_merge_force_redraw() {
    let mut st = edit_state_at("aa\nbb", 0, 1);
    settle(&mut st);
    feed_keys(&mut st, &[KeyEvent::named(NamedKey::Enter)]);
    assert!(st.dirty.is_forced());

    settle(&mut st);
    feed_keys(&mut st, &[KeyEvent::named(NamedKey::Backspace)]);
    assert!(st.dirty.is_forced());
}

#[test]
fn line_ops_force_redraw() {
    let mut st = state_at("aa\nbb\ncc", 1, 0);
    settle(&mut st);
    feed(&mut st, "Y");
    assert!(!st.dirty.is_forced());
    assert!(dirty(&st).is_empty());
    feed(&mut st, "P");
    assert!(st.dirty.is_forced());
    settle(&mut st);
    feed(&mut st, "D");
    assert!(st.dirty.is_forced());
}

#[test]
fn column_motion_dirties_nothing() {
    let mut st = state_at("abc\ndef", 0, 0);
    settle(&mut st);
    let res = feed(&mut st, "l");
    assert!(res.dirty);
    assert!(dirty(&st).is_empty());
    assert!(!st.dirty.is_forced());
}

#[test]
fn row_motion_forces_redraw() {
    let mut st = state_at("abc\ndef", 0, 0);
    settle(&mut st);
    feed(&mut st, "j");
    assert!(st.dirty.is_forced());
    assert!(dirty(&st).is_empty());
}

#[test]
fn no_op_leaves_modified_clear() {
    let mut st = edit_state_at("abc", 0, 0);
    settle(&mut st);
    feed_keys(&mut st, &[KeyEvent::named(NamedKey::Backspace)]);
    assert!(!st.modified);
    assert!(dirty(&st).is_empty());
}
