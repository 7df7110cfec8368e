#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, KeyTranslator, handle_key};
use core_events::{KeyEvent, NamedKey};
use core_state::{EditorState, Mode};
use core_text::{Cursor, TextBuffer};
use std::path::PathBuf;

pub fn state_from(text: &str) -> EditorState {
    EditorState::new(TextBuffer::from_text(text), PathBuf::from("scratch.txt"))
}

pub fn state_at(text: &str, row: usize, col: usize) -> EditorState {
    let mut st = state_from(text);
    st.cursor = Cursor::new(row, col);
    st
}

pub fn edit_state_at(text: &str, row: usize, col: usize) -> EditorState {
    let mut st = state_at(text, row, col);
    st.set_mode(Mode::Edit);
    st
}

/// Drop every pending repaint, as a completed forced frame would.
pub fn settle(st: &mut EditorState) {
    st.dirty.sync_len(st.buffer.line_count());
    st.dirty.clear_all();
    st.dirty.finish_frame();
}

pub fn key(c: char) -> KeyEvent {
    if c == ' ' {
        KeyEvent::named(NamedKey::Space)
    } else {
        KeyEvent::char(c)
    }
}

/// Feed each key through the full per-key path; returns the last result.
pub fn feed_keys(st: &mut EditorState, keys: &[KeyEvent]) -> DispatchResult {
    let tr = KeyTranslator::default();
    let mut last = DispatchResult::clean();
    for k in keys {
        last = handle_key(st, &tr, k);
    }
    last
}

pub fn feed(st: &mut EditorState, seq: &str) -> DispatchResult {
    let keys: Vec<KeyEvent> = seq.chars().map(key).collect();
    feed_keys(st, &keys)
}

pub fn lines(st: &EditorState) -> Vec<String> {
    st.buffer.lines().map(|l| l.to_string()).collect()
}
