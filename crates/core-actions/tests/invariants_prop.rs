//! Property: after any key sequence the buffer keeps at least one line and
//! the cursor stays inside it.

mod common;
use common::*;

use core_events::{KeyEvent, NamedKey};
use core_state::JUMP_DIGITS;
use proptest::prelude::*;

fn key_pool() -> Vec<KeyEvent> {
    let mut keys: Vec<KeyEvent> = "hjklyxpdYXPDsuJK0123456789a{}( "
        .chars()
        .map(key)
        .collect();
    keys.extend(['y', 'x', 'p', 'd'].map(KeyEvent::ctrl));
    keys.extend(
        [
            NamedKey::Esc,
            NamedKey::Enter,
            NamedKey::Backspace,
            NamedKey::Delete,
            NamedKey::Tab,
            NamedKey::Up,
            NamedKey::Down,
            NamedKey::Left,
            NamedKey::Right,
            NamedKey::Home,
            NamedKey::End,
            NamedKey::PageUp,
            NamedKey::PageDown,
        ]
        .map(KeyEvent::named),
    );
    keys
}

const SEED_TEXT: &str = "fn main() {\n    if x {\n        y();\n    }\n}\n\nlast";

proptest! {
    #[test]
    fn cursor_and_buffer_stay_valid(keys in prop::collection::vec(prop::sample::select(key_pool()), 0..300)) {
        let mut st = state_from(SEED_TEXT);
        st.set_last_text_height(4);
        for k in &keys {
            feed_keys(&mut st, std::slice::from_ref(k));
            let n = st.buffer.line_count();
            prop_assert!(n >= 1);
            prop_assert!(st.cursor.row < n);
            prop_assert!(st.cursor.col <= st.buffer.line_len(st.cursor.row));
            prop_assert!(st.jump.digits < JUMP_DIGITS);
            if st.mode != core_state::Mode::View {
                prop_assert!(!st.jump.pending);
            }
        }
    }

    #[test]
    fn dirty_rows_stay_in_bounds(keys in prop::collection::vec(prop::sample::select(key_pool()), 0..100)) {
        let mut st = state_from(SEED_TEXT);
        for k in &keys {
            feed_keys(&mut st, std::slice::from_ref(k));
            let n = st.buffer.line_count();
            prop_assert!(st.dirty.dirty_rows().all(|r| r < n));
        }
    }
}
