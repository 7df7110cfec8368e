//! Relative jump controller.
//!
//! `Idle --jump_up/jump_down--> AwaitingDigits`. While awaiting:
//! * a digit accumulates; the third digit applies
//!   `row = clamp(row + direction * value)` and col 0;
//! * the trigger matching the pending direction jumps to the first/last row;
//! * any other key aborts the jump and is then handled normally (it falls
//!   through to its own binding in the same keystroke).

use core_events::KeyEvent;
use core_keymap::Binding;
use core_state::{EditorState, Mode};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// No jump pending; handle the key normally.
    Idle,
    /// The key was part of the jump.
    Consumed,
    /// A pending jump was aborted; handle the key normally.
    FallThrough,
}

pub fn begin(state: &mut EditorState, direction: i8) {
    if state.mode != Mode::View {
        return;
    }
    state.jump.begin(direction);
    debug!(target: "actions.jump", direction, row = state.cursor.row, "jump_pending");
}

pub fn intercept(state: &mut EditorState, key: &KeyEvent, binding: Option<Binding>) -> JumpOutcome {
    if !state.jump.pending {
        return JumpOutcome::Idle;
    }
    let direction = state.jump.direction;
    if let Some(digit) = key.digit() {
        if let Some(value) = state.jump.push_digit(digit) {
            apply_relative(state, direction, value);
        }
        return JumpOutcome::Consumed;
    }
    match (binding, direction) {
        (Some(Binding::JumpUp), -1) => {
            state.jump.reset();
            move_to_row(state, 0);
            JumpOutcome::Consumed
        }
        (Some(Binding::JumpDown), 1) => {
            state.jump.reset();
            let last = state.buffer.line_count() - 1;
            move_to_row(state, last);
            JumpOutcome::Consumed
        }
        _ => {
            debug!(target: "actions.jump", key = %key, "jump_aborted");
            state.jump.reset();
            JumpOutcome::FallThrough
        }
    }
}

fn apply_relative(state: &mut EditorState, direction: i8, value: usize) {
    let last = state.buffer.line_count() - 1;
    let row = state.cursor.row;
    let target = if direction < 0 {
        row.saturating_sub(value)
    } else {
        row.saturating_add(value).min(last)
    };
    debug!(target: "actions.jump", direction, value, from = row, to = target, "jump_applied");
    move_to_row(state, target);
}

fn move_to_row(state: &mut EditorState, row: usize) {
    if state.cursor.row != row {
        state.mark_viewport_dirty();
    }
    state.cursor.row = row;
    state.cursor.col = 0;
    state.block_cycle.reset();
}
