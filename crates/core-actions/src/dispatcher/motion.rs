//! Motion sub-dispatch (cursor movement).
//!
//! Horizontal motions wrap across line boundaries; vertical motions clamp the
//! column to the destination line. Page motions move by the last rendered
//! text height and carry the vertical scroll offset along so the cursor keeps
//! its screen row. Every motion resets the block-copy cycle.

use super::DispatchResult;
use crate::MotionKind;
use core_state::EditorState;

pub(crate) fn handle_motion(kind: MotionKind, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor;
    match kind {
        MotionKind::Left => move_left(state),
        MotionKind::Right => move_right(state),
        MotionKind::Up => {
            if state.cursor.row > 0 {
                state.cursor.row -= 1;
            }
        }
        MotionKind::Down => {
            if state.cursor.row + 1 < state.buffer.line_count() {
                state.cursor.row += 1;
            }
        }
        MotionKind::PageUp => page(state, false),
        MotionKind::PageDown => page(state, true),
        MotionKind::LineStart => state.cursor.col = 0,
        MotionKind::LineEnd => state.cursor.col = state.current_line_len(),
    }
    state.clamp_cursor();
    state.block_cycle.reset();
    if before == state.cursor {
        return DispatchResult::clean();
    }
    tracing::trace!(target: "actions.dispatch", op = "motion", ?kind, row = state.cursor.row, col = state.cursor.col, "motion");
    DispatchResult::dirty()
}

fn move_left(state: &mut EditorState) {
    let cur = &mut state.cursor;
    if cur.col > 0 {
        cur.col -= 1;
    } else if cur.row > 0 {
        cur.row -= 1;
        cur.col = state.buffer.line_len(cur.row);
    }
}

fn move_right(state: &mut EditorState) {
    let len = state.current_line_len();
    let last = state.buffer.line_count() - 1;
    let cur = &mut state.cursor;
    if cur.col < len {
        cur.col += 1;
    } else if cur.row < last {
        cur.row += 1;
        cur.col = 0;
    }
}

/// Move by one text-area height keeping the cursor's screen row.
fn page(state: &mut EditorState, down: bool) {
    let rows = state.last_text_height.max(1);
    let last = state.buffer.line_count() - 1;
    let row = state.cursor.row;
    let screen_row = row.saturating_sub(state.scroll.row).min(rows - 1);
    let target = if down {
        row.saturating_add(rows).min(last)
    } else {
        row.saturating_sub(rows)
    };
    state.cursor.row = target;
    state.scroll.row = target.saturating_sub(screen_row);
    tracing::trace!(target: "actions.dispatch", op = "page", down, rows, from = row, to = target, offset = state.scroll.row, "page");
}
