//! Copy/cut/paste/delete at symbol, line and block granularity.
//!
//! All granularities share the tagged `CopyBuffer`; a paste applies only when
//! the last copy was of the same granularity. Cut is copy followed by delete
//! of the same span. Delete alone leaves the copy buffer untouched.

use crate::block::find_block;
use core_state::{ClipKind, EditorState};
use core_text::Line;
use core_text::symbol::symbol_span;
use tracing::debug;

fn current_symbol_span(state: &EditorState) -> Option<(usize, usize)> {
    let line = state.buffer.line(state.cursor.row)?;
    let (left, right) = symbol_span(line.as_slice(), state.cursor.col);
    (left < right).then_some((left, right))
}

// ---------------------------------------------------------------------------
// Symbol
// ---------------------------------------------------------------------------

/// Copy the alphanumeric run under the cursor. No-op (buffer untouched) over
/// a non-alphanumeric scalar.
pub fn copy_symbol(state: &mut EditorState) -> bool {
    let Some((left, right)) = current_symbol_span(state) else {
        return false;
    };
    let Some(line) = state.buffer.line(state.cursor.row) else {
        return false;
    };
    let symbol = Line::from_chars(line.as_slice()[left..right].to_vec());
    debug!(target: "actions.clipboard", op = "copy_symbol", symbol = %symbol, "clipboard");
    state.clipboard.store(ClipKind::Symbol, vec![symbol]);
    true
}

pub fn delete_symbol(state: &mut EditorState) -> bool {
    let Some((left, right)) = current_symbol_span(state) else {
        return false;
    };
    let row = state.cursor.row;
    let Some(line) = state.buffer.line_mut(row) else {
        return false;
    };
    line.drain(left..right);
    state.cursor.col = left;
    state.mark_line_dirty(row);
    debug!(target: "actions.clipboard", op = "delete_symbol", row, left, right, "clipboard");
    true
}

pub fn cut_symbol(state: &mut EditorState) -> bool {
    copy_symbol(state) && delete_symbol(state)
}

/// Splice the copied symbol in at the cursor; the cursor ends after it.
pub fn paste_symbol(state: &mut EditorState) -> bool {
    let Some(run) = state
        .clipboard
        .matching(ClipKind::Symbol)
        .and_then(|c| c.first())
        .map(|l| l.as_slice().to_vec())
    else {
        return false;
    };
    let row = state.cursor.row;
    let Some(line) = state.buffer.line_mut(row) else {
        return false;
    };
    let col = state.cursor.col.min(line.len());
    let n = line.insert_run(col, &run);
    state.cursor.col = col + n;
    state.mark_line_dirty(row);
    debug!(target: "actions.clipboard", op = "paste_symbol", row, col, len = n, "clipboard");
    true
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

pub fn copy_line(state: &mut EditorState) -> bool {
    let Some(line) = state.buffer.line(state.cursor.row).cloned() else {
        return false;
    };
    debug!(target: "actions.clipboard", op = "copy_line", row = state.cursor.row, "clipboard");
    state.clipboard.store(ClipKind::Line, vec![line]);
    true
}

/// Remove the current row. No-op on a one-line buffer.
pub fn delete_line(state: &mut EditorState) -> bool {
    let row = state.cursor.row;
    if state.buffer.remove_line(row).is_none() {
        return false;
    }
    after_structural_delete(state);
    debug!(target: "actions.clipboard", op = "delete_line", row, "clipboard");
    true
}

pub fn cut_line(state: &mut EditorState) -> bool {
    copy_line(state) && delete_line(state)
}

pub fn paste_line(state: &mut EditorState) -> bool {
    paste_rows(state, ClipKind::Line)
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// Copy the block around the cursor, cycling outward on repeated invocations
/// from the same cursor position. Returns the copied span.
pub fn copy_block(state: &mut EditorState) -> (usize, usize) {
    let counter = state.block_cycle.advance(state.cursor);
    let (start, end) = find_block(&state.buffer, state.cursor.row, counter);
    let lines: Vec<Line> = state
        .buffer
        .lines()
        .skip(start)
        .take(end - start + 1)
        .cloned()
        .collect();
    debug!(target: "actions.clipboard", op = "copy_block", counter, start, end, "clipboard");
    state.clipboard.store(ClipKind::Block, lines);
    (start, end)
}

/// Delete the innermost block around the cursor.
pub fn delete_block(state: &mut EditorState) -> bool {
    let (start, end) = find_block(&state.buffer, state.cursor.row, 0);
    delete_rows(state, start, end)
}

pub fn cut_block(state: &mut EditorState) -> bool {
    let (start, end) = copy_block(state);
    delete_rows(state, start, end)
}

pub fn paste_block(state: &mut EditorState) -> bool {
    paste_rows(state, ClipKind::Block)
}

/// Remove rows `start..=end`. Refused on a one-line buffer, when the cursor
/// is on the final row, or when the removal would empty the buffer.
fn delete_rows(state: &mut EditorState, start: usize, end: usize) -> bool {
    let len = state.buffer.line_count();
    if len <= 1 || state.cursor.row == len - 1 {
        debug!(target: "actions.clipboard", op = "delete_block", row = state.cursor.row, len, "delete_block_guarded");
        return false;
    }
    if state.buffer.remove_lines(start, end).is_none() {
        return false;
    }
    after_structural_delete(state);
    debug!(target: "actions.clipboard", op = "delete_block", start, end, "clipboard");
    true
}

fn after_structural_delete(state: &mut EditorState) {
    state.dirty.sync_len(state.buffer.line_count());
    state.clamp_cursor();
    let row = state.cursor.row;
    state.mark_line_dirty(row);
    state.mark_viewport_dirty();
}

/// Insert the copied rows below the cursor row; the cursor lands on column 0
/// of the last inserted row.
fn paste_rows(state: &mut EditorState, kind: ClipKind) -> bool {
    let Some(lines) = state.clipboard.matching(kind).map(<[Line]>::to_vec) else {
        return false;
    };
    let row = state.cursor.row;
    let n = state.buffer.insert_lines(row + 1, lines);
    state.dirty.sync_len(state.buffer.line_count());
    for r in row + 1..=row + n {
        state.mark_line_dirty(r);
    }
    state.cursor.row = row + n;
    state.cursor.col = 0;
    state.mark_viewport_dirty();
    debug!(target: "actions.clipboard", op = "paste_rows", kind = kind.as_str(), row, count = n, "clipboard");
    true
}
