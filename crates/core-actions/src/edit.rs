//! Text mutation at the cursor: insert/delete a scalar, split and merge lines.
//!
//! In-place character edits mark only the owning row dirty. Anything that
//! changes the line count (split, merge) also forces a full redraw because
//! every row below the edit shifts on screen.
//!
//! Each function returns `true` when the buffer changed.

use core_state::EditorState;
use core_text::Line;
use tracing::trace;

/// Scalars after which `split_line` at end of line adds an indent unit.
pub const BLOCK_OPENERS: [char; 4] = ['(', '{', '[', ':'];

pub fn insert_char(state: &mut EditorState, ch: char) -> bool {
    let row = state.cursor.row;
    let Some(line) = state.buffer.line_mut(row) else {
        return false;
    };
    let col = state.cursor.col.min(line.len());
    line.insert(col, ch);
    state.cursor.col = col + 1;
    state.mark_line_dirty(row);
    trace!(target: "actions.dispatch", op = "insert_char", ch = %ch, row, col, "edit");
    true
}

/// Tab keystroke: `tab_width` separate single-space insertions.
pub fn insert_tab(state: &mut EditorState) -> bool {
    let mut changed = false;
    for _ in 0..state.tab_width {
        changed |= insert_char(state, ' ');
    }
    changed
}

/// Backspace. Merges the current line onto the previous one at column 0.
pub fn delete_before(state: &mut EditorState) -> bool {
    let (row, col) = (state.cursor.row, state.cursor.col);
    if col > 0 {
        let Some(line) = state.buffer.line_mut(row) else {
            return false;
        };
        if line.remove(col - 1).is_none() {
            return false;
        }
        state.cursor.col = col - 1;
        state.mark_line_dirty(row);
        trace!(target: "actions.dispatch", op = "delete_before", row, col, "edit");
        return true;
    }
    if row == 0 {
        return false;
    }
    let prev_len = state.buffer.line_len(row - 1);
    if !merge_into_previous(state, row) {
        return false;
    }
    state.cursor.row = row - 1;
    state.cursor.col = prev_len;
    trace!(target: "actions.dispatch", op = "merge_up", row, to_col = prev_len, "edit");
    true
}

/// Forward delete. Merges the next line onto the current one at end of line.
pub fn delete_after(state: &mut EditorState) -> bool {
    let (row, col) = (state.cursor.row, state.cursor.col);
    let len = state.buffer.line_len(row);
    if col < len {
        let Some(line) = state.buffer.line_mut(row) else {
            return false;
        };
        line.remove(col);
        state.mark_line_dirty(row);
        trace!(target: "actions.dispatch", op = "delete_after", row, col, "edit");
        return true;
    }
    if row + 1 >= state.buffer.line_count() {
        return false;
    }
    if !merge_into_previous(state, row + 1) {
        return false;
    }
    state.cursor.col = len;
    trace!(target: "actions.dispatch", op = "merge_down", row, "edit");
    true
}

/// Remove row `row` and append it to `row - 1`.
fn merge_into_previous(state: &mut EditorState, row: usize) -> bool {
    let Some(tail) = state.buffer.remove_line(row) else {
        return false;
    };
    match state.buffer.line_mut(row - 1) {
        Some(prev) => prev.append(tail),
        None => return false,
    }
    state.mark_line_dirty(row - 1);
    state.mark_viewport_dirty();
    state.dirty.sync_len(state.buffer.line_count());
    true
}

/// Enter. The new line carries the indentation prefix of the split line, plus
/// one indent unit when splitting at the end of a line that ends in a block
/// opener. The cursor lands after that indentation.
pub fn split_line(state: &mut EditorState) -> bool {
    let row = state.cursor.row;
    let tab_width = state.tab_width;
    let Some(line) = state.buffer.line_mut(row) else {
        return false;
    };
    let col = state.cursor.col.min(line.len());
    let mut indent: Vec<char> = line.indent_prefix(col).to_vec();
    let opens_block = col == line.len() && line.last().is_some_and(|c| BLOCK_OPENERS.contains(&c));
    if opens_block {
        indent.extend(std::iter::repeat_n(' ', tab_width));
    }
    let tail = line.split_off(col);
    let indent_len = indent.len();
    let mut new_line = Line::from_chars(indent);
    new_line.append(tail);
    state.buffer.insert_line(row + 1, new_line);

    state.cursor.row = row + 1;
    state.cursor.col = indent_len;
    state.dirty.sync_len(state.buffer.line_count());
    state.mark_line_dirty(row);
    state.mark_line_dirty(row + 1);
    state.mark_viewport_dirty();
    trace!(target: "actions.dispatch", op = "split_line", row, col, indent = indent_len, auto_indent = opens_block, "edit");
    true
}
