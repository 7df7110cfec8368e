//! Checkpoint handling: `push_state` snapshots the buffer, `pull_state`
//! restores the newest snapshot.

use super::DispatchResult;
use core_state::EditorState;

pub(crate) fn handle_push(state: &mut EditorState) -> DispatchResult {
    state.push_state();
    tracing::trace!(target: "actions.dispatch", op = "push_state", depth = state.undo_depth(), "undo");
    // UNDO indicator may have flipped.
    DispatchResult::dirty()
}

pub(crate) fn handle_pull(state: &mut EditorState) -> DispatchResult {
    let before = state.buffer.line_count();
    if !state.pull_state() {
        return DispatchResult::clean();
    }
    state.block_cycle.reset();
    tracing::trace!(
        target: "actions.dispatch",
        op = "pull_state",
        line_count_changed = (before != state.buffer.line_count()),
        depth = state.undo_depth(),
        "undo"
    );
    DispatchResult::buffer_replaced()
}
