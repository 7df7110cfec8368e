//! Mode transition handling (View <-> Edit).

use super::DispatchResult;
use core_state::EditorState;

pub(crate) fn handle_toggle(state: &mut EditorState) -> DispatchResult {
    let next = state.mode.toggled();
    state.set_mode(next);
    state.block_cycle.reset();
    DispatchResult::dirty()
}
