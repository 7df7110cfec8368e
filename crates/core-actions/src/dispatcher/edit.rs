//! Edit sub-dispatch: text entry keys routed to `crate::edit`.

use super::DispatchResult;
use crate::EditKind;
use crate::edit;
use core_state::{EditorState, Mode};

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    if state.mode != Mode::Edit {
        tracing::trace!(target: "actions.dispatch", ?kind, "edit_outside_edit_mode");
        return DispatchResult::clean();
    }
    let changed = match kind {
        EditKind::InsertChar(ch) => edit::insert_char(state, ch),
        EditKind::Tab => edit::insert_tab(state),
        EditKind::Backspace => edit::delete_before(state),
        EditKind::Delete => edit::delete_after(state),
        EditKind::SplitLine => edit::split_line(state),
    };
    if changed {
        state.block_cycle.reset();
    }
    DispatchResult::changed(changed)
}
