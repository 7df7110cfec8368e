//! Clipboard sub-dispatch: copy/cut/paste/delete by granularity.

use super::DispatchResult;
use crate::clipboard as clip;
use crate::{ClipboardOp, Granularity};
use core_state::EditorState;

pub(crate) fn handle_clipboard(
    op: ClipboardOp,
    granularity: Granularity,
    state: &mut EditorState,
) -> DispatchResult {
    let changed = match (op, granularity) {
        (ClipboardOp::Copy, Granularity::Symbol) => clip::copy_symbol(state),
        (ClipboardOp::Cut, Granularity::Symbol) => clip::cut_symbol(state),
        (ClipboardOp::Paste, Granularity::Symbol) => clip::paste_symbol(state),
        (ClipboardOp::Delete, Granularity::Symbol) => clip::delete_symbol(state),
        (ClipboardOp::Copy, Granularity::Line) => clip::copy_line(state),
        (ClipboardOp::Cut, Granularity::Line) => clip::cut_line(state),
        (ClipboardOp::Paste, Granularity::Line) => clip::paste_line(state),
        (ClipboardOp::Delete, Granularity::Line) => clip::delete_line(state),
        (ClipboardOp::Copy, Granularity::Block) => {
            clip::copy_block(state);
            true
        }
        (ClipboardOp::Cut, Granularity::Block) => clip::cut_block(state),
        (ClipboardOp::Paste, Granularity::Block) => clip::paste_block(state),
        (ClipboardOp::Delete, Granularity::Block) => clip::delete_block(state),
    };
    // Block copy and cut keep the cycle; anything else starts it over.
    if !matches!(
        (op, granularity),
        (ClipboardOp::Copy | ClipboardOp::Cut, Granularity::Block)
    ) {
        state.block_cycle.reset();
    }
    // Copies change the status bar CLIP indicator even with the text untouched.
    DispatchResult::changed(changed)
}
