//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `motion`    - cursor movement, page motions
//! * `mode`      - View <-> Edit toggle
//! * `edit`      - text entry routed into `crate::edit`
//! * `clipboard` - copy/cut/paste/delete routed into `crate::clipboard`
//! * `undo`      - push_state / pull_state checkpoints
//!
//! After every action the cursor is re-clamped, dirty flags are resized to
//! the buffer, and a change of cursor row forces a full redraw (relative line
//! numbers change on every visible row).

use crate::Action;
use crate::io_ops::write_file;
use core_state::EditorState;

mod clipboard;
mod edit;
mod mode;
mod motion;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// The whole buffer was swapped for a checkpoint; row-level dirty
    /// information is meaningless and the frame repaints in full.
    pub buffer_replaced: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            buffer_replaced: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            buffer_replaced: false,
        }
    }
    pub fn buffer_replaced() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_replaced: true,
        }
    }
    pub(crate) fn changed(changed: bool) -> Self {
        if changed { Self::dirty() } else { Self::clean() }
    }
}

/// Apply an action to editor state. Returns `DispatchResult` describing whether
/// a render is needed (`dirty`) or the editor should exit (`quit`).
pub fn dispatch(action: Action, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor;
    let result = match action {
        Action::Motion(kind) => motion::handle_motion(kind, state),
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::Clipboard(op, granularity) => clipboard::handle_clipboard(op, granularity, state),
        Action::PushState => undo::handle_push(state),
        Action::PullState => undo::handle_pull(state),
        Action::JumpUp => {
            crate::jump::begin(state, -1);
            DispatchResult::dirty()
        }
        Action::JumpDown => {
            crate::jump::begin(state, 1);
            DispatchResult::dirty()
        }
        Action::ToggleMode => mode::handle_toggle(state),
        Action::Save => {
            // Outcome is reported through the notice.
            let _ = write_file(state);
            DispatchResult::dirty()
        }
        Action::Quit { save: false } => DispatchResult::quit(),
        Action::Quit { save: true } => match write_file(state) {
            Ok(_) => DispatchResult::quit(),
            Err(e) => {
                tracing::warn!(target: "actions.dispatch", error = %e, "quit_aborted_save_failed");
                DispatchResult::dirty()
            }
        },
    };
    state.clamp_cursor();
    state.dirty.sync_len(state.buffer.line_count());
    if state.cursor.row != before.row {
        state.mark_viewport_dirty();
    }
    tracing::trace!(
        target: "actions.dispatch",
        ?action,
        row = state.cursor.row,
        col = state.cursor.col,
        dirty = result.dirty,
        quit = result.quit,
        "dispatch"
    );
    result
}
