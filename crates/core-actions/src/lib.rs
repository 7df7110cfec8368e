//! core-actions: the editing operations and the per-key entry point.
//!
//! Every logical action has one entry point here:
//! * `edit` - character insert/delete, line split/merge, tab runs
//! * `clipboard` - copy/cut/paste/delete at symbol, line and block granularity
//! * `block` - brace block location with nth-enclosing selection
//! * `jump` - three-digit relative jumps
//! * `dispatcher` - routes an [`Action`] to the above, plus motions, mode,
//!   checkpoints, save and quit
//! * `io_ops` - load/save
//!
//! All operations take `&mut EditorState`, clamp instead of failing and leave
//! the buffer with at least one line and the cursor inside it.

use core_events::KeyEvent;
use core_keymap::Binding;
use core_state::EditorState;

pub mod block;
pub mod clipboard;
pub mod dispatcher;
pub mod edit;
pub mod io_ops;
pub mod jump;
mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use io_ops::{PersistError, load, save};
pub use key_translator::KeyTranslator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    LineStart,
    LineEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    /// Tab keystroke: `tab_width` single-space insertions.
    Tab,
    Backspace,
    Delete,
    SplitLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    Copy,
    Cut,
    Paste,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Symbol,
    Line,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Clipboard(ClipboardOp, Granularity),
    PushState,
    PullState,
    JumpUp,
    JumpDown,
    ToggleMode,
    Save,
    Quit { save: bool },
}

impl From<Binding> for Action {
    fn from(b: Binding) -> Self {
        use ClipboardOp as Op;
        use Granularity as G;
        match b {
            Binding::MoveLeft => Action::Motion(MotionKind::Left),
            Binding::MoveRight => Action::Motion(MotionKind::Right),
            Binding::MoveUp => Action::Motion(MotionKind::Up),
            Binding::MoveDown => Action::Motion(MotionKind::Down),
            Binding::PageUp => Action::Motion(MotionKind::PageUp),
            Binding::PageDown => Action::Motion(MotionKind::PageDown),
            Binding::LineStart => Action::Motion(MotionKind::LineStart),
            Binding::LineEnd => Action::Motion(MotionKind::LineEnd),
            Binding::ToggleMode => Action::ToggleMode,
            Binding::Save => Action::Save,
            Binding::QuitWithSave => Action::Quit { save: true },
            Binding::QuitWithoutSave => Action::Quit { save: false },
            Binding::CopySymbol => Action::Clipboard(Op::Copy, G::Symbol),
            Binding::CutSymbol => Action::Clipboard(Op::Cut, G::Symbol),
            Binding::PasteSymbol => Action::Clipboard(Op::Paste, G::Symbol),
            Binding::DeleteSymbol => Action::Clipboard(Op::Delete, G::Symbol),
            Binding::CopyLine => Action::Clipboard(Op::Copy, G::Line),
            Binding::CutLine => Action::Clipboard(Op::Cut, G::Line),
            Binding::PasteLine => Action::Clipboard(Op::Paste, G::Line),
            Binding::DeleteLine => Action::Clipboard(Op::Delete, G::Line),
            Binding::CopyBlock => Action::Clipboard(Op::Copy, G::Block),
            Binding::CutBlock => Action::Clipboard(Op::Cut, G::Block),
            Binding::PasteBlock => Action::Clipboard(Op::Paste, G::Block),
            Binding::DeleteBlock => Action::Clipboard(Op::Delete, G::Block),
            Binding::PushState => Action::PushState,
            Binding::PullState => Action::PullState,
            Binding::JumpUp => Action::JumpUp,
            Binding::JumpDown => Action::JumpDown,
        }
    }
}

/// Process one key event to completion: pending-jump interception, key
/// translation, dispatch.
pub fn handle_key(
    state: &mut EditorState,
    translator: &KeyTranslator,
    key: &KeyEvent,
) -> DispatchResult {
    let binding = translator.binding(state.mode, key);
    match jump::intercept(state, key, binding) {
        jump::JumpOutcome::Consumed => return DispatchResult::dirty(),
        jump::JumpOutcome::FallThrough | jump::JumpOutcome::Idle => {}
    }
    match translator.translate(state.mode, key) {
        Some(action) => dispatch(action, state),
        None => {
            tracing::trace!(target: "actions.dispatch", key = %key, "unbound_key");
            DispatchResult::clean()
        }
    }
}
