//! Editor state: buffer, cursor, mode, clipboard, undo checkpoints, jump and
//! redraw bookkeeping.
//!
//! `EditorState` is the single owner of all mutable session state. The event
//! loop owns one instance and passes it by `&mut` into every action; nothing
//! lives in module-level statics.
//!
//! Undo is manual checkpointing (`push_state` / `pull_state`) over full buffer
//! snapshots held by `undo::UndoStack`; the stack itself is private and only
//! reachable through the delegating methods below so every restore goes
//! through the cursor re-clamp and redraw marking.

use std::path::PathBuf;

use core_text::{Cursor, TextBuffer};
use tracing::debug;

pub mod clipboard;
pub mod dirty;
pub mod jump;
pub mod undo;

pub use clipboard::{ClipKind, CopyBuffer};
pub use dirty::DirtyState;
pub use jump::{JUMP_DIGITS, JumpState};
use undo::UndoStack;

/// Default tab expansion width.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Navigation, clipboard, checkpoint and jump commands.
    #[default]
    View,
    /// Text entry.
    Edit,
}

impl Mode {
    /// `(mode + 1) % 2`.
    pub fn toggled(self) -> Self {
        match self {
            Mode::View => Mode::Edit,
            Mode::Edit => Mode::View,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Mode::View => "VIEW",
            Mode::Edit => "EDIT",
        }
    }
}

/// Block copy cycling: repeated block copies from an unmoved cursor select
/// successively outer blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockCycle {
    pub counter: usize,
    pub anchor: Option<Cursor>,
}

impl BlockCycle {
    /// Counter for an invocation at `cursor`; increments when the cursor has
    /// not moved since the previous invocation, otherwise restarts at 0.
    pub fn advance(&mut self, cursor: Cursor) -> usize {
        if self.anchor == Some(cursor) {
            self.counter += 1;
        } else {
            self.counter = 0;
            self.anchor = Some(cursor);
        }
        self.counter
    }

    pub fn reset(&mut self) {
        *self = BlockCycle::default();
    }
}

/// Buffer cell shown at the top-left of the text area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub row: usize,
    pub col: usize,
}

/// Top-level editor state container.
#[derive(Debug)]
pub struct EditorState {
    pub buffer: TextBuffer,
    pub cursor: Cursor,
    pub mode: Mode,
    pub file_name: PathBuf,
    pub modified: bool,
    pub clipboard: CopyBuffer,
    pub jump: JumpState,
    pub block_cycle: BlockCycle,
    pub dirty: DirtyState,
    pub scroll: ScrollOffset,
    pub tab_width: usize,
    /// Text rows of the last rendered frame; page motions move by this much.
    pub last_text_height: usize,
    /// One operator-visible message, cleared on the next input.
    pub notice: Option<String>,
    undo: UndoStack,
}

impl EditorState {
    pub fn new(buffer: TextBuffer, file_name: PathBuf) -> Self {
        let dirty = DirtyState::new(buffer.line_count());
        Self {
            buffer,
            cursor: Cursor::origin(),
            mode: Mode::View,
            file_name,
            modified: false,
            clipboard: CopyBuffer::default(),
            jump: JumpState::default(),
            block_cycle: BlockCycle::default(),
            dirty,
            scroll: ScrollOffset::default(),
            tab_width: DEFAULT_TAB_WIDTH,
            last_text_height: 0,
            notice: None,
            undo: UndoStack::new(),
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    pub fn set_last_text_height(&mut self, h: usize) {
        self.last_text_height = h;
    }

    /// Flag `row` for repaint and mark the document modified.
    pub fn mark_line_dirty(&mut self, row: usize) {
        self.dirty.mark(row);
        self.modified = true;
    }

    /// Force a full repaint on the next frame.
    pub fn mark_viewport_dirty(&mut self) {
        self.dirty.force();
    }

    pub fn set_notice<S: Into<String>>(&mut self, msg: S) {
        self.notice = Some(msg.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != Mode::View {
            self.jump.reset();
        }
        if mode != self.mode {
            debug!(target: "state.mode", from = ?self.mode, to = ?mode, "mode_change");
        }
        self.mode = mode;
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor.clamp_to(&self.buffer);
    }

    pub fn current_line_len(&self) -> usize {
        self.buffer.line_len(self.cursor.row)
    }

    pub fn push_state(&mut self) {
        self.undo.push(&self.buffer);
    }

    /// Restore the newest checkpoint. Empty stack is a silent no-op; the
    /// cursor is re-clamped either way.
    pub fn pull_state(&mut self) -> bool {
        let restored = self.undo.pull(&mut self.buffer);
        if restored {
            self.modified = true;
            self.dirty.sync_len(self.buffer.line_count());
            self.mark_viewport_dirty();
        }
        self.clamp_cursor();
        restored
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Line;

    fn state(text: &str) -> EditorState {
        EditorState::new(TextBuffer::from_text(text), PathBuf::from("t.txt"))
    }

    #[test]
    fn new_state_defaults() {
        let st = state("abc");
        assert_eq!(st.mode, Mode::View);
        assert_eq!(st.cursor, Cursor::origin());
        assert!(!st.modified);
        assert!(st.dirty.is_forced());
        assert_eq!(st.tab_width, DEFAULT_TAB_WIDTH);
    }

    #[test]
    fn mark_line_dirty_sets_modified() {
        let mut st = state("a\nb");
        st.mark_line_dirty(1);
        assert!(st.modified);
        assert!(st.dirty.is_dirty(1));
    }

    #[test]
    fn leaving_view_resets_jump() {
        let mut st = state("a");
        st.jump.begin(1);
        st.jump.push_digit(3);
        st.set_mode(Mode::Edit);
        assert_eq!(st.jump, JumpState::default());
    }

    #[test]
    fn pull_state_reclamps_cursor() {
        let mut st = state("short");
        st.push_state();
        st.buffer.insert_line(1, Line::from("a much longer line"));
        st.cursor = Cursor::new(1, 10);
        assert!(st.pull_state());
        assert_eq!(st.cursor, Cursor::new(0, 5));
        assert_eq!(st.undo_depth(), 0);
    }

    #[test]
    fn pull_state_empty_is_noop() {
        let mut st = state("abc");
        st.cursor = Cursor::new(0, 2);
        assert!(!st.pull_state());
        assert_eq!(st.buffer.to_text(), "abc");
        assert_eq!(st.cursor, Cursor::new(0, 2));
        assert!(!st.modified);
    }

    #[test]
    fn block_cycle_advances_only_in_place() {
        let mut bc = BlockCycle::default();
        let c = Cursor::new(2, 0);
        assert_eq!(bc.advance(c), 0);
        assert_eq!(bc.advance(c), 1);
        assert_eq!(bc.advance(c), 2);
        assert_eq!(bc.advance(Cursor::new(1, 0)), 0);
    }
}
