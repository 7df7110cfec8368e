use core_text::{Line, TextBuffer};
use tracing::trace;

/// A deep copy of every buffer line. Shares no storage with the live buffer.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub lines: Vec<Line>,
}

/// Manual checkpoint stack: `push_state` / `pull_state` only.
///
/// There is no redo and no per-keystroke capture. Each entry is a full
/// snapshot so push and pull are O(document size).
#[derive(Debug, Default)]
pub struct UndoStack {
    stack: Vec<Snapshot>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn push(&mut self, buffer: &TextBuffer) {
        let snap = Snapshot {
            lines: buffer.snapshot(),
        };
        let lines = snap.lines.len();
        self.stack.push(snap);
        trace!(target: "state.undo", depth = self.stack.len(), lines, "push_state");
    }

    /// Pop the newest snapshot into `buffer`. Returns false (buffer untouched)
    /// when the stack is empty.
    pub fn pull(&mut self, buffer: &mut TextBuffer) -> bool {
        match self.stack.pop() {
            Some(snap) => {
                let lines = snap.lines.len();
                buffer.replace_all(snap.lines);
                trace!(target: "state.undo", depth = self.stack.len(), lines, "pull_state");
                true
            }
            None => {
                trace!(target: "state.undo", "pull_state_empty");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_restores_in_lifo_order() {
        let mut buf = TextBuffer::from_text("one");
        let mut undo = UndoStack::new();
        undo.push(&buf);
        buf.line_mut(0).unwrap().insert(3, '!');
        undo.push(&buf);
        buf.insert_line(1, Line::from("two"));

        assert!(undo.pull(&mut buf));
        assert_eq!(buf.to_text(), "one!");
        assert!(undo.pull(&mut buf));
        assert_eq!(buf.to_text(), "one");
        assert!(!undo.pull(&mut buf));
        assert_eq!(buf.to_text(), "one");
    }

    #[test]
    fn snapshot_does_not_alias_live_buffer() {
        let mut buf = TextBuffer::from_text("abc\ndef");
        let mut undo = UndoStack::new();
        undo.push(&buf);
        buf.line_mut(1).unwrap().remove(0);
        buf.remove_line(0);
        assert!(undo.pull(&mut buf));
        assert_eq!(buf.to_text(), "abc\ndef");
        assert_eq!(undo.depth(), 0);
    }
}
