//! Tagged copy buffer shared by the three clipboard granularities.

use core_text::Line;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipKind {
    #[default]
    Empty,
    Symbol,
    Line,
    Block,
}

impl ClipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClipKind::Empty => "empty",
            ClipKind::Symbol => "symbol",
            ClipKind::Line => "line",
            ClipKind::Block => "block",
        }
    }
}

/// Overwritten by every copy/cut, never cleared automatically.
#[derive(Debug, Clone, Default)]
pub struct CopyBuffer {
    contents: Vec<Line>,
    kind: ClipKind,
}

impl CopyBuffer {
    pub fn kind(&self) -> ClipKind {
        self.kind
    }

    pub fn contents(&self) -> &[Line] {
        &self.contents
    }

    pub fn is_empty(&self) -> bool {
        self.kind == ClipKind::Empty || self.contents.is_empty()
    }

    pub fn store(&mut self, kind: ClipKind, contents: Vec<Line>) {
        self.kind = kind;
        self.contents = contents;
    }

    /// Contents if the last copy/cut was of `kind` and holds at least one line.
    pub fn matching(&self, kind: ClipKind) -> Option<&[Line]> {
        if self.kind == kind && !self.contents.is_empty() {
            Some(&self.contents)
        } else {
            None
        }
    }
}
