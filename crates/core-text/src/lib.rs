//! Line-vector text buffer.
//!
//! The buffer is an ordered sequence of [`Line`]s and is never empty: every
//! structural primitive refuses to drop the last remaining line. All line
//! insertion and removal in the editor funnels through `insert_line`,
//! `insert_lines`, `remove_line` and `remove_lines` so that split, merge,
//! paste and delete share one set of index rules.
//!
//! Invariants:
//! * `line_count() >= 1` at all times.
//! * Indices passed to structural primitives are clamped, never rejected with
//!   a panic.

mod line;
pub mod symbol;
pub mod width;

pub use line::Line;

/// Cursor position expressed as (row, scalar column).
///
/// `col == line length` is the append position, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Clamp row into `[0, line_count)` then col into `[0, len(row)]`.
    pub fn clamp_to(&mut self, buffer: &TextBuffer) {
        let last = buffer.line_count() - 1;
        if self.row > last {
            self.row = last;
        }
        let len = buffer.line_len(self.row);
        if self.col > len {
            self.col = len;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<Line>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// A buffer holding a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
        }
    }

    /// Build from owned lines; an empty vector yields one empty line.
    pub fn from_lines(mut lines: Vec<Line>) -> Self {
        if lines.is_empty() {
            lines.push(Line::new());
        }
        Self { lines }
    }

    /// Split `text` on `'\n'` into lines. Every separator starts a new line, so
    /// `"a\n"` yields `["a", ""]`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n').map(Line::from).collect())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    pub fn line_mut(&mut self, row: usize) -> Option<&mut Line> {
        self.lines.get_mut(row)
    }

    /// Scalar length of `row`, or 0 past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(Line::len).unwrap_or(0)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Insert `line` so it becomes row `at` (clamped to the append position).
    pub fn insert_line(&mut self, at: usize, line: Line) {
        let at = at.min(self.lines.len());
        self.lines.insert(at, line);
    }

    /// Insert `lines` so the first becomes row `at` (clamped). Returns the count inserted.
    pub fn insert_lines(&mut self, at: usize, lines: Vec<Line>) -> usize {
        let at = at.min(self.lines.len());
        let n = lines.len();
        self.lines.splice(at..at, lines);
        n
    }

    /// Remove row `at`. Returns `None` (and leaves the buffer untouched) when
    /// `at` is out of range or the buffer holds a single line.
    pub fn remove_line(&mut self, at: usize) -> Option<Line> {
        if at >= self.lines.len() || self.lines.len() == 1 {
            return None;
        }
        Some(self.lines.remove(at))
    }

    /// Remove rows `start..=end` (end clamped). Refuses when the removal would
    /// leave the buffer empty or the range is inverted.
    pub fn remove_lines(&mut self, start: usize, end: usize) -> Option<Vec<Line>> {
        if self.lines.is_empty() || start > end || start >= self.lines.len() {
            return None;
        }
        let end = end.min(self.lines.len() - 1);
        if end - start + 1 >= self.lines.len() {
            return None;
        }
        Some(self.lines.drain(start..=end).collect())
    }

    /// Deep copy of every line; shares no storage with the live buffer.
    pub fn snapshot(&self) -> Vec<Line> {
        self.lines.clone()
    }

    /// Replace every line (undo restore). An empty vector yields one empty line.
    pub fn replace_all(&mut self, lines: Vec<Line>) {
        *self = Self::from_lines(lines);
    }

    /// Lines joined with `'\n'`, no trailing newline after the final line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.to_string());
        }
        out
    }
}
