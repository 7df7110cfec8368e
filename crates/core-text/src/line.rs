//! A single buffer line stored as Unicode scalar values.
//!
//! Columns everywhere in the editor are scalar indices into a `Line`, never
//! byte offsets. A column equal to `len()` is the append position.

use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Line {
    chars: Vec<char>,
}

impl Line {
    pub fn new() -> Self {
        Self { chars: Vec::new() }
    }

    pub fn from_chars(chars: Vec<char>) -> Self {
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    pub fn get(&self, col: usize) -> Option<char> {
        self.chars.get(col).copied()
    }

    pub fn last(&self) -> Option<char> {
        self.chars.last().copied()
    }

    /// Insert `ch` at `col` (clamped to the append position).
    pub fn insert(&mut self, col: usize, ch: char) {
        let col = col.min(self.chars.len());
        self.chars.insert(col, ch);
    }

    /// Splice a run of scalars in at `col` (clamped). Returns the inserted length.
    pub fn insert_run(&mut self, col: usize, run: &[char]) -> usize {
        let col = col.min(self.chars.len());
        self.chars.splice(col..col, run.iter().copied());
        run.len()
    }

    /// Remove the scalar at `col`; `None` when `col` is at or past the end.
    pub fn remove(&mut self, col: usize) -> Option<char> {
        if col < self.chars.len() {
            Some(self.chars.remove(col))
        } else {
            None
        }
    }

    /// Remove and return the scalars in `range` (clamped to the line).
    pub fn drain(&mut self, range: Range<usize>) -> Line {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        Line::from_chars(self.chars.drain(start..end).collect())
    }

    /// Truncate at `col` and return the tail as a new line.
    pub fn split_off(&mut self, col: usize) -> Line {
        let col = col.min(self.chars.len());
        Line::from_chars(self.chars.split_off(col))
    }

    /// Concatenate `other` onto the end of this line.
    pub fn append(&mut self, mut other: Line) {
        self.chars.append(&mut other.chars);
    }

    /// Leading run of spaces/tabs, limited to the first `limit` scalars.
    pub fn indent_prefix(&self, limit: usize) -> &[char] {
        let limit = limit.min(self.chars.len());
        let n = self.chars[..limit]
            .iter()
            .take_while(|c| **c == ' ' || **c == '\t')
            .count();
        &self.chars[..n]
    }

    /// Text of the scalar window `[start, start + width)`; used by the render DTO.
    pub fn window(&self, start: usize, width: usize) -> String {
        self.chars.iter().skip(start).take(width).collect()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            fmt::Write::write_char(f, *c)?;
        }
        Ok(())
    }
}
