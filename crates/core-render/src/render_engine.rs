//! Frame assembly.
//!
//! `RenderEngine::prepare` turns editor state into a `Frame`: the visible row
//! range, the rows that need repainting (all of them on a forced pass, only
//! dirty ones otherwise), the cursor's screen position and the status
//! message. Building a frame consumes the dirty flags it covers; the caller
//! hands the frame to `writer::paint` (or inspects it in tests).

use std::ops::Range;

use core_state::EditorState;
use core_text::width::char_width;

use crate::status::{StatusBarCache, StatusSnapshot};
use crate::viewport::{Viewport, ViewportTracker, gutter_number, span_cells};

/// Rows reserved below the text area for the status bar.
pub const STATUS_ROWS: u16 = 1;

/// Gutter marker for screen rows past the end of the buffer.
pub const EOF_MARKER: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulerCell {
    /// Absolute screen column.
    pub x: u16,
    /// Scalar under the ruler, or a space past end of line.
    pub ch: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub screen_row: u16,
    /// `None` for rows below the last buffer line.
    pub buffer_row: Option<usize>,
    pub gutter: String,
    pub text: String,
    pub ruler: Option<RulerCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub cols: u16,
    pub rows: u16,
    /// Buffer rows mapped to the text area (may extend past the buffer end).
    pub visible: Range<usize>,
    /// Forced pass: every text row is present in `rows`.
    pub full: bool,
    pub rows_to_paint: Vec<FrameRow>,
    /// Buffer rows repainted because they were flagged dirty.
    pub dirty_rows: Vec<usize>,
    /// `(x, y)` screen position of the cursor.
    pub cursor: (u16, u16),
    pub status: String,
    pub status_row: u16,
}

#[derive(Debug, Default)]
pub struct RenderEngine {
    viewport: ViewportTracker,
    status: StatusBarCache,
    /// 0-based ruler column.
    ruler: Option<usize>,
}

impl RenderEngine {
    pub fn new(margin: usize, ruler: Option<usize>) -> Self {
        Self {
            viewport: ViewportTracker::new(margin),
            status: StatusBarCache::new(),
            ruler,
        }
    }

    pub fn set_margin(&mut self, margin: usize) {
        self.viewport.set_margin(margin);
    }

    pub fn viewport(&self) -> &ViewportTracker {
        &self.viewport
    }

    pub fn status_cache(&self) -> &StatusBarCache {
        &self.status
    }

    /// Text-area height for a terminal of `rows` rows.
    pub fn text_rows(rows: u16) -> usize {
        usize::from(rows.saturating_sub(STATUS_ROWS)).max(1)
    }

    pub fn prepare(&mut self, state: &mut EditorState, cols: u16, rows: u16) -> Frame {
        let line_count = state.buffer.line_count();
        state.dirty.sync_len(line_count);
        let text_rows = Self::text_rows(rows);
        state.set_last_text_height(text_rows);
        let vp = self.viewport.update(state, usize::from(cols), text_rows);
        let full = state.dirty.is_forced();

        let mut rows_to_paint = Vec::new();
        let mut dirty_rows = Vec::new();
        for screen in 0..text_rows {
            let row = vp.first_row + screen;
            let screen_row = u16::try_from(screen).unwrap_or(u16::MAX);
            if row >= line_count {
                if full {
                    rows_to_paint.push(self.eof_row(&vp, screen_row));
                }
                continue;
            }
            let dirty = state.dirty.is_dirty(row);
            if !(full || dirty) {
                continue;
            }
            if dirty {
                dirty_rows.push(row);
            }
            rows_to_paint.push(self.text_row(state, &vp, row, screen_row));
            state.dirty.clear(row);
        }
        if full {
            state.dirty.clear_all();
            state.dirty.finish_frame();
        }
        tracing::trace!(
            target: "render.viewport",
            full,
            first = vp.first_row,
            painted = rows_to_paint.len(),
            dirty = dirty_rows.len(),
            "frame"
        );

        let cursor = cursor_position(state, &vp);
        let status = self
            .status
            .message(StatusSnapshot::capture(state, cols, rows))
            .to_string();
        Frame {
            cols,
            rows,
            visible: vp.first_row..vp.first_row + vp.text_rows,
            full,
            rows_to_paint,
            dirty_rows,
            cursor,
            status,
            status_row: u16::try_from(text_rows).unwrap_or(u16::MAX),
        }
    }

    fn text_row(&self, state: &EditorState, vp: &Viewport, row: usize, screen_row: u16) -> FrameRow {
        let number = gutter_number(row, state.cursor.row);
        let gutter = format!("{:>w$} ", number, w = vp.gutter - 1);
        let (text, ruler) = match state.buffer.line(row) {
            Some(line) => (
                clip_to_width(&line.window(vp.first_col, vp.text_cols), vp.text_cols),
                self.ruler_cell(vp, line.as_slice()),
            ),
            None => (String::new(), self.ruler_cell(vp, &[])),
        };
        FrameRow {
            screen_row,
            buffer_row: Some(row),
            gutter,
            text,
            ruler,
        }
    }

    fn eof_row(&self, vp: &Viewport, screen_row: u16) -> FrameRow {
        let mut gutter = String::with_capacity(vp.gutter);
        gutter.push(EOF_MARKER);
        gutter.extend(std::iter::repeat_n(' ', vp.gutter - 1));
        FrameRow {
            screen_row,
            buffer_row: None,
            gutter,
            text: String::new(),
            ruler: self.ruler_cell(vp, &[]),
        }
    }

    fn ruler_cell(&self, vp: &Viewport, line: &[char]) -> Option<RulerCell> {
        let col = self.ruler?;
        if col < vp.first_col {
            return None;
        }
        let ch = line.get(col).copied().unwrap_or(' ');
        let offset = span_cells(line, vp.first_col, col);
        if offset + char_width(ch).max(1) > vp.text_cols {
            return None;
        }
        let x = u16::try_from(vp.gutter + offset).ok()?;
        Some(RulerCell { x, ch })
    }
}

/// Keep whole scalars while their cell widths fit in `max`.
fn clip_to_width(s: &str, max: usize) -> String {
    let mut used = 0;
    s.chars()
        .take_while(|c| {
            used += char_width(*c);
            used <= max
        })
        .collect()
}

fn cursor_position(state: &EditorState, vp: &Viewport) -> (u16, u16) {
    let y = state.cursor.row.saturating_sub(vp.first_row);
    let cells = state
        .buffer
        .line(state.cursor.row)
        .map_or(0, |l| span_cells(l.as_slice(), vp.first_col, state.cursor.col));
    let x = vp.gutter + cells;
    (
        u16::try_from(x).unwrap_or(u16::MAX),
        u16::try_from(y).unwrap_or(u16::MAX),
    )
}
