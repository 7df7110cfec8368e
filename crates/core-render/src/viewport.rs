//! Viewport tracking: scroll offsets with a vertical margin, gutter sizing and
//! relative line numbers.
//!
//! Offsets live in `EditorState::scroll` so page motions can move them. The
//! tracker only re-derives them each frame from the cursor and forces a full
//! redraw whenever either offset changes (every visible row maps to a
//! different buffer row or column window).

use core_state::EditorState;
use core_text::width::char_width;

/// Geometry of one frame's text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub first_row: usize,
    pub first_col: usize,
    pub text_rows: usize,
    /// Columns left for text after the gutter.
    pub text_cols: usize,
    pub gutter: usize,
}

impl Viewport {
    pub fn contains_row(&self, row: usize) -> bool {
        row >= self.first_row && row < self.first_row + self.text_rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    margin: usize,
}

impl ViewportTracker {
    pub fn new(margin: usize) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> usize {
        self.margin
    }

    pub fn set_margin(&mut self, margin: usize) {
        self.margin = margin;
    }

    /// Bring the cursor into view for a `cols` x `text_rows` text area and
    /// return the resulting geometry.
    pub fn update(&self, state: &mut EditorState, cols: usize, text_rows: usize) -> Viewport {
        let text_rows = text_rows.max(1);
        let line_count = state.buffer.line_count();
        let gutter = gutter_width(line_count);
        let text_cols = cols.saturating_sub(gutter).max(1);

        let first_row = vertical_offset(
            state.scroll.row,
            state.cursor.row,
            line_count,
            text_rows,
            self.margin,
        );
        let first_col = {
            let line = state.buffer.line(state.cursor.row).map_or(&[][..], |l| l.as_slice());
            horizontal_offset(line, state.scroll.col, state.cursor.col, text_cols)
        };
        if first_row != state.scroll.row || first_col != state.scroll.col {
            tracing::debug!(
                target: "render.viewport",
                from_row = state.scroll.row,
                to_row = first_row,
                from_col = state.scroll.col,
                to_col = first_col,
                "scroll"
            );
            state.scroll.row = first_row;
            state.scroll.col = first_col;
            state.mark_viewport_dirty();
        }
        Viewport {
            first_row,
            first_col,
            text_rows,
            text_cols,
            gutter,
        }
    }
}

/// Decimal digits of the line count plus one separator column.
pub fn gutter_width(line_count: usize) -> usize {
    let mut digits = 1;
    let mut n = line_count / 10;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits + 1
}

/// Number shown in the gutter: distance from the cursor row, or the
/// absolute 1-based number on the cursor row itself.
pub fn gutter_number(row: usize, cursor_row: usize) -> usize {
    if row == cursor_row {
        row + 1
    } else {
        row.abs_diff(cursor_row)
    }
}

/// First visible row keeping `margin` rows between the cursor and either
/// edge where the buffer allows it; clamps at the buffer extremes.
pub fn vertical_offset(
    current: usize,
    cursor_row: usize,
    line_count: usize,
    text_rows: usize,
    margin: usize,
) -> usize {
    let text_rows = text_rows.max(1);
    if line_count <= text_rows {
        return 0;
    }
    let margin = margin.min((text_rows - 1) / 2);
    let mut first = current;
    if cursor_row < first + margin {
        first = cursor_row.saturating_sub(margin);
    }
    if cursor_row + margin >= first + text_rows {
        first = cursor_row + margin + 1 - text_rows;
    }
    first.min(line_count - text_rows)
}

/// Cells covered by scalar columns `from..to`. Columns past the end of the
/// line count one cell each.
pub fn span_cells(line: &[char], from: usize, to: usize) -> usize {
    (from..to)
        .map(|i| line.get(i).map_or(1, |c| char_width(*c)))
        .sum()
}

/// First visible scalar column such that the cells from it up to and
/// including the cursor cell fit in `text_cols`.
pub fn horizontal_offset(line: &[char], current: usize, col: usize, text_cols: usize) -> usize {
    let text_cols = text_cols.max(1);
    if col < current {
        return col;
    }
    let cursor_cell = line.get(col).map_or(1, |c| char_width(*c).max(1));
    let mut first = current;
    let mut used = span_cells(line, first, col) + cursor_cell;
    while used > text_cols && first < col {
        used -= line.get(first).map_or(1, |c| char_width(*c));
        first += 1;
    }
    first
}
