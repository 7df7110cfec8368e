//! Brace block location.
//!
//! Rows `0..=row` are scanned for `{`/`}` with a stack of still-open braces.
//! The candidate opener is the `counter`-th entry from the top of that stack
//! (0 = innermost). From the candidate a forward depth scan finds the first
//! `}` at depth 0.
//!
//! Pairs closed on or before `row` are never on the stack, even when the
//! cursor sits between them. With `["{", "  {", "  }", "}"]` and `row == 2`
//! the innermost candidate is therefore the brace on row 0.

use core_text::TextBuffer;
use tracing::debug;

/// Inclusive `(start_row, end_row)`. Degenerate `(row, row)` when `counter`
/// exceeds the available nesting; `(start, start)` when the opener is never
/// closed.
pub fn find_block(buffer: &TextBuffer, row: usize, counter: usize) -> (usize, usize) {
    let row = row.min(buffer.line_count() - 1);
    let mut open: Vec<(usize, usize)> = Vec::new();
    for (r, line) in buffer.lines().enumerate().take(row + 1) {
        for (c, ch) in line.as_slice().iter().enumerate() {
            match ch {
                '{' => open.push((r, c)),
                '}' => {
                    open.pop();
                }
                _ => {}
            }
        }
    }
    if counter >= open.len() {
        debug!(target: "actions.block", row, counter, depth = open.len(), "block_nesting_exhausted");
        return (row, row);
    }
    let (start_row, start_col) = open[open.len() - 1 - counter];
    let end_row = match_close(buffer, start_row, start_col).unwrap_or(start_row);
    debug!(target: "actions.block", row, counter, start_row, end_row, "block_found");
    (start_row, end_row)
}

/// Row of the `}` matching the `{` at `(row, col)`.
fn match_close(buffer: &TextBuffer, row: usize, col: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (r, line) in buffer.lines().enumerate().skip(row) {
        let from = if r == row { col + 1 } else { 0 };
        for ch in line.as_slice().iter().skip(from) {
            match ch {
                '{' => depth += 1,
                '}' if depth == 0 => return Some(r),
                '}' => depth -= 1,
                _ => {}
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_text(&lines.join("\n"))
    }

    #[test]
    fn closed_pair_above_cursor_is_invisible() {
        let b = buf(&["{", "  {", "  }", "}"]);
        assert_eq!(find_block(&b, 2, 0), (0, 3));
        assert_eq!(find_block(&b, 2, 1), (2, 2));
    }

    #[test]
    fn cycling_selects_outer_blocks() {
        let b = buf(&["fn a() {", "  if x {", "    y();", "  }", "}"]);
        assert_eq!(find_block(&b, 2, 0), (1, 3));
        assert_eq!(find_block(&b, 2, 1), (0, 4));
        assert_eq!(find_block(&b, 2, 2), (2, 2));
    }

    #[test]
    fn unmatched_opener_is_degenerate() {
        let b = buf(&["x", "{", "y"]);
        assert_eq!(find_block(&b, 2, 0), (1, 1));
    }

    #[test]
    fn no_braces_yields_cursor_row() {
        let b = buf(&["a", "b"]);
        assert_eq!(find_block(&b, 1, 0), (1, 1));
        assert_eq!(find_block(&b, 9, 0), (1, 1));
    }

    #[test]
    fn same_line_pair_closes_before_cursor_row() {
        let b = buf(&["{ {} ", "  x", "}"]);
        assert_eq!(find_block(&b, 1, 0), (0, 2));
    }
}
