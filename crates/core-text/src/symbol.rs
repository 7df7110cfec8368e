//! Symbol span detection.
//!
//! A symbol is a maximal run of Unicode letters/digits containing the cursor
//! column. When the scalar under the cursor is not alphanumeric (or the
//! cursor sits at the append position) the span is empty at the cursor.

/// Alphanumeric classification used for symbol boundaries.
pub fn is_symbol_char(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric()
}

/// Returns the half-open span `[left, right)` of the symbol under `col`.
pub fn symbol_span(line: &[char], col: usize) -> (usize, usize) {
    match line.get(col) {
        Some(c) if is_symbol_char(*c) => {}
        _ => return (col, col),
    }
    let mut left = col;
    while left > 0 && is_symbol_char(line[left - 1]) {
        left -= 1;
    }
    let mut right = col + 1;
    while right < line.len() && is_symbol_char(line[right]) {
        right += 1;
    }
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn span_covers_alnum_run() {
        let l = chars("foo12 bar");
        assert_eq!(symbol_span(&l, 2), (0, 5));
        assert_eq!(symbol_span(&l, 0), (0, 5));
        assert_eq!(symbol_span(&l, 4), (0, 5));
        assert_eq!(symbol_span(&l, 7), (6, 9));
    }

    #[test]
    fn non_alnum_degenerates_to_cursor() {
        let l = chars("foo12 bar");
        assert_eq!(symbol_span(&l, 5), (5, 5));
        assert_eq!(symbol_span(&l, 9), (9, 9));
        assert_eq!(symbol_span(&[], 0), (0, 0));
    }

    #[test]
    fn unicode_letters_count() {
        let l = chars("(größe_2)");
        assert_eq!(symbol_span(&l, 2), (1, 6));
    }
}
