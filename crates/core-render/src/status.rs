//! Status line composition and memoization.
//!
//! Format (left, then right-aligned):
//! `[MODE] <+|saved> [CLIP] [UNDO] [JUMP] <file> [| notice]` ... `<ext> Ln X, Col Y/<lines>`
//! * `[+]` when the buffer has unsaved changes, `saved` otherwise.
//! * Indicator tags appear only while their condition holds.
//! * `<file>` is truncated with `…` so the whole line fits the terminal width.
//!
//! Two stages, as before: `compose_status` produces ordered segments and
//! `format_status` lays them out for a width. `StatusBarCache` skips both when
//! the `StatusSnapshot` equals the previous frame's.

use std::borrow::Cow;
use std::fmt::Write as _;

use core_state::{EditorState, Mode};
use core_text::width::{str_width, truncate_with_ellipsis};

/// Everything the status line depends on. Compared structurally; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub mode: Mode,
    pub row: usize,
    pub col: usize,
    pub file_name: String,
    pub extension: String,
    pub modified: bool,
    pub line_count: usize,
    pub clipboard: bool,
    pub undo: bool,
    pub jump_pending: bool,
    pub cols: u16,
    pub rows: u16,
    pub notice: Option<String>,
}

impl StatusSnapshot {
    pub fn capture(state: &EditorState, cols: u16, rows: u16) -> Self {
        Self {
            mode: state.mode,
            row: state.cursor.row,
            col: state.cursor.col,
            file_name: state.file_name.display().to_string(),
            extension: state
                .file_name
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
            modified: state.modified,
            line_count: state.buffer.line_count(),
            clipboard: !state.clipboard.is_empty(),
            undo: state.undo_depth() > 0,
            jump_pending: state.jump.pending,
            cols,
            rows,
            notice: state.notice.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    Modified(bool),
    Indicator(&'static str),
    FileName(Cow<'a, str>),
    Notice(&'a str),
    /// Right side: extension (may be empty), 1-based position, line count.
    Position {
        ext: &'a str,
        line_1: usize,
        col_1: usize,
        lines: usize,
    },
}

pub fn compose_status(snap: &StatusSnapshot) -> Vec<StatusSegment<'_>> {
    let mut out = Vec::with_capacity(8);
    out.push(StatusSegment::Mode(snap.mode.tag()));
    out.push(StatusSegment::Modified(snap.modified));
    if snap.clipboard {
        out.push(StatusSegment::Indicator("CLIP"));
    }
    if snap.undo {
        out.push(StatusSegment::Indicator("UNDO"));
    }
    if snap.jump_pending {
        out.push(StatusSegment::Indicator("JUMP"));
    }
    let name: Cow<'_, str> = if snap.file_name.is_empty() {
        "[No Name]".into()
    } else {
        snap.file_name.as_str().into()
    };
    out.push(StatusSegment::FileName(name));
    if let Some(n) = snap.notice.as_deref() {
        out.push(StatusSegment::Notice(n));
    }
    out.push(StatusSegment::Position {
        ext: &snap.extension,
        line_1: snap.row + 1,
        col_1: snap.col + 1,
        lines: snap.line_count,
    });
    out
}

/// Lay segments out into exactly `cols` cells (or fewer when even the fixed
/// parts do not fit).
pub fn format_status(segments: &[StatusSegment<'_>], cols: usize) -> String {
    let mut head = String::with_capacity(32);
    let mut name: &str = "";
    let mut tail = String::new();
    let mut right = String::new();
    for seg in segments {
        match seg {
            StatusSegment::Mode(m) => {
                let _ = write!(head, "[{m}]");
            }
            StatusSegment::Modified(true) => head.push_str(" [+]"),
            StatusSegment::Modified(false) => head.push_str(" saved"),
            StatusSegment::Indicator(tag) => {
                let _ = write!(head, " {tag}");
            }
            StatusSegment::FileName(n) => name = n,
            StatusSegment::Notice(n) => {
                let _ = write!(tail, " | {n}");
            }
            StatusSegment::Position {
                ext,
                line_1,
                col_1,
                lines,
            } => {
                if !ext.is_empty() {
                    let _ = write!(right, "{ext}  ");
                }
                let _ = write!(right, "Ln {line_1}, Col {col_1}/{lines}");
            }
        }
    }
    head.push(' ');

    let fixed = str_width(&head) + str_width(&tail) + str_width(&right) + 1;
    let name = truncate_with_ellipsis(name, cols.saturating_sub(fixed));
    let mut left = head;
    left.push_str(&name);
    left.push_str(&tail);

    let used = str_width(&left) + str_width(&right);
    let mut s = left;
    if used < cols {
        s.extend(std::iter::repeat_n(' ', cols - used));
    } else {
        s.push(' ');
    }
    s.push_str(&right);
    truncate_with_ellipsis(&s, cols)
}

/// Memoized status message keyed on the last `StatusSnapshot`.
#[derive(Debug, Default)]
pub struct StatusBarCache {
    snapshot: Option<StatusSnapshot>,
    message: String,
    rebuilds: u64,
}

impl StatusBarCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message for `snap`, rebuilt only when it differs from the cached one.
    pub fn message(&mut self, snap: StatusSnapshot) -> &str {
        if self.snapshot.as_ref() == Some(&snap) {
            tracing::trace!(target: "render.status", "status_cache_hit");
            return &self.message;
        }
        self.message = format_status(&compose_status(&snap), snap.cols as usize);
        self.rebuilds += 1;
        tracing::trace!(target: "render.status", rebuilds = self.rebuilds, "status_rebuilt");
        self.snapshot = Some(snap);
        &self.message
    }

    /// Number of times the message was recomposed.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snap() -> StatusSnapshot {
        StatusSnapshot {
            mode: Mode::View,
            row: 2,
            col: 4,
            file_name: "notes.txt".into(),
            extension: "txt".into(),
            modified: false,
            line_count: 40,
            clipboard: false,
            undo: false,
            jump_pending: false,
            cols: 60,
            rows: 20,
            notice: None,
        }
    }

    #[test]
    fn plain_layout_fills_width() {
        let s = format_status(&compose_status(&snap()), 60);
        assert!(s.starts_with("[VIEW] saved notes.txt "));
        assert!(s.ends_with("txt  Ln 3, Col 5/40"));
        assert_eq!(str_width(&s), 60);
    }

    #[test]
    fn indicators_and_notice() {
        let mut sn = snap();
        sn.mode = Mode::Edit;
        sn.modified = true;
        sn.clipboard = true;
        sn.undo = true;
        sn.jump_pending = true;
        sn.notice = Some("saved 3 lines".into());
        let s = format_status(&compose_status(&sn), 80);
        assert!(s.starts_with("[EDIT] [+] CLIP UNDO JUMP notes.txt | saved 3 lines "));
    }

    #[test]
    fn long_file_name_is_ellipsized() {
        let mut sn = snap();
        sn.file_name = "a/very/long/directory/name/that/keeps/going/file.txt".into();
        let s = format_status(&compose_status(&sn), 50);
        assert_eq!(str_width(&s), 50);
        assert!(s.contains('…'));
        assert!(s.ends_with("Ln 3, Col 5/40"));
    }

    #[test]
    fn no_extension_omits_it() {
        let mut sn = snap();
        sn.file_name = "Makefile".into();
        sn.extension.clear();
        let s = format_status(&compose_status(&sn), 40);
        assert!(s.starts_with("[VIEW] saved Makefile "));
        assert!(s.ends_with(" Ln 3, Col 5/40"));
    }

    #[test]
    fn cache_reuses_message_for_equal_snapshot() {
        let mut cache = StatusBarCache::new();
        let first = cache.message(snap()).to_string();
        let second = cache.message(snap()).to_string();
        assert_eq!(first, second);
        assert_eq!(cache.rebuilds(), 1);
        let mut moved = snap();
        moved.col = 5;
        assert!(cache.message(moved).contains("Col 6"));
        assert_eq!(cache.rebuilds(), 2);
    }

    #[test]
    fn terminal_size_is_part_of_key() {
        let mut cache = StatusBarCache::new();
        cache.message(snap());
        let mut resized = snap();
        resized.rows = 30;
        cache.message(resized);
        assert_eq!(cache.rebuilds(), 2);
    }
}
