//! File IO: load a buffer from disk and write it back.
//!
//! Synchronous and line-oriented. Load expands tabs to spaces and never
//! returns an empty buffer; bytes that are not UTF-8 decode to U+FFFD. Save
//! joins lines with `\n` with no trailing newline after the final line.
//! Failures are returned as `PersistError` and surfaced to the operator as a
//! notice; they never end the session.

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use core_state::EditorState;
use core_text::{Line, TextBuffer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no file name")]
    NoFileName,
}

/// Result of reading a file from disk.
#[derive(Debug)]
pub struct Loaded {
    pub buffer: TextBuffer,
    /// Some input bytes were not UTF-8 and were replaced with U+FFFD.
    pub replaced_invalid: bool,
}

/// Read `path` into a buffer, one line per input line, tabs expanded to
/// `tab_width` spaces. A missing file yields one empty line (new file).
pub fn load(path: &Path, tab_width: usize) -> Result<TextBuffer, PersistError> {
    read_file(path, tab_width).map(|loaded| loaded.buffer)
}

pub fn read_file(path: &Path, tab_width: usize) -> Result<Loaded, PersistError> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(target: "io", path = %path.display(), "new_file");
            return Ok(Loaded {
                buffer: TextBuffer::new(),
                replaced_invalid: false,
            });
        }
        Err(source) => {
            tracing::error!(target: "io", path = %path.display(), error = %source, "file_open_error");
            return Err(PersistError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let content = String::from_utf8_lossy(&bytes);
    let replaced_invalid = matches!(content, Cow::Owned(_));
    if replaced_invalid {
        tracing::warn!(target: "io", path = %path.display(), "invalid_utf8_replaced");
    }
    let lines: Vec<Line> = content
        .lines()
        .map(|l| expand_tabs(l, tab_width))
        .collect();
    tracing::info!(target: "io", path = %path.display(), lines = lines.len(), "file_loaded");
    Ok(Loaded {
        buffer: TextBuffer::from_lines(lines),
        replaced_invalid,
    })
}

fn expand_tabs(text: &str, tab_width: usize) -> Line {
    let mut chars = Vec::with_capacity(text.len());
    for c in text.chars() {
        if c == '\t' {
            chars.extend(std::iter::repeat_n(' ', tab_width));
        } else {
            chars.push(c);
        }
    }
    Line::from_chars(chars)
}

/// Write `buffer` to `path`. Returns the number of lines written.
pub fn save(buffer: &TextBuffer, path: &Path) -> Result<usize, PersistError> {
    if path.as_os_str().is_empty() {
        return Err(PersistError::NoFileName);
    }
    match std::fs::write(path, buffer.to_text()) {
        Ok(()) => {
            tracing::info!(target: "io", path = %path.display(), lines = buffer.line_count(), "file_written");
            Ok(buffer.line_count())
        }
        Err(source) => {
            tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
            Err(PersistError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Build the session state for `path`. A read failure starts with one empty
/// line, no file name and the error as the notice, so a later save cannot
/// overwrite the unread file.
pub fn open_file(path: PathBuf, tab_width: usize) -> EditorState {
    match read_file(&path, tab_width) {
        Ok(loaded) => {
            let mut state = EditorState::new(loaded.buffer, path).with_tab_width(tab_width);
            if loaded.replaced_invalid {
                state.set_notice("invalid UTF-8 replaced with U+FFFD");
            }
            state
        }
        Err(e) => {
            tracing::warn!(target: "io", path = %path.display(), "file_detached_after_read_error");
            let mut state =
                EditorState::new(TextBuffer::new(), PathBuf::new()).with_tab_width(tab_width);
            state.set_notice(e.to_string());
            state
        }
    }
}

/// Save the session buffer to its file. Clears `modified` on success; the
/// outcome is posted as the notice either way.
pub fn write_file(state: &mut EditorState) -> Result<usize, PersistError> {
    match save(&state.buffer, &state.file_name) {
        Ok(n) => {
            state.modified = false;
            state.set_notice(format!("saved {n} lines"));
            Ok(n)
        }
        Err(e) => {
            state.set_notice(e.to_string());
            Err(e)
        }
    }
}
