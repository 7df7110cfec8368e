//! Terminal writer: translates a `Frame` into queued crossterm commands and
//! flushes once per frame.
//!
//! Invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * All positions are absolute (0,0) origin; the frame guarantees bounds.
//! * The cursor is hidden while rows are painted and shown at the end.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

use crate::render_engine::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Gutter,
    EofMarker,
    Ruler,
    Status,
}

#[derive(Debug)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine,
    Print(String),
    Styled(String, Style),
    HideCursor,
    ShowCursor,
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn styled<S: Into<String>>(&mut self, s: S, style: Style) {
        self.cmds.push(Command::Styled(s.into(), style));
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::UntilNewLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::Styled(s, style) => {
                    let content = match style {
                        Style::Gutter => s.with(Color::DarkGrey),
                        Style::EofMarker => s.with(Color::Blue),
                        Style::Ruler => s.on(Color::DarkGrey),
                        Style::Status => s.attribute(Attribute::Reverse),
                    };
                    queue!(out, PrintStyledContent(content))?;
                }
                Command::HideCursor => queue!(out, Hide)?,
                Command::ShowCursor => queue!(out, Show)?,
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn flush(self) -> Result<()> {
        let mut out = stdout();
        self.flush_to(&mut out)
    }
}

/// Queue the commands that bring the terminal up to date with `frame`.
pub fn build(frame: &Frame) -> Writer {
    let mut w = Writer::new();
    w.cmds.reserve(frame.rows_to_paint.len() * 4 + 6);
    w.cmds.push(Command::HideCursor);
    for row in &frame.rows_to_paint {
        w.move_to(0, row.screen_row);
        w.clear_line();
        let style = if row.buffer_row.is_some() {
            Style::Gutter
        } else {
            Style::EofMarker
        };
        w.styled(row.gutter.as_str(), style);
        w.print(row.text.as_str());
        if let Some(r) = row.ruler {
            w.move_to(r.x, row.screen_row);
            w.styled(r.ch.to_string(), Style::Ruler);
        }
    }
    w.move_to(0, frame.status_row);
    w.clear_line();
    w.styled(frame.status.as_str(), Style::Status);
    w.move_to(frame.cursor.0, frame.cursor.1);
    w.cmds.push(Command::ShowCursor);
    w
}

/// Paint `frame` to stdout.
pub fn paint(frame: &Frame) -> Result<()> {
    build(frame).flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_engine::RenderEngine;
    use core_state::EditorState;
    use core_text::TextBuffer;
    use std::path::PathBuf;

    #[test]
    fn forced_frame_paints_every_text_row_and_status() {
        let mut st = EditorState::new(TextBuffer::from_text("hello\nworld"), PathBuf::from("w.txt"));
        let frame = RenderEngine::new(0, None).prepare(&mut st, 30, 4);
        let w = build(&frame);
        let prints: Vec<&str> = w
            .commands()
            .iter()
            .filter_map(|c| match c {
                Command::Print(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(prints, vec!["hello", "world"]);
        let eof = w
            .commands()
            .iter()
            .filter(|c| matches!(c, Command::Styled(_, Style::EofMarker)))
            .count();
        assert_eq!(eof, 1);
        assert!(matches!(w.commands().last(), Some(Command::ShowCursor)));
    }

    #[test]
    fn flush_writes_text_bytes() {
        let mut st = EditorState::new(TextBuffer::from_text("abc"), PathBuf::from("w.txt"));
        let frame = RenderEngine::new(0, None).prepare(&mut st, 30, 3);
        let mut out: Vec<u8> = Vec::new();
        build(&frame).flush_to(&mut out).unwrap();
        let s = String::from_utf8_lossy(&out);
        assert!(s.contains("abc"));
        assert!(s.contains("[VIEW]"));
    }
}
