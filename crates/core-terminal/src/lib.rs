//! Terminal backend: raw mode / alternate screen lifecycle, size queries and
//! blocking input translated into `core-events`.
//!
//! The event loop only talks to `TerminalBackend`; `CrosstermBackend` is the
//! real terminal. `TerminalSession` restores the terminal when dropped, so an
//! early `?` return or a panic never leaves the shell in raw mode.

use anyhow::{Context, Result};
use core_events::Event;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;
use std::ops::{Deref, DerefMut};

mod input;
pub use input::{read_event, translate_event};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    /// `(columns, rows)`.
    fn size(&self) -> Result<(u16, u16)>;
    /// Block until the next event the editor understands.
    fn next_event(&mut self) -> Result<Event>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode().context("enabling raw mode")?;
            execute!(stdout(), EnterAlternateScreen, Clear(ClearType::All), Hide)
                .context("entering alternate screen")?;
            self.entered = true;
            tracing::info!(target: "runtime", "terminal_entered");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show).context("leaving alternate screen")?;
            disable_raw_mode().context("disabling raw mode")?;
            self.entered = false;
            tracing::info!(target: "runtime", "terminal_left");
        }
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        size()
    }

    fn next_event(&mut self) -> Result<Event> {
        read_event()
    }
}

/// Entered backend; leaves on drop.
pub struct TerminalSession<B: TerminalBackend> {
    backend: B,
}

impl<B: TerminalBackend> TerminalSession<B> {
    pub fn enter(mut backend: B) -> Result<Self> {
        backend.enter()?;
        Ok(Self { backend })
    }
}

impl<B: TerminalBackend> Deref for TerminalSession<B> {
    type Target = B;

    fn deref(&self) -> &B {
        &self.backend
    }
}

impl<B: TerminalBackend> DerefMut for TerminalSession<B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: TerminalBackend> Drop for TerminalSession<B> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.leave() {
            tracing::error!(target: "runtime", error = %e, "terminal_restore_failed");
        }
    }
}

/// Current terminal size as `(columns, rows)`.
pub fn size() -> Result<(u16, u16)> {
    crossterm::terminal::size().context("querying terminal size")
}
