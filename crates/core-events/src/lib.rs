//! Core event types consumed by the editor loop.
//!
//! Input is a tagged value: printable scalars arrive as `KeyCode::Char`,
//! everything else as `KeyCode::Named`. Consumers match exhaustively; there is
//! no sentinel value standing in for "special key".

use std::fmt;

/// Top-level event consumed by the synchronous event loop, one per iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl NamedKey {
    /// Lowercase spec name used by key override strings (`"pageup"`, `"esc"`).
    pub fn spec_name(self) -> &'static str {
        match self {
            NamedKey::Enter => "enter",
            NamedKey::Esc => "esc",
            NamedKey::Backspace => "backspace",
            NamedKey::Delete => "delete",
            NamedKey::Tab => "tab",
            NamedKey::Space => "space",
            NamedKey::Up => "up",
            NamedKey::Down => "down",
            NamedKey::Left => "left",
            NamedKey::Right => "right",
            NamedKey::Home => "home",
            NamedKey::End => "end",
            NamedKey::PageUp => "pageup",
            NamedKey::PageDown => "pagedown",
        }
    }

    pub const ALL: [NamedKey; 14] = [
        NamedKey::Enter,
        NamedKey::Esc,
        NamedKey::Backspace,
        NamedKey::Delete,
        NamedKey::Tab,
        NamedKey::Space,
        NamedKey::Up,
        NamedKey::Down,
        NamedKey::Left,
        NamedKey::Right,
        NamedKey::Home,
        NamedKey::End,
        NamedKey::PageUp,
        NamedKey::PageDown,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Named(NamedKey),
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified printable key.
    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::empty())
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    pub fn named(key: NamedKey) -> Self {
        Self::new(KeyCode::Named(key), KeyModifiers::empty())
    }

    /// Printable scalar carried by an unmodified (or shift-only) key.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if (self.mods - KeyModifiers::SHIFT).is_empty() => Some(c),
            _ => None,
        }
    }

    /// Decimal digit value when this is an unmodified `'0'..='9'` key.
    pub fn digit(&self) -> Option<u32> {
        self.printable().and_then(|c| c.to_digit(10))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("ctrl-")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("alt-")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Named(k) => f.write_str(k.spec_name()),
        }
    }
}
