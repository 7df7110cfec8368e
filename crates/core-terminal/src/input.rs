//! crossterm event translation.
//!
//! Only key presses (and repeats) and resizes reach the editor; mouse, focus
//! and paste events are dropped here. A plain space arrives as
//! `NamedKey::Space`, and SHIFT is dropped from character keys because the
//! scalar already carries the case.

use anyhow::{Context, Result};
use core_events::{Event, KeyCode, KeyEvent, KeyModifiers, NamedKey};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind,
    KeyModifiers as CMods,
};

/// Block until the next event the editor cares about.
pub fn read_event() -> Result<Event> {
    loop {
        let raw = crossterm::event::read().context("reading terminal event")?;
        if let Some(ev) = translate_event(raw) {
            return Ok(ev);
        }
    }
}

pub fn translate_event(raw: CEvent) -> Option<Event> {
    match raw {
        CEvent::Key(k) => translate_key(k).map(Event::Input),
        CEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        other => {
            tracing::trace!(target: "runtime", event = ?other, "event_ignored");
            None
        }
    }
}

fn translate_key(k: CKeyEvent) -> Option<KeyEvent> {
    if k.kind == KeyEventKind::Release {
        return None;
    }
    let mods = map_mods(k.modifiers);
    let code = match k.code {
        CKeyCode::Char(' ') if !mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
            KeyCode::Named(NamedKey::Space)
        }
        CKeyCode::Char(c) => {
            return Some(KeyEvent::new(KeyCode::Char(c), mods - KeyModifiers::SHIFT));
        }
        CKeyCode::Enter => KeyCode::Named(NamedKey::Enter),
        CKeyCode::Esc => KeyCode::Named(NamedKey::Esc),
        CKeyCode::Backspace => KeyCode::Named(NamedKey::Backspace),
        CKeyCode::Delete => KeyCode::Named(NamedKey::Delete),
        CKeyCode::Tab => KeyCode::Named(NamedKey::Tab),
        CKeyCode::Up => KeyCode::Named(NamedKey::Up),
        CKeyCode::Down => KeyCode::Named(NamedKey::Down),
        CKeyCode::Left => KeyCode::Named(NamedKey::Left),
        CKeyCode::Right => KeyCode::Named(NamedKey::Right),
        CKeyCode::Home => KeyCode::Named(NamedKey::Home),
        CKeyCode::End => KeyCode::Named(NamedKey::End),
        CKeyCode::PageUp => KeyCode::Named(NamedKey::PageUp),
        CKeyCode::PageDown => KeyCode::Named(NamedKey::PageDown),
        _ => return None,
    };
    Some(KeyEvent::new(code, mods))
}

fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: CKeyCode, mods: CMods) -> CEvent {
        CEvent::Key(CKeyEvent::new(code, mods))
    }

    #[test]
    fn plain_space_is_named() {
        let ev = translate_event(key(CKeyCode::Char(' '), CMods::NONE));
        assert_eq!(ev, Some(Event::Input(KeyEvent::named(NamedKey::Space))));
    }

    #[test]
    fn shift_is_dropped_from_chars() {
        let ev = translate_event(key(CKeyCode::Char('J'), CMods::SHIFT));
        assert_eq!(ev, Some(Event::Input(KeyEvent::char('J'))));
    }

    #[test]
    fn ctrl_chars_keep_modifier() {
        let ev = translate_event(key(CKeyCode::Char('s'), CMods::CONTROL));
        assert_eq!(ev, Some(Event::Input(KeyEvent::ctrl('s'))));
    }

    #[test]
    fn named_keys_and_resize() {
        assert_eq!(
            translate_event(key(CKeyCode::PageDown, CMods::NONE)),
            Some(Event::Input(KeyEvent::named(NamedKey::PageDown)))
        );
        assert_eq!(translate_event(CEvent::Resize(100, 40)), Some(Event::Resize(100, 40)));
    }

    #[test]
    fn releases_and_unknown_keys_are_dropped() {
        let mut release = CKeyEvent::new(CKeyCode::Char('a'), CMods::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate_event(CEvent::Key(release)), None);
        assert_eq!(translate_event(key(CKeyCode::F(5), CMods::NONE)), None);
        assert_eq!(translate_event(CEvent::FocusGained), None);
    }
}
