//! KeyTranslator: key -> Action translation.
//!
//! The keymap is consulted first (view layer only in view mode). In edit mode
//! an unbound key falls back to text entry: printable scalars and Space insert,
//! Tab inserts a run of spaces, Backspace/Delete/Enter edit.

use crate::{Action, EditKind};
use core_events::{KeyCode, KeyEvent, NamedKey};
use core_keymap::{Binding, Keymap};
use core_state::Mode;

#[derive(Debug, Clone, Default)]
pub struct KeyTranslator {
    keymap: Keymap,
}

impl KeyTranslator {
    pub fn new(keymap: Keymap) -> Self {
        Self { keymap }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn binding(&self, mode: Mode, key: &KeyEvent) -> Option<Binding> {
        self.keymap.resolve(mode == Mode::View, key)
    }

    pub fn translate(&self, mode: Mode, key: &KeyEvent) -> Option<Action> {
        if let Some(b) = self.binding(mode, key) {
            return Some(Action::from(b));
        }
        match mode {
            Mode::View => None,
            Mode::Edit => text_entry(key).map(Action::Edit),
        }
    }
}

fn text_entry(key: &KeyEvent) -> Option<EditKind> {
    if let Some(c) = key.printable() {
        return Some(EditKind::InsertChar(c));
    }
    match key.code {
        KeyCode::Named(NamedKey::Space) => Some(EditKind::InsertChar(' ')),
        KeyCode::Named(NamedKey::Tab) => Some(EditKind::Tab),
        KeyCode::Named(NamedKey::Backspace) => Some(EditKind::Backspace),
        KeyCode::Named(NamedKey::Delete) => Some(EditKind::Delete),
        KeyCode::Named(NamedKey::Enter) => Some(EditKind::SplitLine),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClipboardOp, Granularity, MotionKind};

    fn tr() -> KeyTranslator {
        KeyTranslator::default()
    }

    #[test]
    fn view_mode_uses_bindings_only() {
        let t = tr();
        assert_eq!(
            t.translate(Mode::View, &KeyEvent::char('Y')),
            Some(Action::Clipboard(ClipboardOp::Copy, Granularity::Line))
        );
        assert_eq!(t.translate(Mode::View, &KeyEvent::char('7')), None);
        assert_eq!(t.translate(Mode::View, &KeyEvent::named(NamedKey::Enter)), None);
    }

    #[test]
    fn edit_mode_inserts_view_letters() {
        let t = tr();
        assert_eq!(
            t.translate(Mode::Edit, &KeyEvent::char('y')),
            Some(Action::Edit(EditKind::InsertChar('y')))
        );
        assert_eq!(
            t.translate(Mode::Edit, &KeyEvent::named(NamedKey::Space)),
            Some(Action::Edit(EditKind::InsertChar(' ')))
        );
        assert_eq!(
            t.translate(Mode::Edit, &KeyEvent::named(NamedKey::Tab)),
            Some(Action::Edit(EditKind::Tab))
        );
        assert_eq!(
            t.translate(Mode::Edit, &KeyEvent::named(NamedKey::Enter)),
            Some(Action::Edit(EditKind::SplitLine))
        );
    }

    #[test]
    fn global_keys_work_in_edit_mode() {
        let t = tr();
        assert_eq!(
            t.translate(Mode::Edit, &KeyEvent::named(NamedKey::Left)),
            Some(Action::Motion(MotionKind::Left))
        );
        assert_eq!(
            t.translate(Mode::Edit, &KeyEvent::named(NamedKey::Esc)),
            Some(Action::ToggleMode)
        );
        assert_eq!(t.translate(Mode::Edit, &KeyEvent::ctrl('s')), Some(Action::Save));
        assert_eq!(t.translate(Mode::Edit, &KeyEvent::ctrl('y')), None);
    }
}
