//! core-keymap: key-to-binding table.
//!
//! The editing core exposes one entry point per logical action; this crate
//! owns which physical key triggers which [`Binding`]. The table is layered:
//! * `Layer::Global` entries resolve in every mode (arrows, toggle, save).
//! * `Layer::View` entries resolve only in view mode and take precedence over
//!   global entries there.
//!
//! Resolution is pure. Config overrides (`[keys]` in `mote.toml`) replace the
//! binding's key in its home layer; a later mapping for the same key in the
//! same layer overrides the earlier one (logged at trace).

use core_events::{KeyCode, KeyEvent, KeyModifiers, NamedKey};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace, warn};

// -------------------------------------------------------------------------------------------------
// Logical bindings
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Binding {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    LineStart,
    LineEnd,
    ToggleMode,
    Save,
    QuitWithSave,
    QuitWithoutSave,
    CopySymbol,
    CutSymbol,
    PasteSymbol,
    DeleteSymbol,
    CopyLine,
    CutLine,
    PasteLine,
    DeleteLine,
    CopyBlock,
    CutBlock,
    PasteBlock,
    DeleteBlock,
    PushState,
    PullState,
    JumpUp,
    JumpDown,
}

impl Binding {
    pub const ALL: [Binding; 28] = [
        Binding::MoveLeft,
        Binding::MoveRight,
        Binding::MoveUp,
        Binding::MoveDown,
        Binding::PageUp,
        Binding::PageDown,
        Binding::LineStart,
        Binding::LineEnd,
        Binding::ToggleMode,
        Binding::Save,
        Binding::QuitWithSave,
        Binding::QuitWithoutSave,
        Binding::CopySymbol,
        Binding::CutSymbol,
        Binding::PasteSymbol,
        Binding::DeleteSymbol,
        Binding::CopyLine,
        Binding::CutLine,
        Binding::PasteLine,
        Binding::DeleteLine,
        Binding::CopyBlock,
        Binding::CutBlock,
        Binding::PasteBlock,
        Binding::DeleteBlock,
        Binding::PushState,
        Binding::PullState,
        Binding::JumpUp,
        Binding::JumpDown,
    ];

    /// Config name (`[keys]` table key).
    pub fn name(self) -> &'static str {
        match self {
            Binding::MoveLeft => "move_left",
            Binding::MoveRight => "move_right",
            Binding::MoveUp => "move_up",
            Binding::MoveDown => "move_down",
            Binding::PageUp => "page_up",
            Binding::PageDown => "page_down",
            Binding::LineStart => "line_start",
            Binding::LineEnd => "line_end",
            Binding::ToggleMode => "toggle_mode",
            Binding::Save => "save",
            Binding::QuitWithSave => "quit_with_save",
            Binding::QuitWithoutSave => "quit_without_save",
            Binding::CopySymbol => "copy_symbol",
            Binding::CutSymbol => "cut_symbol",
            Binding::PasteSymbol => "paste_symbol",
            Binding::DeleteSymbol => "delete_symbol",
            Binding::CopyLine => "copy_line",
            Binding::CutLine => "cut_line",
            Binding::PasteLine => "paste_line",
            Binding::DeleteLine => "delete_line",
            Binding::CopyBlock => "copy_block",
            Binding::CutBlock => "cut_block",
            Binding::PasteBlock => "paste_block",
            Binding::DeleteBlock => "delete_block",
            Binding::PushState => "push_state",
            Binding::PullState => "pull_state",
            Binding::JumpUp => "jump_up",
            Binding::JumpDown => "jump_down",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Layer whose key an override replaces.
    pub fn home_layer(self) -> Layer {
        match self {
            Binding::ToggleMode | Binding::Save => Layer::Global,
            _ => Layer::View,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Global,
    View,
}

// -------------------------------------------------------------------------------------------------
// Key specs
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeySpecError {
    #[error("empty key spec")]
    Empty,
    #[error("key spec `{0}` has a modifier but no key")]
    MissingKey(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// Parse `"x"`, `"ctrl-x"`, `"alt-x"` or a named key (`"pageup"`).
pub fn parse_key_spec(spec: &str) -> Result<KeyEvent, KeySpecError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(KeySpecError::Empty);
    }
    let mut mods = KeyModifiers::empty();
    let mut rest = spec;
    loop {
        let lower = rest.to_ascii_lowercase();
        if lower.starts_with("ctrl-") && rest.len() > 5 {
            mods |= KeyModifiers::CTRL;
            rest = &rest[5..];
        } else if lower.starts_with("alt-") && rest.len() > 4 {
            mods |= KeyModifiers::ALT;
            rest = &rest[4..];
        } else if lower == "ctrl-" || lower == "alt-" {
            return Err(KeySpecError::MissingKey(spec.to_string()));
        } else {
            break;
        }
    }
    let mut chars = rest.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::Char(c),
        _ => {
            let lower = rest.to_ascii_lowercase();
            NamedKey::ALL
                .into_iter()
                .find(|k| k.spec_name() == lower)
                .map(KeyCode::Named)
                .ok_or_else(|| KeySpecError::UnknownKey(rest.to_string()))?
        }
    };
    Ok(normalize(KeyEvent::new(code, mods)))
}

/// Shift is implied by the scalar itself (`'Z'`), so it never takes part in
/// matching printable keys.
fn normalize(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char(_) => KeyEvent::new(key.code, key.mods - KeyModifiers::SHIFT),
        KeyCode::Named(_) => key,
    }
}

// -------------------------------------------------------------------------------------------------
// Mapping table
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSpec {
    pub key: KeyEvent,
    pub binding: Binding,
    pub layer: Layer,
}

impl MappingSpec {
    fn new(key: KeyEvent, binding: Binding, layer: Layer) -> Self {
        Self {
            key: normalize(key),
            binding,
            layer,
        }
    }
}

pub fn baseline_specs() -> Vec<MappingSpec> {
    use Binding as B;
    use KeyEvent as K;
    use Layer::{Global, View};
    use NamedKey as N;
    vec![
        MappingSpec::new(K::named(N::Left), B::MoveLeft, Global),
        MappingSpec::new(K::named(N::Right), B::MoveRight, Global),
        MappingSpec::new(K::named(N::Up), B::MoveUp, Global),
        MappingSpec::new(K::named(N::Down), B::MoveDown, Global),
        MappingSpec::new(K::named(N::Esc), B::ToggleMode, Global),
        MappingSpec::new(K::ctrl('s'), B::Save, Global),
        MappingSpec::new(K::char('h'), B::MoveLeft, View),
        MappingSpec::new(K::char('j'), B::MoveDown, View),
        MappingSpec::new(K::char('k'), B::MoveUp, View),
        MappingSpec::new(K::char('l'), B::MoveRight, View),
        MappingSpec::new(K::named(N::PageUp), B::PageUp, View),
        MappingSpec::new(K::named(N::PageDown), B::PageDown, View),
        MappingSpec::new(K::named(N::Home), B::LineStart, View),
        MappingSpec::new(K::named(N::End), B::LineEnd, View),
        MappingSpec::new(K::char('Z'), B::QuitWithSave, View),
        MappingSpec::new(K::char('q'), B::QuitWithoutSave, View),
        MappingSpec::new(K::char('y'), B::CopySymbol, View),
        MappingSpec::new(K::char('x'), B::CutSymbol, View),
        MappingSpec::new(K::char('p'), B::PasteSymbol, View),
        MappingSpec::new(K::char('d'), B::DeleteSymbol, View),
        MappingSpec::new(K::char('Y'), B::CopyLine, View),
        MappingSpec::new(K::char('X'), B::CutLine, View),
        MappingSpec::new(K::char('P'), B::PasteLine, View),
        MappingSpec::new(K::char('D'), B::DeleteLine, View),
        MappingSpec::new(K::ctrl('y'), B::CopyBlock, View),
        MappingSpec::new(K::ctrl('x'), B::CutBlock, View),
        MappingSpec::new(K::ctrl('p'), B::PasteBlock, View),
        MappingSpec::new(K::ctrl('d'), B::DeleteBlock, View),
        MappingSpec::new(K::char('s'), B::PushState, View),
        MappingSpec::new(K::char('u'), B::PullState, View),
        MappingSpec::new(K::char('K'), B::JumpUp, View),
        MappingSpec::new(K::char('J'), B::JumpDown, View),
    ]
}

#[derive(Debug, Clone)]
pub struct Keymap {
    specs: Vec<MappingSpec>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::build(baseline_specs())
    }
}

impl Keymap {
    /// Build from specs; for a duplicated `(layer, key)` the later spec wins.
    pub fn build(specs: Vec<MappingSpec>) -> Self {
        let mut map = Keymap { specs: Vec::new() };
        for spec in specs {
            map.insert(spec);
        }
        map
    }

    /// Default table with `[keys]` overrides applied. Unknown binding names and
    /// invalid key specs are logged and skipped.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut map = Self::default();
        for (name, spec) in overrides {
            let Some(binding) = Binding::from_name(name) else {
                warn!(target: "keymap", binding = %name, "unknown_binding_override_ignored");
                continue;
            };
            match parse_key_spec(spec) {
                Ok(key) => map.rebind(binding, key),
                Err(e) => {
                    warn!(target: "keymap", binding = %name, spec = %spec, error = %e, "invalid_key_spec_ignored");
                }
            }
        }
        map
    }

    /// Replace `binding`'s key in its home layer.
    pub fn rebind(&mut self, binding: Binding, key: KeyEvent) {
        let layer = binding.home_layer();
        self.specs
            .retain(|s| !(s.binding == binding && s.layer == layer));
        debug!(target: "keymap", binding = %binding, key = %key, "rebind");
        self.insert(MappingSpec::new(key, binding, layer));
    }

    fn insert(&mut self, spec: MappingSpec) {
        if let Some(idx) = self
            .specs
            .iter()
            .position(|s| s.layer == spec.layer && s.key == spec.key)
        {
            trace!(
                target: "keymap",
                key = %spec.key,
                previous = %self.specs[idx].binding,
                binding = %spec.binding,
                "terminal_override"
            );
            self.specs.remove(idx);
        }
        self.specs.push(spec);
    }

    /// Resolve a key; view-layer entries are consulted only in view mode and
    /// shadow global ones.
    pub fn resolve(&self, view_mode: bool, key: &KeyEvent) -> Option<Binding> {
        let key = normalize(*key);
        let lookup = |layer: Layer| {
            self.specs
                .iter()
                .find(|s| s.layer == layer && s.key == key)
                .map(|s| s.binding)
        };
        let hit = if view_mode { lookup(Layer::View) } else { None };
        let hit = hit.or_else(|| lookup(Layer::Global));
        trace!(target: "keymap", key = %key, view_mode, binding = ?hit, "resolve");
        hit
    }

    /// Every key currently bound to `binding`, across layers.
    pub fn keys_for(&self, binding: Binding) -> SmallVec<[KeyEvent; 2]> {
        self.specs
            .iter()
            .filter(|s| s.binding == binding)
            .map(|s| s.key)
            .collect()
    }
}
