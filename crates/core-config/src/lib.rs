//! Configuration loading and parsing.
//!
//! Parses `mote.toml` (or an override path provided by the binary):
//!
//! * `[editor] tab_width` (default 4, clamped to `1..=16`) drives load-time tab
//!   expansion, the Tab key and auto-indent units.
//! * `[scroll.margin] vertical` (default 3) is the scroll margin. The raw value
//!   is kept and the effective value is clamped to `(text_rows - 1) / 2` by
//!   `Config::apply_context`, re-run after every resize.
//! * `[ruler] column` is 1-based; 0 disables the ruler.
//! * `[keys]` maps binding names to key specs; validation happens in
//!   `core-keymap` which owns the binding table.
//!
//! Unknown fields are ignored. A parse error falls back to defaults with a
//! warning; a missing file silently yields defaults.

use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const DEFAULT_TAB_WIDTH: usize = 4;
pub const MAX_TAB_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_columns: u16,
    pub viewport_rows: u16,
    pub status_rows: u16,
}

impl ConfigContext {
    pub fn new(viewport_columns: u16, viewport_rows: u16, status_rows: u16) -> Self {
        Self {
            viewport_columns,
            viewport_rows,
            status_rows,
        }
    }

    pub fn text_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(self.status_rows)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorSection {
    #[serde(default = "EditorSection::default_tab_width")]
    pub tab_width: usize,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            tab_width: Self::default_tab_width(),
        }
    }
}

impl EditorSection {
    const fn default_tab_width() -> usize {
        DEFAULT_TAB_WIDTH
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarginConfig {
    #[serde(default = "MarginConfig::default_vertical")]
    pub vertical: u16,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            vertical: Self::default_vertical(),
        }
    }
}

impl MarginConfig {
    const fn default_vertical() -> u16 {
        3
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScrollConfig {
    #[serde(default)]
    pub margin: MarginConfig,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RulerConfig {
    #[serde(default)]
    pub column: u16,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorSection,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ruler: RulerConfig,
    /// Binding name -> key spec overrides (`copy_block = "ctrl-y"`).
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,
    pub file: ConfigFile,
    pub effective_vertical_margin: u16,
}

/// Config path following platform conventions: `./mote.toml` first, then the
/// platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("mote.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("mote").join("mote.toml");
    }
    PathBuf::from("mote.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                effective_vertical_margin: 0,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Effective tab width clamped to `1..=MAX_TAB_WIDTH`.
    pub fn tab_width(&self) -> usize {
        self.file.editor.tab_width.clamp(1, MAX_TAB_WIDTH)
    }

    /// Ruler column as a 0-based scalar index, `None` when disabled.
    pub fn ruler_column(&self) -> Option<usize> {
        match self.file.ruler.column {
            0 => None,
            c => Some(c as usize - 1),
        }
    }

    /// Apply viewport context to compute the clamped vertical margin.
    /// Returns the effective value.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> u16 {
        let raw = self.file.scroll.margin.vertical;
        let text_rows = ctx.text_rows();
        let max = text_rows.saturating_sub(1) / 2;
        let clamped = raw.min(max);
        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                text_rows,
                viewport_rows = ctx.viewport_rows,
                status_rows = ctx.status_rows,
                "scroll_margin_vertical_clamped"
            );
        }
        self.effective_vertical_margin = clamped;
        clamped
    }

    /// Recompute the effective margin after a resize. `Some(new)` when it changed.
    pub fn recompute_with_context(&mut self, ctx: ConfigContext) -> Option<u16> {
        let prev = self.effective_vertical_margin;
        let current = self.apply_context(ctx);
        if current != prev { Some(current) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    fn ctx_with_text_rows(rows: u16) -> ConfigContext {
        ConfigContext::new(80, rows, 0)
    }

    fn load_str(body: &str) -> Config {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        load_from(Some(tmp.path().to_path_buf())).unwrap()
    }

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn defaults_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.tab_width(), 4);
        assert_eq!(cfg.file.scroll.margin.vertical, 3);
        assert_eq!(cfg.ruler_column(), None);
        assert!(cfg.file.keys.is_empty());
    }

    #[test]
    fn parses_all_sections() {
        let cfg = load_str(
            "[editor]\ntab_width = 2\n[scroll.margin]\nvertical = 5\n[ruler]\ncolumn = 80\n[keys]\njump_down = \"n\"\n",
        );
        assert_eq!(cfg.tab_width(), 2);
        assert_eq!(cfg.file.scroll.margin.vertical, 5);
        assert_eq!(cfg.ruler_column(), Some(79));
        assert_eq!(cfg.file.keys.get("jump_down").map(String::as_str), Some("n"));
    }

    #[test]
    fn tab_width_is_clamped() {
        assert_eq!(load_str("[editor]\ntab_width = 0\n").tab_width(), 1);
        assert_eq!(load_str("[editor]\ntab_width = 99\n").tab_width(), MAX_TAB_WIDTH);
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let cfg = load_str("[editor\ntab_width = ");
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.tab_width(), DEFAULT_TAB_WIDTH);
    }

    #[test]
    fn clamps_margin_to_viewport() {
        let mut cfg = load_str("[scroll.margin]\nvertical = 50\n");
        // 20 text rows -> max = 19 / 2 = 9
        assert_eq!(cfg.apply_context(ctx_with_text_rows(20)), 9);
        assert_eq!(cfg.effective_vertical_margin, 9);
    }

    #[test]
    fn recompute_reports_changes_only() {
        let mut cfg = load_str("[scroll.margin]\nvertical = 10\n");
        cfg.apply_context(ctx_with_text_rows(50));
        assert_eq!(cfg.effective_vertical_margin, 10);
        assert_eq!(cfg.recompute_with_context(ctx_with_text_rows(10)), Some(4));
        assert_eq!(cfg.recompute_with_context(ctx_with_text_rows(10)), None);
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let mut cfg = load_str("[scroll.margin]\nvertical = 8\n");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        with_default(subscriber, || {
            // 7 rows minus 1 status row = 6 text rows -> max = 2
            cfg.apply_context(ConfigContext::new(80, 7, 1));
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("scroll_margin_vertical_clamped"));
        assert_eq!(cfg.effective_vertical_margin, 2);
    }
}
