//! mote: a modal terminal text editor.
//!
//! Single-threaded loop: block on the next terminal event, apply it to the
//! `EditorState` to completion, render one frame, repeat.

use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{KeyTranslator, handle_key, io_ops::open_file};
use core_config::{Config, ConfigContext};
use core_events::Event;
use core_keymap::Keymap;
use core_render::{Frame, RenderEngine, STATUS_ROWS, writer};
use core_state::EditorState;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalSession};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const DEFAULT_FILE: &str = "out.txt";
const LOG_FILE: &str = "mote.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "mote", version, about = "mote modal text editor")]
struct Args {
    /// File to edit; created on first save when missing.
    #[arg(default_value = DEFAULT_FILE)]
    path: PathBuf,
    /// Configuration file path (overrides discovery of `mote.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

#[derive(Default)]
struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Everything the loop owns: session state plus the collaborators that act
/// on it.
struct Session {
    state: EditorState,
    config: Config,
    translator: KeyTranslator,
    engine: RenderEngine,
    cols: u16,
    rows: u16,
}

impl Session {
    fn bootstrap(args: &Args, cols: u16, rows: u16) -> Result<Self> {
        let mut config =
            core_config::load_from(args.config.clone()).context("loading configuration")?;
        let margin = config.apply_context(ConfigContext::new(cols, rows, STATUS_ROWS));
        let translator = KeyTranslator::new(Keymap::with_overrides(&config.file.keys));
        let state = open_file(args.path.clone(), config.tab_width());
        let engine = RenderEngine::new(usize::from(margin), config.ruler_column());
        info!(
            target: "runtime",
            path = %args.path.display(),
            lines = state.buffer.line_count(),
            config_override = args.config.is_some(),
            tab_width = state.tab_width,
            effective_margin = margin,
            "bootstrap_complete"
        );
        Ok(Self {
            state,
            config,
            translator,
            engine,
            cols,
            rows,
        })
    }

    /// Apply one event. Returns `true` when the session should end.
    fn step(&mut self, event: Event) -> bool {
        match event {
            Event::Input(key) => {
                self.state.clear_notice();
                let res = handle_key(&mut self.state, &self.translator, &key);
                if res.buffer_replaced {
                    self.state.mark_viewport_dirty();
                }
                res.quit
            }
            Event::Resize(cols, rows) => {
                self.resize(cols, rows);
                false
            }
            Event::Shutdown => true,
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        if let Some(margin) = self
            .config
            .recompute_with_context(ConfigContext::new(cols, rows, STATUS_ROWS))
        {
            self.engine.set_margin(usize::from(margin));
        }
        self.state.mark_viewport_dirty();
        tracing::debug!(target: "runtime", cols, rows, "resize");
    }

    fn frame(&mut self) -> Frame {
        self.engine.prepare(&mut self.state, self.cols, self.rows)
    }

    fn render(&mut self) -> Result<()> {
        let frame = self.frame();
        writer::paint(&frame).context("painting frame")
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::default();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let backend = CrosstermBackend::new();
    let (cols, rows) = backend.size()?;
    let mut session = Session::bootstrap(&args, cols, rows)?;
    let mut terminal = TerminalSession::enter(backend)?;

    session.render()?;
    loop {
        let event = terminal.next_event()?;
        if session.step(event) {
            break;
        }
        session.render()?;
    }
    info!(target: "runtime", path = %session.state.file_name.display(), modified = session.state.modified, "shutdown");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{KeyEvent, NamedKey};

    fn session_for(path: &Path, config: Option<&Path>) -> Session {
        let mut argv = vec!["mote".to_string(), path.display().to_string()];
        if let Some(c) = config {
            argv.push("--config".into());
            argv.push(c.display().to_string());
        }
        let args = Args::parse_from(argv);
        Session::bootstrap(&args, 80, 24).unwrap()
    }

    #[test]
    fn default_path_is_out_txt() {
        let args = Args::parse_from(["mote"]);
        assert_eq!(args.path, PathBuf::from(DEFAULT_FILE));
        assert!(args.config.is_none());
    }

    #[test]
    fn typed_text_is_saved_on_quit_with_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let cfg = dir.path().join("mote.toml");
        std::fs::write(&cfg, "").unwrap();
        let mut s = session_for(&path, Some(&cfg));
        assert!(!s.step(Event::Input(KeyEvent::named(NamedKey::Esc))));
        for c in "hi".chars() {
            s.step(Event::Input(KeyEvent::char(c)));
        }
        s.step(Event::Input(KeyEvent::named(NamedKey::Esc)));
        assert!(s.step(Event::Input(KeyEvent::char('Z'))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi");
    }

    #[test]
    fn notice_cleared_on_next_input() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("mote.toml");
        std::fs::write(&cfg, "").unwrap();
        let mut s = session_for(&dir.path().join("n.txt"), Some(&cfg));
        s.step(Event::Input(KeyEvent::ctrl('s')));
        assert!(s.state.notice.is_some());
        assert!(s.frame().status.contains("saved 1 lines"));
        s.step(Event::Input(KeyEvent::char('l')));
        assert!(s.state.notice.is_none());
    }

    #[test]
    fn config_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("mote.toml");
        std::fs::write(
            &cfg,
            "[editor]\ntab_width = 2\n[scroll.margin]\nvertical = 50\n[keys]\nquit_without_save = \"ctrl-q\"\n",
        )
        .unwrap();
        let mut s = session_for(&dir.path().join("c.txt"), Some(&cfg));
        assert_eq!(s.state.tab_width, 2);
        // 24 rows -> 23 text rows -> margin clamped to 11.
        assert_eq!(s.engine.viewport().margin(), 11);
        assert!(!s.step(Event::Input(KeyEvent::char('q'))));
        assert!(s.step(Event::Input(KeyEvent::ctrl('q'))));
    }

    #[test]
    fn resize_recomputes_margin_and_forces_redraw() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("mote.toml");
        std::fs::write(&cfg, "[scroll.margin]\nvertical = 5\n").unwrap();
        let mut s = session_for(&dir.path().join("r.txt"), Some(&cfg));
        assert_eq!(s.engine.viewport().margin(), 5);
        s.frame();
        s.step(Event::Resize(80, 6));
        assert_eq!(s.engine.viewport().margin(), 2);
        assert!(s.frame().full);
    }

    #[test]
    fn shutdown_ends_session() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("mote.toml");
        std::fs::write(&cfg, "").unwrap();
        let mut s = session_for(&dir.path().join("x.txt"), Some(&cfg));
        assert!(s.step(Event::Shutdown));
    }
}
