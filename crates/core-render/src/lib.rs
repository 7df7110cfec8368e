//! Rendering: viewport tracking, frame assembly, status line and the
//! crossterm painter.
//!
//! Per input event the binary calls `RenderEngine::prepare`, which
//! 1. re-derives scroll offsets from the cursor (`viewport`), forcing a full
//!    redraw when they move;
//! 2. selects the screen rows to repaint: every row on a forced pass, only
//!    rows whose buffer line is flagged dirty otherwise;
//! 3. resolves the status message through the `StatusBarCache`.
//!
//! The resulting `Frame` is plain data; `writer::paint` is the only code that
//! touches the terminal.

pub mod render_engine;
pub mod status;
pub mod viewport;
pub mod writer;

pub use render_engine::{EOF_MARKER, Frame, FrameRow, RenderEngine, RulerCell, STATUS_ROWS};
pub use status::{StatusBarCache, StatusSnapshot};
pub use viewport::{Viewport, ViewportTracker};
