//! Renderer Module
//!
//! Turns widget output into terminal output.
//!
//! - [`Frame`] / [`Line`] / [`Span`] - draw instructions produced by widgets
//! - [`Terminal`] - the output capability (cursor movement, erase, styled text)
//! - [`CrosstermTerminal`] - `Terminal` over a real terminal via crossterm
//! - [`ScreenBuffer`] - `Terminal` over an in-memory cell grid
//! - [`InlineRenderer`] - redraws a frame in place in normal terminal mode

mod buffer;
mod frame;
mod inline;
mod terminal;

pub use buffer::ScreenBuffer;
pub use frame::{Frame, Line, Span, Style};
pub use inline::InlineRenderer;
pub use terminal::{CrosstermTerminal, CursorMove, EraseRegion, Terminal, to_crossterm_color};
