//! # spark-widgets
//!
//! Stateful terminal widgets over a character grid.
//!
//! ## Architecture
//!
//! Every widget is an explicit state struct. Keys and time flow in through
//! transition methods; output flows out through a pure render pass:
//!
//! ```text
//! KeySource / tick(now) → widget transitions → Widget::render(&Theme) → Frame → InlineRenderer → Terminal
//! ```
//!
//! There are no background threads. Animation and auto-hide are deadlines the
//! host polls from its loop, so a widget only changes when it's told to.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Attr, BorderStyle, TextAlign)
//! - [`theme`] - Semantic color tokens and presets
//! - [`layout`] - Cell geometry and text measurement
//! - [`renderer`] - Frames, the Terminal trait, inline redraw
//! - [`state`] - Keyboard model, key sources, timers
//! - [`primitives`] - The widgets
//! - [`config`] - TOML engine configuration
//!
//! ## Example
//!
//! ```
//! use spark_widgets::{BoxProps, BoxWidget, InlineRenderer, ScreenBuffer, Theme, Widget};
//!
//! let theme = Theme::default();
//! let widget = BoxWidget::new(BoxProps {
//!     title: Some("Hi".into()),
//!     content: "hello".into(),
//!     ..BoxProps::new(12, 3)
//! })
//! .unwrap();
//!
//! let mut screen = ScreenBuffer::new(20, 5);
//! let mut renderer = InlineRenderer::new();
//! renderer.render(&mut screen, &widget.render(&theme)).unwrap();
//! assert_eq!(screen.row_text(1), "│hello     │");
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::EngineConfig;
pub use error::{ConfigError, Error, InputCancelled, Result};

pub use layout::{string_width, truncate_text, wrap_text, Bounds, Position, Size, Spacing};

pub use renderer::{
    CrosstermTerminal, Frame, InlineRenderer, Line, ScreenBuffer, Span, Style, Terminal,
};

pub use state::{
    CrosstermKeys, KeyCode, KeyEvent, KeyListener, KeySource, KeyState, Keyboard, Modifiers,
    ScriptedKeys, Timer,
};

pub use primitives::{
    Alert, AlertEvent, AlertId, AlertManager, AlertProps, AlertType, BoxProps, BoxWidget,
    InputOutcome, InputProps, ProgressBar, ProgressProps, ProgressStyle, Prompt, TextInput,
    Widget,
};

pub use theme::{get_preset, Theme, ThemeColor, Token};
