//! TUI Primitives - Widget building blocks.
//!
//! This module provides the widgets:
//! - [`BoxWidget`] - Bordered container with title, padding, scrolling and shadow
//! - [`TextInput`] - Single-line editor with validation, masking and a prompt session
//! - [`ProgressBar`] - Determinate bar in five styles with optional ETA
//! - [`Alert`] / [`AlertManager`] - Transient messages with auto-hide and a FIFO queue
//!
//! # Architecture
//!
//! Each widget is a plain state struct. Transitions (`set_value`, `handle_key`,
//! `tick`, ...) mutate it and report what happened; rendering is a pure
//! function of the state and a [`Theme`]:
//!
//! 1. The host feeds keys and the current time into the widget
//! 2. The widget returns an outcome telling the host whether to redraw
//! 3. [`Widget::render`] produces a [`Frame`]
//! 4. An [`InlineRenderer`](crate::renderer::InlineRenderer) draws the frame,
//!    erasing the previous one first
//!
//! Timers are never background threads. A widget that animates or expires
//! stores a deadline and the host calls `tick(now)` from its event loop.

mod types;
mod alert;
mod box_primitive;
mod input;
mod progress;

pub use types::*;
pub use alert::{Alert, AlertEvent, AlertId, AlertManager};
pub use box_primitive::BoxWidget;
pub use input::{InputOutcome, InputState, Prompt, TextInput, ValidationRule};
pub use progress::{format_eta, percentage, ProgressBar, ProgressChange, ANIMATION_INTERVAL};

use crate::renderer::Frame;
use crate::theme::Theme;

/// Anything that can draw itself.
pub trait Widget {
    /// Render the current state. Must not mutate anything observable.
    fn render(&self, theme: &Theme) -> Frame;
}

impl<W: Widget + ?Sized> Widget for &W {
    fn render(&self, theme: &Theme) -> Frame {
        (**self).render(theme)
    }
}
