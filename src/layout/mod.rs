//! Layout Module
//!
//! Fixed character-grid geometry and text measurement shared by all widgets.
//!
//! There is no retained layout tree: every widget recomputes its layout from
//! its own options and state on each render pass, using these primitives.
//!
//! - [`Position`], [`Size`], [`Bounds`] - cell-addressed geometry
//! - [`Spacing`] - padding/margin normalized to four sides
//! - [`wrap_text`], [`align_text`], [`truncate_text`] - text reflow

mod text_measure;
mod types;

pub use text_measure::*;
pub use types::*;
