//! Theme presets for spark-widgets.
//!
//! Built-in themes:
//! - terminal (default - uses ANSI colors)
//! - dracula
//! - nord
//! - gruvbox

use super::{Theme, ThemeColor};
use crate::types::Rgba;

// =============================================================================
// Terminal Theme (Default)
// =============================================================================

/// Terminal theme - uses ANSI colors to respect user's terminal theme.
/// This is the default and should be used for most applications.
pub fn terminal() -> Theme {
    Theme {
        name: "terminal".to_string(),
        description: "Uses terminal default colors".to_string(),
        primary: ThemeColor::Ansi(12),   // bright blue
        secondary: ThemeColor::Ansi(13), // bright magenta
        success: ThemeColor::Ansi(2),    // green
        warning: ThemeColor::Ansi(3),    // yellow
        error: ThemeColor::Ansi(1),      // red
        info: ThemeColor::Ansi(6),       // cyan
        background: ThemeColor::Default,
        foreground: ThemeColor::Default,
        border: ThemeColor::Ansi(7),
        accent: ThemeColor::Ansi(11), // bright yellow
        muted: ThemeColor::Ansi(8),
    }
}

// =============================================================================
// Dracula Theme
// =============================================================================

/// Dracula - dark theme with vivid colors.
pub fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        description: "Dracula dark theme".to_string(),
        primary: ThemeColor::Rgb(Rgba::from_rgb_int(0xbd93f9)),   // purple
        secondary: ThemeColor::Rgb(Rgba::from_rgb_int(0xff79c6)), // pink
        success: ThemeColor::Rgb(Rgba::from_rgb_int(0x50fa7b)),
        warning: ThemeColor::Rgb(Rgba::from_rgb_int(0xf1fa8c)),
        error: ThemeColor::Rgb(Rgba::from_rgb_int(0xff5555)),
        info: ThemeColor::Rgb(Rgba::from_rgb_int(0x8be9fd)),
        background: ThemeColor::Rgb(Rgba::from_rgb_int(0x282a36)),
        foreground: ThemeColor::Rgb(Rgba::from_rgb_int(0xf8f8f2)),
        border: ThemeColor::Rgb(Rgba::from_rgb_int(0x6272a4)),
        accent: ThemeColor::Rgb(Rgba::from_rgb_int(0xffb86c)),
        muted: ThemeColor::Rgb(Rgba::from_rgb_int(0x6272a4)),
    }
}

// =============================================================================
// Nord Theme
// =============================================================================

/// Nord - arctic, bluish colors.
pub fn nord() -> Theme {
    Theme {
        name: "nord".to_string(),
        description: "Nord arctic theme".to_string(),
        primary: ThemeColor::Str("#88c0d0".to_string()),   // frost cyan
        secondary: ThemeColor::Str("#81a1c1".to_string()), // frost blue
        success: ThemeColor::Str("#a3be8c".to_string()),   // aurora green
        warning: ThemeColor::Str("#ebcb8b".to_string()),   // aurora yellow
        error: ThemeColor::Str("#bf616a".to_string()),     // aurora red
        info: ThemeColor::Str("#8fbcbb".to_string()),
        background: ThemeColor::Rgb(Rgba::from_rgb_int(0x2e3440)),
        foreground: ThemeColor::Rgb(Rgba::from_rgb_int(0xd8dee9)),
        border: ThemeColor::Rgb(Rgba::from_rgb_int(0x4c566a)),
        accent: ThemeColor::Str("#d08770".to_string()), // aurora orange
        muted: ThemeColor::Rgb(Rgba::from_rgb_int(0x4c566a)),
    }
}

// =============================================================================
// Gruvbox Theme
// =============================================================================

/// Gruvbox - retro groove, warm contrast.
pub fn gruvbox() -> Theme {
    Theme {
        name: "gruvbox".to_string(),
        description: "Gruvbox retro theme".to_string(),
        primary: ThemeColor::Rgb(Rgba::from_rgb_int(0x83a598)),
        secondary: ThemeColor::Rgb(Rgba::from_rgb_int(0xd3869b)),
        success: ThemeColor::Rgb(Rgba::from_rgb_int(0xb8bb26)),
        warning: ThemeColor::Rgb(Rgba::from_rgb_int(0xfabd2f)),
        error: ThemeColor::Rgb(Rgba::from_rgb_int(0xfb4934)),
        info: ThemeColor::Rgb(Rgba::from_rgb_int(0x8ec07c)),
        background: ThemeColor::Rgb(Rgba::from_rgb_int(0x282828)),
        foreground: ThemeColor::Rgb(Rgba::from_rgb_int(0xebdbb2)),
        border: ThemeColor::Rgb(Rgba::from_rgb_int(0x665c54)),
        accent: ThemeColor::Rgb(Rgba::from_rgb_int(0xfe8019)),
        muted: ThemeColor::Rgb(Rgba::from_rgb_int(0x928374)),
    }
}

// =============================================================================
// Preset Registry
// =============================================================================

/// Get a preset theme by name (case-insensitive, `_`/`-` ignored).
///
/// # Example
///
/// ```rust
/// use spark_widgets::theme::get_preset;
///
/// assert!(get_preset("Dracula").is_some());
/// assert!(get_preset("unknown").is_none());
/// ```
pub fn get_preset(name: &str) -> Option<Theme> {
    match name.to_lowercase().replace(['_', '-'], "").as_str() {
        "terminal" => Some(terminal()),
        "dracula" => Some(dracula()),
        "nord" => Some(nord()),
        "gruvbox" => Some(gruvbox()),
        _ => None,
    }
}

/// List all available preset names.
pub fn preset_names() -> &'static [&'static str] {
    &["terminal", "dracula", "nord", "gruvbox"]
}
