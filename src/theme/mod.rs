//! Theme System for spark-widgets.
//!
//! Provides the semantic color tokens every widget draws with. A theme is
//! immutable once built: widgets receive it by reference on each render pass
//! and never write to it.
//!
//! # Color Types
//!
//! - `ThemeColor::Default` - Uses terminal's default color
//! - `ThemeColor::Ansi(n)` - ANSI palette index (0-255)
//! - `ThemeColor::Rgb(rgba)` - Explicit RGB color
//! - `ThemeColor::Str(s)` - String to be parsed (hex, `ansi(N)`, `default`)
//!
//! # Example
//!
//! ```rust
//! use spark_widgets::theme::{get_preset, Token};
//!
//! let nord = get_preset("nord").unwrap();
//! let border = nord.color(Token::Border);
//! assert!(!border.is_terminal_default());
//! ```

use serde::Deserialize;

use crate::error::ConfigError;
use crate::renderer::Style;
use crate::types::{Attr, Rgba};

pub mod presets;

pub use presets::*;

// =============================================================================
// ThemeColor - A color that can be ANSI, RGB, or string
// =============================================================================

/// Theme color can be:
/// - `Default`: Terminal's default color
/// - `Ansi(n)`: ANSI palette index (0-255)
/// - `Rgb(rgba)`: Explicit RGB color
/// - `Str(s)`: String to be parsed
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ThemeColor {
    /// Use terminal's default color.
    #[default]
    Default,
    /// ANSI palette index (0-255).
    Ansi(u8),
    /// Explicit RGB color.
    Rgb(Rgba),
    /// String to be parsed.
    Str(String),
}

impl ThemeColor {
    /// Resolve to Rgba. Parses string if needed.
    ///
    /// `Str` values that fail to parse resolve to magenta so a bad color is
    /// visible instead of silently invisible. Use [`ThemeColor::validate`] to
    /// reject them at construction.
    pub fn resolve(&self) -> Rgba {
        match self {
            Self::Default => Rgba::TERMINAL_DEFAULT,
            Self::Ansi(i) => Rgba::ansi(*i),
            Self::Rgb(c) => *c,
            Self::Str(s) => Rgba::parse(s).unwrap_or(Rgba::MAGENTA),
        }
    }

    /// Check that a string color parses.
    pub fn validate(&self) -> Option<&str> {
        match self {
            Self::Str(s) if Rgba::parse(s).is_none() => Some(s),
            _ => None,
        }
    }
}

/// `u8` is an ANSI index.
impl From<u8> for ThemeColor {
    fn from(index: u8) -> Self {
        Self::Ansi(index)
    }
}

/// `Rgba` is an RGB color.
impl From<Rgba> for ThemeColor {
    fn from(color: Rgba) -> Self {
        Self::Rgb(color)
    }
}

/// `&str` is a string to parse.
impl From<&str> for ThemeColor {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

/// `u32` is an RGB integer (0xRRGGBB).
impl From<u32> for ThemeColor {
    fn from(rgb: u32) -> Self {
        Self::Rgb(Rgba::from_rgb_int(rgb))
    }
}

// =============================================================================
// Token - Named theme slots
// =============================================================================

/// A semantic color token. Widgets pick tokens, the theme maps them to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Primary,
    Secondary,
    Success,
    Warning,
    Error,
    Info,
    Background,
    Foreground,
    Border,
    Accent,
    Muted,
}

impl Token {
    pub const ALL: [Token; 11] = [
        Token::Primary,
        Token::Secondary,
        Token::Success,
        Token::Warning,
        Token::Error,
        Token::Info,
        Token::Background,
        Token::Foreground,
        Token::Border,
        Token::Accent,
        Token::Muted,
    ];
}

// =============================================================================
// Theme - All semantic colors
// =============================================================================

/// Theme definition with the semantic colors widgets draw with.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name (e.g., "dracula", "nord").
    pub name: String,
    /// Theme description.
    pub description: String,

    /// Primary brand color. Also the focus color of focusable widgets.
    pub primary: ThemeColor,
    /// Secondary accent color.
    pub secondary: ThemeColor,
    /// Success/positive feedback.
    pub success: ThemeColor,
    /// Warning/caution.
    pub warning: ThemeColor,
    /// Error/danger.
    pub error: ThemeColor,
    /// Informational.
    pub info: ThemeColor,
    /// Background fill.
    pub background: ThemeColor,
    /// Default text color.
    pub foreground: ThemeColor,
    /// Unfocused borders.
    pub border: ThemeColor,
    /// Highlights.
    pub accent: ThemeColor,
    /// Placeholders, hints, faint rules.
    pub muted: ThemeColor,
}

impl Default for Theme {
    fn default() -> Self {
        terminal()
    }
}

impl Theme {
    /// Look up the color slot for a token.
    pub fn slot(&self, token: Token) -> &ThemeColor {
        match token {
            Token::Primary => &self.primary,
            Token::Secondary => &self.secondary,
            Token::Success => &self.success,
            Token::Warning => &self.warning,
            Token::Error => &self.error,
            Token::Info => &self.info,
            Token::Background => &self.background,
            Token::Foreground => &self.foreground,
            Token::Border => &self.border,
            Token::Accent => &self.accent,
            Token::Muted => &self.muted,
        }
    }

    fn slot_mut(&mut self, token: Token) -> &mut ThemeColor {
        match token {
            Token::Primary => &mut self.primary,
            Token::Secondary => &mut self.secondary,
            Token::Success => &mut self.success,
            Token::Warning => &mut self.warning,
            Token::Error => &mut self.error,
            Token::Info => &mut self.info,
            Token::Background => &mut self.background,
            Token::Foreground => &mut self.foreground,
            Token::Border => &mut self.border,
            Token::Accent => &mut self.accent,
            Token::Muted => &mut self.muted,
        }
    }

    /// Resolved color of a token.
    #[inline]
    pub fn color(&self, token: Token) -> Rgba {
        self.slot(token).resolve()
    }

    /// Text style for a token, plain attributes.
    #[inline]
    pub fn style(&self, token: Token) -> Style {
        Style::fg(self.color(token))
    }

    /// Text style for a token with extra attributes.
    #[inline]
    pub fn styled(&self, token: Token, attrs: Attr) -> Style {
        Style::fg(self.color(token)).with_attrs(attrs)
    }

    /// Return a copy with one slot replaced.
    ///
    /// This is how themes are derived; there is no in-place mutation once a
    /// theme is handed to widgets.
    pub fn with_color(mut self, token: Token, color: impl Into<ThemeColor>) -> Self {
        *self.slot_mut(token) = color.into();
        self
    }

    /// Reject themes containing unparsable string colors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for token in Token::ALL {
            if let Some(value) = self.slot(token).validate() {
                return Err(ConfigError::InvalidColor {
                    token: format!("{token:?}").to_lowercase(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_color_resolve() {
        assert_eq!(ThemeColor::Default.resolve(), Rgba::TERMINAL_DEFAULT);
        assert_eq!(ThemeColor::Ansi(4).resolve(), Rgba::ansi(4));
        assert_eq!(ThemeColor::from(0x112233u32).resolve(), Rgba::rgb(0x11, 0x22, 0x33));
        assert_eq!(ThemeColor::from("#fff").resolve(), Rgba::WHITE);
        assert_eq!(ThemeColor::from("nonsense").resolve(), Rgba::MAGENTA);
    }

    #[test]
    fn test_slot_lookup_covers_all_tokens() {
        let theme = terminal();
        for token in Token::ALL {
            // Every token must map to its own slot.
            let _ = theme.slot(token);
        }
        assert_eq!(theme.color(Token::Primary), Rgba::ansi(12));
        assert_eq!(theme.color(Token::Border), Rgba::ansi(7));
    }

    #[test]
    fn test_with_color_derives_copy() {
        let base = terminal();
        let derived = base.clone().with_color(Token::Accent, "#ff0000");
        assert_eq!(derived.color(Token::Accent), Rgba::rgb(255, 0, 0));
        assert_eq!(base.color(Token::Accent), Rgba::ansi(11));
    }

    #[test]
    fn test_validate_rejects_bad_string() {
        let theme = terminal().with_color(Token::Muted, "not-a-color");
        match theme.validate() {
            Err(ConfigError::InvalidColor { token, value }) => {
                assert_eq!(token, "muted");
                assert_eq!(value, "not-a-color");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(terminal().validate().is_ok());
    }

    #[test]
    fn test_style_carries_attrs() {
        let theme = terminal();
        let style = theme.styled(Token::Error, Attr::BOLD);
        assert_eq!(style.fg, Rgba::ansi(1));
        assert!(style.attrs.contains(Attr::BOLD));
    }
}
