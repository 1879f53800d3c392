//! Core types for spark-widgets.
//!
//! These types define the foundation that every widget builds on.
//! They flow from the theme through the widgets into the draw instructions
//! and define what the renderer understands.

use serde::Deserialize;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Alpha 255 = fully opaque, 0 = fully transparent.
/// Special values: r=-1 means "terminal default", r=-2 means ANSI palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create an ANSI palette color (0-255).
    ///
    /// Uses special marker: r=-2, g=palette_index.
    /// - 0-7: Standard colors
    /// - 8-15: Bright colors
    /// - 16-231: 6x6x6 RGB cube
    /// - 232-255: Grayscale
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if this is an ANSI palette color.
    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// Get ANSI palette index (only valid if is_ansi() returns true).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }

    /// Create color from RGB integer (0xRRGGBB format).
    ///
    /// ```
    /// use spark_widgets::types::Rgba;
    ///
    /// let dracula_bg = Rgba::from_rgb_int(0x282a36);
    /// assert_eq!(dracula_bg, Rgba::rgb(40, 42, 54));
    /// ```
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    ///
    /// ```
    /// use spark_widgets::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::rgb(255, 255, 255)));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                hex_byte(bytes, 6)?,
            )),
            _ => None,
        }
    }

    /// Parse a color string.
    ///
    /// Accepts the keyword `default`, `ansi(N)` palette references and
    /// hex colors.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let lower = input.to_lowercase();
        if matches!(lower.as_str(), "default" | "inherit") {
            return Some(Self::TERMINAL_DEFAULT);
        }

        if let Some(index) = lower
            .strip_prefix("ansi(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return index.trim().parse::<u8>().ok().map(Self::ansi);
        }

        if input.starts_with('#') || input.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::from_hex(input);
        }

        None
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

// =============================================================================
// Cell - The atomic unit of the screen model
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character in the cell (space when empty).
    pub char: char,
    /// Foreground color.
    pub fg: Rgba,
    /// Background color.
    pub bg: Rgba,
    /// Attribute flags (bold, italic, etc.).
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Border style of a box-shaped widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// No border. Content is drawn flush to the widget bounds.
    None,
    /// ─ │ ┌ ┐ └ ┘
    #[default]
    Single,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Thick,
    /// ┄ ┆ ┌ ┐ └ ┘
    Dotted,
}

/// The glyph set of one border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_right: char,
    pub bottom_left: char,
}

impl BorderStyle {
    /// Get the border characters for this style.
    ///
    /// Returns None for [`BorderStyle::None`].
    pub const fn glyphs(&self) -> Option<BorderGlyphs> {
        let (horizontal, vertical, top_left, top_right, bottom_right, bottom_left) = match self {
            Self::None => return None,
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Double => ('═', '║', '╔', '╗', '╝', '╚'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Thick => ('━', '┃', '┏', '┓', '┛', '┗'),
            Self::Dotted => ('┄', '┆', '┌', '┐', '┘', '└'),
        };
        Some(BorderGlyphs {
            horizontal,
            vertical,
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        })
    }

    /// Whether this style draws anything.
    #[inline]
    pub const fn is_bordered(&self) -> bool {
        !matches!(self, Self::None)
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_rgb_int_basic() {
        assert_eq!(Rgba::from_rgb_int(0xff0000), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_rgb_int(0x00ff00), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::from_rgb_int(0xffffff), Rgba::WHITE);
    }

    #[test]
    fn test_rgba_from_hex_forms() {
        assert_eq!(Rgba::from_hex("#abc"), Some(Rgba::rgb(0xaa, 0xbb, 0xcc)));
        assert_eq!(Rgba::from_hex("0000ff"), Some(Rgba::rgb(0, 0, 255)));
        assert_eq!(Rgba::from_hex("#ff000080"), Some(Rgba::new(255, 0, 0, 128)));
        assert!(Rgba::from_hex("#12345").is_none());
        assert!(Rgba::from_hex("invalid").is_none());
    }

    #[test]
    fn test_rgba_parse_keywords_and_ansi() {
        assert_eq!(Rgba::parse("default"), Some(Rgba::TERMINAL_DEFAULT));
        assert_eq!(Rgba::parse("ansi(12)"), Some(Rgba::ansi(12)));
        assert_eq!(Rgba::parse(" #282a36 "), Some(Rgba::rgb(40, 42, 54)));
        assert!(Rgba::parse("ansi(300)").is_none());
        assert!(Rgba::parse("").is_none());
        assert!(Rgba::parse("purple-ish").is_none());
    }

    #[test]
    fn test_ansi_marker() {
        let c = Rgba::ansi(8);
        assert!(c.is_ansi());
        assert!(!c.is_terminal_default());
        assert_eq!(c.ansi_index(), 8);
    }

    #[test]
    fn test_border_glyph_table() {
        assert!(BorderStyle::None.glyphs().is_none());
        assert!(!BorderStyle::None.is_bordered());

        let single = BorderStyle::Single.glyphs().unwrap();
        assert_eq!(single.top_left, '┌');
        assert_eq!(single.horizontal, '─');

        let thick = BorderStyle::Thick.glyphs().unwrap();
        assert_eq!(thick.vertical, '┃');

        let rounded = BorderStyle::Rounded.glyphs().unwrap();
        assert_eq!(rounded.bottom_right, '╯');
    }

    #[test]
    fn test_border_style_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            border: BorderStyle,
        }
        let w: Wrapper = toml::from_str("border = \"double\"").unwrap();
        assert_eq!(w.border, BorderStyle::Double);
    }
}
