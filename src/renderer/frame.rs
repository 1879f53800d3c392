//! Draw instructions.
//!
//! A render pass produces a [`Frame`]: rows of styled spans. Frames are plain
//! data. They know nothing about the terminal and are emitted through a
//! [`Terminal`](super::Terminal) by a renderer.

use crate::layout::{Spacing, string_width};
use crate::types::{Attr, Rgba};

/// Resolved text style: colors and attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Style {
    fn default() -> Self {
        Self::PLAIN
    }
}

impl Style {
    /// Terminal default colors, no attributes.
    pub const PLAIN: Self = Self {
        fg: Rgba::TERMINAL_DEFAULT,
        bg: Rgba::TERMINAL_DEFAULT,
        attrs: Attr::NONE,
    };

    pub const fn fg(fg: Rgba) -> Self {
        Self {
            fg,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }

    pub const fn with_bg(mut self, bg: Rgba) -> Self {
        self.bg = bg;
        self
    }

    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn add_attrs(mut self, attrs: Attr) -> Self {
        self.attrs |= attrs;
        self
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::PLAIN)
    }

    #[inline]
    pub fn width(&self) -> u16 {
        string_width(&self.text)
    }
}

/// One terminal row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Append a span. Empty text is dropped.
    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push(Span::new(text, style));
        }
    }

    /// Builder form of [`Line::push`].
    pub fn with(mut self, text: impl Into<String>, style: Style) -> Self {
        self.push(text, style);
        self
    }

    /// Display width in cells.
    pub fn width(&self) -> u16 {
        self.spans.iter().map(Span::width).fold(0u16, u16::saturating_add)
    }

    /// The row's text without styling.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// The output of one render pass.
///
/// `margin` is outside the widget: renderers apply it as blank rows above
/// and below and a left offset, so `lines` hold exactly the widget's cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub lines: Vec<Line>,
    pub margin: Spacing,
}

impl Frame {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            margin: Spacing::ZERO,
        }
    }

    /// A frame that draws nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Widget rows, margin excluded.
    #[inline]
    pub fn height(&self) -> u16 {
        self.lines.len().min(u16::MAX as usize) as u16
    }

    /// Rows including the vertical margin. An empty frame occupies nothing.
    pub fn outer_height(&self) -> u16 {
        if self.is_empty() {
            return 0;
        }
        self.height().saturating_add(self.margin.vertical())
    }

    /// Widest row, margin excluded.
    pub fn width(&self) -> u16 {
        self.lines.iter().map(Line::width).max().unwrap_or(0)
    }

    /// Rows as plain strings, margin excluded.
    pub fn to_plain(&self) -> Vec<String> {
        self.lines.iter().map(Line::plain).collect()
    }

    /// Rows with the margin materialized as blank rows and leading spaces.
    pub fn rows(&self) -> Vec<Line> {
        if self.is_empty() {
            return Vec::new();
        }

        let indent = " ".repeat(self.margin.left as usize);
        let mut rows = Vec::with_capacity(self.outer_height() as usize);
        rows.extend((0..self.margin.top).map(|_| Line::new()));
        for line in &self.lines {
            let mut row = Line::new().with(indent.clone(), Style::PLAIN);
            row.spans.extend(line.spans.iter().cloned());
            rows.push(row);
        }
        rows.extend((0..self.margin.bottom).map(|_| Line::new()));
        rows
    }

    /// Stack frames top to bottom, materializing each one's margin.
    pub fn stack<I>(frames: I) -> Frame
    where
        I: IntoIterator<Item = Frame>,
    {
        Frame::new(frames.into_iter().flat_map(|f| f.rows()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_width_and_plain() {
        let line = Line::new()
            .with("ab", Style::PLAIN)
            .with("", Style::PLAIN)
            .with("日", Style::fg(Rgba::WHITE));
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.width(), 4);
        assert_eq!(line.plain(), "ab日");
    }

    #[test]
    fn test_frame_margin_rows() {
        let frame = Frame::new(vec![Line::new().with("xy", Style::PLAIN)])
            .with_margin(Spacing::new(1, 0, 2, 3));
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.outer_height(), 4);

        let rows: Vec<String> = frame.rows().iter().map(Line::plain).collect();
        assert_eq!(rows, vec!["", "   xy", "", ""]);
    }

    #[test]
    fn test_empty_frame_ignores_margin() {
        let frame = Frame::empty().with_margin(Spacing::all(2));
        assert_eq!(frame.outer_height(), 0);
        assert!(frame.rows().is_empty());
    }

    #[test]
    fn test_stack() {
        let a = Frame::new(vec![Line::new().with("a", Style::PLAIN)]);
        let b = Frame::new(vec![Line::new().with("b", Style::PLAIN)])
            .with_margin(Spacing::new(1, 0, 0, 0));
        let stacked = Frame::stack([a, Frame::empty(), b]);
        assert_eq!(stacked.to_plain(), vec!["a", "", "b"]);
    }
}
