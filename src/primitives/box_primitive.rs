//! Box Primitive - Bordered container with wrapped, scrollable content.
//!
//! The fundamental container widget. Draws a border in one of five glyph
//! styles, embeds an optional title in the top rule, wraps its content to the
//! interior width and shows a scrollable window of it.
//!
//! Layout is recomputed from props and state; `render` never mutates.
//!
//! # Example
//!
//! ```
//! use spark_widgets::primitives::{BoxProps, BoxWidget, Widget};
//! use spark_widgets::theme::Theme;
//!
//! let widget = BoxWidget::new(BoxProps {
//!     title: Some("Hi".into()),
//!     content: "abcdefghij klmnop".into(),
//!     ..BoxProps::new(20, 4)
//! })
//! .unwrap();
//!
//! let rows = widget.render(&Theme::default()).to_plain();
//! assert_eq!(rows[0], "┌─ Hi ─────────────┐");
//! assert_eq!(rows[3], "└──────────────────┘");
//! ```

use tracing::{trace, warn};

use super::Widget;
use super::types::BoxProps;
use crate::error::ConfigError;
use crate::layout::{align_text, string_width, truncate_text, wrap_text};
use crate::renderer::{Frame, Line, Style};
use crate::state::{KeyCode, KeyEvent};
use crate::theme::{Theme, Token};
use crate::types::{Attr, BorderStyle, TextAlign};

const SHADOW: char = '░';

// =============================================================================
// Border drawing
// =============================================================================

/// Top rule with an optional embedded title.
///
/// The title is drawn as ` title ` between rule characters. If it doesn't
/// fit between the corners it is truncated with `...`; if not even that fits
/// it is dropped. Left and right alignment keep one rule character between
/// the corner and the title.
pub(crate) fn top_border(
    border: BorderStyle,
    width: u16,
    title: Option<&str>,
    align: TextAlign,
    style: Style,
    title_style: Style,
) -> Line {
    let Some(glyphs) = border.glyphs() else {
        return Line::new();
    };
    if width < 2 {
        return Line::new().with(glyphs.top_left.to_string(), style);
    }

    let span = width - 2;
    let rule = |n: u16| glyphs.horizontal.to_string().repeat(n as usize);

    let title = title
        .filter(|t| !t.is_empty())
        .and_then(|t| fit_title(t, span));
    let Some(title) = title else {
        return Line::new()
            .with(format!("{}{}{}", glyphs.top_left, rule(span), glyphs.top_right), style);
    };

    let remaining = span - string_width(&title);
    let before = match align {
        TextAlign::Left => remaining.min(1),
        TextAlign::Center => remaining / 2,
        TextAlign::Right => remaining - remaining.min(1),
    };
    let after = remaining - before;

    Line::new()
        .with(format!("{}{}", glyphs.top_left, rule(before)), style)
        .with(title, title_style)
        .with(format!("{}{}", rule(after), glyphs.top_right), style)
}

/// ` title ` fitted into `span` cells, or None if it can't be shown.
fn fit_title(title: &str, span: u16) -> Option<String> {
    let padded = format!(" {title} ");
    if string_width(&padded) <= span {
        return Some(padded);
    }
    if span < 3 {
        return None;
    }
    let cut = truncate_text(title, span - 2);
    if cut.is_empty() {
        return None;
    }
    Some(format!(" {cut} "))
}

/// Bottom rule. Mirrors the top without a title.
pub(crate) fn bottom_border(border: BorderStyle, width: u16, style: Style) -> Line {
    let Some(glyphs) = border.glyphs() else {
        return Line::new();
    };
    if width < 2 {
        return Line::new().with(glyphs.bottom_left.to_string(), style);
    }
    let rule = glyphs.horizontal.to_string().repeat((width - 2) as usize);
    Line::new().with(
        format!("{}{}{}", glyphs.bottom_left, rule, glyphs.bottom_right),
        style,
    )
}

/// Wrap an interior row in vertical border glyphs.
///
/// `inner` must already be `width - 2` cells wide.
pub(crate) fn framed_row(border: BorderStyle, width: u16, inner: Line, style: Style) -> Line {
    let Some(glyphs) = border.glyphs() else {
        return inner;
    };
    let mut row = Line::new().with(glyphs.vertical.to_string(), style);
    if width >= 2 {
        row.spans.extend(inner.spans);
        row.push(glyphs.vertical.to_string(), style);
    }
    row
}

// =============================================================================
// BoxWidget
// =============================================================================

/// Horizontal slices of an interior row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowLayout {
    pad_left: u16,
    inner: u16,
    pad_right: u16,
}

/// A bordered container.
#[derive(Debug, Clone)]
pub struct BoxWidget {
    props: BoxProps,
    content_lines: Vec<String>,
    scroll_offset: usize,
    focused: bool,
}

impl BoxWidget {
    /// Create a box. Fails if width or height is zero.
    pub fn new(props: BoxProps) -> Result<Self, ConfigError> {
        validate_size(props.width, props.height)?;
        let mut widget = Self {
            props,
            content_lines: Vec::new(),
            scroll_offset: 0,
            focused: false,
        };
        widget.reflow();
        Ok(widget)
    }

    pub fn props(&self) -> &BoxProps {
        &self.props
    }

    pub fn content(&self) -> &str {
        &self.props.content
    }

    /// Wrapped content, one entry per line.
    pub fn content_lines(&self) -> &[String] {
        &self.content_lines
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    fn border_size(&self) -> u16 {
        if self.props.border_style.is_bordered() { 1 } else { 0 }
    }

    fn row_layout(&self) -> RowLayout {
        let available = self.props.width.saturating_sub(2 * self.border_size());
        let pad_left = self.props.padding.left.min(available);
        let pad_right = self.props.padding.right.min(available - pad_left);
        RowLayout {
            pad_left,
            inner: available - pad_left - pad_right,
            pad_right,
        }
    }

    /// Rows between the top and bottom border.
    fn interior_height(&self) -> u16 {
        self.props.height.saturating_sub(2 * self.border_size())
    }

    /// Content width after borders and horizontal padding. Zero when the box
    /// is too narrow.
    pub fn inner_width(&self) -> u16 {
        self.row_layout().inner
    }

    /// Content rows after borders and vertical padding.
    pub fn visible_content_height(&self) -> u16 {
        self.interior_height()
            .saturating_sub(self.props.padding.top)
            .saturating_sub(self.props.padding.bottom)
    }

    pub fn max_scroll(&self) -> usize {
        self.content_lines
            .len()
            .saturating_sub(self.visible_content_height() as usize)
    }

    fn reflow(&mut self) {
        self.content_lines = wrap_text(&self.props.content, self.inner_width());
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Replace the content and rewrap it.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.props.content = content.into();
        self.reflow();
    }

    /// Change the outer size and rewrap.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), ConfigError> {
        validate_size(width, height)?;
        self.props.width = width;
        self.props.height = height;
        self.reflow();
        Ok(())
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.props.title = title;
    }

    /// Move the content window by `delta` lines, clamped to the content.
    /// No-op unless the box is scrollable.
    pub fn scroll(&mut self, delta: i32) {
        if !self.props.scrollable {
            return;
        }
        let target = self.scroll_offset as i64 + delta as i64;
        self.scroll_offset = target.clamp(0, self.max_scroll() as i64) as usize;
        trace!(offset = self.scroll_offset, "box scrolled");
    }

    pub fn scroll_to_top(&mut self) {
        if self.props.scrollable {
            self.scroll_offset = 0;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        if self.props.scrollable {
            self.scroll_offset = self.max_scroll();
        }
    }

    /// Take focus. Returns false if the box isn't focusable.
    pub fn focus(&mut self) -> bool {
        if self.props.focusable {
            self.focused = true;
        }
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Scroll keys while focused. Returns true if the key was consumed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if !self.focused || !self.props.scrollable || !event.is_press() {
            return false;
        }
        let page = self.visible_content_height().max(1) as i32;
        match event.code {
            KeyCode::Up => self.scroll(-1),
            KeyCode::Down => self.scroll(1),
            KeyCode::PageUp => self.scroll(-page),
            KeyCode::PageDown => self.scroll(page),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),
            _ => return false,
        }
        true
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn content_row(&self, index: Option<usize>, layout: RowLayout, theme: &Theme) -> Line {
        let text = index
            .and_then(|i| self.content_lines.get(i))
            .map(String::as_str)
            .unwrap_or("");
        Line::new()
            .with(" ".repeat(layout.pad_left as usize), Style::PLAIN)
            .with(
                align_text(text, layout.inner, self.props.content_align),
                theme.style(Token::Foreground),
            )
            .with(" ".repeat(layout.pad_right as usize), Style::PLAIN)
    }

    fn border_token(&self) -> Token {
        if self.focused { Token::Primary } else { Token::Border }
    }
}

impl Widget for BoxWidget {
    fn render(&self, theme: &Theme) -> Frame {
        let props = &self.props;
        let border = props.border_style;
        let border_style = theme.style(self.border_token());
        let title_style = border_style.add_attrs(Attr::BOLD);
        let layout = self.row_layout();
        let mut lines = Vec::with_capacity(props.height as usize + 1);

        if border.is_bordered() {
            lines.push(top_border(
                border,
                props.width,
                props.title.as_deref(),
                props.title_align,
                border_style,
                title_style,
            ));
        }

        let interior = self.interior_height();
        let pad_top = props.padding.top;
        let content_end = interior.saturating_sub(props.padding.bottom);
        for row in 0..interior {
            let index = (row >= pad_top && row < content_end)
                .then(|| self.scroll_offset + (row - pad_top) as usize);
            let inner = self.content_row(index, layout, theme);
            lines.push(framed_row(border, props.width, inner, border_style));
        }

        if border.is_bordered() && props.height >= 2 {
            lines.push(bottom_border(border, props.width, border_style));
        }

        if props.shadow {
            let shadow = theme.style(Token::Muted);
            for (i, line) in lines.iter_mut().enumerate() {
                if i == 0 {
                    line.push(" ", Style::PLAIN);
                } else {
                    line.push(SHADOW.to_string(), shadow);
                }
            }
            lines.push(
                Line::new()
                    .with(" ", Style::PLAIN)
                    .with(SHADOW.to_string().repeat(props.width as usize), shadow),
            );
        }

        Frame::new(lines).with_margin(props.margin)
    }
}

fn validate_size(width: u16, height: u16) -> Result<(), ConfigError> {
    for (field, value) in [("width", width), ("height", height)] {
        if value == 0 {
            warn!(field, "rejected box size");
            return Err(ConfigError::InvalidDimension {
                widget: "box",
                field,
                min: 1,
                value,
            });
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Spacing;
    use proptest::prelude::*;

    fn render(widget: &BoxWidget) -> Vec<String> {
        widget.render(&Theme::default()).to_plain()
    }

    fn boxed(props: BoxProps) -> BoxWidget {
        BoxWidget::new(props).unwrap()
    }

    #[test]
    fn test_titled_box_scenario() {
        let widget = boxed(BoxProps {
            title: Some("Hi".into()),
            content: "abcdefghij klmnop".into(),
            ..BoxProps::new(20, 4)
        });
        let rows = render(&widget);
        assert_eq!(
            rows,
            vec![
                "┌─ Hi ─────────────┐",
                "│abcdefghij klmnop │",
                "│                  │",
                "└──────────────────┘",
            ]
        );
        for row in &rows {
            assert_eq!(string_width(row), 20);
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            BoxWidget::new(BoxProps::new(0, 3)),
            Err(ConfigError::InvalidDimension { field: "width", .. })
        ));
        assert!(matches!(
            BoxWidget::new(BoxProps::new(3, 0)),
            Err(ConfigError::InvalidDimension { field: "height", .. })
        ));
    }

    #[test]
    fn test_border_styles() {
        let cases = [
            (BorderStyle::Double, "╔══╗", "╚══╝"),
            (BorderStyle::Rounded, "╭──╮", "╰──╯"),
            (BorderStyle::Thick, "┏━━┓", "┗━━┛"),
            (BorderStyle::Dotted, "┌┄┄┐", "└┄┄┘"),
        ];
        for (style, top, bottom) in cases {
            let rows = render(&boxed(BoxProps {
                border_style: style,
                ..BoxProps::new(4, 3)
            }));
            assert_eq!(rows[0], top);
            assert_eq!(rows[2], bottom);
        }
    }

    #[test]
    fn test_title_alignment() {
        let center = boxed(BoxProps {
            title: Some("ab".into()),
            title_align: TextAlign::Center,
            ..BoxProps::new(12, 2)
        });
        assert_eq!(render(&center)[0], "┌─── ab ───┐");

        let right = boxed(BoxProps {
            title: Some("ab".into()),
            title_align: TextAlign::Right,
            ..BoxProps::new(12, 2)
        });
        assert_eq!(render(&right)[0], "┌───── ab ─┐");
    }

    #[test]
    fn test_long_title_truncated() {
        let widget = boxed(BoxProps {
            title: Some("a very long title".into()),
            ..BoxProps::new(12, 2)
        });
        let top = &render(&widget)[0];
        assert_eq!(top, "┌ a ver... ┐");
        assert_eq!(string_width(top), 12);
    }

    #[test]
    fn test_title_dropped_when_no_room() {
        let widget = boxed(BoxProps {
            title: Some("title".into()),
            ..BoxProps::new(4, 2)
        });
        assert_eq!(render(&widget)[0], "┌──┐");
    }

    #[test]
    fn test_borderless_box_respects_padding() {
        let widget = boxed(BoxProps {
            border_style: BorderStyle::None,
            padding: Spacing::new(1, 2, 0, 2),
            content: "hey".into(),
            ..BoxProps::new(8, 3)
        });
        assert_eq!(widget.inner_width(), 4);
        assert_eq!(render(&widget), vec!["        ", "  hey   ", "        "]);
    }

    #[test]
    fn test_content_alignment() {
        let widget = boxed(BoxProps {
            content: "ab".into(),
            content_align: TextAlign::Right,
            ..BoxProps::new(6, 3)
        });
        assert_eq!(render(&widget)[1], "│  ab│");
    }

    #[test]
    fn test_too_narrow_box_degrades_to_empty_content() {
        let widget = boxed(BoxProps {
            padding: Spacing::all(5),
            content: "hello world".into(),
            ..BoxProps::new(6, 3)
        });
        assert_eq!(widget.inner_width(), 0);
        let rows = render(&widget);
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(string_width(&row), 6);
        }
    }

    #[test]
    fn test_scroll_clamps() {
        let mut widget = boxed(BoxProps {
            content: "1\n2\n3\n4\n5".into(),
            scrollable: true,
            ..BoxProps::new(5, 4)
        });
        assert_eq!(widget.visible_content_height(), 2);
        assert_eq!(widget.max_scroll(), 3);

        widget.scroll(10);
        assert_eq!(widget.scroll_offset(), 3);
        assert_eq!(render(&widget)[1..3], ["│4  │", "│5  │"]);

        widget.scroll(-100);
        assert_eq!(widget.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_requires_scrollable() {
        let mut widget = boxed(BoxProps {
            content: "1\n2\n3\n4".into(),
            ..BoxProps::new(5, 3)
        });
        widget.scroll(2);
        assert_eq!(widget.scroll_offset(), 0);
    }

    #[test]
    fn test_set_content_reclamps_scroll() {
        let mut widget = boxed(BoxProps {
            content: "1\n2\n3\n4\n5".into(),
            scrollable: true,
            ..BoxProps::new(5, 3)
        });
        widget.scroll_to_bottom();
        assert_eq!(widget.scroll_offset(), 4);
        widget.set_content("only");
        assert_eq!(widget.scroll_offset(), 0);
        assert_eq!(widget.content_lines(), ["only"]);
    }

    #[test]
    fn test_resize_rewraps() {
        let mut widget = boxed(BoxProps {
            content: "aaa bbb".into(),
            ..BoxProps::new(9, 3)
        });
        assert_eq!(widget.content_lines().len(), 1);
        widget.resize(5, 4).unwrap();
        assert_eq!(widget.content_lines(), ["aaa", "bbb"]);
        assert!(widget.resize(0, 4).is_err());
    }

    #[test]
    fn test_focus_changes_only_border_color() {
        let theme = Theme::default();
        let mut widget = boxed(BoxProps {
            focusable: true,
            content: "x".into(),
            ..BoxProps::new(5, 3)
        });
        let blurred = widget.render(&theme);
        assert!(widget.focus());
        let focused = widget.render(&theme);

        assert_eq!(blurred.to_plain(), focused.to_plain());
        assert_eq!(focused.lines[0].spans[0].style.fg, theme.color(Token::Primary));
        assert_eq!(blurred.lines[0].spans[0].style.fg, theme.color(Token::Border));
    }

    #[test]
    fn test_focus_requires_focusable() {
        let mut widget = boxed(BoxProps::new(5, 3));
        assert!(!widget.focus());
        assert!(!widget.is_focused());
    }

    #[test]
    fn test_scroll_keys() {
        let mut widget = boxed(BoxProps {
            content: (1..=10).map(|n| n.to_string()).collect::<Vec<_>>().join("\n"),
            scrollable: true,
            focusable: true,
            ..BoxProps::new(6, 5)
        });
        assert!(!widget.handle_key(&KeyEvent::new(KeyCode::Down)));

        widget.focus();
        assert!(widget.handle_key(&KeyEvent::new(KeyCode::Down)));
        assert_eq!(widget.scroll_offset(), 1);
        assert!(widget.handle_key(&KeyEvent::new(KeyCode::PageDown)));
        assert_eq!(widget.scroll_offset(), 4);
        assert!(widget.handle_key(&KeyEvent::new(KeyCode::End)));
        assert_eq!(widget.scroll_offset(), 7);
        assert!(widget.handle_key(&KeyEvent::new(KeyCode::Home)));
        assert_eq!(widget.scroll_offset(), 0);
        assert!(!widget.handle_key(&KeyEvent::char('q')));
    }

    #[test]
    fn test_shadow() {
        let widget = boxed(BoxProps {
            shadow: true,
            ..BoxProps::new(4, 3)
        });
        assert_eq!(
            render(&widget),
            vec!["┌──┐ ", "│  │░", "└──┘░", " ░░░░"]
        );
    }

    #[test]
    fn test_margin_carried_on_frame() {
        let widget = boxed(BoxProps {
            margin: Spacing::all(1),
            ..BoxProps::new(4, 2)
        });
        let frame = widget.render(&Theme::default());
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.outer_height(), 4);
    }

    #[test]
    fn test_render_is_idempotent() {
        let widget = boxed(BoxProps {
            title: Some("t".into()),
            content: "some words to wrap around".into(),
            ..BoxProps::new(10, 5)
        });
        let theme = Theme::default();
        assert_eq!(widget.render(&theme), widget.render(&theme));
    }

    proptest! {
        #[test]
        fn prop_rows_are_exactly_width(
            width in 1u16..40,
            height in 1u16..10,
            pad in 0u16..4,
            content in "[a-z]{1,15}( [a-z]{1,15}){0,8}",
            title in proptest::option::of("[a-zA-Z ]{0,20}"),
            border in prop_oneof![
                Just(BorderStyle::None),
                Just(BorderStyle::Single),
                Just(BorderStyle::Double),
                Just(BorderStyle::Rounded),
                Just(BorderStyle::Thick),
                Just(BorderStyle::Dotted),
            ],
        ) {
            let widget = BoxWidget::new(BoxProps {
                padding: Spacing::all(pad),
                content,
                title,
                border_style: border,
                ..BoxProps::new(width, height)
            }).unwrap();
            let rows = widget.render(&Theme::default()).to_plain();
            prop_assert_eq!(rows.len(), height as usize);
            for row in rows {
                prop_assert_eq!(string_width(&row), width);
            }
        }

        #[test]
        fn prop_scroll_stays_in_range(deltas in proptest::collection::vec(-20i32..20, 0..20)) {
            let mut widget = BoxWidget::new(BoxProps {
                content: "a\nb\nc\nd\ne\nf\ng".into(),
                scrollable: true,
                ..BoxProps::new(6, 4)
            }).unwrap();
            for delta in deltas {
                widget.scroll(delta);
                prop_assert!(widget.scroll_offset() <= widget.max_scroll());
            }
        }
    }
}
