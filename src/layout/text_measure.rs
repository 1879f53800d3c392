//! Text Measurement
//!
//! Utilities for measuring and reflowing text in terminal cells.
//!
//! Terminal text width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Zero-width and control characters: 0 cells
//!
//! Widths come from the `unicode-width` tables.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::types::TextAlign;

const ELLIPSIS: &str = "...";

/// Display width of a single character in cells.
#[inline]
pub fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// Measure the display width of a string in terminal cells.
#[inline]
pub fn string_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// Take the longest prefix of `text` that fits in `width` cells.
///
/// Returns the prefix and its width. Never splits a wide character, so the
/// returned width can be one less than `width`.
pub fn take_width(text: &str, width: u16) -> (String, u16) {
    let mut out = String::new();
    let mut used = 0u16;
    for c in text.chars() {
        let w = char_width(c);
        if used.saturating_add(w) > width {
            break;
        }
        out.push(c);
        used += w;
    }
    (out, used)
}

/// Word-wrap text to a given width.
///
/// Explicit newlines always break. Within a paragraph, words are packed
/// greedily with single spaces between them. A word wider than `width` is
/// placed alone on its own line and never split, so that line is the only
/// kind allowed to exceed `width`.
///
/// # Example
///
/// ```
/// use spark_widgets::layout::wrap_text;
///
/// assert_eq!(wrap_text("hello big world", 9), vec!["hello big", "world"]);
/// assert_eq!(wrap_text("a\n\nb", 5), vec!["a", "", "b"]);
/// ```
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    let mut lines = Vec::new();

    // Sums run in usize: a single word can exceed u16::MAX cells.
    let width = width as usize;
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        lines.push(current);
    }

    lines
}

/// Pad text with spaces to exactly `width` cells.
///
/// `Center` puts `floor(pad / 2)` spaces on the left and the remainder on the
/// right. Text at least as wide as `width` is cut to its first `width` cells;
/// no ellipsis is added here.
pub fn align_text(text: &str, width: u16, align: TextAlign) -> String {
    let text_width = string_width(text);

    if text_width >= width {
        let (mut cut, used) = take_width(text, width);
        // A wide char straddling the edge leaves one cell over.
        for _ in used..width {
            cut.push(' ');
        }
        return cut;
    }

    let pad = (width - text_width) as usize;
    let (left, right) = match align {
        TextAlign::Left => (0, pad),
        TextAlign::Center => (pad / 2, pad - pad / 2),
        TextAlign::Right => (pad, 0),
    };

    let mut out = String::with_capacity(text.len() + pad);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', right));
    out
}

/// Truncate text to fit within a given width.
///
/// If text is wider than `width`, it's cut and `...` is appended so the
/// result is at most `width` cells. Widths under 3 cut without an ellipsis.
pub fn truncate_text(text: &str, width: u16) -> String {
    if string_width(text) <= width {
        return text.to_string();
    }

    let ellipsis_width = ELLIPSIS.len() as u16;
    if width < ellipsis_width {
        return take_width(text, width).0;
    }

    let (mut cut, _) = take_width(text, width - ellipsis_width);
    cut.push_str(ELLIPSIS);
    cut
}

/// Adjust a horizontal scroll offset so the cursor stays inside a window of
/// `visible_width` cells.
///
/// # Arguments
/// * `cursor_pos` - Current cursor position in characters
/// * `scroll_offset` - Current horizontal scroll offset
/// * `visible_width` - Width of the visible area (at least 1 is assumed)
///
/// # Returns
/// New scroll offset that keeps cursor visible
pub fn ensure_cursor_visible(cursor_pos: usize, scroll_offset: usize, visible_width: usize) -> usize {
    let visible_width = visible_width.max(1);

    if cursor_pos < scroll_offset {
        cursor_pos
    } else if cursor_pos >= scroll_offset + visible_width {
        cursor_pos + 1 - visible_width
    } else {
        scroll_offset
    }
}
