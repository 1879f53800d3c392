//! In-memory screen.
//!
//! [`ScreenBuffer`] is a 2D grid of [`Cell`]s with a cursor. It implements
//! [`Terminal`], so any renderer can draw into it, and the result can be read
//! back cell by cell or row by row.
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing.
//! - **Clipping**: writes past the right edge are dropped, there is no
//!   auto-wrap.
//! - **Scrolling**: `next_line` on the last row scrolls the grid up one row.
//! - **Wide characters**: the cell after a wide glyph holds a continuation
//!   marker and is skipped when reading rows back.

use std::io;

use super::frame::Style;
use super::terminal::{CursorMove, EraseRegion, Terminal};
use crate::layout::{Position, char_width};
use crate::types::Cell;

/// Occupies the second cell of a wide character.
const CONTINUATION: char = '\0';

// =============================================================================
// ScreenBuffer
// =============================================================================

/// A grid of terminal cells with a cursor.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: Position,
}

impl ScreenBuffer {
    /// Create a new buffer filled with default cells, cursor at the origin.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
            cursor: Position::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// A row's text with trailing spaces removed.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        let row = &self.cells[start..start + self.width as usize];
        let text: String = row
            .iter()
            .map(|cell| cell.char)
            .filter(|&c| c != CONTINUATION)
            .collect();
        text.trim_end().to_string()
    }

    /// All rows, trailing spaces removed.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    /// Rows up to the last one with any visible content.
    pub fn content_lines(&self) -> Vec<String> {
        let mut lines = self.lines();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Clear the entire buffer to default cells. The cursor does not move.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn clear_range(&mut self, start: usize, end: usize) {
        self.cells[start..end].fill(Cell::default());
    }

    fn put(&mut self, c: char, style: &Style) {
        let w = char_width(c);
        if w == 0 {
            return;
        }
        let Position { x, y } = self.cursor;
        if y >= self.height || x.saturating_add(w) > self.width {
            // Clipped, but the cursor still advances like a real terminal
            // would up to the margin.
            self.cursor.x = self.cursor.x.saturating_add(w).min(self.width);
            return;
        }

        let idx = self.index(x, y);
        self.cells[idx] = Cell {
            char: c,
            fg: style.fg,
            bg: style.bg,
            attrs: style.attrs,
        };
        if w == 2 {
            self.cells[idx + 1] = Cell {
                char: CONTINUATION,
                ..self.cells[idx]
            };
        }
        self.cursor.x = x + w;
    }

    fn scroll_up(&mut self) {
        let width = self.width as usize;
        if width == 0 || self.cells.is_empty() {
            return;
        }
        self.cells.drain(0..width);
        self.cells.extend(std::iter::repeat_n(Cell::default(), width));
    }
}

impl Terminal for ScreenBuffer {
    fn write_styled(&mut self, text: &str, style: &Style) -> io::Result<()> {
        for c in text.chars() {
            self.put(c, style);
        }
        Ok(())
    }

    fn move_cursor(&mut self, movement: CursorMove) -> io::Result<()> {
        let max_x = self.width.saturating_sub(1);
        let max_y = self.height.saturating_sub(1);
        let Position { x, y } = self.cursor;
        self.cursor = match movement {
            CursorMove::Up(n) => Position::new(x, y.saturating_sub(n)),
            CursorMove::Down(n) => Position::new(x, y.saturating_add(n).min(max_y)),
            CursorMove::Left(n) => Position::new(x.saturating_sub(n), y),
            CursorMove::Right(n) => Position::new(x.saturating_add(n).min(max_x), y),
            CursorMove::Column(col) => Position::new(col.min(max_x), y),
            CursorMove::To { x, y } => Position::new(x.min(max_x), y.min(max_y)),
        };
        Ok(())
    }

    fn erase(&mut self, region: EraseRegion) -> io::Result<()> {
        if self.cursor.y >= self.height {
            return Ok(());
        }
        let row_start = self.index(0, self.cursor.y);
        match region {
            EraseRegion::Line => self.clear_range(row_start, row_start + self.width as usize),
            EraseRegion::Down => {
                let from = row_start + self.cursor.x.min(self.width) as usize;
                let end = self.cells.len();
                self.clear_range(from, end);
            }
            EraseRegion::All => self.clear(),
        }
        Ok(())
    }

    fn next_line(&mut self) -> io::Result<()> {
        self.cursor.x = 0;
        if self.cursor.y + 1 >= self.height {
            self.scroll_up();
        } else {
            self.cursor.y += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Rgba};

    #[test]
    fn test_write_and_read_back() {
        let mut buf = ScreenBuffer::new(10, 3);
        buf.write_styled("hi", &Style::fg(Rgba::ansi(1))).unwrap();
        buf.next_line().unwrap();
        buf.write_styled("there", &Style::PLAIN).unwrap();

        assert_eq!(buf.lines(), vec!["hi", "there", ""]);
        assert_eq!(buf.get(0, 0).unwrap().fg, Rgba::ansi(1));
        assert_eq!(buf.cursor(), Position::new(5, 1));
    }

    #[test]
    fn test_clips_at_right_edge() {
        let mut buf = ScreenBuffer::new(4, 1);
        buf.write_styled("abcdef", &Style::PLAIN).unwrap();
        assert_eq!(buf.row_text(0), "abcd");
    }

    #[test]
    fn test_wide_chars_use_two_cells() {
        let mut buf = ScreenBuffer::new(5, 1);
        buf.write_styled("日本!", &Style::PLAIN).unwrap();
        assert_eq!(buf.row_text(0), "日本!");
        assert_eq!(buf.cursor().x, 5);
    }

    #[test]
    fn test_next_line_scrolls() {
        let mut buf = ScreenBuffer::new(3, 2);
        buf.write_styled("a", &Style::PLAIN).unwrap();
        buf.next_line().unwrap();
        buf.write_styled("b", &Style::PLAIN).unwrap();
        buf.next_line().unwrap();
        buf.write_styled("c", &Style::PLAIN).unwrap();
        assert_eq!(buf.lines(), vec!["b", "c"]);
    }

    #[test]
    fn test_erase_down_from_cursor() {
        let mut buf = ScreenBuffer::new(4, 3);
        for (i, row) in ["aaaa", "bbbb", "cccc"].into_iter().enumerate() {
            if i > 0 {
                buf.next_line().unwrap();
            }
            buf.write_styled(row, &Style::PLAIN).unwrap();
        }
        buf.move_cursor(CursorMove::To { x: 2, y: 1 }).unwrap();
        buf.erase(EraseRegion::Down).unwrap();
        assert_eq!(buf.lines(), vec!["aaaa", "bb", ""]);
    }

    #[test]
    fn test_cursor_moves_clamp() {
        let mut buf = ScreenBuffer::new(4, 4);
        buf.move_cursor(CursorMove::Up(3)).unwrap();
        assert_eq!(buf.cursor(), Position::new(0, 0));
        buf.move_cursor(CursorMove::Down(10)).unwrap();
        buf.move_cursor(CursorMove::Right(10)).unwrap();
        assert_eq!(buf.cursor(), Position::new(3, 3));
    }

    #[test]
    fn test_cell_attrs_recorded() {
        let mut buf = ScreenBuffer::new(2, 1);
        buf.write_styled("x", &Style::PLAIN.with_attrs(Attr::INVERSE)).unwrap();
        assert!(buf.get(0, 0).unwrap().attrs.contains(Attr::INVERSE));
    }
}
