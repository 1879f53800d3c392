//! Inline renderer for normal terminal mode.
//!
//! Writes frames into the normal terminal buffer below the current prompt
//! instead of taking over the screen. Each render:
//!
//! - Moves back to the first row of the previous frame
//! - Erases from there to the end of the screen
//! - Writes the new frame row by row
//!
//! The cursor is left at the end of the frame's last row, so the next render
//! knows exactly how far to climb. Nothing from an earlier, taller frame can
//! survive a shorter redraw.

use std::io;

use tracing::trace;

use super::frame::Frame;
use super::terminal::{CursorMove, EraseRegion, Terminal};

/// Redraws a widget in place.
#[derive(Debug, Default)]
pub struct InlineRenderer {
    previous_height: u16,
}

impl InlineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows drawn by the last render, margin included.
    #[inline]
    pub fn previous_height(&self) -> u16 {
        self.previous_height
    }

    /// Replace the previous output with `frame`.
    pub fn render<T: Terminal + ?Sized>(&mut self, term: &mut T, frame: &Frame) -> io::Result<()> {
        self.erase_previous(term)?;

        let rows = frame.rows();
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                term.next_line()?;
            }
            for span in &row.spans {
                term.write_styled(&span.text, &span.style)?;
            }
        }

        self.previous_height = rows.len().min(u16::MAX as usize) as u16;
        trace!(rows = self.previous_height, "inline render");
        term.flush()
    }

    /// Erase the previous output and forget it.
    pub fn clear<T: Terminal + ?Sized>(&mut self, term: &mut T) -> io::Result<()> {
        self.erase_previous(term)?;
        self.previous_height = 0;
        term.flush()
    }

    /// Leave the drawn frame on screen and move below it, so later output
    /// doesn't overwrite it.
    pub fn finish<T: Terminal + ?Sized>(&mut self, term: &mut T) -> io::Result<()> {
        if self.previous_height > 0 {
            term.next_line()?;
        }
        self.previous_height = 0;
        term.flush()
    }

    fn erase_previous<T: Terminal + ?Sized>(&self, term: &mut T) -> io::Result<()> {
        if self.previous_height == 0 {
            return Ok(());
        }
        term.move_cursor(CursorMove::Up(self.previous_height - 1))?;
        term.move_cursor(CursorMove::Column(0))?;
        term.erase(EraseRegion::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Spacing;
    use crate::renderer::{Line, ScreenBuffer, Style};

    fn frame(rows: &[&str]) -> Frame {
        Frame::new(
            rows.iter()
                .map(|r| Line::new().with(*r, Style::PLAIN))
                .collect(),
        )
    }

    #[test]
    fn test_render_writes_rows() {
        let mut screen = ScreenBuffer::new(10, 5);
        let mut renderer = InlineRenderer::new();
        renderer.render(&mut screen, &frame(&["one", "two"])).unwrap();
        assert_eq!(screen.content_lines(), vec!["one", "two"]);
        assert_eq!(renderer.previous_height(), 2);
    }

    #[test]
    fn test_shorter_redraw_leaves_no_stale_rows() {
        let mut screen = ScreenBuffer::new(10, 5);
        let mut renderer = InlineRenderer::new();
        renderer
            .render(&mut screen, &frame(&["aaaaaa", "bbbbbb", "cccccc"]))
            .unwrap();
        renderer.render(&mut screen, &frame(&["x"])).unwrap();
        assert_eq!(screen.content_lines(), vec!["x"]);
    }

    #[test]
    fn test_clear_erases_everything() {
        let mut screen = ScreenBuffer::new(10, 5);
        let mut renderer = InlineRenderer::new();
        renderer.render(&mut screen, &frame(&["a", "b"])).unwrap();
        renderer.clear(&mut screen).unwrap();
        assert!(screen.content_lines().is_empty());
        assert_eq!(renderer.previous_height(), 0);
    }

    #[test]
    fn test_margin_applied() {
        let mut screen = ScreenBuffer::new(10, 5);
        let mut renderer = InlineRenderer::new();
        let f = frame(&["ab"]).with_margin(Spacing::new(1, 0, 1, 2));
        renderer.render(&mut screen, &f).unwrap();
        assert_eq!(screen.lines(), vec!["", "  ab", "", "", ""]);
        assert_eq!(renderer.previous_height(), 3);
    }

    #[test]
    fn test_render_below_existing_output() {
        let mut screen = ScreenBuffer::new(10, 5);
        screen.write_styled("$ prompt", &Style::PLAIN).unwrap();
        screen.next_line().unwrap();

        let mut renderer = InlineRenderer::new();
        renderer.render(&mut screen, &frame(&["1", "2"])).unwrap();
        renderer.render(&mut screen, &frame(&["3"])).unwrap();
        assert_eq!(screen.content_lines(), vec!["$ prompt", "3"]);

        renderer.finish(&mut screen).unwrap();
        assert_eq!(screen.cursor().y, 2);
    }
}
