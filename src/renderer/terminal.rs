//! The terminal capability.
//!
//! Widgets never talk to a terminal. Renderers emit frames through the
//! [`Terminal`] trait, which is the only place output reaches a device.
//! [`CrosstermTerminal`] is the real implementation; [`ScreenBuffer`] is an
//! in-memory one.
//!
//! [`ScreenBuffer`]: super::ScreenBuffer

use std::io::{self, Stdout, Write};

use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, queue, terminal};

use super::frame::Style;
use crate::types::{Attr, Rgba};

/// Relative or absolute cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up(u16),
    Down(u16),
    Left(u16),
    Right(u16),
    /// Absolute column on the current row.
    Column(u16),
    /// Absolute position.
    To { x: u16, y: u16 },
}

/// Region to erase, relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseRegion {
    /// The whole current row.
    Line,
    /// From the cursor to the end of the screen.
    Down,
    /// The whole screen.
    All,
}

/// Output capability of a character-cell terminal.
pub trait Terminal {
    /// Write text at the cursor and advance it.
    fn write_styled(&mut self, text: &str, style: &Style) -> io::Result<()>;

    fn move_cursor(&mut self, movement: CursorMove) -> io::Result<()>;

    fn erase(&mut self, region: EraseRegion) -> io::Result<()>;

    /// Move to column 0 of the next row, scrolling if needed.
    fn next_line(&mut self) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Crossterm implementation
// =============================================================================

/// [`Terminal`] over any writer, using crossterm commands.
///
/// Tracks the last applied style so consecutive spans with the same style
/// don't re-emit color and attribute changes.
pub struct CrosstermTerminal<W: Write = Stdout> {
    out: W,
    current: Option<Style>,
}

impl CrosstermTerminal<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out, current: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn apply_style(&mut self, style: &Style) -> io::Result<()> {
        if self.current.as_ref() == Some(style) {
            return Ok(());
        }

        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        queue!(
            self.out,
            SetForegroundColor(to_crossterm_color(style.fg)),
            SetBackgroundColor(to_crossterm_color(style.bg))
        )?;
        for attribute in attributes(style.attrs) {
            queue!(self.out, SetAttribute(attribute))?;
        }

        self.current = Some(*style);
        Ok(())
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn write_styled(&mut self, text: &str, style: &Style) -> io::Result<()> {
        self.apply_style(style)?;
        queue!(self.out, Print(text))
    }

    fn move_cursor(&mut self, movement: CursorMove) -> io::Result<()> {
        match movement {
            CursorMove::Up(0) | CursorMove::Down(0) | CursorMove::Left(0) | CursorMove::Right(0) => {
                Ok(())
            }
            CursorMove::Up(n) => queue!(self.out, cursor::MoveUp(n)),
            CursorMove::Down(n) => queue!(self.out, cursor::MoveDown(n)),
            CursorMove::Left(n) => queue!(self.out, cursor::MoveLeft(n)),
            CursorMove::Right(n) => queue!(self.out, cursor::MoveRight(n)),
            CursorMove::Column(x) => queue!(self.out, cursor::MoveToColumn(x)),
            CursorMove::To { x, y } => queue!(self.out, cursor::MoveTo(x, y)),
        }
    }

    fn erase(&mut self, region: EraseRegion) -> io::Result<()> {
        let clear = match region {
            EraseRegion::Line => terminal::ClearType::CurrentLine,
            EraseRegion::Down => terminal::ClearType::FromCursorDown,
            EraseRegion::All => terminal::ClearType::All,
        };
        queue!(self.out, terminal::Clear(clear))
    }

    fn next_line(&mut self) -> io::Result<()> {
        // Raw mode does not translate \n, so return the carriage explicitly.
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor, Print("\r\n"))?;
        self.current = None;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        self.current = None;
        self.out.flush()
    }
}

/// Convert our color to crossterm's.
pub fn to_crossterm_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else if color.is_ansi() {
        Color::AnsiValue(color.ansi_index())
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

fn attributes(attrs: Attr) -> impl Iterator<Item = Attribute> {
    [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::BLINK, Attribute::SlowBlink),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::HIDDEN, Attribute::Hidden),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ]
    .into_iter()
    .filter(move |(flag, _)| attrs.contains(*flag))
    .map(|(_, attribute)| attribute)
}
