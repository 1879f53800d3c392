//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the keyboard module.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyEvent
//! - [`KeySource`] - anything that yields key events with a timeout
//! - [`CrosstermKeys`] - `KeySource` reading the real terminal
//! - [`ScriptedKeys`] - `KeySource` replaying a fixed sequence
//!
//! # Example
//!
//! ```ignore
//! use spark_widgets::state::{CrosstermKeys, Keyboard, KeySource};
//! use std::time::Duration;
//!
//! let keyboard = Keyboard::new();
//! let mut keys = CrosstermKeys;
//! loop {
//!     if let Some(event) = keys.next_key(Duration::from_millis(16))? {
//!         keyboard.dispatch(event);
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{
    self as ct, Event as CrosstermEvent, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers,
};

use super::keyboard::{KeyCode, KeyEvent, KeyState, Modifiers};

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyEvent.
///
/// Returns `None` for keys the widgets have no use for (Insert, media keys...).
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeyEvent> {
    let code = match event.code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Delete => KeyCode::Delete,
        ct::KeyCode::Esc => KeyCode::Escape,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        ct::KeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    Some(KeyEvent {
        code,
        modifiers: convert_modifiers(event.modifiers),
        state,
    })
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.contains(KeyModifiers::META) || mods.contains(KeyModifiers::SUPER),
    }
}

// =============================================================================
// KEY SOURCES
// =============================================================================

/// Something that produces key events.
pub trait KeySource {
    /// Wait up to `timeout` for the next key. `Ok(None)` on timeout.
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Reads keys from the terminal through crossterm. Requires raw mode for
/// per-key delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !ct::poll(timeout)? {
            return Ok(None);
        }
        match ct::read()? {
            CrosstermEvent::Key(key) => Ok(convert_key_event(key)),
            _ => Ok(None),
        }
    }
}

/// Replays a fixed key sequence.
///
/// Once the script is exhausted `next_key` fails with
/// [`io::ErrorKind::UnexpectedEof`], so a session fed an unterminated
/// script ends with an error instead of waiting forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Characters of `text` as key presses.
    pub fn typing(text: &str) -> Self {
        Self::new(text.chars().map(KeyEvent::char))
    }

    pub fn then(mut self, key: KeyEvent) -> Self {
        self.keys.push_back(key);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyEvent>> {
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "key script exhausted",
            )),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
