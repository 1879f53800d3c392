//! Keyboard Module - Key events and listener registry
//!
//! Key event model plus a [`Keyboard`] registry that hands events to
//! listeners. Does NOT own stdin (that is the input module).
//!
//! Listeners are scoped handles: [`Keyboard::listen`] registers one and the
//! returned [`KeyListener`] deregisters itself when dropped, so a listener can
//! never outlive the session that opened it. The newest listener captures
//! keys; older ones see nothing until it goes away.
//!
//! # Example
//!
//! ```
//! use spark_widgets::state::{KeyCode, KeyEvent, Keyboard};
//!
//! let keyboard = Keyboard::new();
//! {
//!     let listener = keyboard.listen();
//!     assert!(keyboard.dispatch(KeyEvent::new(KeyCode::Enter)));
//!     assert_eq!(listener.next_event().map(|e| e.code), Some(KeyCode::Enter));
//! }
//! // Dropped with its scope.
//! assert_eq!(keyboard.listener_count(), 0);
//! assert!(!keyboard.dispatch(KeyEvent::new(KeyCode::Enter)));
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::trace;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    /// Create modifiers with alt
    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::default()
        }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Which key was pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    Escape,
    F(u8),
}

/// Keyboard event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyEvent {
    /// Create a simple key press event
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(code: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            state: KeyState::Press,
        }
    }

    /// A plain character press.
    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    /// Ctrl plus a character.
    pub fn ctrl(c: char) -> Self {
        Self::with_modifiers(KeyCode::Char(c), Modifiers::ctrl())
    }

    /// Key name: the character itself for printable keys, otherwise
    /// `Enter`, `ArrowUp`, `F1`...
    pub fn name(&self) -> String {
        match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Left => "ArrowLeft".into(),
            KeyCode::Right => "ArrowRight".into(),
            KeyCode::Up => "ArrowUp".into(),
            KeyCode::Down => "ArrowDown".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Escape => "Escape".into(),
            KeyCode::F(n) => format!("F{n}"),
        }
    }

    /// A single printable character with no ctrl/alt/meta chord.
    pub fn is_character(&self) -> bool {
        matches!(self.code, KeyCode::Char(c) if !c.is_control())
            && !self.modifiers.ctrl
            && !self.modifiers.alt
            && !self.modifiers.meta
    }

    /// The character's code point, for character keys.
    pub fn codepoint(&self) -> Option<u32> {
        match self.code {
            KeyCode::Char(c) if self.is_character() => Some(c as u32),
            _ => None,
        }
    }

    /// Escape or Ctrl+C.
    pub fn is_cancel(&self) -> bool {
        self.code == KeyCode::Escape
            || (self.modifiers.ctrl && matches!(self.code, KeyCode::Char('c' | 'C')))
    }

    /// Check if this is a press (or auto-repeat) event
    pub fn is_press(&self) -> bool {
        self.state != KeyState::Release
    }
}

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

#[derive(Debug, Default)]
struct Registry {
    listeners: Vec<(usize, VecDeque<KeyEvent>)>,
    next_id: usize,
}

impl Registry {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Routes key events to the newest live listener.
///
/// Cheap to clone; clones share one registry.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    registry: Rc<RefCell<Registry>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It captures all keys until dropped.
    pub fn listen(&self) -> KeyListener {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id();
        registry.listeners.push((id, VecDeque::new()));
        trace!(id, "key listener registered");
        KeyListener {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Queue an event for the capturing listener.
    /// Returns false if nobody is listening.
    pub fn dispatch(&self, event: KeyEvent) -> bool {
        let mut registry = self.registry.borrow_mut();
        match registry.listeners.last_mut() {
            Some((_, queue)) => {
                queue.push_back(event);
                true
            }
            None => false,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// A registered listener. Deregisters on drop.
#[derive(Debug)]
pub struct KeyListener {
    id: usize,
    registry: Weak<RefCell<Registry>>,
}

impl KeyListener {
    /// Take the oldest queued event.
    pub fn next_event(&self) -> Option<KeyEvent> {
        let registry = self.registry.upgrade()?;
        let mut registry = registry.borrow_mut();
        registry
            .listeners
            .iter_mut()
            .find(|(id, _)| *id == self.id)
            .and_then(|(_, queue)| queue.pop_front())
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.registry.upgrade().map_or(0, |registry| {
            registry
                .borrow()
                .listeners
                .iter()
                .find(|(id, _)| *id == self.id)
                .map_or(0, |(_, queue)| queue.len())
        })
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
            trace!(id = self.id, "key listener removed");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
