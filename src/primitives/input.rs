//! Input Primitive - Single-line text input widget.
//!
//! A text entry state machine with validation and cursor math.
//!
//! # Features
//!
//! - Two states: Idle and Editing; only Editing handles keys
//! - Cursor navigation (arrows, home, end)
//! - Text editing (backspace, delete) with an optional `max_length`
//! - Validation after every change: `required`, `min_length`, regex
//!   patterns and custom predicates, all failures collected in order
//! - Password mode with a mask glyph
//! - Placeholder text
//! - Horizontal scrolling when a field `width` is set
//!
//! A [`Prompt`] is an input session: it registers a key listener, feeds keys
//! to the input until Enter submits a valid value or Escape / Ctrl+C cancels,
//! and deregisters the listener when it resolves or is dropped.
//!
//! # Example
//!
//! ```
//! use spark_widgets::primitives::{InputOutcome, InputProps, TextInput};
//! use spark_widgets::state::{KeyCode, KeyEvent};
//!
//! let mut input = TextInput::new(InputProps {
//!     required: true,
//!     ..InputProps::default()
//! })
//! .unwrap();
//! input.focus();
//!
//! assert_eq!(input.handle_key(&KeyEvent::new(KeyCode::Enter)), InputOutcome::Rejected);
//! assert_eq!(input.errors(), ["This field is required"]);
//!
//! input.handle_key(&KeyEvent::char('o'));
//! input.handle_key(&KeyEvent::char('k'));
//! assert_eq!(
//!     input.handle_key(&KeyEvent::new(KeyCode::Enter)),
//!     InputOutcome::Submitted("ok".into())
//! );
//! ```

use std::fmt;
use std::rc::Rc;
use std::task::Poll;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, trace, warn};

use super::Widget;
use super::types::{InputProps, ValidatorFn};
use crate::error::{ConfigError, Error, InputCancelled};
use crate::layout::char_width;
use crate::renderer::{Frame, InlineRenderer, Line, Style, Terminal};
use crate::state::{KeyCode, KeyEvent, KeyListener, KeySource, Keyboard};
use crate::theme::{Theme, Token};
use crate::types::Attr;

const ERROR_MARKER: &str = "✗";
const KEY_POLL: Duration = Duration::from_millis(50);

// =============================================================================
// Validation Rules
// =============================================================================

enum RuleCheck {
    Predicate(ValidatorFn),
    Pattern(Regex),
}

/// One validation rule: a check plus the message shown when it fails.
#[derive(Clone)]
pub struct ValidationRule {
    check: Rc<RuleCheck>,
    message: String,
}

impl ValidationRule {
    /// Rule from a predicate. The predicate returns true for valid values.
    pub fn new(predicate: impl Fn(&str) -> bool + 'static, message: impl Into<String>) -> Self {
        Self {
            check: Rc::new(RuleCheck::Predicate(Rc::new(predicate))),
            message: message.into(),
        }
    }

    /// Rule requiring the value to match a regex.
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|source| {
            warn!(pattern, "rejected validation pattern");
            ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            check: Rc::new(RuleCheck::Pattern(regex)),
            message: message.into(),
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn passes(&self, value: &str) -> bool {
        match self.check.as_ref() {
            RuleCheck::Predicate(f) => f(value),
            RuleCheck::Pattern(re) => re.is_match(value),
        }
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.check.as_ref() {
            RuleCheck::Predicate(_) => "predicate".to_string(),
            RuleCheck::Pattern(re) => format!("pattern({})", re.as_str()),
        };
        f.debug_struct("ValidationRule")
            .field("check", &kind)
            .field("message", &self.message)
            .finish()
    }
}

// =============================================================================
// TextInput
// =============================================================================

/// Whether the input is capturing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    #[default]
    Idle,
    Editing,
}

/// Result of handling one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not handled: idle, disabled, or a key with no binding.
    Ignored,
    /// The value changed.
    Changed,
    /// Only the cursor moved.
    Moved,
    /// Enter with validation errors. Still editing.
    Rejected,
    /// Enter with a valid value. Back to idle.
    Submitted(String),
    /// Escape or Ctrl+C. Back to idle, not validated.
    Cancelled,
}

/// Single-line editable text.
#[derive(Debug, Clone)]
pub struct TextInput {
    props: InputProps,
    rules: Vec<ValidationRule>,
    value: String,
    cursor: usize,
    scroll_offset: usize,
    state: InputState,
    errors: Vec<String>,
}

impl TextInput {
    /// Create an input.
    ///
    /// Fails if `min_length > max_length`, the initial value is longer than
    /// `max_length`, or a pattern doesn't compile.
    pub fn new(props: InputProps) -> Result<Self, ConfigError> {
        if let (Some(min_length), Some(max_length)) = (props.min_length, props.max_length) {
            if min_length > max_length {
                warn!(min_length, max_length, "rejected input length bounds");
                return Err(ConfigError::LengthBounds {
                    min_length,
                    max_length,
                });
            }
        }
        let len = props.value.chars().count();
        if let Some(max_length) = props.max_length.filter(|&max| len > max) {
            warn!(len, max_length, "rejected initial input value");
            return Err(ConfigError::ValueTooLong { len, max_length });
        }

        let rules = props
            .validation
            .iter()
            .map(|rule| ValidationRule::pattern(&rule.pattern, rule.message.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let value = props.value.clone();
        let mut input = Self {
            props,
            rules,
            cursor: len,
            value,
            scroll_offset: 0,
            state: InputState::Idle,
            errors: Vec::new(),
        };
        input.update_scroll();
        Ok(input)
    }

    /// Add a custom rule, evaluated after the existing ones.
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Shorthand for a predicate rule.
    pub fn with_validator(
        self,
        predicate: impl Fn(&str) -> bool + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.with_rule(ValidationRule::new(predicate, message))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters, always within `0..=len`.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == InputState::Editing
    }

    pub fn is_disabled(&self) -> bool {
        self.props.disabled
    }

    pub fn props(&self) -> &InputProps {
        &self.props
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    // -------------------------------------------------------------------------
    // State transitions
    // -------------------------------------------------------------------------

    /// Start editing. Returns false if disabled.
    pub fn focus(&mut self) -> bool {
        if self.props.disabled {
            return false;
        }
        if self.state == InputState::Idle {
            debug!("input editing");
        }
        self.state = InputState::Editing;
        true
    }

    /// Stop editing without submitting.
    pub fn blur(&mut self) {
        if self.state == InputState::Editing {
            debug!("input idle");
        }
        self.state = InputState::Idle;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
        if disabled {
            self.blur();
        }
    }

    /// Replace the value, cutting it to `max_length`. The cursor moves to the
    /// end and validation runs.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let mut value = value.into();
        if let Some(max) = self.props.max_length {
            if let Some((i, _)) = value.char_indices().nth(max) {
                value.truncate(i);
            }
        }
        self.value = value;
        self.cursor = self.len();
        self.changed();
    }

    pub fn clear(&mut self) {
        self.set_value(String::new());
    }

    /// Run validation and store the messages.
    ///
    /// Every failing rule contributes its message, in declaration order.
    pub fn validate(&mut self) -> &[String] {
        let value = self.value.as_str();
        let mut errors = Vec::new();

        if self.props.required && value.trim().is_empty() {
            errors.push("This field is required".to_string());
        }
        if let Some(min) = self.props.min_length {
            if value.chars().count() < min {
                errors.push(format!("Must be at least {min} characters"));
            }
        }
        errors.extend(
            self.rules
                .iter()
                .filter(|rule| !rule.passes(value))
                .map(|rule| rule.message.clone()),
        );

        self.errors = errors;
        &self.errors
    }

    fn changed(&mut self) {
        self.validate();
        self.update_scroll();
    }

    /// The characters as drawn: the value, or the mask glyph per character.
    fn display_chars(&self) -> Vec<char> {
        match self.props.mask {
            Some(mask) => std::iter::repeat_n(mask, self.len()).collect(),
            None => self.value.chars().collect(),
        }
    }

    /// Keep the cursor cell inside the `width`-cell window. Measured in
    /// cells, so wide characters take two.
    fn update_scroll(&mut self) {
        let Some(width) = self.props.width else {
            return;
        };
        let width = width as usize;
        let shown = self.display_chars();
        let cursor = self.cursor;
        let cursor_cell = shown.get(cursor).map_or(1, |&c| char_width(c) as usize);
        let cells = |from: usize| -> usize {
            shown[from..cursor].iter().map(|&c| char_width(c) as usize).sum()
        };

        let mut offset = self.scroll_offset.min(cursor);
        while offset < cursor && cells(offset) + cursor_cell > width {
            offset += 1;
        }
        self.scroll_offset = offset;
    }

    fn move_to(&mut self, position: usize) -> InputOutcome {
        let position = position.min(self.len());
        if position == self.cursor {
            return InputOutcome::Ignored;
        }
        self.cursor = position;
        self.update_scroll();
        InputOutcome::Moved
    }

    /// Apply one key. Only handled while editing and enabled.
    pub fn handle_key(&mut self, event: &KeyEvent) -> InputOutcome {
        if self.props.disabled || self.state != InputState::Editing || !event.is_press() {
            return InputOutcome::Ignored;
        }
        trace!(key = %event.name(), "input key");

        if event.is_cancel() {
            self.blur();
            return InputOutcome::Cancelled;
        }

        match event.code {
            KeyCode::Enter => {
                if self.validate().is_empty() {
                    self.blur();
                    InputOutcome::Submitted(self.value.clone())
                } else {
                    InputOutcome::Rejected
                }
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return InputOutcome::Ignored;
                }
                let at = self.byte_index(self.cursor - 1);
                self.value.remove(at);
                self.cursor -= 1;
                self.changed();
                InputOutcome::Changed
            }
            KeyCode::Delete => {
                if self.cursor >= self.len() {
                    return InputOutcome::Ignored;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                self.changed();
                InputOutcome::Changed
            }
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to(self.cursor + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.len()),
            KeyCode::Char(c) if event.is_character() => {
                if self.props.max_length.is_some_and(|max| self.len() >= max) {
                    return InputOutcome::Ignored;
                }
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                self.changed();
                InputOutcome::Changed
            }
            _ => InputOutcome::Ignored,
        }
    }

    // -------------------------------------------------------------------------
    // Sessions
    // -------------------------------------------------------------------------

    /// Open an input session listening on `keyboard`.
    pub fn prompt<'a>(&'a mut self, keyboard: &Keyboard) -> Result<Prompt<'a>, Error> {
        if !self.focus() {
            return Err(Error::InputDisabled);
        }
        debug!("input session opened");
        Ok(Prompt {
            listener: Some(keyboard.listen()),
            input: self,
            outcome: None,
        })
    }

    /// Run a complete session: read keys from `keys`, redraw inline after
    /// each one, and return the submitted value.
    ///
    /// Returns when the user submits or cancels, or when `keys` fails. A
    /// source that only ever times out keeps the session waiting.
    pub fn read_value<K, T>(&mut self, keys: &mut K, term: &mut T, theme: &Theme) -> Result<String, Error>
    where
        K: KeySource + ?Sized,
        T: Terminal + ?Sized,
    {
        let keyboard = Keyboard::new();
        let mut renderer = InlineRenderer::new();
        let mut prompt = self.prompt(&keyboard)?;
        renderer.render(term, &prompt.render(theme))?;

        loop {
            let Some(key) = keys.next_key(KEY_POLL)? else {
                continue;
            };
            keyboard.dispatch(key);
            let poll = prompt.poll();
            renderer.render(term, &prompt.render(theme))?;
            if let Poll::Ready(result) = poll {
                renderer.finish(term)?;
                return result.map_err(Error::from);
            }
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl TextInput {
    fn field_line(&self, theme: &Theme) -> Line {
        let editing = self.is_active() && !self.props.disabled;
        let cursor_style = theme.styled(Token::Foreground, Attr::INVERSE);
        let mut line = Line::new();

        if self.value.is_empty() {
            let placeholder = &self.props.placeholder;
            let muted = theme.style(Token::Muted);
            let mut chars = placeholder.chars();
            if editing {
                let head = chars.next().unwrap_or(' ');
                line.push(head.to_string(), cursor_style.add_attrs(Attr::DIM));
            }
            line.push(chars.collect::<String>(), muted);
            if let Some(width) = self.props.width {
                pad_line(&mut line, width);
            }
            return line;
        }

        let text_style = if self.props.disabled {
            theme.style(Token::Muted)
        } else {
            theme.style(Token::Foreground)
        };
        let shown = self.display_chars();
        let start = match self.props.width {
            Some(_) => self.scroll_offset.min(shown.len()),
            None => 0,
        };
        let limit = self.props.width.map_or(usize::MAX, usize::from);

        // Window of whole characters that fit in `limit` cells.
        let mut used = 0usize;
        let mut end = start;
        while let Some(&c) = shown.get(end) {
            let w = char_width(c) as usize;
            if used + w > limit {
                break;
            }
            used += w;
            end += 1;
        }
        let visible = &shown[start..end];

        if editing && self.cursor >= start && self.cursor <= end {
            let at = self.cursor - start;
            line.push(visible[..at].iter().collect::<String>(), text_style);
            match visible.get(at) {
                Some(c) => {
                    line.push(c.to_string(), cursor_style);
                    line.push(visible[at + 1..].iter().collect::<String>(), text_style);
                }
                None if self.cursor == shown.len() && used < limit => {
                    line.push(" ", cursor_style);
                }
                None => {}
            }
        } else {
            line.push(visible.iter().collect::<String>(), text_style);
        }

        if let Some(width) = self.props.width {
            pad_line(&mut line, width);
        }
        line
    }
}

fn pad_line(line: &mut Line, width: u16) {
    let used = line.width();
    if used < width {
        line.push(" ".repeat((width - used) as usize), Style::PLAIN);
    }
}

impl Widget for TextInput {
    fn render(&self, theme: &Theme) -> Frame {
        let mut lines = vec![self.field_line(theme)];
        let error_style = theme.style(Token::Error);
        lines.extend(
            self.errors
                .iter()
                .map(|e| Line::new().with(format!("{ERROR_MARKER} {e}"), error_style)),
        );
        Frame::new(lines)
    }
}

// =============================================================================
// Prompt - input session
// =============================================================================

/// An open input session.
///
/// Holds the key listener for as long as the session is pending. Resolving
/// (submit or cancel) or dropping the prompt releases it.
pub struct Prompt<'a> {
    input: &'a mut TextInput,
    listener: Option<KeyListener>,
    outcome: Option<Result<String, InputCancelled>>,
}

impl Prompt<'_> {
    pub fn input(&self) -> &TextInput {
        self.input
    }

    pub fn is_pending(&self) -> bool {
        self.outcome.is_none()
    }

    /// Handle queued keys. Ready with the value on a valid submit, or with
    /// [`InputCancelled`] on cancel. Validation failures keep it pending.
    pub fn poll(&mut self) -> Poll<Result<String, InputCancelled>> {
        if let Some(outcome) = &self.outcome {
            return Poll::Ready(outcome.clone());
        }
        let Some(listener) = &self.listener else {
            return Poll::Pending;
        };

        while let Some(event) = listener.next_event() {
            let resolved = match self.input.handle_key(&event) {
                InputOutcome::Submitted(value) => {
                    debug!("input session submitted");
                    Ok(value)
                }
                InputOutcome::Cancelled => {
                    debug!("input session cancelled");
                    Err(InputCancelled)
                }
                _ => continue,
            };
            self.listener = None;
            self.outcome = Some(resolved.clone());
            return Poll::Ready(resolved);
        }
        Poll::Pending
    }

    pub fn render(&self, theme: &Theme) -> Frame {
        self.input.render(theme)
    }
}

impl Drop for Prompt<'_> {
    fn drop(&mut self) {
        if self.outcome.is_none() {
            debug!("input session abandoned");
            self.input.blur();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::string_width;
    use crate::primitives::PatternRule;
    use crate::renderer::ScreenBuffer;
    use crate::state::ScriptedKeys;
    use proptest::prelude::*;

    fn editing(props: InputProps) -> TextInput {
        let mut input = TextInput::new(props).unwrap();
        assert!(input.focus());
        input
    }

    fn type_text(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            input.handle_key(&KeyEvent::char(c));
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn test_required_empty_submit() {
        let mut input = editing(InputProps {
            required: true,
            ..InputProps::default()
        });
        assert_eq!(input.handle_key(&key(KeyCode::Enter)), InputOutcome::Rejected);
        assert_eq!(input.errors(), ["This field is required"]);
        assert_eq!(input.state(), InputState::Editing);
    }

    #[test]
    fn test_whitespace_only_is_empty_for_required() {
        let mut input = editing(InputProps {
            required: true,
            ..InputProps::default()
        });
        type_text(&mut input, "   ");
        assert_eq!(input.handle_key(&key(KeyCode::Enter)), InputOutcome::Rejected);
    }

    #[test]
    fn test_submit_valid_value_goes_idle() {
        let mut input = editing(InputProps::default());
        type_text(&mut input, "hello");
        assert_eq!(
            input.handle_key(&key(KeyCode::Enter)),
            InputOutcome::Submitted("hello".into())
        );
        assert_eq!(input.state(), InputState::Idle);
        assert_eq!(input.handle_key(&KeyEvent::char('x')), InputOutcome::Ignored);
    }

    #[test]
    fn test_editing_keys() {
        let mut input = editing(InputProps::default());
        type_text(&mut input, "abc");
        assert_eq!(input.cursor_position(), 3);

        input.handle_key(&key(KeyCode::Left));
        input.handle_key(&key(KeyCode::Backspace));
        assert_eq!(input.value(), "ac");
        assert_eq!(input.cursor_position(), 1);

        input.handle_key(&key(KeyCode::Delete));
        assert_eq!(input.value(), "a");
        assert_eq!(input.handle_key(&key(KeyCode::Delete)), InputOutcome::Ignored);

        input.handle_key(&key(KeyCode::Home));
        assert_eq!(input.handle_key(&key(KeyCode::Backspace)), InputOutcome::Ignored);
        input.handle_key(&KeyEvent::char('>'));
        assert_eq!(input.value(), ">a");

        input.handle_key(&key(KeyCode::End));
        assert_eq!(input.cursor_position(), 2);
        assert_eq!(input.handle_key(&key(KeyCode::Right)), InputOutcome::Ignored);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = editing(InputProps::default());
        type_text(&mut input, "héllo");
        input.handle_key(&key(KeyCode::Home));
        input.handle_key(&key(KeyCode::Right));
        input.handle_key(&key(KeyCode::Delete));
        assert_eq!(input.value(), "hllo");
    }

    #[test]
    fn test_max_length_blocks_insert() {
        let mut input = editing(InputProps {
            max_length: Some(3),
            ..InputProps::default()
        });
        type_text(&mut input, "abcdef");
        assert_eq!(input.value(), "abc");
        assert_eq!(input.handle_key(&KeyEvent::char('z')), InputOutcome::Ignored);
    }

    #[test]
    fn test_non_character_keys_ignored() {
        let mut input = editing(InputProps::default());
        assert_eq!(input.handle_key(&key(KeyCode::Tab)), InputOutcome::Ignored);
        assert_eq!(input.handle_key(&KeyEvent::ctrl('a')), InputOutcome::Ignored);
        assert_eq!(input.handle_key(&key(KeyCode::F(1))), InputOutcome::Ignored);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_all_failures_accumulated_in_order() {
        let mut input = editing(InputProps {
            min_length: Some(5),
            validation: vec![PatternRule::new("^[0-9]+$", "Digits only")],
            ..InputProps::default()
        })
        .with_validator(|v| v.starts_with('1'), "Must start with 1");

        type_text(&mut input, "ab");
        assert_eq!(
            input.errors(),
            [
                "Must be at least 5 characters",
                "Digits only",
                "Must start with 1"
            ]
        );

        input.set_value("12345");
        assert!(input.errors().is_empty());
    }

    #[test]
    fn test_cancel_skips_validation() {
        let mut input = editing(InputProps {
            required: true,
            ..InputProps::default()
        });
        assert_eq!(input.handle_key(&key(KeyCode::Escape)), InputOutcome::Cancelled);
        assert!(input.errors().is_empty());
        assert_eq!(input.state(), InputState::Idle);

        input.focus();
        assert_eq!(input.handle_key(&KeyEvent::ctrl('c')), InputOutcome::Cancelled);
    }

    #[test]
    fn test_configuration_errors() {
        assert!(matches!(
            TextInput::new(InputProps {
                min_length: Some(5),
                max_length: Some(2),
                ..InputProps::default()
            }),
            Err(ConfigError::LengthBounds { .. })
        ));
        assert!(matches!(
            TextInput::new(InputProps {
                value: "toolong".into(),
                max_length: Some(3),
                ..InputProps::default()
            }),
            Err(ConfigError::ValueTooLong { len: 7, max_length: 3 })
        ));
        assert!(matches!(
            TextInput::new(InputProps {
                validation: vec![PatternRule::new("(unclosed", "x")],
                ..InputProps::default()
            }),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let mut input = TextInput::new(InputProps {
            value: "x".into(),
            disabled: true,
            ..InputProps::default()
        })
        .unwrap();
        assert!(!input.focus());
        assert_eq!(input.handle_key(&KeyEvent::char('a')), InputOutcome::Ignored);

        let frame = input.render(&Theme::default());
        let has_cursor = frame.lines[0]
            .spans
            .iter()
            .any(|s| s.style.attrs.contains(Attr::INVERSE));
        assert!(!has_cursor);
    }

    #[test]
    fn test_render_value_cursor_and_errors() {
        let theme = Theme::default();
        let mut input = editing(InputProps {
            min_length: Some(4),
            ..InputProps::default()
        });
        type_text(&mut input, "ab");
        input.handle_key(&key(KeyCode::Left));

        let frame = input.render(&theme);
        assert_eq!(frame.to_plain(), vec!["ab", "✗ Must be at least 4 characters"]);

        let cursor = frame.lines[0]
            .spans
            .iter()
            .find(|s| s.style.attrs.contains(Attr::INVERSE))
            .unwrap();
        assert_eq!(cursor.text, "b");
        assert_eq!(frame.lines[1].spans[0].style.fg, theme.color(Token::Error));
    }

    #[test]
    fn test_render_placeholder_muted() {
        let theme = Theme::default();
        let input = TextInput::new(InputProps {
            placeholder: "Your name".into(),
            ..InputProps::default()
        })
        .unwrap();
        let frame = input.render(&theme);
        assert_eq!(frame.to_plain(), vec!["Your name"]);
        assert_eq!(frame.lines[0].spans[0].style.fg, theme.color(Token::Muted));
    }

    #[test]
    fn test_render_mask() {
        let mut input = editing(InputProps {
            mask: Some('*'),
            ..InputProps::default()
        });
        type_text(&mut input, "secret");
        input.blur();
        assert_eq!(input.render(&Theme::default()).to_plain(), vec!["******"]);
    }

    #[test]
    fn test_horizontal_scroll_keeps_cursor_visible() {
        let mut input = editing(InputProps {
            width: Some(4),
            ..InputProps::default()
        });
        type_text(&mut input, "abcdef");
        assert_eq!(input.render(&Theme::default()).to_plain(), vec!["def "]);

        input.handle_key(&key(KeyCode::Home));
        assert_eq!(input.render(&Theme::default()).to_plain(), vec!["abcd"]);
    }

    #[test]
    fn test_horizontal_scroll_measures_cells() {
        let mut input = editing(InputProps {
            width: Some(4),
            ..InputProps::default()
        });
        type_text(&mut input, "日本語");
        let rows = input.render(&Theme::default()).to_plain();
        assert_eq!(rows, vec!["語  "]);
        assert_eq!(string_width(&rows[0]), 4);

        input.handle_key(&key(KeyCode::Home));
        let rows = input.render(&Theme::default()).to_plain();
        assert_eq!(rows, vec!["日本"]);

        input.handle_key(&key(KeyCode::End));
        input.handle_key(&key(KeyCode::Left));
        let field = &input.render(&Theme::default()).lines[0];
        assert_eq!(field.width(), 4);
        assert!(field.plain().contains('語'));
    }

    #[test]
    fn test_prompt_resolves_and_detaches() {
        let keyboard = Keyboard::new();
        let mut input = TextInput::new(InputProps::default()).unwrap();
        let mut prompt = input.prompt(&keyboard).unwrap();
        assert_eq!(keyboard.listener_count(), 1);

        for c in "hi".chars() {
            keyboard.dispatch(KeyEvent::char(c));
        }
        assert_eq!(prompt.poll(), Poll::Pending);

        keyboard.dispatch(key(KeyCode::Enter));
        assert_eq!(prompt.poll(), Poll::Ready(Ok("hi".to_string())));
        assert_eq!(keyboard.listener_count(), 0);
        assert_eq!(prompt.poll(), Poll::Ready(Ok("hi".to_string())));
    }

    #[test]
    fn test_prompt_cancel() {
        let keyboard = Keyboard::new();
        let mut input = TextInput::new(InputProps {
            required: true,
            ..InputProps::default()
        })
        .unwrap();
        let mut prompt = input.prompt(&keyboard).unwrap();
        keyboard.dispatch(key(KeyCode::Enter));
        assert_eq!(prompt.poll(), Poll::Pending);
        keyboard.dispatch(key(KeyCode::Escape));
        assert_eq!(prompt.poll(), Poll::Ready(Err(InputCancelled)));
        assert_eq!(keyboard.listener_count(), 0);
    }

    #[test]
    fn test_dropped_prompt_detaches_and_blurs() {
        let keyboard = Keyboard::new();
        let mut input = TextInput::new(InputProps::default()).unwrap();
        {
            let _prompt = input.prompt(&keyboard).unwrap();
            assert_eq!(keyboard.listener_count(), 1);
        }
        assert_eq!(keyboard.listener_count(), 0);
        assert_eq!(input.state(), InputState::Idle);
    }

    #[test]
    fn test_prompt_on_disabled_input() {
        let keyboard = Keyboard::new();
        let mut input = TextInput::new(InputProps {
            disabled: true,
            ..InputProps::default()
        })
        .unwrap();
        assert!(matches!(input.prompt(&keyboard), Err(Error::InputDisabled)));
        assert_eq!(keyboard.listener_count(), 0);
    }

    #[test]
    fn test_read_value_session() {
        let mut input = TextInput::new(InputProps::default()).unwrap();
        let mut keys = ScriptedKeys::typing("yes").then(key(KeyCode::Enter));
        let mut screen = ScreenBuffer::new(20, 4);
        let value = input
            .read_value(&mut keys, &mut screen, &Theme::default())
            .unwrap();
        assert_eq!(value, "yes");
        assert_eq!(screen.content_lines(), vec!["yes"]);
    }

    #[test]
    fn test_read_value_cancelled() {
        let mut input = TextInput::new(InputProps::default()).unwrap();
        let mut keys = ScriptedKeys::typing("no").then(KeyEvent::ctrl('c'));
        let mut screen = ScreenBuffer::new(20, 4);
        let result = input.read_value(&mut keys, &mut screen, &Theme::default());
        assert!(matches!(result, Err(Error::Cancelled(InputCancelled))));
    }

    #[test]
    fn test_read_value_unterminated_script_ends() {
        let mut input = TextInput::new(InputProps::default()).unwrap();
        let mut keys = ScriptedKeys::typing("abc");
        let mut screen = ScreenBuffer::new(20, 4);
        let result = input.read_value(&mut keys, &mut screen, &Theme::default());
        match result {
            Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("expected end of script, got {other:?}"),
        }
        assert_eq!(input.value(), "abc");
        assert!(!input.is_active());
    }

    fn arb_key() -> impl Strategy<Value = KeyEvent> {
        prop_oneof![
            proptest::char::range('a', 'z').prop_map(KeyEvent::char),
            Just(KeyEvent::new(KeyCode::Backspace)),
            Just(KeyEvent::new(KeyCode::Delete)),
            Just(KeyEvent::new(KeyCode::Left)),
            Just(KeyEvent::new(KeyCode::Right)),
            Just(KeyEvent::new(KeyCode::Home)),
            Just(KeyEvent::new(KeyCode::End)),
        ]
    }

    proptest! {
        #[test]
        fn prop_cursor_stays_in_bounds(
            keys in proptest::collection::vec(arb_key(), 0..60),
            max in proptest::option::of(0usize..10),
        ) {
            let mut input = editing(InputProps { max_length: max, ..InputProps::default() });
            for event in keys {
                input.handle_key(&event);
                prop_assert!(input.cursor_position() <= input.value().chars().count());
                if let Some(max) = max {
                    prop_assert!(input.value().chars().count() <= max);
                }
            }
        }

        #[test]
        fn prop_insert_then_backspace_is_noop(
            initial in "[a-z]{0,10}",
            moves in 0usize..12,
            c in proptest::char::range('a', 'z'),
        ) {
            let mut input = editing(InputProps { value: initial.clone(), ..InputProps::default() });
            input.handle_key(&KeyEvent::new(KeyCode::Home));
            for _ in 0..moves {
                input.handle_key(&KeyEvent::new(KeyCode::Right));
            }
            let cursor = input.cursor_position();
            input.handle_key(&KeyEvent::char(c));
            input.handle_key(&KeyEvent::new(KeyCode::Backspace));
            prop_assert_eq!(input.value(), initial.as_str());
            prop_assert_eq!(input.cursor_position(), cursor);
        }
    }
}
