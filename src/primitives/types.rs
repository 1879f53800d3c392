//! Primitive types - Props and callbacks.
//!
//! Props are plain option structs. They deserialize from TOML with every
//! field optional (missing fields take the documented default), so a host
//! can keep widget options in config files. Behavior that can't be data,
//! like custom validation predicates and lifecycle hooks, is attached to
//! the widget through builder methods instead.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use crate::layout::Spacing;
use crate::types::{BorderStyle, TextAlign};

// =============================================================================
// Callback Types
// =============================================================================

/// Progress value change callback: `(value, percentage)`.
pub type ProgressUpdateCallback = Rc<dyn Fn(f64, f64)>;

/// Fired once when a progress bar reaches 100%.
pub type CompleteCallback = Rc<dyn Fn()>;

/// Fired when an alert is dismissed by the user.
pub type DismissCallback = Rc<dyn Fn()>;

/// Custom validation predicate. Return true when the value is acceptable.
pub type ValidatorFn = Rc<dyn Fn(&str) -> bool>;

// =============================================================================
// Box Props
// =============================================================================

/// Options for [`BoxWidget`](super::BoxWidget).
///
/// `width` and `height` must be at least 1; the zero defaults exist only so
/// a missing value is reported as a configuration error.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BoxProps {
    pub width: u16,
    pub height: u16,
    pub padding: Spacing,
    pub margin: Spacing,
    pub border_style: BorderStyle,
    pub title: Option<String>,
    pub content: String,
    pub title_align: TextAlign,
    pub content_align: TextAlign,
    pub scrollable: bool,
    pub focusable: bool,
    pub shadow: bool,
}

impl BoxProps {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

// =============================================================================
// Input Props
// =============================================================================

/// A regex validation rule: the value must match `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternRule {
    pub pattern: String,
    pub message: String,
}

impl PatternRule {
    pub fn new(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Options for [`TextInput`](super::TextInput).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct InputProps {
    pub value: String,
    pub placeholder: String,
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
    pub required: bool,
    /// Display every character as this glyph (passwords).
    pub mask: Option<char>,
    /// Regex rules, checked in order after the built-in ones.
    pub validation: Vec<PatternRule>,
    pub disabled: bool,
    /// Visible field width in cells. Unset shows the whole value.
    pub width: Option<u16>,
}

// =============================================================================
// Progress Props
// =============================================================================

/// Progress bar rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStyle {
    #[default]
    Bar,
    Dots,
    Blocks,
    Gradient,
    Minimal,
}

/// Options for [`ProgressBar`](super::ProgressBar).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProgressProps {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub width: u16,
    pub style: ProgressStyle,
    pub animate: bool,
    pub show_percentage: bool,
    pub show_value: bool,
    pub show_eta: bool,
    pub label: Option<String>,
}

impl Default for ProgressProps {
    fn default() -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 100.0,
            width: 40,
            style: ProgressStyle::Bar,
            animate: false,
            show_percentage: true,
            show_value: false,
            show_eta: false,
            label: None,
        }
    }
}

// =============================================================================
// Alert Props
// =============================================================================

/// Alert severity. Picks the icon and border color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl AlertType {
    pub const fn icon(&self) -> char {
        match self {
            Self::Success => '✔',
            Self::Error => '✖',
            Self::Warning => '⚠',
            Self::Info => 'ℹ',
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// Options for [`Alert`](super::Alert).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertProps {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub dismissible: bool,
    pub show_icon: bool,
    pub show_timestamp: bool,
    pub border_style: BorderStyle,
    /// Auto-hide delay in milliseconds.
    pub duration: u64,
    /// Never auto-hide.
    pub persistent: bool,
    pub width: u16,
}

impl Default for AlertProps {
    fn default() -> Self {
        Self {
            alert_type: AlertType::Info,
            message: String::new(),
            dismissible: false,
            show_icon: true,
            show_timestamp: false,
            border_style: BorderStyle::Rounded,
            duration: 5000,
            persistent: false,
            width: 50,
        }
    }
}

impl AlertProps {
    pub fn new(alert_type: AlertType, message: impl Into<String>) -> Self {
        Self {
            alert_type,
            message: message.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_props_from_toml() {
        let props: BoxProps = toml::from_str(
            r#"
            width = 20
            height = 4
            padding = [0, 1]
            border_style = "double"
            title = "Hi"
            title_align = "center"
            "#,
        )
        .unwrap();
        assert_eq!(props.width, 20);
        assert_eq!(props.padding, Spacing::symmetric(0, 1));
        assert_eq!(props.border_style, BorderStyle::Double);
        assert_eq!(props.title.as_deref(), Some("Hi"));
        assert_eq!(props.title_align, TextAlign::Center);
        assert!(!props.scrollable);
    }

    #[test]
    fn test_progress_props_defaults() {
        let props: ProgressProps = toml::from_str("value = 5.0").unwrap();
        assert_eq!(props.max, 100.0);
        assert_eq!(props.width, 40);
        assert_eq!(props.style, ProgressStyle::Bar);
        assert!(props.show_percentage);
    }

    #[test]
    fn test_alert_props_from_toml() {
        let props: AlertProps = toml::from_str(
            r#"
            type = "warning"
            message = "Disk almost full"
            persistent = true
            "#,
        )
        .unwrap();
        assert_eq!(props.alert_type, AlertType::Warning);
        assert!(props.persistent);
        assert_eq!(props.duration, 5000);
        assert_eq!(props.border_style, BorderStyle::Rounded);
    }

    #[test]
    fn test_input_props_patterns() {
        let props: InputProps = toml::from_str(
            r#"
            required = true
            max_length = 8
            [[validation]]
            pattern = "^[a-z]+$"
            message = "Lowercase only"
            "#,
        )
        .unwrap();
        assert!(props.required);
        assert_eq!(props.max_length, Some(8));
        assert_eq!(props.validation, vec![PatternRule::new("^[a-z]+$", "Lowercase only")]);
    }

    #[test]
    fn test_alert_icons() {
        assert_eq!(AlertType::Success.icon(), '✔');
        assert_eq!(AlertType::Info.to_string(), "info");
    }
}
