//! Error types.
//!
//! Only construction and terminal I/O can fail. Rendering never fails, range
//! clamps are not errors, and validation failures live on the TextInput state.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid widget options or engine configuration. Raised at construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{widget}: {field} must be at least {min}, got {value}")]
    InvalidDimension {
        widget: &'static str,
        field: &'static str,
        min: u16,
        value: u16,
    },

    #[error("progress bar: min ({min}) must not exceed max ({max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("progress bar: {field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("text input: min_length ({min_length}) exceeds max_length ({max_length})")]
    LengthBounds { min_length: usize, max_length: usize },

    #[error("text input: initial value has {len} characters, max_length is {max_length}")]
    ValueTooLong { len: usize, max_length: usize },

    #[error("invalid validation pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown theme preset `{0}`")]
    UnknownPreset(String),

    #[error("theme token `{token}` has unparsable color `{value}`")]
    InvalidColor { token: String, value: String },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read configuration from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The user cancelled an input session (Escape or Ctrl+C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input cancelled")]
pub struct InputCancelled;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cancelled(#[from] InputCancelled),

    #[error("text input is disabled")]
    InputDisabled,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::InvalidDimension {
            widget: "box",
            field: "width",
            min: 1,
            value: 0,
        };
        assert_eq!(err.to_string(), "box: width must be at least 1, got 0");

        let err = ConfigError::InvalidRange { min: 10.0, max: 5.0 };
        assert_eq!(err.to_string(), "progress bar: min (10) must not exceed max (5)");
    }

    #[test]
    fn test_cancelled_converts_into_error() {
        let err: Error = InputCancelled.into();
        assert!(matches!(err, Error::Cancelled(InputCancelled)));
        assert_eq!(err.to_string(), "input cancelled");
    }
}
