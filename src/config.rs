//! Engine configuration.
//!
//! A host can keep its theme and timing choices in a TOML file:
//!
//! ```toml
//! animation_interval_ms = 80
//!
//! [theme]
//! preset = "nord"
//!
//! [theme.overrides]
//! primary = "#ff8800"
//! muted = "ansi(8)"
//!
//! [alerts]
//! max_visible = 2
//! duration_ms = 3000
//! ```
//!
//! Every key is optional. Widgets don't read this themselves; the host
//! builds its [`Theme`] and [`AlertManager`] from it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::primitives::{AlertManager, AlertProps, AlertType};
use crate::theme::{get_preset, Theme, Token};

/// Theme selection: a preset plus per-token color overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: String,
    /// Token name -> color string (`#rrggbb`, `ansi(N)`, `default`).
    pub overrides: HashMap<Token, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: "terminal".to_string(),
            overrides: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub max_visible: usize,
    pub duration_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            max_visible: 3,
            duration_ms: 5000,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub theme: ThemeConfig,
    pub animation_interval_ms: u64,
    pub alerts: AlertConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            animation_interval_ms: 100,
            alerts: AlertConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| {
            warn!(error = %e, "rejected engine configuration");
            ConfigError::from(e)
        })
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded engine configuration");
        Self::from_toml_str(&source)
    }

    /// Build the theme: the preset with overrides applied, validated.
    pub fn theme(&self) -> Result<Theme, ConfigError> {
        let mut theme = get_preset(&self.theme.preset).ok_or_else(|| {
            warn!(preset = %self.theme.preset, "unknown theme preset");
            ConfigError::UnknownPreset(self.theme.preset.clone())
        })?;
        for (&token, value) in &self.theme.overrides {
            theme = theme.with_color(token, value.as_str());
        }
        theme.validate()?;
        Ok(theme)
    }

    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_interval_ms)
    }

    pub fn alert_manager(&self) -> Result<AlertManager, ConfigError> {
        AlertManager::new(self.alerts.max_visible)
    }

    /// Alert options with the configured auto-hide duration.
    pub fn alert_props(&self, alert_type: AlertType, message: impl Into<String>) -> AlertProps {
        AlertProps {
            duration: self.alerts.duration_ms,
            ..AlertProps::new(alert_type, message)
        }
    }
}
