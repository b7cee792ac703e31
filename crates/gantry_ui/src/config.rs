//! # UI Configuration
//!
//! Loaded once at startup from TOML. Every field is optional:
//!
//! ```toml
//! theme = "light"            # or a [theme] table with explicit colors
//! caret_blink_secs = 0.5
//! key_repeat_delay_secs = 0.4
//! key_repeat_interval_secs = 0.05
//! double_click_secs = 0.3
//! scroll_step = 16
//!
//! [font]
//! char_width = 8
//! line_height = 14
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{UiError, UiResult};
use crate::style::Theme;

/// Fixed-advance font settings used by the default metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Advance per character in pixels.
    pub char_width: i32,
    /// Line height in pixels.
    pub line_height: i32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            char_width: 8,
            line_height: 14,
        }
    }
}

/// Resolved toolkit configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Colors.
    pub theme: Theme,
    /// Seconds per caret blink phase.
    pub caret_blink_secs: f32,
    /// Seconds a key must be held before it repeats.
    pub key_repeat_delay_secs: f32,
    /// Seconds between repeats once repeating.
    pub key_repeat_interval_secs: f32,
    /// Max seconds between presses that count as a double click.
    pub double_click_secs: f32,
    /// Pixels scrolled per wheel notch or scroll button step.
    pub scroll_step: i32,
    /// Font settings.
    pub font: FontConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::DARK,
            caret_blink_secs: 0.5,
            key_repeat_delay_secs: 0.4,
            key_repeat_interval_secs: 0.05,
            double_click_secs: 0.3,
            scroll_step: 16,
            font: FontConfig::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThemeSetting {
    Named(String),
    Custom(Box<Theme>),
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    theme: Option<ThemeSetting>,
    caret_blink_secs: Option<f32>,
    key_repeat_delay_secs: Option<f32>,
    key_repeat_interval_secs: Option<f32>,
    double_click_secs: Option<f32>,
    scroll_step: Option<i32>,
    font: Option<FontConfig>,
}

impl UiConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Config`] on malformed TOML, unknown theme names or
    /// out-of-range values.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let raw: RawConfig = toml::from_str(text).map_err(|e| UiError::Config(e.to_string()))?;
        let defaults = Self::default();

        let theme = match raw.theme {
            None => defaults.theme,
            Some(ThemeSetting::Named(name)) => Theme::by_name(&name)
                .ok_or_else(|| UiError::Config(format!("unknown theme {name:?}")))?,
            Some(ThemeSetting::Custom(theme)) => *theme,
        };

        let config = Self {
            theme,
            caret_blink_secs: raw.caret_blink_secs.unwrap_or(defaults.caret_blink_secs),
            key_repeat_delay_secs: raw
                .key_repeat_delay_secs
                .unwrap_or(defaults.key_repeat_delay_secs),
            key_repeat_interval_secs: raw
                .key_repeat_interval_secs
                .unwrap_or(defaults.key_repeat_interval_secs),
            double_click_secs: raw.double_click_secs.unwrap_or(defaults.double_click_secs),
            scroll_step: raw.scroll_step.unwrap_or(defaults.scroll_step),
            font: raw.font.unwrap_or(defaults.font),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| UiError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded UI config");
        Ok(config)
    }

    fn validate(&self) -> UiResult<()> {
        let timers = [
            ("caret_blink_secs", self.caret_blink_secs),
            ("key_repeat_delay_secs", self.key_repeat_delay_secs),
            ("key_repeat_interval_secs", self.key_repeat_interval_secs),
            ("double_click_secs", self.double_click_secs),
        ];
        for (name, value) in timers {
            if !value.is_finite() || value <= 0.0 {
                return Err(UiError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.scroll_step <= 0 {
            return Err(UiError::Config("scroll_step must be positive".into()));
        }
        if self.font.char_width <= 0 || self.font.line_height <= 0 {
            return Err(UiError::Config("font metrics must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = UiConfig::from_toml_str("").unwrap();
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn test_named_theme_and_overrides() {
        let config = UiConfig::from_toml_str(
            r#"
            theme = "light"
            scroll_step = 24

            [font]
            char_width = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.theme, Theme::LIGHT);
        assert_eq!(config.scroll_step, 24);
        assert_eq!(config.font.char_width, 6);
        assert_eq!(config.font.line_height, 14);
    }

    #[test]
    fn test_explicit_theme_table() {
        let mut text = String::from("[theme]\n");
        for field in [
            "background", "surface", "control", "control_hover", "control_pressed",
            "control_disabled", "accent", "title_bar", "text", "text_muted", "selection",
            "border",
        ] {
            text.push_str(&format!("{field} = {{ r = 0.5, g = 0.5, b = 0.5 }}\n"));
        }

        let config = UiConfig::from_toml_str(&text).unwrap();
        assert!((config.theme.accent.r - 0.5).abs() < f32::EPSILON);
        assert!((config.theme.accent.a - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            UiConfig::from_toml_str("theme = \"neon\""),
            Err(UiError::Config(_))
        ));
        assert!(matches!(
            UiConfig::from_toml_str("caret_blink_secs = 0.0"),
            Err(UiError::Config(_))
        ));
        assert!(matches!(
            UiConfig::from_toml_str("unknown_key = 1"),
            Err(UiError::Config(_))
        ));
        assert!(matches!(
            UiConfig::from_toml_str("scroll_step = \"fast\""),
            Err(UiError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = UiConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, UiError::Io { .. }));
    }
}
