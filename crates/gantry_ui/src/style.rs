//! Colors and themes.
//!
//! Widgets draw flat filled shapes; the theme is the only styling input.

use serde::Deserialize;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    #[serde(default = "Color::opaque")]
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Serde default for a missing alpha channel.
    const fn opaque() -> f32 {
        1.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Complete theme for the UI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Theme {
    /// Root/backdrop color.
    pub background: Color,
    /// Panels, windows, list backgrounds.
    pub surface: Color,
    /// Idle button face.
    pub control: Color,
    /// Button face under the pointer.
    pub control_hover: Color,
    /// Button face while pressed.
    pub control_pressed: Color,
    /// Face of disabled controls.
    pub control_disabled: Color,
    /// Accent (checkbox tick, scrollbar thumb, graph bars).
    pub accent: Color,
    /// Window title bar.
    pub title_bar: Color,
    /// Text color.
    pub text: Color,
    /// Muted text color.
    pub text_muted: Color,
    /// Text selection highlight.
    pub selection: Color,
    /// Border color.
    pub border: Color,
}

impl Theme {
    /// Dark theme.
    pub const DARK: Self = Self {
        background: Color::rgba(0.02, 0.02, 0.03, 1.0),
        surface: Color::rgba(0.08, 0.08, 0.10, 0.95),
        control: Color::rgba(0.16, 0.16, 0.20, 1.0),
        control_hover: Color::rgba(0.22, 0.22, 0.28, 1.0),
        control_pressed: Color::rgba(0.10, 0.10, 0.14, 1.0),
        control_disabled: Color::rgba(0.12, 0.12, 0.12, 0.6),
        accent: Color::rgba(0.2, 0.9, 1.0, 1.0),
        title_bar: Color::rgba(0.12, 0.14, 0.22, 1.0),
        text: Color::rgba(0.9, 0.9, 0.9, 1.0),
        text_muted: Color::rgba(0.5, 0.5, 0.5, 1.0),
        selection: Color::rgba(0.2, 0.4, 0.8, 0.6),
        border: Color::rgba(0.25, 0.25, 0.3, 0.8),
    };

    /// Light theme.
    pub const LIGHT: Self = Self {
        background: Color::rgba(0.92, 0.92, 0.94, 1.0),
        surface: Color::rgba(0.98, 0.98, 0.98, 1.0),
        control: Color::rgba(0.85, 0.85, 0.88, 1.0),
        control_hover: Color::rgba(0.78, 0.80, 0.86, 1.0),
        control_pressed: Color::rgba(0.65, 0.68, 0.75, 1.0),
        control_disabled: Color::rgba(0.88, 0.88, 0.88, 0.6),
        accent: Color::rgba(0.1, 0.45, 0.85, 1.0),
        title_bar: Color::rgba(0.75, 0.80, 0.90, 1.0),
        text: Color::rgba(0.08, 0.08, 0.1, 1.0),
        text_muted: Color::rgba(0.45, 0.45, 0.5, 1.0),
        selection: Color::rgba(0.55, 0.7, 1.0, 0.6),
        border: Color::rgba(0.6, 0.6, 0.65, 1.0),
    };

    /// Looks up a built-in theme by name (case-insensitive).
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::DARK),
            "light" => Some(Self::LIGHT),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}
