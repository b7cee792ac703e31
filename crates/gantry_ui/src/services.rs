//! Host services consumed by widgets: text measurement, clipboard, content.

use crate::config::FontConfig;
use crate::content::ContentLoader;

/// Measures single-line text.
pub trait FontMetrics: Send {
    /// Width of `text` in pixels.
    fn text_width(&self, text: &str) -> i32;

    /// Height of one line in pixels.
    fn line_height(&self) -> i32;

    /// Character index whose boundary is nearest to `x` pixels from the
    /// start of `text`. Ranges over `0..=text.chars().count()`.
    fn char_index_at(&self, text: &str, x: i32) -> usize {
        if x <= 0 {
            return 0;
        }
        let mut best = 0;
        let mut best_distance = x;
        for (index, (byte, c)) in text.char_indices().enumerate() {
            let boundary = self.text_width(&text[..byte + c.len_utf8()]);
            let distance = (boundary - x).abs();
            if distance < best_distance {
                best = index + 1;
                best_distance = distance;
            }
        }
        best
    }
}

/// Fixed-advance metrics. Every character is `char_width` wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMetrics {
    /// Advance per character.
    pub char_width: i32,
    /// Line height.
    pub line_height: i32,
}

impl MonospaceMetrics {
    /// Creates metrics with the given advance and line height.
    #[must_use]
    pub const fn new(char_width: i32, line_height: i32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl From<FontConfig> for MonospaceMetrics {
    fn from(font: FontConfig) -> Self {
        Self::new(font.char_width, font.line_height)
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        FontConfig::default().into()
    }
}

impl FontMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str) -> i32 {
        let count = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        count.saturating_mul(self.char_width)
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn char_index_at(&self, text: &str, x: i32) -> usize {
        if x <= 0 || self.char_width <= 0 {
            return 0;
        }
        let rounded = (x + self.char_width / 2) / self.char_width;
        usize::try_from(rounded).unwrap_or(0).min(text.chars().count())
    }
}

/// Plain-text clipboard.
pub trait Clipboard: Send {
    /// Current clipboard contents.
    fn get_text(&self) -> Option<String>;

    /// Replaces the clipboard contents.
    fn set_text(&mut self, text: &str);
}

/// In-process clipboard.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn get_text(&self) -> Option<String> {
        self.contents.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.contents = Some(text.to_owned());
    }
}

/// Services handed to widget hooks.
pub struct Services {
    /// Text measurement.
    pub fonts: Box<dyn FontMetrics>,
    /// Clipboard.
    pub clipboard: Box<dyn Clipboard>,
    /// Texture loader.
    pub content: ContentLoader,
}

impl Services {
    /// Services with the given font metrics, an in-memory clipboard and an
    /// offline content loader.
    #[must_use]
    pub fn with_fonts(fonts: impl FontMetrics + 'static) -> Self {
        Self {
            fonts: Box::new(fonts),
            clipboard: Box::<MemoryClipboard>::default(),
            content: ContentLoader::offline(),
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::with_fonts(MonospaceMetrics::default())
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_measure() {
        let font = MonospaceMetrics::new(8, 14);
        assert_eq!(font.text_width("hello"), 40);
        assert_eq!(font.text_width(""), 0);
        assert_eq!(font.line_height(), 14);
    }

    #[test]
    fn test_nearest_char_index() {
        let font = MonospaceMetrics::new(8, 14);
        assert_eq!(font.char_index_at("hello", -5), 0);
        assert_eq!(font.char_index_at("hello", 3), 0);
        assert_eq!(font.char_index_at("hello", 5), 1);
        assert_eq!(font.char_index_at("hello", 17), 2);
        assert_eq!(font.char_index_at("hello", 500), 5);
    }

    struct Proportional;

    impl FontMetrics for Proportional {
        fn text_width(&self, text: &str) -> i32 {
            text.chars().map(|c| if c == 'i' { 2 } else { 10 }).sum()
        }

        fn line_height(&self) -> i32 {
            12
        }
    }

    #[test]
    fn test_default_char_index_uses_measurement() {
        // Boundaries of "wiw": 0, 10, 12, 22.
        assert_eq!(Proportional.char_index_at("wiw", 4), 0);
        assert_eq!(Proportional.char_index_at("wiw", 11), 1);
        assert_eq!(Proportional.char_index_at("wiw", 13), 2);
        assert_eq!(Proportional.char_index_at("wiw", 30), 3);
    }

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::default();
        assert_eq!(clipboard.get_text(), None);
        clipboard.set_text("copied");
        assert_eq!(clipboard.get_text().as_deref(), Some("copied"));
    }
}
