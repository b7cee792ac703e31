//! Static text.

use crate::layout::Point;
use crate::render::RenderBatch;

use super::{RenderCtx, Widget};

/// Horizontal text alignment inside the label's bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// One line of text.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
    align: Align,
    muted: bool,
}

impl Label {
    /// Creates a left-aligned label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Left,
            muted: false,
        }
    }

    /// Sets the alignment.
    #[must_use]
    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Uses the theme's muted text color.
    #[must_use]
    pub const fn muted(mut self) -> Self {
        self.muted = true;
        self
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current alignment.
    #[must_use]
    pub const fn align(&self) -> Align {
        self.align
    }
}

impl Widget for Label {
    widget_any!("Label");

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        let width = ctx.fonts.text_width(&self.text);
        let origin = ctx.text_origin(ctx.bounds, 0);
        let x = match self.align {
            Align::Left => origin.x,
            Align::Center => ctx.bounds.x + (ctx.bounds.width - width) / 2,
            Align::Right => ctx.bounds.right() - width,
        };
        let color = if self.muted || !ctx.enabled {
            ctx.theme.text_muted
        } else {
            ctx.theme.text
        };
        batch.draw_text(&self.text, Point::new(x, origin.y), color);
    }
}
