//! Flat background panel.

use crate::render::RenderBatch;
use crate::style::Color;

use super::{RenderCtx, Widget};

/// Which theme color fills the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Fill {
    Surface,
    Background,
    Custom(Color),
    None,
}

/// A filled rectangle with an optional border. Used as a plain container.
#[derive(Debug, Clone)]
pub struct Panel {
    fill: Fill,
    border: bool,
}

impl Panel {
    /// Panel filled with the theme's surface color.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fill: Fill::Surface,
            border: false,
        }
    }

    /// Panel filled with the theme's background color (the root uses this).
    #[must_use]
    pub const fn backdrop() -> Self {
        Self {
            fill: Fill::Background,
            border: false,
        }
    }

    /// Panel that draws nothing but its border, if any.
    #[must_use]
    pub const fn transparent() -> Self {
        Self {
            fill: Fill::None,
            border: false,
        }
    }

    /// Overrides the fill color.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.fill = Fill::Custom(color);
        self
    }

    /// Draws a one-pixel border in the theme's border color.
    #[must_use]
    pub const fn with_border(mut self) -> Self {
        self.border = true;
        self
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Panel {
    widget_any!("Panel");

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        let color = match self.fill {
            Fill::Surface => Some(ctx.theme.surface),
            Fill::Background => Some(ctx.theme.background),
            Fill::Custom(color) => Some(color),
            Fill::None => None,
        };
        if let Some(color) = color {
            batch.fill_rect(ctx.bounds, color);
        }
        if self.border {
            batch.stroke_rect(ctx.bounds, ctx.theme.border, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::Rect;
    use crate::render::{RenderCommand, UIRenderer};
    use crate::tree::UiTree;
    use crate::widget::Panel;

    #[test]
    fn test_transparent_with_border_only_strokes() {
        let mut tree = UiTree::new(Rect::new(0, 0, 100, 100));
        let panel = tree.create("frame", Panel::transparent().with_border());
        tree.set_local_bounds(panel, Rect::new(0, 0, 20, 20)).unwrap();
        tree.add_child(tree.root(), panel).unwrap();

        let mut renderer = UIRenderer::new();
        tree.render_node(panel, &mut renderer);
        assert_eq!(renderer.command_count(), 1);
        assert!(matches!(renderer.commands()[0], RenderCommand::RectOutline { .. }));
    }
}
