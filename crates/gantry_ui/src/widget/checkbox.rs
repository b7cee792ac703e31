//! Two-state check box.

use crate::event::{EventKind, UiEvent};
use crate::layout::Rect;
use crate::render::RenderBatch;

use super::{EventCtx, RenderCtx, Widget, WidgetResponse};

/// Side of the tick box in pixels.
const BOX_SIZE: i32 = 12;

/// A box that toggles on click, with an optional caption to its right.
///
/// Each toggle reports `1` (checked) or `0` as a `Changed` value.
#[derive(Debug, Clone, Default)]
pub struct CheckBox {
    text: String,
    checked: bool,
}

impl CheckBox {
    /// Creates an unchecked box.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
        }
    }

    /// Starts checked.
    #[must_use]
    pub const fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Whether the box is ticked.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the state without raising `Changed`.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    fn tick_box(bounds: Rect) -> Rect {
        Rect::new(
            bounds.x,
            bounds.y + (bounds.height - BOX_SIZE) / 2,
            BOX_SIZE,
            BOX_SIZE,
        )
    }
}

impl Widget for CheckBox {
    widget_any!("CheckBox");

    fn handle_event(&mut self, event: &UiEvent, ctx: &mut EventCtx<'_>) -> WidgetResponse {
        match event.kind {
            EventKind::ClickEnd if ctx.enabled => {
                self.checked = !self.checked;
                WidgetResponse::changed(i32::from(self.checked))
            }
            EventKind::ClickStart => WidgetResponse::HANDLED,
            _ => WidgetResponse::IGNORED,
        }
    }

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        let theme = ctx.theme;
        let tick_box = Self::tick_box(ctx.bounds);
        let face = if ctx.enabled {
            theme.control
        } else {
            theme.control_disabled
        };
        batch.fill_rect(tick_box, face);
        batch.stroke_rect(tick_box, theme.border, 1);
        if self.checked {
            batch.fill_rect(tick_box.deflate(3, 3), theme.accent);
        }

        let origin = ctx.text_origin(ctx.bounds, BOX_SIZE + 4);
        let color = if ctx.enabled { theme.text } else { theme.text_muted };
        batch.draw_text(&self.text, origin, color);
    }
}
