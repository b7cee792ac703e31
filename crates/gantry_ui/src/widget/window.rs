//! Movable window with a title bar and close button.

use crate::error::UiResult;
use crate::event::{EventKind, UiEvent};
use crate::layout::{Padding, Rect};
use crate::render::RenderBatch;
use crate::tree::{NodeId, UiTree};

use super::{
    ArrangeCtx, Button, EventCtx, PartRole, PartSignal, RenderCtx, Widget, WidgetResponse,
};

/// Default title bar height.
const TITLE_HEIGHT: i32 = 20;

/// A clip-enabled container with a title bar. Dragging the title bar moves
/// the window; the close button hides it.
#[derive(Debug, Clone)]
pub struct Window {
    title: String,
    title_height: i32,
    dragging: bool,
}

impl Window {
    /// Creates a window.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_height: TITLE_HEIGHT,
            dragging: false,
        }
    }

    /// Creates a clip-enabled window node with its close button part.
    ///
    /// # Errors
    ///
    /// Propagates part attachment failures.
    pub fn spawn(tree: &mut UiTree, name: &str, title: &str) -> UiResult<NodeId> {
        let id = tree.create(name, Self::new(title));
        tree.set_clip_enabled(id, true)?;
        let close = tree.create("", Button::new("x"));
        tree.add_part(id, PartRole::CloseButton, close)?;
        Ok(id)
    }

    /// Title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Whether a title bar drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn title_bar(&self, bounds: Rect) -> Rect {
        Rect::new(bounds.x, bounds.y, bounds.width, self.title_height.min(bounds.height))
    }
}

impl Widget for Window {
    widget_any!("Window");

    fn adjust_clip_padding(&self, mut padding: Padding) -> Padding {
        padding.top += self.title_height;
        padding
    }

    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_>) {
        let side = self.title_height - 4;
        let x = ctx.bounds().width - side - 2;
        ctx.place(PartRole::CloseButton, Rect::new(x, 2, side, side));
    }

    fn handle_event(&mut self, event: &UiEvent, ctx: &mut EventCtx<'_>) -> WidgetResponse {
        match event.kind {
            EventKind::ClickStart => {
                self.dragging = self.title_bar(ctx.bounds).contains(event.position);
                WidgetResponse::HANDLED
            }
            EventKind::Drag if self.dragging && !event.delta.is_zero() => {
                WidgetResponse::moved(event.delta)
            }
            EventKind::ClickEnd | EventKind::ClickEndOutside => {
                self.dragging = false;
                WidgetResponse::HANDLED
            }
            _ => WidgetResponse::IGNORED,
        }
    }

    fn on_part_signal(
        &mut self,
        role: PartRole,
        signal: PartSignal,
        _ctx: &mut EventCtx<'_>,
    ) -> WidgetResponse {
        match (role, signal) {
            (PartRole::CloseButton, PartSignal::Event(event))
                if event.kind == EventKind::ClickEnd =>
            {
                tracing::debug!(node = %event.target, title = %self.title, "window closed");
                WidgetResponse::hide()
            }
            _ => WidgetResponse::IGNORED,
        }
    }

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        let theme = ctx.theme;
        batch.fill_rect(ctx.bounds, theme.surface);
        let bar = self.title_bar(ctx.bounds);
        batch.fill_rect(bar, theme.title_bar);
        batch.draw_text(&self.title, ctx.text_origin(bar, 6), theme.text);
        batch.stroke_rect(ctx.bounds, theme.border, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputState, MouseButton};

    fn setup() -> (UiTree, NodeId) {
        let mut tree = UiTree::new(Rect::new(0, 0, 300, 200));
        let window = Window::spawn(&mut tree, "settings", "Settings").unwrap();
        tree.set_local_bounds(window, Rect::new(10, 10, 100, 80)).unwrap();
        tree.add_child(tree.root(), window).unwrap();
        (tree, window)
    }

    #[test]
    fn test_title_bar_reserved() {
        let (tree, window) = setup();
        assert_eq!(tree.clip_bounds(window), Some(Rect::new(10, 30, 100, 60)));
        let close = tree.part(window, PartRole::CloseButton).unwrap();
        assert_eq!(tree.global_bounds(close), Some(Rect::new(92, 12, 16, 16)));
    }

    #[test]
    fn test_title_drag_moves_window() {
        let (mut tree, window) = setup();
        let mut input = InputState::new();
        input.set_mouse_pos(20, 15);
        tree.update(&input, 0.016);
        input.begin_frame();
        input.mouse_button_down(MouseButton::Left);
        tree.update(&input, 0.016);

        input.begin_frame();
        input.set_mouse_pos(25, 22);
        tree.update(&input, 0.016);

        assert_eq!(tree.local_bounds(window), Some(Rect::new(15, 17, 100, 80)));
        assert_eq!(tree.clip_bounds(window), Some(Rect::new(15, 37, 100, 60)));

        input.begin_frame();
        input.mouse_button_up(MouseButton::Left);
        tree.update(&input, 0.016);
        assert_eq!(tree.widget::<Window>(window).map(Window::is_dragging), Some(false));
    }

    #[test]
    fn test_body_drag_does_not_move() {
        let (mut tree, window) = setup();
        tree.dispatch_event(
            UiEvent::new(EventKind::ClickStart, window).at(crate::layout::Point::new(20, 60)),
        );
        tree.dispatch_event(
            UiEvent::new(EventKind::Drag, window).with_delta(crate::layout::Point::new(5, 5)),
        );
        assert_eq!(tree.local_bounds(window), Some(Rect::new(10, 10, 100, 80)));
    }

    #[test]
    fn test_close_button_hides() {
        let (mut tree, window) = setup();
        let close = tree.part(window, PartRole::CloseButton).unwrap();
        tree.dispatch_event(UiEvent::new(EventKind::ClickEnd, close));
        assert_eq!(tree.node(window).map(|n| n.is_visible()), Some(false));
    }
}
