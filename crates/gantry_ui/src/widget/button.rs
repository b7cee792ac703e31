//! Push button.

use crate::event::{EventKind, UiEvent};
use crate::layout::Point;
use crate::render::RenderBatch;

use super::{EventCtx, RenderCtx, Widget, WidgetResponse};

/// Visual state of a [`Button`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonState {
    /// Idle.
    #[default]
    Default,
    /// Pointer over the button.
    Hover,
    /// Pressed.
    Clicked,
    /// Node disabled.
    Disabled,
}

/// A clickable button with a text caption.
///
/// A click is a `ClickEnd` on the button's node; subscribe to it to act on
/// clicks. The button also serves as the arrow and thumb parts of
/// [`ScrollBar`](super::ScrollBar) and the drop button of
/// [`ComboBox`](super::ComboBox).
#[derive(Debug, Clone, Default)]
pub struct Button {
    text: String,
    state: ButtonState,
    hovered: bool,
}

impl Button {
    /// Creates a button.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            state: ButtonState::Default,
            hovered: false,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Caption.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the caption.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Button {
    widget_any!("Button");

    fn set_enabled(&mut self, enabled: bool) {
        self.state = if enabled {
            if self.hovered {
                ButtonState::Hover
            } else {
                ButtonState::Default
            }
        } else {
            ButtonState::Disabled
        };
    }

    fn handle_event(&mut self, event: &UiEvent, _ctx: &mut EventCtx<'_>) -> WidgetResponse {
        match event.kind {
            EventKind::Enter => self.hovered = true,
            EventKind::Leave => self.hovered = false,
            _ => {}
        }
        if self.state == ButtonState::Disabled {
            return WidgetResponse::IGNORED;
        }

        self.state = match (event.kind, self.state) {
            (EventKind::Enter, ButtonState::Default) => ButtonState::Hover,
            (EventKind::Leave, ButtonState::Hover) => ButtonState::Default,
            (EventKind::ClickStart, _) => ButtonState::Clicked,
            (EventKind::ClickEnd | EventKind::ClickEndOutside, _) if self.hovered => {
                ButtonState::Hover
            }
            (EventKind::ClickEnd | EventKind::ClickEndOutside, _) => ButtonState::Default,
            (EventKind::Enter | EventKind::Leave | EventKind::Drag | EventKind::Hold, state) => state,
            _ => return WidgetResponse::IGNORED,
        };
        WidgetResponse::HANDLED
    }

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        let theme = ctx.theme;
        let face = match self.state {
            ButtonState::Default => theme.control,
            ButtonState::Hover => theme.control_hover,
            ButtonState::Clicked => theme.control_pressed,
            ButtonState::Disabled => theme.control_disabled,
        };
        batch.fill_rect(ctx.bounds, face);
        batch.stroke_rect(ctx.bounds, theme.border, 1);

        let width = ctx.fonts.text_width(&self.text);
        let origin = ctx.text_origin(ctx.bounds, 0);
        let color = if self.state == ButtonState::Disabled {
            theme.text_muted
        } else {
            theme.text
        };
        let position = Point::new(ctx.bounds.x + (ctx.bounds.width - width) / 2, origin.y);
        batch.draw_text(&self.text, position, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use crate::tree::{NodeId, UiTree};

    fn setup() -> (UiTree, NodeId) {
        let mut tree = UiTree::new(Rect::new(0, 0, 200, 100));
        let button = tree.create("ok", Button::new("OK"));
        tree.set_local_bounds(button, Rect::new(0, 0, 40, 20)).unwrap();
        tree.add_child(tree.root(), button).unwrap();
        (tree, button)
    }

    fn send(tree: &mut UiTree, button: NodeId, kind: EventKind) -> ButtonState {
        tree.dispatch_event(UiEvent::new(kind, button));
        tree.widget::<Button>(button).map(Button::state).unwrap()
    }

    #[test]
    fn test_click_cycle() {
        let (mut tree, button) = setup();
        assert_eq!(send(&mut tree, button, EventKind::Enter), ButtonState::Hover);
        assert_eq!(send(&mut tree, button, EventKind::ClickStart), ButtonState::Clicked);
        assert_eq!(send(&mut tree, button, EventKind::ClickEnd), ButtonState::Hover);
        assert_eq!(send(&mut tree, button, EventKind::Leave), ButtonState::Default);
    }

    #[test]
    fn test_pressed_button_stays_clicked_on_leave() {
        let (mut tree, button) = setup();
        send(&mut tree, button, EventKind::Enter);
        send(&mut tree, button, EventKind::ClickStart);
        assert_eq!(send(&mut tree, button, EventKind::Leave), ButtonState::Clicked);
        assert_eq!(
            send(&mut tree, button, EventKind::ClickEndOutside),
            ButtonState::Default
        );
    }

    #[test]
    fn test_release_outside_while_hovered() {
        let (mut tree, button) = setup();
        send(&mut tree, button, EventKind::ClickStart);
        send(&mut tree, button, EventKind::Enter);
        assert_eq!(
            send(&mut tree, button, EventKind::ClickEndOutside),
            ButtonState::Hover
        );
    }

    #[test]
    fn test_disabled_ignores_input() {
        let (mut tree, button) = setup();
        tree.set_enabled(button, false).unwrap();
        assert_eq!(send(&mut tree, button, EventKind::ClickStart), ButtonState::Disabled);

        tree.set_enabled(button, true).unwrap();
        assert_eq!(tree.widget::<Button>(button).map(Button::state), Some(ButtonState::Default));
    }

    #[test]
    fn test_release_after_leaving_returns_to_default() {
        let (mut tree, button) = setup();
        send(&mut tree, button, EventKind::Enter);
        send(&mut tree, button, EventKind::ClickStart);
        send(&mut tree, button, EventKind::Leave);
        assert_eq!(send(&mut tree, button, EventKind::ClickEnd), ButtonState::Default);
    }
}
