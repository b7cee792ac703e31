//! Vertically scrolling container.

use crate::error::UiResult;
use crate::event::{EventKind, InputValue, UiEvent};
use crate::layout::{Padding, Point, Rect};
use crate::render::RenderBatch;
use crate::tree::{NodeId, UiTree};

use super::{
    ArrangeCtx, EventCtx, PartRole, PartSignal, RangeSync, RenderCtx, ScrollBar, Widget,
    WidgetResponse,
};

/// Default scroll bar width.
const BAR_WIDTH: i32 = 12;

/// A clip-enabled container whose children scroll vertically.
///
/// When the children extend below the clip rectangle a [`ScrollBar`] part
/// appears on the right and the area reserves its width through clip
/// padding. Children are shifted up by the scroll offset.
#[derive(Debug, Clone)]
pub struct ScrollArea {
    offset: i32,
    max_offset: i32,
    bar_width: i32,
    bar_visible: bool,
}

impl ScrollArea {
    /// Creates an area scrolled to the top.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            bar_width: BAR_WIDTH,
            bar_visible: false,
        }
    }

    /// Overrides the scroll bar width.
    #[must_use]
    pub const fn with_bar_width(mut self, width: i32) -> Self {
        self.bar_width = width;
        self
    }

    /// Creates a clip-enabled area node with its scroll bar part.
    ///
    /// # Errors
    ///
    /// Propagates part attachment failures.
    pub fn spawn(tree: &mut UiTree, name: &str) -> UiResult<NodeId> {
        let id = tree.create(name, Self::new());
        tree.set_clip_enabled(id, true)?;
        let bar = ScrollBar::spawn(tree, "")?;
        tree.add_part(id, PartRole::VerticalBar, bar)?;
        Ok(id)
    }

    /// Current scroll offset in pixels.
    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// Largest offset for the current content.
    #[must_use]
    pub const fn max_offset(&self) -> i32 {
        self.max_offset
    }

    /// Whether the scroll bar is shown.
    #[must_use]
    pub const fn is_bar_visible(&self) -> bool {
        self.bar_visible
    }

    /// Scrolls to `offset`; takes effect on the next bounds pass.
    pub fn scroll_to(&mut self, offset: i32) {
        self.offset = offset.clamp(0, self.max_offset);
    }
}

impl Default for ScrollArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ScrollArea {
    widget_any!("ScrollArea");

    fn adjust_clip_padding(&self, mut padding: Padding) -> Padding {
        if self.bar_visible {
            padding.right += self.bar_width;
        }
        padding
    }

    fn content_offset(&self) -> Point {
        Point::new(0, -self.offset)
    }

    fn tracks_content(&self) -> bool {
        true
    }

    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_>) {
        let bounds = ctx.bounds();
        let view = ctx.clip().height;

        self.max_offset = (ctx.content().height - view).max(0);
        self.offset = self.offset.clamp(0, self.max_offset);
        self.bar_visible = self.max_offset > 0;

        ctx.place(
            PartRole::VerticalBar,
            Rect::new(bounds.width - self.bar_width, 0, self.bar_width, bounds.height),
        );
        ctx.set_part_visible(PartRole::VerticalBar, self.bar_visible);
        ctx.set_part_range(
            PartRole::VerticalBar,
            RangeSync {
                value: self.offset,
                max: self.max_offset,
                page: view,
            },
        );
    }

    fn handle_event(&mut self, event: &UiEvent, ctx: &mut EventCtx<'_>) -> WidgetResponse {
        match (event.kind, event.input) {
            (EventKind::Scroll, InputValue::Wheel(wheel)) if self.max_offset > 0 => {
                let before = self.offset;
                self.scroll_to(self.offset - wheel * ctx.config.scroll_step);
                if self.offset == before {
                    WidgetResponse::HANDLED
                } else {
                    WidgetResponse::relayout()
                }
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
            (PartRole::VerticalBar, PartSignal::Changed(value)) if value != self.offset => {
                self.scroll_to(value);
                WidgetResponse::relayout()
            }
            _ => WidgetResponse::IGNORED,
        }
    }

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        batch.fill_rect(ctx.bounds, ctx.theme.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margin;
    use crate::widget::Label;

    fn setup() -> (UiTree, NodeId, NodeId) {
        let mut tree = UiTree::new(Rect::new(0, 0, 200, 200));
        let area = ScrollArea::spawn(&mut tree, "area").unwrap();
        tree.set_local_bounds(area, Rect::new(0, 0, 100, 50)).unwrap();
        tree.add_child(tree.root(), area).unwrap();

        let tall = tree.create("tall", Label::new("tall"));
        tree.set_local_bounds(tall, Rect::new(0, 0, 80, 120)).unwrap();
        tree.add_child(area, tall).unwrap();
        (tree, area, tall)
    }

    #[test]
    fn test_overflow_shows_bar_and_reserves_padding() {
        let (tree, area, _) = setup();
        let bar = tree.part(area, PartRole::VerticalBar).unwrap();

        assert_eq!(tree.widget::<ScrollArea>(area).map(ScrollArea::max_offset), Some(70));
        assert_eq!(tree.node(bar).map(|n| n.is_visible()), Some(true));
        assert_eq!(tree.clip_bounds(area), Some(Rect::new(0, 0, 88, 50)));
        assert_eq!(tree.global_bounds(bar), Some(Rect::new(88, 0, 12, 50)));
    }

    #[test]
    fn test_fitting_content_hides_bar() {
        let (mut tree, area, tall) = setup();
        tree.set_local_bounds(tall, Rect::new(0, 0, 80, 30)).unwrap();

        let bar = tree.part(area, PartRole::VerticalBar).unwrap();
        assert_eq!(tree.node(bar).map(|n| n.is_visible()), Some(false));
        assert_eq!(tree.clip_bounds(area), Some(Rect::new(0, 0, 100, 50)));
    }

    #[test]
    fn test_wheel_scrolls_area_not_child() {
        let (mut tree, area, tall) = setup();
        let wheel = UiEvent::new(EventKind::Scroll, tall).with_input(InputValue::Wheel(-1));
        assert!(!tree.dispatch_event(wheel));

        let wheel = UiEvent::new(EventKind::Scroll, area).with_input(InputValue::Wheel(-1));
        assert!(tree.dispatch_event(wheel));
        assert_eq!(tree.global_bounds(tall), Some(Rect::new(0, -16, 80, 120)));

        let bar = tree.part(area, PartRole::VerticalBar).unwrap();
        assert_eq!(tree.widget::<ScrollBar>(bar).map(ScrollBar::value), Some(16));
    }

    #[test]
    fn test_bar_drives_offset() {
        let (mut tree, area, tall) = setup();
        let bar = tree.part(area, PartRole::VerticalBar).unwrap();
        let down = tree.part(bar, PartRole::ScrollDown).unwrap();

        tree.dispatch_event(UiEvent::new(EventKind::ClickStart, down));
        assert_eq!(tree.widget::<ScrollArea>(area).map(ScrollArea::offset), Some(16));
        assert_eq!(tree.global_bounds(tall), Some(Rect::new(0, -16, 80, 120)));
    }

    #[test]
    fn test_docked_child_measured_where_it_lands() {
        let mut tree = UiTree::new(Rect::new(0, 0, 200, 200));
        let area = ScrollArea::spawn(&mut tree, "area").unwrap();
        tree.set_local_bounds(area, Rect::new(0, 0, 100, 50)).unwrap();
        tree.add_child(tree.root(), area).unwrap();
        let footer = tree.create("footer", Label::new("footer"));
        tree.set_local_bounds(footer, Rect::new(0, 0, 80, 20)).unwrap();
        tree.set_margin(footer, Margin::NONE.dock_bottom(0)).unwrap();
        tree.add_child(area, footer).unwrap();

        tree.set_local_bounds(area, Rect::new(0, 0, 100, 30)).unwrap();
        assert_eq!(tree.clip_bounds(area), Some(Rect::new(0, 0, 100, 30)));
        assert_eq!(tree.local_bounds(footer), Some(Rect::new(0, 10, 80, 20)));

        tree.recompute_bounds(area);
        assert_eq!(tree.clip_bounds(area), Some(Rect::new(0, 0, 100, 30)));
        assert_eq!(tree.widget::<ScrollArea>(area).map(ScrollArea::is_bar_visible), Some(false));
    }
}
