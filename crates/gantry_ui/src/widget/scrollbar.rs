//! Vertical scroll bar.
//!
//! ```text
//! ┌──┐ ScrollUp      (width × width)
//! ├──┤
//! │▓▓│ ScrollThumb   length ∝ page / (max + page)
//! │  │ track         click pages up or down
//! ├──┤
//! └──┘ ScrollDown    (width × width)
//! ```

use crate::error::UiResult;
use crate::event::{EventKind, InputValue, UiEvent};
use crate::layout::Rect;
use crate::render::RenderBatch;
use crate::tree::{NodeId, UiTree};

use super::{
    ArrangeCtx, Button, EventCtx, PartRole, PartSignal, RangeSync, RenderCtx, Widget,
    WidgetResponse,
};

/// Shortest thumb, in pixels.
const MIN_THUMB: i32 = 8;

/// Thumb drag in progress.
#[derive(Debug, Clone, Copy)]
struct ThumbDrag {
    start_value: i32,
    travel: i32,
}

/// A value in `[0, max]` controlled by arrow buttons, a draggable thumb, the
/// track and the wheel. Every change is reported as a `Changed` value, which
/// reaches the owner when the bar is itself a part.
#[derive(Debug, Clone)]
pub struct ScrollBar {
    value: i32,
    max: i32,
    page: i32,
    step: Option<i32>,
    drag: Option<ThumbDrag>,
}

impl ScrollBar {
    /// Creates a bar with an empty range.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: 0,
            max: 0,
            page: 0,
            step: None,
            drag: None,
        }
    }

    /// Overrides the arrow and wheel step (defaults to the configured
    /// scroll step).
    #[must_use]
    pub const fn with_step(mut self, step: i32) -> Self {
        self.step = Some(step);
        self
    }

    /// Creates a bar node with its arrow and thumb parts.
    ///
    /// # Errors
    ///
    /// Propagates part attachment failures.
    pub fn spawn(tree: &mut UiTree, name: &str) -> UiResult<NodeId> {
        Self::spawn_with(tree, name, Self::new())
    }

    /// Like [`ScrollBar::spawn`] with a preconfigured bar.
    ///
    /// # Errors
    ///
    /// Propagates part attachment failures.
    pub fn spawn_with(tree: &mut UiTree, name: &str, bar: Self) -> UiResult<NodeId> {
        let id = tree.create(name, bar);
        for (role, caption) in [
            (PartRole::ScrollUp, "^"),
            (PartRole::ScrollDown, "v"),
            (PartRole::ScrollThumb, ""),
        ] {
            let part = tree.create("", Button::new(caption));
            tree.add_part(id, role, part)?;
        }
        Ok(id)
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Largest value.
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Visible extent the bar represents.
    #[must_use]
    pub const fn page(&self) -> i32 {
        self.page
    }

    /// Sets the value, clamped to `[0, max]`. Returns true if it changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(0, self.max);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    fn step(&self, ctx: &EventCtx<'_>) -> i32 {
        self.step.unwrap_or(ctx.config.scroll_step)
    }

    /// Track and thumb rectangles relative to the bar's origin.
    fn geometry(&self, bounds: Rect) -> (Rect, Rect) {
        let side = bounds.width;
        let track = Rect::new(0, side, side, (bounds.height - 2 * side).max(0));

        let total = self.max + self.page;
        let length = if total > 0 {
            track.height * self.page / total
        } else {
            track.height
        };
        let length = length.max(MIN_THUMB).min(track.height);
        let travel = track.height - length;
        let offset = if self.max > 0 && travel > 0 {
            travel * self.value / self.max
        } else {
            0
        };
        (track, Rect::new(0, track.y + offset, side, length))
    }

    fn thumb_travel(&self, bounds: Rect) -> i32 {
        let (track, thumb) = self.geometry(bounds);
        track.height - thumb.height
    }

    fn scroll_to(&mut self, value: i32) -> WidgetResponse {
        if self.set_value(value) {
            WidgetResponse::changed(self.value).with_relayout()
        } else {
            WidgetResponse::HANDLED
        }
    }
}

impl Default for ScrollBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for ScrollBar {
    widget_any!("ScrollBar");

    fn set_range(&mut self, range: RangeSync) {
        self.max = range.max.max(0);
        self.page = range.page.max(0);
        self.value = range.value.clamp(0, self.max);
    }

    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_>) {
        let bounds = ctx.bounds();
        let side = bounds.width;
        let (_, thumb) = self.geometry(bounds);

        ctx.place(PartRole::ScrollUp, Rect::new(0, 0, side, side));
        ctx.place(PartRole::ScrollDown, Rect::new(0, bounds.height - side, side, side));
        ctx.place(PartRole::ScrollThumb, thumb);
        ctx.set_part_visible(PartRole::ScrollThumb, self.max > 0);
    }

    fn handle_event(&mut self, event: &UiEvent, ctx: &mut EventCtx<'_>) -> WidgetResponse {
        match (event.kind, event.input) {
            (EventKind::ClickStart, _) => {
                let (_, thumb) = self.geometry(ctx.bounds);
                let thumb_top = ctx.bounds.y + thumb.y;
                if event.position.y < thumb_top {
                    self.scroll_to(self.value - self.page.max(1))
                } else {
                    self.scroll_to(self.value + self.page.max(1))
                }
            }
            (EventKind::Scroll, InputValue::Wheel(wheel)) if self.max > 0 => {
                let step = self.step(ctx);
                self.scroll_to(self.value - wheel * step)
            }
            _ => WidgetResponse::IGNORED,
        }
    }

    fn on_part_signal(
        &mut self,
        role: PartRole,
        signal: PartSignal,
        ctx: &mut EventCtx<'_>,
    ) -> WidgetResponse {
        let PartSignal::Event(event) = signal else {
            return WidgetResponse::IGNORED;
        };
        let step = self.step(ctx);
        match (role, event.kind) {
            (PartRole::ScrollUp, EventKind::ClickStart) => self.scroll_to(self.value - step),
            (PartRole::ScrollDown, EventKind::ClickStart) => self.scroll_to(self.value + step),
            (PartRole::ScrollThumb, EventKind::ClickStart) => {
                self.drag = Some(ThumbDrag {
                    start_value: self.value,
                    travel: 0,
                });
                WidgetResponse::HANDLED
            }
            (PartRole::ScrollThumb, EventKind::Drag) => {
                let travel = self.thumb_travel(ctx.bounds);
                let Some(drag) = self.drag.as_mut() else {
                    return WidgetResponse::IGNORED;
                };
                drag.travel += event.delta.y;
                if travel <= 0 {
                    return WidgetResponse::HANDLED;
                }
                let target = drag.start_value + drag.travel * self.max / travel;
                self.scroll_to(target)
            }
            (PartRole::ScrollThumb, EventKind::ClickEnd | EventKind::ClickEndOutside) => {
                self.drag = None;
                WidgetResponse::HANDLED
            }
            _ => WidgetResponse::IGNORED,
        }
    }

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        let (track, _) = self.geometry(ctx.bounds);
        let track = track.offset(ctx.bounds.position());
        batch.fill_rect(track, ctx.theme.background);
        batch.stroke_rect(ctx.bounds, ctx.theme.border, 1);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::layout::Point;

    fn setup() -> (UiTree, NodeId) {
        let mut tree = UiTree::new(Rect::new(0, 0, 200, 200));
        let bar = ScrollBar::spawn(&mut tree, "bar").unwrap();
        tree.set_local_bounds(bar, Rect::new(0, 0, 12, 100)).unwrap();
        tree.add_child(tree.root(), bar).unwrap();
        tree.edit_widget::<ScrollBar, _>(bar, |b| {
            b.set_range(RangeSync {
                value: 0,
                max: 100,
                page: 50,
            });
        });
        tree.recompute_bounds(bar);
        (tree, bar)
    }

    fn value(tree: &UiTree, bar: NodeId) -> i32 {
        tree.widget::<ScrollBar>(bar).map(ScrollBar::value).unwrap()
    }

    #[test]
    fn test_parts_are_placed() {
        let (tree, bar) = setup();
        let up = tree.part(bar, PartRole::ScrollUp).unwrap();
        let down = tree.part(bar, PartRole::ScrollDown).unwrap();
        let thumb = tree.part(bar, PartRole::ScrollThumb).unwrap();

        assert_eq!(tree.global_bounds(up), Some(Rect::new(0, 0, 12, 12)));
        assert_eq!(tree.global_bounds(down), Some(Rect::new(0, 88, 12, 12)));
        // Track is 76px; page 50 of 150 gives a 25px thumb.
        assert_eq!(tree.global_bounds(thumb), Some(Rect::new(0, 12, 12, 25)));
        assert_eq!(tree.child_count(bar), 0);
    }

    #[test]
    fn test_arrow_steps_and_reports_changed() {
        let (mut tree, bar) = setup();
        let values = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&values);
        tree.subscribe(bar, EventKind::Changed, move |e| {
            if let InputValue::Value(v) = e.input {
                sink.lock().push(v);
            }
        })
        .unwrap();

        let down = tree.part(bar, PartRole::ScrollDown).unwrap();
        tree.dispatch_event(UiEvent::new(EventKind::ClickStart, down));
        assert_eq!(value(&tree, bar), 16);
        assert_eq!(*values.lock(), vec![16]);

        // Thumb moved: 51px of travel * 16 / 100 = 8.
        let thumb = tree.part(bar, PartRole::ScrollThumb).unwrap();
        assert_eq!(tree.local_bounds(thumb), Some(Rect::new(0, 20, 12, 25)));

        let up = tree.part(bar, PartRole::ScrollUp).unwrap();
        tree.dispatch_event(UiEvent::new(EventKind::ClickStart, up));
        tree.dispatch_event(UiEvent::new(EventKind::ClickStart, up));
        assert_eq!(value(&tree, bar), 0);
        assert_eq!(*values.lock(), vec![16, 0]);
    }

    #[test]
    fn test_thumb_drag_maps_pixels_to_value() {
        let (mut tree, bar) = setup();
        let thumb = tree.part(bar, PartRole::ScrollThumb).unwrap();

        tree.dispatch_event(UiEvent::new(EventKind::ClickStart, thumb));
        let drag = UiEvent::new(EventKind::Drag, thumb).with_delta(Point::new(0, 17));
        tree.dispatch_event(drag);
        // 17 of 51 pixels is a third of the range.
        assert_eq!(value(&tree, bar), 33);

        tree.dispatch_event(drag);
        tree.dispatch_event(drag);
        tree.dispatch_event(drag);
        assert_eq!(value(&tree, bar), 100);
    }

    #[test]
    fn test_track_click_pages() {
        let (mut tree, bar) = setup();
        let below_thumb = UiEvent::new(EventKind::ClickStart, bar).at(Point::new(5, 80));
        tree.dispatch_event(below_thumb);
        assert_eq!(value(&tree, bar), 50);
    }

    #[test]
    fn test_wheel_scrolls() {
        let (mut tree, bar) = setup();
        tree.dispatch_event(
            UiEvent::new(EventKind::Scroll, bar).with_input(InputValue::Wheel(-2)),
        );
        assert_eq!(value(&tree, bar), 32);
    }

    #[test]
    fn test_empty_range_hides_thumb() {
        let mut tree = UiTree::new(Rect::new(0, 0, 200, 200));
        let bar = ScrollBar::spawn(&mut tree, "bar").unwrap();
        tree.set_local_bounds(bar, Rect::new(0, 0, 12, 100)).unwrap();
        tree.add_child(tree.root(), bar).unwrap();

        let thumb = tree.part(bar, PartRole::ScrollThumb).unwrap();
        assert_eq!(tree.node(thumb).map(|n| n.is_visible()), Some(false));
    }
}
