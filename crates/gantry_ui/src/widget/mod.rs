//! # Widgets
//!
//! A widget is the behaviour attached to one tree node. The tree owns
//! geometry, hierarchy and subscribers; the widget owns its own state and
//! reacts through hooks:
//!
//! ```text
//! recompute_bounds ──▶ adjust_clip_padding ──▶ arrange (place parts)
//! dispatch ──────────▶ handle_event ──▶ subscribers ──▶ owner.on_part_signal
//! update(dt) ────────▶ update (timers)
//! render ────────────▶ render (own content, before children and parts)
//! ```
//!
//! Hooks never touch the tree directly. They return a [`WidgetResponse`]
//! and the tree applies it.

use std::any::Any;

use crate::config::UiConfig;
use crate::event::UiEvent;
use crate::layout::{Padding, Point, Rect};
use crate::render::RenderBatch;
use crate::services::{FontMetrics, Services};
use crate::style::Theme;
use crate::tree::NodeId;

/// Implements the downcast plumbing every widget needs.
macro_rules! widget_any {
    ($name:literal) => {
        fn type_name(&self) -> &'static str {
            $name
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

mod button;
mod checkbox;
mod combo_box;
mod graph;
mod image;
mod label;
mod panel;
mod scroll_area;
mod scrollbar;
mod textbox;
mod window;

pub use button::{Button, ButtonState};
pub use checkbox::CheckBox;
pub use combo_box::{ComboBox, ListBox};
pub use graph::Graph;
pub use image::Image;
pub use label::{Align, Label};
pub use panel::Panel;
pub use scroll_area::ScrollArea;
pub use scrollbar::ScrollBar;
pub use textbox::TextBox;
pub use window::Window;

/// Identifies a compound part to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartRole {
    /// Scrollbar "up" button.
    ScrollUp,
    /// Scrollbar "down" button.
    ScrollDown,
    /// Scrollbar thumb.
    ScrollThumb,
    /// A scroll area's vertical bar.
    VerticalBar,
    /// A window's close button.
    CloseButton,
    /// A combo box's drop button.
    DropButton,
    /// A combo box's item list.
    DropList,
    /// Application-defined part.
    Custom(u16),
}

/// What a part reports to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartSignal {
    /// An event was delivered to the part.
    Event(UiEvent),
    /// The part's value changed.
    Changed(i32),
}

/// What the tree should do after a hook ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetResponse {
    /// The widget consumed the event.
    pub handled: bool,
    /// Recompute the node's bounds (re-runs `arrange`).
    pub relayout: bool,
    /// Shift the node's local bounds.
    pub moved: Option<Point>,
    /// Replace the node's local width and height.
    pub resized: Option<(i32, i32)>,
    /// Hide the node.
    pub hide: bool,
    /// The widget's value changed; raises [`EventKind::Changed`] and notifies
    /// the owner when the node is a part.
    ///
    /// [`EventKind::Changed`]: crate::event::EventKind::Changed
    pub changed: Option<i32>,
}

impl WidgetResponse {
    /// Nothing happened.
    pub const IGNORED: Self = Self {
        handled: false,
        relayout: false,
        moved: None,
        resized: None,
        hide: false,
        changed: None,
    };

    /// Consumed with no side effect.
    pub const HANDLED: Self = Self {
        handled: true,
        ..Self::IGNORED
    };

    /// Consumed; bounds need recomputing.
    #[must_use]
    pub const fn relayout() -> Self {
        Self {
            relayout: true,
            ..Self::HANDLED
        }
    }

    /// Consumed; value changed.
    #[must_use]
    pub const fn changed(value: i32) -> Self {
        Self {
            changed: Some(value),
            ..Self::HANDLED
        }
    }

    /// Consumed; move the node by `delta`.
    #[must_use]
    pub const fn moved(delta: Point) -> Self {
        Self {
            moved: Some(delta),
            ..Self::HANDLED
        }
    }

    /// Consumed; resize the node.
    #[must_use]
    pub const fn resized(width: i32, height: i32) -> Self {
        Self {
            resized: Some((width, height)),
            ..Self::HANDLED
        }
    }

    /// Adds a value change.
    #[must_use]
    pub const fn with_changed(mut self, value: i32) -> Self {
        self.changed = Some(value);
        self
    }

    /// Consumed; hide the node.
    #[must_use]
    pub const fn hide() -> Self {
        Self {
            hide: true,
            ..Self::HANDLED
        }
    }

    /// Adds a relayout request.
    #[must_use]
    pub const fn with_relayout(mut self) -> Self {
        self.relayout = true;
        self
    }

    /// Returns true if the tree has nothing to apply.
    #[must_use]
    pub const fn is_passive(&self) -> bool {
        !self.relayout
            && self.moved.is_none()
            && self.resized.is_none()
            && !self.hide
            && self.changed.is_none()
    }
}

/// Context for [`Widget::arrange`].
pub struct ArrangeCtx<'a> {
    bounds: Rect,
    clip: Rect,
    content: Rect,
    parts: &'a [(PartRole, NodeId)],
    fonts: &'a dyn FontMetrics,
    placements: Vec<Placement>,
}

/// Scroll position pushed from an owner into a ranged part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSync {
    /// Current value.
    pub value: i32,
    /// Largest value.
    pub max: i32,
    /// Visible extent.
    pub page: i32,
}

/// A deferred change to one part, applied by the tree after `arrange`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Placement {
    /// New local bounds, relative to the owner's global bounds.
    Bounds(PartRole, Rect),
    /// New visibility.
    Visible(PartRole, bool),
    /// New range for a ranged part.
    Range(PartRole, RangeSync),
}

impl<'a> ArrangeCtx<'a> {
    pub(crate) fn new(
        bounds: Rect,
        clip: Rect,
        content: Rect,
        parts: &'a [(PartRole, NodeId)],
        fonts: &'a dyn FontMetrics,
    ) -> Self {
        Self {
            bounds,
            clip,
            content,
            parts,
            fonts,
            placements: Vec::new(),
        }
    }

    /// The node's global bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The node's clip bounds.
    #[must_use]
    pub const fn clip(&self) -> Rect {
        self.clip
    }

    /// Smallest rectangle anchored at the origin that covers every visible
    /// child's local bounds.
    #[must_use]
    pub const fn content(&self) -> Rect {
        self.content
    }

    /// Text measurement.
    #[must_use]
    pub fn fonts(&self) -> &dyn FontMetrics {
        self.fonts
    }

    /// Returns true if a part with this role is attached.
    #[must_use]
    pub fn has_part(&self, role: PartRole) -> bool {
        self.parts.iter().any(|(r, _)| *r == role)
    }

    /// Places a part. `local` is relative to the node's global bounds.
    pub fn place(&mut self, role: PartRole, local: Rect) {
        self.placements.push(Placement::Bounds(role, local));
    }

    /// Shows or hides a part.
    pub fn set_part_visible(&mut self, role: PartRole, visible: bool) {
        self.placements.push(Placement::Visible(role, visible));
    }

    /// Pushes a value range into a part (see [`Widget::set_range`]).
    pub fn set_part_range(&mut self, role: PartRole, range: RangeSync) {
        self.placements.push(Placement::Range(role, range));
    }

    pub(crate) fn into_placements(self) -> Vec<Placement> {
        self.placements
    }
}

/// Context for event, part-signal and update hooks.
pub struct EventCtx<'a> {
    /// The node the widget is attached to.
    pub node: NodeId,
    /// The node's global bounds.
    pub bounds: Rect,
    /// The node's clip bounds.
    pub clip: Rect,
    /// Whether the node is enabled.
    pub enabled: bool,
    /// Whether the node has keyboard focus.
    pub focused: bool,
    /// Host services.
    pub services: &'a mut Services,
    /// Toolkit configuration.
    pub config: &'a UiConfig,
}

/// Context for [`Widget::render`].
pub struct RenderCtx<'a> {
    /// The node being drawn.
    pub node: NodeId,
    /// The node's global bounds.
    pub bounds: Rect,
    /// The node's clip bounds.
    pub clip: Rect,
    /// Whether the node is enabled.
    pub enabled: bool,
    /// Whether the node has keyboard focus.
    pub focused: bool,
    /// Colors.
    pub theme: &'a Theme,
    /// Text measurement.
    pub fonts: &'a dyn FontMetrics,
}

impl RenderCtx<'_> {
    /// Top-left position that vertically centers one line of text in
    /// `area`, offset `inset` pixels from its left edge.
    #[must_use]
    pub fn text_origin(&self, area: Rect, inset: i32) -> Point {
        let line = self.fonts.line_height();
        Point::new(area.x + inset, area.y + (area.height - line) / 2)
    }
}

/// Behaviour attached to a tree node.
pub trait Widget: Any + Send {
    /// Short type name for logging.
    fn type_name(&self) -> &'static str;

    /// Upcast for [`UiTree::widget`](crate::tree::UiTree::widget).
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Whether pressing the node gives it keyboard focus.
    fn focusable(&self) -> bool {
        false
    }

    /// Adjusts the node's clip padding before its clip rectangle is
    /// computed.
    fn adjust_clip_padding(&self, padding: Padding) -> Padding {
        padding
    }

    /// Offset added to every child's global bounds.
    fn content_offset(&self) -> Point {
        Point::ZERO
    }

    /// When true, the node is re-arranged whenever a child is added, removed,
    /// resized or hidden. Widgets that read [`ArrangeCtx::content`] need this.
    fn tracks_content(&self) -> bool {
        false
    }

    /// When true, hit testing never descends into children or parts.
    fn suppresses_child_input(&self) -> bool {
        false
    }

    /// The node's enabled flag changed.
    fn set_enabled(&mut self, _enabled: bool) {}

    /// An owner pushed a value range into this part.
    fn set_range(&mut self, _range: RangeSync) {}

    /// The node's bounds changed; place parts.
    fn arrange(&mut self, _ctx: &mut ArrangeCtx<'_>) {}

    /// An event targeted this node.
    fn handle_event(&mut self, _event: &UiEvent, _ctx: &mut EventCtx<'_>) -> WidgetResponse {
        WidgetResponse::IGNORED
    }

    /// One of this widget's parts received an event or changed value.
    fn on_part_signal(
        &mut self,
        _role: PartRole,
        _signal: PartSignal,
        _ctx: &mut EventCtx<'_>,
    ) -> WidgetResponse {
        WidgetResponse::IGNORED
    }

    /// Advances timers by `dt` seconds.
    fn update(&mut self, _dt: f32, _ctx: &mut EventCtx<'_>) -> WidgetResponse {
        WidgetResponse::IGNORED
    }

    /// Draws the widget's own content.
    fn render(&self, _ctx: &RenderCtx<'_>, _batch: &mut dyn RenderBatch) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MonospaceMetrics;
    use gantry_core::Handle;

    #[test]
    fn test_response_builders() {
        assert!(WidgetResponse::IGNORED.is_passive());
        assert!(!WidgetResponse::IGNORED.handled);
        assert!(WidgetResponse::HANDLED.is_passive());

        let moved = WidgetResponse::moved(Point::new(2, 3));
        assert!(moved.handled);
        assert_eq!(moved.moved, Some(Point::new(2, 3)));

        let changed = WidgetResponse::changed(4).with_relayout();
        assert_eq!(changed.changed, Some(4));
        assert!(changed.relayout);
        assert!(!changed.is_passive());
    }

    #[test]
    fn test_arrange_ctx_records_placements() {
        let fonts = MonospaceMetrics::default();
        let parts = [(PartRole::ScrollUp, NodeId::from_handle(Handle::new(1, 0)))];
        let bounds = Rect::new(0, 0, 10, 10);
        let mut ctx = ArrangeCtx::new(bounds, bounds, Rect::ZERO, &parts, &fonts);

        assert!(ctx.has_part(PartRole::ScrollUp));
        assert!(!ctx.has_part(PartRole::ScrollDown));

        ctx.place(PartRole::ScrollUp, Rect::new(0, 0, 10, 4));
        ctx.set_part_visible(PartRole::ScrollUp, false);
        assert_eq!(ctx.into_placements().len(), 2);
    }
}
