//! # Input Dispatch State
//!
//! Remembers what the pointer and keyboard were doing across update ticks
//! so raw [`InputState`](crate::input::InputState) can be turned into widget
//! events:
//!
//! ```text
//! pointer moved onto B     → Leave(A), Enter(B)
//! press over B             → ClickStart(B), focus → B (if focusable)
//! held, moving             → Drag(B)        held, still → Hold(B)
//! release over B           → ClickEnd(B)    elsewhere   → ClickEndOutside(B)
//! wheel                    → Scroll(hovered, bubbling up until handled)
//! key / text               → KeyDown / Text (focused), with auto-repeat
//! ```
//!
//! The tree drives the sequence (see `UiTree::update`); this type only
//! holds the state and the timers.

use crate::input::{Key, MouseButton};
use crate::layout::Point;
use crate::tree::NodeId;

/// Max pointer travel between the two presses of a double click.
pub const DOUBLE_CLICK_DISTANCE: i32 = 5;

/// An active press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    /// Node the press started on.
    pub origin: NodeId,
    /// Whether the pointer moved while held.
    pub dragged: bool,
}

/// Auto-repeat timer for the most recently pressed key.
#[derive(Debug, Clone, Copy, Default)]
struct KeyRepeat {
    key: Option<Key>,
    remaining: f32,
}

/// Per-tree input tracking.
#[derive(Debug, Default)]
pub struct InputDispatcher {
    hovered: Option<NodeId>,
    focused: Option<NodeId>,
    presses: [Option<Press>; 3],
    repeat: KeyRepeat,
    clock: f32,
    last_click: Option<(NodeId, f32, Point)>,
}

impl InputDispatcher {
    /// Node under the pointer.
    #[must_use]
    pub const fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Node with keyboard focus.
    #[must_use]
    pub const fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// The press in progress for `button`.
    #[must_use]
    pub const fn press(&self, button: MouseButton) -> Option<Press> {
        self.presses[Self::slot(button)]
    }

    /// Drops every reference to `id` without raising events.
    pub fn forget(&mut self, id: NodeId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        for press in &mut self.presses {
            if press.is_some_and(|p| p.origin == id) {
                *press = None;
            }
        }
        if self.last_click.is_some_and(|(node, _, _)| node == id) {
            self.last_click = None;
        }
    }

    pub(crate) fn advance_clock(&mut self, dt: f32) {
        if dt.is_finite() {
            self.clock += dt.max(0.0);
        }
    }

    pub(crate) fn set_hovered(&mut self, hovered: Option<NodeId>) -> Option<NodeId> {
        std::mem::replace(&mut self.hovered, hovered)
    }

    pub(crate) fn set_focused(&mut self, focused: Option<NodeId>) -> Option<NodeId> {
        std::mem::replace(&mut self.focused, focused)
    }

    pub(crate) fn begin_press(&mut self, button: MouseButton, origin: NodeId) {
        self.presses[Self::slot(button)] = Some(Press {
            origin,
            dragged: false,
        });
    }

    pub(crate) fn mark_dragged(&mut self, button: MouseButton) {
        if let Some(press) = &mut self.presses[Self::slot(button)] {
            press.dragged = true;
        }
    }

    pub(crate) fn end_press(&mut self, button: MouseButton) -> Option<Press> {
        self.presses[Self::slot(button)].take()
    }

    /// Records a press on `node`; returns true if it completes a double
    /// click.
    pub(crate) fn register_click(&mut self, node: NodeId, position: Point, window: f32) -> bool {
        let double = self.last_click.is_some_and(|(last, at, pos)| {
            let travel = position - pos;
            last == node
                && self.clock - at <= window
                && travel.x.abs() <= DOUBLE_CLICK_DISTANCE
                && travel.y.abs() <= DOUBLE_CLICK_DISTANCE
        });
        // A completed double click does not start another one.
        self.last_click = if double {
            None
        } else {
            Some((node, self.clock, position))
        };
        double
    }

    /// Advances the auto-repeat timer. Returns the held key and how many
    /// repeats fired during this tick, at most one: a long or non-finite
    /// frame time does not replay the repeats it skipped.
    pub(crate) fn key_repeats(
        &mut self,
        held: Option<Key>,
        just_pressed: bool,
        dt: f32,
        delay: f32,
        interval: f32,
    ) -> Option<(Key, u32)> {
        let Some(key) = held.filter(|k| k.repeats()) else {
            self.repeat = KeyRepeat::default();
            return None;
        };
        if just_pressed || self.repeat.key != Some(key) {
            self.repeat = KeyRepeat {
                key: Some(key),
                remaining: delay,
            };
            return None;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.repeat.remaining -= dt;
        if self.repeat.remaining > 0.0 {
            return None;
        }
        self.repeat.remaining = if interval.is_finite() {
            interval.max(0.001)
        } else {
            delay
        };
        Some((key, 1))
    }

    const fn slot(button: MouseButton) -> usize {
        match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::Handle;

    fn id(index: u32) -> NodeId {
        NodeId::from_handle(Handle::new(index, 0))
    }

    #[test]
    fn test_forget_clears_everything() {
        let mut dispatcher = InputDispatcher::default();
        dispatcher.set_hovered(Some(id(1)));
        dispatcher.set_focused(Some(id(1)));
        dispatcher.begin_press(MouseButton::Left, id(1));
        dispatcher.begin_press(MouseButton::Right, id(2));

        dispatcher.forget(id(1));

        assert_eq!(dispatcher.hovered(), None);
        assert_eq!(dispatcher.focused(), None);
        assert_eq!(dispatcher.press(MouseButton::Left), None);
        assert_eq!(dispatcher.press(MouseButton::Right).map(|p| p.origin), Some(id(2)));
    }

    #[test]
    fn test_double_click_window() {
        let mut dispatcher = InputDispatcher::default();
        let at = Point::new(10, 10);

        assert!(!dispatcher.register_click(id(1), at, 0.3));
        dispatcher.advance_clock(0.1);
        assert!(dispatcher.register_click(id(1), Point::new(12, 9), 0.3));

        // Third press starts a new sequence.
        dispatcher.advance_clock(0.1);
        assert!(!dispatcher.register_click(id(1), at, 0.3));

        dispatcher.advance_clock(1.0);
        assert!(!dispatcher.register_click(id(1), at, 0.3));

        dispatcher.advance_clock(0.1);
        assert!(!dispatcher.register_click(id(2), at, 0.3));
    }

    #[test]
    fn test_key_repeat_timing() {
        let mut dispatcher = InputDispatcher::default();
        let held = Some(Key::Backspace);

        assert_eq!(dispatcher.key_repeats(held, true, 0.0, 0.5, 0.25), None);
        assert_eq!(dispatcher.key_repeats(held, false, 0.25, 0.5, 0.25), None);
        assert_eq!(
            dispatcher.key_repeats(held, false, 0.375, 0.5, 0.25),
            Some((Key::Backspace, 1))
        );
        assert_eq!(
            dispatcher.key_repeats(held, false, 0.5, 0.5, 0.25),
            Some((Key::Backspace, 1))
        );

        assert_eq!(dispatcher.key_repeats(None, false, 1.0, 0.4, 0.1), None);
        assert_eq!(dispatcher.key_repeats(Some(Key::Enter), true, 1.0, 0.4, 0.1), None);
        assert_eq!(dispatcher.key_repeats(Some(Key::Enter), false, 1.0, 0.4, 0.1), None);
    }

    #[test]
    fn test_stalled_frame_fires_single_repeat() {
        let mut dispatcher = InputDispatcher::default();
        let held = Some(Key::Backspace);
        dispatcher.key_repeats(held, true, 0.0, 0.5, 0.05);

        assert_eq!(
            dispatcher.key_repeats(held, false, 10.0, 0.5, 0.05),
            Some((Key::Backspace, 1))
        );
        assert_eq!(dispatcher.key_repeats(held, false, 0.01, 0.5, 0.05), None);
        assert_eq!(
            dispatcher.key_repeats(held, false, f32::INFINITY, 0.5, 0.05),
            None
        );
        assert_eq!(
            dispatcher.key_repeats(held, false, 0.05, 0.5, 0.05),
            Some((Key::Backspace, 1))
        );
        assert_eq!(dispatcher.key_repeats(held, false, f32::NAN, 0.5, 0.05), None);
    }
}
