//! Widget events and per-node subscriber registries.
//!
//! Events are plain notifications. The dispatcher synthesizes them from raw
//! input; each node owns an ordered list of subscriber closures that run
//! synchronously, in registration order, after the widget's own handler.

use std::fmt;

use crate::input::{Key, Modifiers, MouseButton};
use crate::layout::Point;
use crate::tree::NodeId;

/// Kinds of synthesized events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer moved onto the node.
    Enter,
    /// Pointer moved off the node.
    Leave,
    /// A button was pressed over the node.
    ClickStart,
    /// A press that started on the node was released over it.
    ClickEnd,
    /// A press that started on the node was released elsewhere.
    ClickEndOutside,
    /// Second press on the same node within the double-click window.
    DoubleClick,
    /// Pointer moved while a press that started on the node is held.
    Drag,
    /// A press that started on the node is held without moving.
    Hold,
    /// The node received keyboard focus.
    Focus,
    /// The node lost keyboard focus.
    Unfocus,
    /// Wheel input over the node.
    Scroll,
    /// Key press (or auto-repeat) while the node has focus.
    KeyDown,
    /// Character input while the node has focus.
    Text,
    /// The widget's value changed (toggle, scroll position, selection).
    Changed,
}

/// The input that produced an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputValue {
    /// No device value (enter/leave/focus).
    #[default]
    None,
    /// A mouse button.
    Mouse(MouseButton),
    /// A keyboard key.
    Key(Key),
    /// A typed character.
    Char(char),
    /// Wheel delta (positive scrolls content up).
    Wheel(i32),
    /// New widget value for [`EventKind::Changed`].
    Value(i32),
}

/// A synthesized widget event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiEvent {
    /// What happened.
    pub kind: EventKind,
    /// The node the event is about.
    pub target: NodeId,
    /// Pointer position when the event was raised.
    pub position: Point,
    /// Pointer movement since the previous tick.
    pub delta: Point,
    /// Device value (button, key, character, wheel delta).
    pub input: InputValue,
    /// Modifier keys held when the event was raised.
    pub modifiers: Modifiers,
    /// Whether the press this event belongs to included a drag.
    pub dragged: bool,
}

impl UiEvent {
    /// Creates an event with no position or device value.
    #[must_use]
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            position: Point::ZERO,
            delta: Point::ZERO,
            input: InputValue::None,
            modifiers: Modifiers::default(),
            dragged: false,
        }
    }

    /// Sets the pointer position.
    #[must_use]
    pub const fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Sets the pointer delta.
    #[must_use]
    pub const fn with_delta(mut self, delta: Point) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the device value.
    #[must_use]
    pub const fn with_input(mut self, input: InputValue) -> Self {
        self.input = input;
        self
    }

    /// Sets the modifier state.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the event as part of a dragged press.
    #[must_use]
    pub const fn dragged(mut self, dragged: bool) -> Self {
        self.dragged = dragged;
        self
    }

    /// Returns the key for [`EventKind::KeyDown`] events.
    #[must_use]
    pub const fn key(&self) -> Option<Key> {
        match self.input {
            InputValue::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Returns the character for [`EventKind::Text`] events.
    #[must_use]
    pub const fn character(&self) -> Option<char> {
        match self.input {
            InputValue::Char(c) => Some(c),
            _ => None,
        }
    }
}

/// Identifies one subscription on one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Subscriber callback.
pub type EventHandler = Box<dyn FnMut(&UiEvent) + Send>;

/// Ordered list of subscriber closures owned by a node.
#[derive(Default)]
pub struct Subscribers {
    /// Registered handlers, in registration order.
    entries: Vec<(SubscriptionId, EventKind, EventHandler)>,
    /// Next subscription number.
    next_id: u64,
}

impl Subscribers {
    /// Registers a handler for one event kind.
    pub fn subscribe(&mut self, kind: EventKind, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, kind, handler));
        id
    }

    /// Removes a handler. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes every handler registered for `event.kind`, in order.
    pub fn notify(&mut self, event: &UiEvent) {
        for (_, kind, handler) in &mut self.entries {
            if *kind == event.kind {
                handler(event);
            }
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::Handle;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn node() -> NodeId {
        NodeId::from_handle(Handle::new(1, 0))
    }

    #[test]
    fn test_subscribers_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut subscribers = Subscribers::default();

        for tag in ["first", "second"] {
            let log = Arc::clone(&log);
            subscribers.subscribe(EventKind::ClickEnd, Box::new(move |_| log.lock().push(tag)));
        }
        let log_enter = Arc::clone(&log);
        subscribers.subscribe(EventKind::Enter, Box::new(move |_| log_enter.lock().push("enter")));

        subscribers.notify(&UiEvent::new(EventKind::ClickEnd, node()));
        assert_eq!(*log.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Arc::new(Mutex::new(0));
        let mut subscribers = Subscribers::default();

        let counter = Arc::clone(&hits);
        let id = subscribers.subscribe(EventKind::Scroll, Box::new(move |_| *counter.lock() += 1));

        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
        assert!(subscribers.is_empty());

        subscribers.notify(&UiEvent::new(EventKind::Scroll, node()));
        assert_eq!(*hits.lock(), 0);
    }

    #[test]
    fn test_event_accessors() {
        let event = UiEvent::new(EventKind::KeyDown, node())
            .with_input(InputValue::Key(Key::Enter))
            .at(Point::new(3, 4))
            .dragged(true);
        assert_eq!(event.key(), Some(Key::Enter));
        assert_eq!(event.character(), None);
        assert_eq!(event.position, Point::new(3, 4));
        assert!(event.dragged);
    }
}
