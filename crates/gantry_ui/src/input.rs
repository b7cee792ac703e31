//! Raw input state for one update tick.
//!
//! The host fills an [`InputState`] from its window events; the
//! [`InputDispatcher`](crate::dispatch::InputDispatcher) turns it into widget
//! events.
//!
//! ```text
//! begin_frame()          clears edges (pressed/released, wheel, text)
//! window events  ──────▶ set_mouse_pos / mouse_button_* / key_* / text
//! tree.update(&input)    reads edges and held state
//! ```

use crate::layout::Point;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; drives focus and double clicks.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

impl MouseButton {
    /// All buttons, in dispatch order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Middle];

    const fn bit(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 1 << 1,
            Self::Middle => 1 << 2,
        }
    }
}

/// Keys the toolkit reacts to. Printable input arrives separately as text.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Control
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Space,
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    // Letters (shortcuts such as Ctrl+C)
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    // Digits
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    // Function row
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

impl Key {
    /// Returns true for keys that auto-repeat while held.
    #[must_use]
    pub const fn repeats(self) -> bool {
        !matches!(self, Self::Escape | Self::Enter | Self::Tab)
    }
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub ctrl: bool,
    /// Alt / Option.
    pub alt: bool,
    /// Super / Command.
    pub super_key: bool,
}

/// Set of mouse buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ButtonSet(u8);

impl ButtonSet {
    const fn has(self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }
}

/// Pointer, wheel, keyboard and text input for the current tick.
///
/// Edge state (`pressed`, `released`, wheel, text) lives for one tick and is
/// cleared by [`begin_frame`](Self::begin_frame); held state persists.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Pointer position this tick.
    pub mouse: Point,
    /// Pointer position last tick.
    pub prev_mouse: Point,
    /// Wheel delta this tick (positive scrolls content up).
    pub scroll_delta: i32,
    /// Modifier keys.
    pub modifiers: Modifiers,
    /// Text typed this tick.
    pub text_input: String,
    pressed: ButtonSet,
    released: ButtonSet,
    held: ButtonSet,
    keys_pressed: Vec<Key>,
    keys_held: Vec<Key>,
}

impl InputState {
    /// Creates an empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a tick: remembers the pointer and clears edge state.
    pub fn begin_frame(&mut self) {
        self.prev_mouse = self.mouse;
        self.pressed = ButtonSet::default();
        self.released = ButtonSet::default();
        self.scroll_delta = 0;
        self.keys_pressed.clear();
        self.text_input.clear();
    }

    /// Moves the pointer.
    pub fn set_mouse_pos(&mut self, x: i32, y: i32) {
        self.mouse = Point::new(x, y);
    }

    /// A button went down.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        self.pressed.insert(button);
        self.held.insert(button);
    }

    /// A button went up.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        self.released.insert(button);
        self.held.remove(button);
    }

    /// Accumulates wheel input.
    pub fn scroll(&mut self, dy: i32) {
        self.scroll_delta += dy;
    }

    /// A key went down. Repeated presses of a held key are ignored; the
    /// dispatcher synthesizes auto-repeat itself.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_held.contains(&key) {
            self.keys_pressed.push(key);
            self.keys_held.push(key);
        }
    }

    /// A key went up.
    pub fn key_up(&mut self, key: Key) {
        self.keys_held.retain(|&k| k != key);
    }

    /// Appends typed text.
    pub fn text(&mut self, text: &str) {
        self.text_input.push_str(text);
    }

    /// Whether `button` went down this tick.
    #[must_use]
    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        self.pressed.has(button)
    }

    /// Whether `button` went up this tick.
    #[must_use]
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.released.has(button)
    }

    /// Whether `button` is held.
    #[must_use]
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.held.has(button)
    }

    /// Whether `key` went down this tick.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Whether `key` is held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    /// Keys that went down this tick, in press order.
    #[must_use]
    pub fn pressed_keys(&self) -> &[Key] {
        &self.keys_pressed
    }

    /// The most recently pressed key that is still held.
    #[must_use]
    pub fn last_held_key(&self) -> Option<Key> {
        self.keys_held.last().copied()
    }

    /// Pointer movement since the last tick.
    #[must_use]
    pub fn mouse_delta(&self) -> Point {
        self.mouse - self.prev_mouse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges_last_one_tick() {
        let mut input = InputState::new();

        input.mouse_button_down(MouseButton::Left);
        assert!(input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));
        assert!(!input.mouse_down(MouseButton::Right));

        input.begin_frame();
        assert!(!input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.mouse_button_up(MouseButton::Left);
        assert!(input.mouse_released(MouseButton::Left));
        assert!(!input.mouse_down(MouseButton::Left));
    }

    #[test]
    fn test_mouse_delta() {
        let mut input = InputState::new();
        input.set_mouse_pos(10, 10);
        input.begin_frame();
        input.set_mouse_pos(14, 7);
        assert_eq!(input.mouse_delta(), Point::new(4, -3));
    }

    #[test]
    fn test_keys_held_in_press_order() {
        let mut input = InputState::new();
        input.key_down(Key::A);
        input.key_down(Key::B);
        input.key_down(Key::A);

        assert_eq!(input.pressed_keys(), &[Key::A, Key::B]);
        assert_eq!(input.last_held_key(), Some(Key::B));

        input.key_up(Key::B);
        assert_eq!(input.last_held_key(), Some(Key::A));
        assert!(!input.key_held(Key::B));
    }

    #[test]
    fn test_wheel_and_text_cleared_each_tick() {
        let mut input = InputState::new();
        input.scroll(-1);
        input.scroll(-2);
        input.text("hi");
        assert_eq!(input.scroll_delta, -3);
        assert_eq!(input.text_input, "hi");

        input.begin_frame();
        assert_eq!(input.scroll_delta, 0);
        assert!(input.text_input.is_empty());
    }
}
