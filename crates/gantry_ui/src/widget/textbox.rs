//! Single-line text input.
//!
//! Positions are character indices, not byte offsets. The selection runs
//! from the anchor to the caret and is empty when they coincide.

use crate::event::{EventKind, UiEvent};
use crate::input::Key;
use crate::layout::{Point, Rect};
use crate::render::RenderBatch;
use crate::services::FontMetrics;

use super::{EventCtx, RenderCtx, Widget, WidgetResponse};

/// Horizontal gap between the border and the text.
const INSET: i32 = 4;

/// Editable single-line text with caret, selection and clipboard support.
///
/// Every edit reports the new character count as a `Changed` value.
#[derive(Debug, Clone)]
pub struct TextBox {
    text: String,
    caret: usize,
    anchor: Option<usize>,
    max_len: Option<usize>,
    blink: f32,
    caret_on: bool,
}

impl TextBox {
    /// Creates an empty text box.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            caret: 0,
            anchor: None,
            max_len: None,
            blink: 0.0,
            caret_on: true,
        }
    }

    /// Starts with `text`, caret at the end.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Limits the text to `max_len` characters.
    #[must_use]
    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text, truncating to the length limit. The caret moves to
    /// the end and the selection is cleared.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut text: String = text.into();
        if let Some(max) = self.max_len {
            if let Some((byte, _)) = text.char_indices().nth(max) {
                text.truncate(byte);
            }
        }
        self.text = text;
        self.caret = self.len();
        self.anchor = None;
    }

    /// Caret position.
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Selected character range, if non-empty.
    #[must_use]
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        (anchor != self.caret).then(|| (anchor.min(self.caret), anchor.max(self.caret)))
    }

    /// Selected text, or an empty string.
    #[must_use]
    pub fn selected_text(&self) -> &str {
        self.selection()
            .map_or("", |(start, end)| &self.text[self.byte(start)..self.byte(end)])
    }

    /// Whether the caret is drawn this instant.
    #[must_use]
    pub const fn is_caret_visible(&self) -> bool {
        self.caret_on
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    fn move_caret(&mut self, to: usize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.caret);
        } else {
            self.anchor = None;
        }
        self.caret = to.min(self.len());
    }

    fn delete_range(&mut self, start: usize, end: usize) {
        let (from, to) = (self.byte(start), self.byte(end));
        self.text.replace_range(from..to, "");
        self.caret = start;
        self.anchor = None;
    }

    fn delete_selection(&mut self) -> bool {
        match self.selection() {
            Some((start, end)) => {
                self.delete_range(start, end);
                true
            }
            None => false,
        }
    }

    /// Inserts at the caret, replacing the selection. Control characters are
    /// dropped and the insert is cut at the length limit.
    fn insert(&mut self, text: &str) -> bool {
        let replaced = self.delete_selection();
        let room = self.max_len.map_or(usize::MAX, |max| max.saturating_sub(self.len()));
        let accepted: String = text.chars().filter(|c| !c.is_control()).take(room).collect();
        if accepted.is_empty() {
            return replaced;
        }
        let at = self.byte(self.caret);
        self.text.insert_str(at, &accepted);
        self.caret += accepted.chars().count();
        true
    }

    /// Pixels the text is shifted left so the caret stays inside `width`.
    fn scroll(&self, fonts: &dyn FontMetrics, width: i32) -> i32 {
        let caret_x = fonts.text_width(&self.text[..self.byte(self.caret)]);
        (caret_x - width + 1).max(0)
    }

    fn text_area(bounds: Rect) -> Rect {
        bounds.deflate(INSET, 0)
    }

    fn index_at(&self, fonts: &dyn FontMetrics, bounds: Rect, position: Point) -> usize {
        let area = Self::text_area(bounds);
        let x = position.x - area.x + self.scroll(fonts, area.width);
        fonts.char_index_at(&self.text, x)
    }

    fn restart_blink(&mut self) {
        self.blink = 0.0;
        self.caret_on = true;
    }

    fn handle_key(&mut self, key: Key, event: &UiEvent, ctx: &mut EventCtx<'_>) -> Option<bool> {
        let shift = event.modifiers.shift;
        let ctrl = event.modifiers.ctrl;
        let edited = match key {
            Key::Left => {
                match self.selection() {
                    Some((start, _)) if !shift => self.move_caret(start, false),
                    _ => self.move_caret(self.caret.saturating_sub(1), shift),
                }
                false
            }
            Key::Right => {
                match self.selection() {
                    Some((_, end)) if !shift => self.move_caret(end, false),
                    _ => self.move_caret(self.caret + 1, shift),
                }
                false
            }
            Key::Home => {
                self.move_caret(0, shift);
                false
            }
            Key::End => {
                self.move_caret(self.len(), shift);
                false
            }
            Key::Backspace => {
                self.delete_selection() || {
                    let had = self.caret > 0;
                    if had {
                        self.delete_range(self.caret - 1, self.caret);
                    }
                    had
                }
            }
            Key::Delete => {
                self.delete_selection() || {
                    let had = self.caret < self.len();
                    if had {
                        self.delete_range(self.caret, self.caret + 1);
                    }
                    had
                }
            }
            Key::A if ctrl => {
                self.anchor = Some(0);
                self.caret = self.len();
                false
            }
            Key::C if ctrl => {
                if self.selection().is_some() {
                    ctx.services.clipboard.set_text(self.selected_text());
                }
                false
            }
            Key::X if ctrl => {
                if self.selection().is_some() {
                    ctx.services.clipboard.set_text(self.selected_text());
                }
                self.delete_selection()
            }
            Key::V if ctrl => {
                let pasted = ctx.services.clipboard.get_text().unwrap_or_default();
                self.insert(&pasted)
            }
            _ => return None,
        };
        Some(edited)
    }

    fn edited(&self, edited: bool) -> WidgetResponse {
        let count = i32::try_from(self.len()).unwrap_or(i32::MAX);
        if edited {
            WidgetResponse::changed(count)
        } else {
            WidgetResponse::HANDLED
        }
    }
}

impl Default for TextBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextBox {
    widget_any!("TextBox");

    fn focusable(&self) -> bool {
        true
    }

    fn handle_event(&mut self, event: &UiEvent, ctx: &mut EventCtx<'_>) -> WidgetResponse {
        if !ctx.enabled {
            return WidgetResponse::IGNORED;
        }
        match event.kind {
            EventKind::Focus => {
                self.restart_blink();
                WidgetResponse::HANDLED
            }
            EventKind::Unfocus => {
                self.anchor = None;
                WidgetResponse::HANDLED
            }
            EventKind::ClickStart => {
                let index = self.index_at(&*ctx.services.fonts, ctx.bounds, event.position);
                if event.modifiers.shift {
                    self.move_caret(index, true);
                } else {
                    self.caret = index;
                    self.anchor = Some(index);
                }
                self.restart_blink();
                WidgetResponse::HANDLED
            }
            EventKind::Drag => {
                let index = self.index_at(&*ctx.services.fonts, ctx.bounds, event.position);
                self.move_caret(index, true);
                WidgetResponse::HANDLED
            }
            EventKind::DoubleClick => {
                self.anchor = Some(0);
                self.caret = self.len();
                WidgetResponse::HANDLED
            }
            EventKind::KeyDown => {
                let Some(key) = event.key() else {
                    return WidgetResponse::IGNORED;
                };
                match self.handle_key(key, event, ctx) {
                    Some(edited) => {
                        self.restart_blink();
                        self.edited(edited)
                    }
                    None => WidgetResponse::IGNORED,
                }
            }
            EventKind::Text if !event.modifiers.ctrl => {
                let Some(c) = event.character() else {
                    return WidgetResponse::IGNORED;
                };
                let mut buffer = [0; 4];
                let edited = self.insert(c.encode_utf8(&mut buffer));
                self.restart_blink();
                self.edited(edited)
            }
            _ => WidgetResponse::IGNORED,
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut EventCtx<'_>) -> WidgetResponse {
        let period = ctx.config.caret_blink_secs;
        if !ctx.focused || period <= 0.0 {
            self.caret_on = true;
            return WidgetResponse::IGNORED;
        }
        // A stalled frame toggles the caret once rather than replaying
        // every missed period.
        if dt.is_finite() {
            self.blink += dt.max(0.0);
        }
        if self.blink >= period {
            self.blink %= period;
            self.caret_on = !self.caret_on;
        }
        WidgetResponse::IGNORED
    }

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        let theme = ctx.theme;
        let face = if ctx.enabled {
            theme.control
        } else {
            theme.control_disabled
        };
        batch.fill_rect(ctx.bounds, face);
        let border = if ctx.focused { theme.accent } else { theme.border };
        batch.stroke_rect(ctx.bounds, border, 1);

        let area = Self::text_area(ctx.bounds);
        let scroll = self.scroll(ctx.fonts, area.width);
        let origin = ctx.text_origin(area, -scroll);
        let line = ctx.fonts.line_height();
        let x_of = |index: usize| origin.x + ctx.fonts.text_width(&self.text[..self.byte(index)]);

        batch.push_clip(area);
        if let Some((start, end)) = self.selection() {
            let left = x_of(start);
            batch.fill_rect(Rect::new(left, origin.y, x_of(end) - left, line), theme.selection);
        }
        batch.draw_text(&self.text, origin, theme.text);
        if ctx.focused && self.caret_on {
            batch.fill_rect(Rect::new(x_of(self.caret), origin.y, 1, line), theme.text);
        }
        batch.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::event::InputValue;
    use crate::input::Modifiers;
    use crate::tree::{NodeId, UiTree};

    fn setup(text: &str) -> (UiTree, NodeId) {
        let mut tree = UiTree::new(Rect::new(0, 0, 200, 100));
        let field = tree.create("name", TextBox::new().with_text(text));
        tree.set_local_bounds(field, Rect::new(0, 0, 100, 20)).unwrap();
        tree.add_child(tree.root(), field).unwrap();
        tree.set_focus(Some(field));
        (tree, field)
    }

    fn key(tree: &mut UiTree, field: NodeId, key: Key, modifiers: Modifiers) {
        let event = UiEvent::new(EventKind::KeyDown, field)
            .with_input(InputValue::Key(key))
            .with_modifiers(modifiers);
        tree.dispatch_event(event);
    }

    fn typed(tree: &mut UiTree, field: NodeId, text: &str) {
        for c in text.chars() {
            tree.dispatch_event(UiEvent::new(EventKind::Text, field).with_input(InputValue::Char(c)));
        }
    }

    fn state(tree: &UiTree, field: NodeId) -> (String, usize) {
        let tb = tree.widget::<TextBox>(field).unwrap();
        (tb.text().to_owned(), tb.caret())
    }

    const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        super_key: false,
    };

    const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        super_key: false,
    };

    #[test]
    fn test_typing_and_backspace() {
        let (mut tree, field) = setup("");
        typed(&mut tree, field, "héllo");
        assert_eq!(state(&tree, field), ("héllo".to_owned(), 5));

        key(&mut tree, field, Key::Left, Modifiers::default());
        key(&mut tree, field, Key::Backspace, Modifiers::default());
        assert_eq!(state(&tree, field), ("hélo".to_owned(), 3));

        key(&mut tree, field, Key::Home, Modifiers::default());
        key(&mut tree, field, Key::Delete, Modifiers::default());
        assert_eq!(state(&tree, field), ("élo".to_owned(), 0));
    }

    #[test]
    fn test_shift_selection_replaced_by_typing() {
        let (mut tree, field) = setup("hello world");
        key(&mut tree, field, Key::Home, Modifiers::default());
        for _ in 0..5 {
            key(&mut tree, field, Key::Right, SHIFT);
        }
        assert_eq!(tree.widget::<TextBox>(field).map(TextBox::selected_text), Some("hello"));

        typed(&mut tree, field, "bye");
        assert_eq!(state(&tree, field), ("bye world".to_owned(), 3));
    }

    #[test]
    fn test_clipboard_cut_and_paste() {
        let (mut tree, field) = setup("copy me");
        key(&mut tree, field, Key::A, CTRL);
        key(&mut tree, field, Key::X, CTRL);
        assert_eq!(state(&tree, field), (String::new(), 0));
        assert_eq!(tree.services().clipboard.get_text().as_deref(), Some("copy me"));

        key(&mut tree, field, Key::V, CTRL);
        key(&mut tree, field, Key::V, CTRL);
        assert_eq!(state(&tree, field).0, "copy mecopy me");
    }

    #[test]
    fn test_max_len_truncates_input() {
        let mut tree = UiTree::new(Rect::new(0, 0, 200, 100));
        let field = tree.create("pin", TextBox::new().with_max_len(4));
        tree.add_child(tree.root(), field).unwrap();
        typed(&mut tree, field, "123456");
        assert_eq!(state(&tree, field).0, "1234");
    }

    #[test]
    fn test_changed_reports_char_count() {
        let (mut tree, field) = setup("");
        let counts = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&counts);
        tree.subscribe(field, EventKind::Changed, move |e| {
            if let InputValue::Value(v) = e.input {
                sink.lock().push(v);
            }
        })
        .unwrap();

        typed(&mut tree, field, "ab");
        key(&mut tree, field, Key::Left, Modifiers::default());
        key(&mut tree, field, Key::Backspace, Modifiers::default());
        assert_eq!(*counts.lock(), vec![1, 2, 1]);
    }

    #[test]
    fn test_click_places_caret_and_drag_selects() {
        let (mut tree, field) = setup("hello");
        // Inset 4px, 8px per character: x = 20 is the boundary after "he".
        let click = UiEvent::new(EventKind::ClickStart, field).at(Point::new(20, 10));
        tree.dispatch_event(click);
        assert_eq!(state(&tree, field).1, 2);

        let drag = UiEvent::new(EventKind::Drag, field).at(Point::new(44, 10));
        tree.dispatch_event(drag);
        assert_eq!(tree.widget::<TextBox>(field).map(TextBox::selected_text), Some("llo"));
    }

    #[test]
    fn test_caret_blinks_only_while_focused() {
        let (mut tree, field) = setup("x");
        let input = crate::input::InputState::new();
        tree.update(&input, 0.5);
        assert_eq!(tree.widget::<TextBox>(field).map(TextBox::is_caret_visible), Some(false));
        tree.update(&input, 0.5);
        assert_eq!(tree.widget::<TextBox>(field).map(TextBox::is_caret_visible), Some(true));

        tree.set_focus(None);
        tree.update(&input, 0.5);
        assert_eq!(tree.widget::<TextBox>(field).map(TextBox::is_caret_visible), Some(true));
    }

    #[test]
    fn test_long_frame_toggles_caret_once() {
        let (mut tree, field) = setup("x");
        let input = crate::input::InputState::new();
        tree.update(&input, 1000.25);
        assert_eq!(tree.widget::<TextBox>(field).map(TextBox::is_caret_visible), Some(false));

        tree.update(&input, f32::INFINITY);
        assert_eq!(tree.widget::<TextBox>(field).map(TextBox::is_caret_visible), Some(false));
        tree.update(&input, 0.25);
        assert_eq!(tree.widget::<TextBox>(field).map(TextBox::is_caret_visible), Some(true));
    }
}
