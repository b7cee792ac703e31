//! Drop-down selector and the list it opens.

use crate::error::{UiError, UiResult};
use crate::event::{EventKind, UiEvent};
use crate::layout::{Point, Rect};
use crate::render::RenderBatch;
use crate::tree::{NodeId, UiTree};

use super::{
    ArrangeCtx, Button, EventCtx, PartRole, PartSignal, RenderCtx, Widget, WidgetResponse,
};

/// Height of one list row.
const ITEM_HEIGHT: i32 = 18;

/// A vertical list of text rows; clicking a row selects it and reports its
/// index as a `Changed` value.
#[derive(Debug, Clone, Default)]
pub struct ListBox {
    items: Vec<String>,
    selected: Option<usize>,
}

impl ListBox {
    /// Creates a list.
    #[must_use]
    pub fn new<S: AsRef<str>>(items: &[S]) -> Self {
        Self {
            items: items.iter().map(|s| s.as_ref().to_owned()).collect(),
            selected: None,
        }
    }

    /// Rows.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Selected row.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects a row without raising `Changed`. Out-of-range indices clear
    /// the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.items.len());
    }

    /// Replaces the rows and clears the selection.
    pub fn set_items<S: AsRef<str>>(&mut self, items: &[S]) {
        self.items = items.iter().map(|s| s.as_ref().to_owned()).collect();
        self.selected = None;
    }

    /// Height needed to show every row.
    #[must_use]
    pub fn content_height(&self) -> i32 {
        i32::try_from(self.items.len()).map_or(i32::MAX, |n| n.saturating_mul(ITEM_HEIGHT))
    }

    fn row_at(&self, bounds: Rect, position: Point) -> Option<usize> {
        let y = position.y - bounds.y;
        if y < 0 {
            return None;
        }
        usize::try_from(y / ITEM_HEIGHT)
            .ok()
            .filter(|&row| row < self.items.len())
    }
}

impl Widget for ListBox {
    widget_any!("ListBox");

    fn handle_event(&mut self, event: &UiEvent, ctx: &mut EventCtx<'_>) -> WidgetResponse {
        match event.kind {
            EventKind::ClickStart => WidgetResponse::HANDLED,
            EventKind::ClickEnd => match self.row_at(ctx.bounds, event.position) {
                Some(row) => {
                    self.selected = Some(row);
                    WidgetResponse::changed(i32::try_from(row).unwrap_or(i32::MAX))
                }
                None => WidgetResponse::HANDLED,
            },
            _ => WidgetResponse::IGNORED,
        }
    }

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        let theme = ctx.theme;
        batch.fill_rect(ctx.bounds, theme.surface);
        let mut row = Rect::new(ctx.bounds.x, ctx.bounds.y, ctx.bounds.width, ITEM_HEIGHT);
        for (index, item) in self.items.iter().enumerate() {
            if self.selected == Some(index) {
                batch.fill_rect(row, theme.selection);
            }
            batch.draw_text(item, ctx.text_origin(row, 4), theme.text);
            row = row.offset(Point::new(0, ITEM_HEIGHT));
        }
        batch.stroke_rect(ctx.bounds, theme.border, 1);
    }
}

/// A one-line selector that opens a [`ListBox`] part below itself.
///
/// While open the node grows to cover the list so the list stays inside its
/// owner's bounds for hit testing. Picking a row closes the list and reports
/// the row index as a `Changed` value.
#[derive(Debug, Clone, Default)]
pub struct ComboBox {
    items: Vec<String>,
    selected: Option<usize>,
    open: bool,
    closed_height: i32,
}

impl ComboBox {
    /// Creates a closed combo box.
    #[must_use]
    pub fn new<S: AsRef<str>>(items: &[S]) -> Self {
        Self {
            items: items.iter().map(|s| s.as_ref().to_owned()).collect(),
            selected: None,
            open: false,
            closed_height: 0,
        }
    }

    /// Creates a combo box node with its drop button and list parts.
    ///
    /// # Errors
    ///
    /// Propagates part attachment failures.
    pub fn spawn<S: AsRef<str>>(tree: &mut UiTree, name: &str, items: &[S]) -> UiResult<NodeId> {
        let id = tree.create(name, Self::new(items));
        let button = tree.create("", Button::new("v"));
        tree.add_part(id, PartRole::DropButton, button)?;
        let list = tree.create("", ListBox::new(items));
        tree.add_part(id, PartRole::DropList, list)?;
        Ok(id)
    }

    /// Replaces the items of the combo box `id` and its list, clearing the
    /// selection.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not a live combo box.
    pub fn set_items<S: AsRef<str>>(tree: &mut UiTree, id: NodeId, items: &[S]) -> UiResult<()> {
        tree.edit_widget::<Self, _>(id, |combo| {
            combo.items = items.iter().map(|s| s.as_ref().to_owned()).collect();
            combo.selected = None;
        })
        .ok_or(UiError::StaleNode(id))?;
        if let Some(list) = tree.part(id, PartRole::DropList) {
            tree.edit_widget::<ListBox, _>(list, |l| l.set_items(items));
        }
        tree.recompute_bounds(id);
        Ok(())
    }

    /// Items.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Selected item index.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selected item text.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(String::as_str)
    }

    /// Whether the list is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    fn list_height(&self) -> i32 {
        i32::try_from(self.items.len()).map_or(i32::MAX, |n| n.saturating_mul(ITEM_HEIGHT))
    }

    fn header(&self, bounds: Rect) -> Rect {
        let height = if self.open {
            self.closed_height
        } else {
            bounds.height
        };
        Rect::new(bounds.x, bounds.y, bounds.width, height)
    }

    fn toggle(&mut self, bounds: Rect) -> WidgetResponse {
        if self.open {
            self.close(bounds)
        } else {
            self.open = true;
            self.closed_height = bounds.height;
            WidgetResponse::resized(bounds.width, bounds.height + self.list_height())
        }
    }

    fn close(&mut self, bounds: Rect) -> WidgetResponse {
        if !self.open {
            return WidgetResponse::HANDLED;
        }
        self.open = false;
        WidgetResponse::resized(bounds.width, self.closed_height)
    }
}

impl Widget for ComboBox {
    widget_any!("ComboBox");

    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_>) {
        let header = self.header(ctx.bounds());
        let side = header.height;
        ctx.place(PartRole::DropButton, Rect::new(header.width - side, 0, side, side));
        ctx.place(
            PartRole::DropList,
            Rect::new(0, header.height, header.width, self.list_height()),
        );
        ctx.set_part_visible(PartRole::DropList, self.open);
    }

    fn handle_event(&mut self, event: &UiEvent, ctx: &mut EventCtx<'_>) -> WidgetResponse {
        match event.kind {
            EventKind::ClickStart if self.header(ctx.bounds).contains(event.position) => {
                self.toggle(ctx.bounds)
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
        match (role, signal) {
            (PartRole::DropButton, PartSignal::Event(event))
                if event.kind == EventKind::ClickStart =>
            {
                self.toggle(ctx.bounds)
            }
            (PartRole::DropList, PartSignal::Changed(index)) => {
                self.selected = usize::try_from(index).ok().filter(|&i| i < self.items.len());
                self.close(ctx.bounds).with_changed(index)
            }
            _ => WidgetResponse::IGNORED,
        }
    }

    fn render(&self, ctx: &RenderCtx<'_>, batch: &mut dyn RenderBatch) {
        let theme = ctx.theme;
        let header = self.header(ctx.bounds);
        batch.fill_rect(header, theme.control);
        batch.stroke_rect(header, theme.border, 1);
        if let Some(text) = self.selected_text() {
            batch.draw_text(text, ctx.text_origin(header, 4), theme.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::event::InputValue;

    fn setup() -> (UiTree, NodeId) {
        let mut tree = UiTree::new(Rect::new(0, 0, 200, 200));
        let combo = ComboBox::spawn(&mut tree, "quality", &["Low", "Medium", "High"]).unwrap();
        tree.set_local_bounds(combo, Rect::new(0, 0, 100, 20)).unwrap();
        tree.add_child(tree.root(), combo).unwrap();
        (tree, combo)
    }

    fn is_open(tree: &UiTree, combo: NodeId) -> bool {
        tree.widget::<ComboBox>(combo).is_some_and(ComboBox::is_open)
    }

    #[test]
    fn test_drop_button_opens_list() {
        let (mut tree, combo) = setup();
        let button = tree.part(combo, PartRole::DropButton).unwrap();
        let list = tree.part(combo, PartRole::DropList).unwrap();
        assert_eq!(tree.global_bounds(button), Some(Rect::new(80, 0, 20, 20)));
        assert_eq!(tree.node(list).map(|n| n.is_visible()), Some(false));

        tree.dispatch_event(UiEvent::new(EventKind::ClickStart, button));
        assert!(is_open(&tree, combo));
        assert_eq!(tree.local_bounds(combo), Some(Rect::new(0, 0, 100, 74)));
        assert_eq!(tree.global_bounds(list), Some(Rect::new(0, 20, 100, 54)));
        assert_eq!(tree.node(list).map(|n| n.is_visible()), Some(true));
        // The list is hittable now that the owner covers it.
        assert_eq!(tree.hit_test(tree.root(), Point::new(10, 50)), Some(list));
    }

    #[test]
    fn test_picking_row_selects_and_closes() {
        let (mut tree, combo) = setup();
        let values = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&values);
        tree.subscribe(combo, EventKind::Changed, move |e| {
            if let InputValue::Value(v) = e.input {
                sink.lock().push(v);
            }
        })
        .unwrap();

        tree.dispatch_event(UiEvent::new(EventKind::ClickStart, combo).at(Point::new(10, 10)));
        assert!(is_open(&tree, combo));

        let list = tree.part(combo, PartRole::DropList).unwrap();
        tree.dispatch_event(UiEvent::new(EventKind::ClickEnd, list).at(Point::new(10, 43)));

        assert!(!is_open(&tree, combo));
        assert_eq!(*values.lock(), vec![1]);
        assert_eq!(
            tree.widget::<ComboBox>(combo).and_then(ComboBox::selected_text),
            Some("Medium")
        );
        assert_eq!(tree.local_bounds(combo), Some(Rect::new(0, 0, 100, 20)));
        assert_eq!(tree.node(list).map(|n| n.is_visible()), Some(false));
    }

    #[test]
    fn test_set_items_clears_selection() {
        let (mut tree, combo) = setup();
        ComboBox::set_items(&mut tree, combo, &["A", "B"]).unwrap();
        let list = tree.part(combo, PartRole::DropList).unwrap();
        assert_eq!(tree.widget::<ListBox>(list).map(|l| l.items().len()), Some(2));
        assert_eq!(tree.global_bounds(list).map(|r| r.height), Some(36));
    }
}
