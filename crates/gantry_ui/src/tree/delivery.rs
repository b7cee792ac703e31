//! Event delivery and the per-frame update.
//!
//! Delivery order for one event:
//! 1. the target widget's `handle_event`
//! 2. the target's subscribers, in registration order
//! 3. the tree applies the widget's response (move, relayout, hide, changed)
//! 4. if the target is a part, the owner's `on_part_signal`

use crate::event::{EventKind, InputValue, UiEvent};
use crate::input::{InputState, MouseButton};
use crate::widget::{EventCtx, PartSignal, Widget, WidgetResponse};

use super::{NodeFlags, NodeId, UiTree};

impl UiTree {
    /// Advances one frame: runs content callbacks, turns `input` into
    /// events, then ticks widget timers by `dt` seconds.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        let loaded = self.services.content.poll();
        if loaded > 0 {
            tracing::trace!(loaded, "content callbacks ran");
        }
        self.dispatch_input(input, dt);
        self.tick_widgets(dt);
    }

    /// Delivers `event` to `event.target`. Returns whether the widget
    /// handled it. Events for disposed nodes are dropped.
    pub fn dispatch_event(&mut self, event: UiEvent) -> bool {
        let target = event.target;
        if !self.is_alive(target) {
            return false;
        }
        tracing::trace!(node = %target, kind = ?event.kind, "deliver");

        let response = self.run_hook(target, |widget, ctx| widget.handle_event(&event, ctx));
        if let Some(node) = self.nodes.get_mut(target.0) {
            node.subscribers.notify(&event);
        }
        self.apply_response(target, response);

        if let Some((owner, role)) = self.node(target).and_then(|n| n.owner) {
            let owner_response = self.run_hook(owner, |widget, ctx| {
                widget.on_part_signal(role, PartSignal::Event(event), ctx)
            });
            self.apply_response(owner, owner_response);
        }
        response.handled
    }

    /// Runs one widget hook with the widget temporarily taken out of its
    /// node.
    fn run_hook(
        &mut self,
        id: NodeId,
        hook: impl FnOnce(&mut dyn Widget, &mut EventCtx<'_>) -> WidgetResponse,
    ) -> WidgetResponse {
        let focused = self.dispatcher.focused() == Some(id);
        let Some(node) = self.nodes.get_mut(id.0) else {
            return WidgetResponse::IGNORED;
        };
        let Some(mut widget) = node.widget.take() else {
            return WidgetResponse::IGNORED;
        };

        let mut ctx = EventCtx {
            node: id,
            bounds: node.global,
            clip: node.clip,
            enabled: node.flags.has(NodeFlags::ENABLED),
            focused,
            services: &mut self.services,
            config: &self.config,
        };
        let response = hook(widget.as_mut(), &mut ctx);

        if let Some(node) = self.nodes.get_mut(id.0) {
            node.widget = Some(widget);
        }
        response
    }

    fn apply_response(&mut self, id: NodeId, response: WidgetResponse) {
        if response.is_passive() {
            return;
        }

        let geometry = response.moved.is_some() || response.resized.is_some();
        if let Some(node) = self.nodes.get_mut(id.0) {
            if let Some(delta) = response.moved {
                node.local = node.local.offset(delta);
            }
            if let Some((width, height)) = response.resized {
                node.local.width = width.max(0);
                node.local.height = height.max(0);
            }
        }
        if geometry {
            self.recompute_bounds(self.recompute_scope(id));
        } else if response.relayout {
            self.recompute_bounds(id);
        }

        if response.hide {
            if let Some(node) = self.nodes.get_mut(id.0) {
                node.flags.clear(NodeFlags::VISIBLE);
            }
            let scope = self.recompute_scope(id);
            if scope != id {
                self.recompute_bounds(scope);
            }
        }

        if let Some(value) = response.changed {
            let event = UiEvent::new(EventKind::Changed, id).with_input(InputValue::Value(value));
            if let Some(node) = self.nodes.get_mut(id.0) {
                node.subscribers.notify(&event);
            }
            if let Some((owner, role)) = self.node(id).and_then(|n| n.owner) {
                let owner_response = self.run_hook(owner, |widget, ctx| {
                    widget.on_part_signal(role, PartSignal::Changed(value), ctx)
                });
                self.apply_response(owner, owner_response);
            }
        }
    }

    /// Moves keyboard focus, sending Unfocus then Focus.
    pub(super) fn move_focus(&mut self, target: Option<NodeId>) {
        let target = target.filter(|&id| self.is_alive(id));
        let previous = self.dispatcher.set_focused(target);
        if previous == target {
            return;
        }
        if let Some(old) = previous {
            self.dispatch_event(UiEvent::new(EventKind::Unfocus, old));
        }
        if let Some(new) = target {
            self.dispatch_event(UiEvent::new(EventKind::Focus, new));
        }
    }

    fn is_focusable(&self, id: NodeId) -> bool {
        self.node(id)
            .and_then(|n| n.widget.as_deref())
            .is_some_and(|w| w.focusable())
    }

    fn dispatch_input(&mut self, input: &InputState, dt: f32) {
        self.dispatcher.advance_clock(dt);
        let position = input.mouse;
        let delta = input.mouse_delta();
        let pointer = |kind, target| {
            UiEvent::new(kind, target)
                .at(position)
                .with_delta(delta)
                .with_modifiers(input.modifiers)
        };

        // Hover.
        let hit = self.hit_test(self.root, position);
        let previous = self.dispatcher.set_hovered(hit);
        if previous != hit {
            if let Some(old) = previous {
                self.dispatch_event(pointer(EventKind::Leave, old));
            }
            if let Some(new) = hit {
                self.dispatch_event(pointer(EventKind::Enter, new));
            }
        }

        // Buttons.
        for button in MouseButton::ALL {
            let value = InputValue::Mouse(button);
            if input.mouse_clicked(button) {
                if let Some(target) = hit {
                    self.dispatcher.begin_press(button, target);
                    let double = button == MouseButton::Left
                        && self.dispatcher.register_click(
                            target,
                            position,
                            self.config.double_click_secs,
                        );
                    self.dispatch_event(pointer(EventKind::ClickStart, target).with_input(value));
                    if double {
                        self.dispatch_event(pointer(EventKind::DoubleClick, target).with_input(value));
                    }
                }
                if button == MouseButton::Left {
                    let focus = hit.filter(|&id| self.is_focusable(id));
                    self.move_focus(focus);
                }
            } else if input.mouse_down(button) {
                if let Some(press) = self.dispatcher.press(button) {
                    if delta.is_zero() {
                        let event = pointer(EventKind::Hold, press.origin)
                            .with_input(value)
                            .dragged(press.dragged);
                        self.dispatch_event(event);
                    } else {
                        self.dispatcher.mark_dragged(button);
                        let event = pointer(EventKind::Drag, press.origin)
                            .with_input(value)
                            .dragged(true);
                        self.dispatch_event(event);
                    }
                }
            }

            if input.mouse_released(button) {
                if let Some(press) = self.dispatcher.end_press(button) {
                    let kind = if self.contains(press.origin, position) {
                        EventKind::ClickEnd
                    } else {
                        EventKind::ClickEndOutside
                    };
                    self.dispatch_event(pointer(kind, press.origin).with_input(value).dragged(press.dragged));
                }
            }
        }

        // Wheel: bubbles from the hovered node until a widget handles it.
        if input.scroll_delta != 0 {
            let mut target = self.dispatcher.hovered();
            while let Some(id) = target {
                let event = pointer(EventKind::Scroll, id).with_input(InputValue::Wheel(input.scroll_delta));
                if self.dispatch_event(event) {
                    break;
                }
                target = self.parent(id).or_else(|| self.owner(id));
            }
        }

        // Keyboard.
        let held = input.last_held_key();
        let just_pressed = held.is_some_and(|k| input.key_pressed(k));
        let repeats = self.dispatcher.key_repeats(
            held,
            just_pressed,
            dt,
            self.config.key_repeat_delay_secs,
            self.config.key_repeat_interval_secs,
        );
        let Some(focused) = self.dispatcher.focused() else {
            return;
        };
        let key_event = |key| {
            UiEvent::new(EventKind::KeyDown, focused)
                .at(position)
                .with_input(InputValue::Key(key))
                .with_modifiers(input.modifiers)
        };

        for &key in input.pressed_keys() {
            self.dispatch_event(key_event(key));
        }
        if let Some((key, count)) = repeats {
            for _ in 0..count {
                self.dispatch_event(key_event(key));
            }
        }
        for c in input.text_input.chars().filter(|c| !c.is_control()) {
            let event = UiEvent::new(EventKind::Text, focused)
                .at(position)
                .with_input(InputValue::Char(c))
                .with_modifiers(input.modifiers);
            self.dispatch_event(event);
        }
    }

    fn tick_widgets(&mut self, dt: f32) {
        let ids: Vec<NodeId> = self.nodes.iter().map(|(handle, _)| NodeId(handle)).collect();
        for id in ids {
            let response = self.run_hook(id, |widget, ctx| widget.update(dt, ctx));
            self.apply_response(id, response);
        }
    }
}
