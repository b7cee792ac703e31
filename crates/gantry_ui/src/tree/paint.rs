//! Tree rendering.
//!
//! Per visible node: widget content, then children in cached paint order
//! (inside the node's clip when clip-enabled), then parts (inside the node's
//! global bounds when clip-enabled).

use crate::render::RenderBatch;
use crate::widget::RenderCtx;

use super::{NodeFlags, NodeId, UiTree};

impl UiTree {
    /// Renders the root and everything attached to it.
    pub fn render(&mut self, batch: &mut dyn RenderBatch) {
        let root = self.root;
        self.render_node(root, batch);
    }

    /// Renders the subtree of `id`.
    pub fn render_node(&mut self, id: NodeId, batch: &mut dyn RenderBatch) {
        self.refresh_paint_orders();
        self.draw(id, batch);
    }

    /// Cached paint order of `id` (refreshed on the next render).
    #[must_use]
    pub fn paint_order(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.paint_order.as_slice()).unwrap_or_default()
    }

    /// Returns true if the paint order of `id` will be rebuilt before the
    /// next render.
    #[must_use]
    pub fn is_paint_order_dirty(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.flags.has(NodeFlags::PAINT_DIRTY))
    }

    fn refresh_paint_orders(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            if node.flags.has(NodeFlags::PAINT_DIRTY) {
                node.paint_order.clone_from(&node.children);
                node.flags.clear(NodeFlags::PAINT_DIRTY);
            }
        }
    }

    fn draw(&self, id: NodeId, batch: &mut dyn RenderBatch) {
        let Some(node) = self.node(id) else {
            return;
        };
        if !node.is_visible() {
            return;
        }
        let clipped = node.is_clip_enabled();

        if let Some(widget) = node.widget.as_deref() {
            let ctx = RenderCtx {
                node: id,
                bounds: node.global,
                clip: node.clip,
                enabled: node.is_enabled(),
                focused: self.dispatcher.focused() == Some(id),
                theme: &self.config.theme,
                fonts: &*self.services.fonts,
            };
            widget.render(&ctx, batch);
        }

        if !node.paint_order.is_empty() {
            if clipped {
                batch.push_clip(node.clip);
            }
            for &child in &node.paint_order {
                self.draw(child, batch);
            }
            if clipped {
                batch.pop_clip();
            }
        }

        if !node.parts.is_empty() {
            if clipped {
                batch.push_clip(node.global);
            }
            for &(_, part) in &node.parts {
                self.draw(part, batch);
            }
            if clipped {
                batch.pop_clip();
            }
        }

        #[cfg(feature = "debug_overlay")]
        batch.stroke_rect(node.clip, self.config.theme.accent.with_alpha(0.5), 1);
    }
}
