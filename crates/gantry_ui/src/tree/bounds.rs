//! Bounds propagation.
//!
//! ```text
//!            P (parent clip, or owner global for a part)
//!            │
//! local ─────┼──▶ margin docking ──▶ local'
//!            ▼
//! global = P.origin + content offset + local'
//!            │
//!            ▼
//! clip   = global - clip padding  ──(clip-enabled)──▶ clamp into P
//!            │
//!            ▼
//!        arrange parts ──▶ recurse parts (P = global) ──▶ recurse children (P = clip)
//! ```

use crate::layout::{Padding, Point, Rect};
use crate::widget::{ArrangeCtx, Placement};

use super::{Node, NodeFlags, NodeId, UiTree};

/// What a node inherits from above.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Parent clip rect, or owner global rect for parts.
    rect: Rect,
    /// Content offset of the parent widget.
    offset: Point,
    /// False for detached roots.
    attached: bool,
}

impl Frame {
    const DETACHED: Self = Self {
        rect: Rect::ZERO,
        offset: Point::ZERO,
        attached: false,
    };
}

impl UiTree {
    /// Recomputes local, global and clip bounds of `id` and everything below
    /// it. Calling it twice with no change in between is a no-op.
    pub fn recompute_bounds(&mut self, id: NodeId) {
        let frame = self.frame_of(id);
        self.recompute_with(id, frame);
    }

    fn frame_of(&self, id: NodeId) -> Frame {
        let Some(node) = self.node(id) else {
            return Frame::DETACHED;
        };
        if let Some((owner, _)) = node.owner {
            return self.node(owner).map_or(Frame::DETACHED, |o| Frame {
                rect: o.global,
                offset: Point::ZERO,
                attached: true,
            });
        }
        node.parent
            .and_then(|parent| self.node(parent))
            .map_or(Frame::DETACHED, |p| Frame {
                rect: p.clip,
                offset: p.widget.as_ref().map_or(Point::ZERO, |w| w.content_offset()),
                attached: true,
            })
    }

    fn recompute_with(&mut self, id: NodeId, frame: Frame) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };

        node.local = node.margin.apply(node.local, frame.rect);
        node.global = Rect::new(
            frame.rect.x + frame.offset.x + node.local.x,
            frame.rect.y + frame.offset.y + node.local.y,
            node.local.width,
            node.local.height,
        );

        let padding = Self::clip_padding_of(node);
        node.clip = Self::clip_rect(node, padding, frame);

        self.arrange(id);

        // Arranging may change what the widget reserves (a scrollbar
        // appearing). Content is then measured again against the new clip.
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        let rearranged = Self::clip_padding_of(node);
        if rearranged != padding {
            node.clip = Self::clip_rect(node, rearranged, frame);
            self.arrange(id);
            let Some(node) = self.nodes.get_mut(id.0) else {
                return;
            };
            let settled = Self::clip_padding_of(node);
            if settled != rearranged {
                node.clip = Self::clip_rect(node, settled, frame);
            }
        }

        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        let part_frame = Frame {
            rect: node.global,
            offset: Point::ZERO,
            attached: true,
        };
        let child_frame = Frame {
            rect: node.clip,
            offset: node.widget.as_ref().map_or(Point::ZERO, |w| w.content_offset()),
            attached: true,
        };

        let part_count = node.parts.len();
        for index in 0..part_count {
            let Some(&(_, part)) = self.nodes.get(id.0).and_then(|n| n.parts.get(index)) else {
                break;
            };
            self.recompute_with(part, part_frame);
        }

        let child_count = self.child_count(id);
        for index in 0..child_count {
            let Some(&child) = self.nodes.get(id.0).and_then(|n| n.children.get(index)) else {
                break;
            };
            self.recompute_with(child, child_frame);
        }
    }

    fn clip_padding_of(node: &Node) -> Padding {
        node.widget
            .as_ref()
            .map_or(node.clip_padding, |w| w.adjust_clip_padding(node.clip_padding))
    }

    fn clip_rect(node: &Node, padding: Padding, frame: Frame) -> Rect {
        let clip = padding.apply(node.global);
        if node.flags.has(NodeFlags::CLIP) && frame.attached {
            clip.clamp_within(&frame.rect)
        } else {
            clip
        }
    }

    /// Runs the widget's `arrange` hook and applies its part placements.
    fn arrange(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };

        // Children are measured where docking will put them in this pass.
        let clip = node.clip;
        let content = node
            .children
            .iter()
            .filter_map(|&child| self.nodes.get(child.0))
            .filter(|child| child.is_visible())
            .map(|child| child.margin.apply(child.local, clip))
            .fold(Rect::ZERO, |extent, local| {
                Rect::new(
                    0,
                    0,
                    extent.width.max(local.right()),
                    extent.height.max(local.bottom()),
                )
            });
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        let Some(mut widget) = node.widget.take() else {
            return;
        };

        let placements = {
            let fonts = &*self.services.fonts;
            let mut ctx = ArrangeCtx::new(node.global, node.clip, content, &node.parts, fonts);
            widget.arrange(&mut ctx);
            ctx.into_placements()
        };
        node.widget = Some(widget);

        for placement in placements {
            let (Placement::Bounds(role, _)
            | Placement::Visible(role, _)
            | Placement::Range(role, _)) = placement;
            let Some(part) = self.part(id, role) else {
                continue;
            };
            let Some(part_node) = self.nodes.get_mut(part.0) else {
                continue;
            };
            match placement {
                Placement::Bounds(_, bounds) => part_node.local = bounds,
                Placement::Visible(_, visible) => part_node.flags.assign(NodeFlags::VISIBLE, visible),
                Placement::Range(_, range) => {
                    if let Some(widget) = part_node.widget.as_mut() {
                        widget.set_range(range);
                    }
                }
            }
        }
    }
}
