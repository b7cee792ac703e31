//! Pointer hit testing.
//!
//! Back to front: parts (painted last) first, then children from the last
//! added, then the node itself.

use crate::layout::Point;

use super::{NodeId, UiTree};

impl UiTree {
    /// Finds the topmost enabled node under `point` in the subtree of `id`.
    ///
    /// Invisible nodes are skipped together with their whole subtree.
    #[must_use]
    pub fn hit_test(&self, id: NodeId, point: Point) -> Option<NodeId> {
        let node = self.node(id)?;
        if !node.is_visible() {
            return None;
        }

        let suppressed = node
            .widget
            .as_ref()
            .is_some_and(|w| w.suppresses_child_input());
        if !suppressed {
            let hit = node
                .parts
                .iter()
                .rev()
                .map(|&(_, part)| part)
                .chain(node.children.iter().rev().copied())
                .find_map(|candidate| self.hit_test(candidate, point));
            if hit.is_some() {
                return hit;
            }
        }

        (node.is_enabled() && self.contains(id, point)).then_some(id)
    }

    /// Returns true if `point` is inside the node's global bounds and inside
    /// the clip bounds of every ancestor link: a child must lie within its
    /// parent's clip, a part within its owner's global bounds.
    #[must_use]
    pub fn contains(&self, id: NodeId, point: Point) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let mut inside = node.global.contains(point);
        let mut current = node;
        while inside {
            let next = match (current.owner, current.parent) {
                (Some((owner, _)), _) => self.node(owner).map(|o| (o, o.global)),
                (None, Some(parent)) => self.node(parent).map(|p| (p, p.clip)),
                (None, None) => None,
            };
            let Some((ancestor, bounds)) = next else {
                break;
            };
            inside = bounds.contains(point);
            current = ancestor;
        }
        tracing::trace!(node = %id, x = point.x, y = point.y, inside, "contains");
        inside
    }
}
