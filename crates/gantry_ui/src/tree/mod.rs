//! # Widget Tree
//!
//! Every node lives in one [`Pool`] and is addressed by a generational
//! [`NodeId`]. Parent links are plain ids; a node's lifetime ends only at
//! [`UiTree::dispose`].
//!
//! ```text
//! root (viewport)
//! ├── window ───────────── parts: [CloseButton]
//! │   └── scroll_area ──── parts: [VerticalBar ── parts: [ScrollUp, ScrollDown, ScrollThumb]]
//! │       ├── label
//! │       └── button
//! └── status_label
//! ```
//!
//! Parts hang off their owner, not off the child list: they are laid out,
//! painted and hit-tested with the owner but never show up in
//! [`UiTree::children`] or [`UiTree::child_by_name`].

mod bounds;
mod delivery;
mod hit;
mod paint;

use std::collections::HashMap;
use std::fmt;

use gantry_core::{Handle, Pool};

use crate::config::UiConfig;
use crate::dispatch::InputDispatcher;
use crate::error::{UiError, UiResult};
use crate::event::{EventKind, Subscribers, SubscriptionId, UiEvent};
use crate::layout::{Margin, Padding, Rect};
use crate::services::{MonospaceMetrics, Services};
use crate::widget::{Panel, PartRole, Widget};

/// Generational identifier of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(Handle);

impl NodeId {
    /// Wraps a pool handle.
    #[must_use]
    pub const fn from_handle(handle: Handle) -> Self {
        Self(handle)
    }

    /// The underlying pool handle.
    #[must_use]
    pub const fn handle(self) -> Handle {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node state flags (bitfield).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFlags(u32);

impl NodeFlags {
    /// Node is painted and hit-tested.
    pub const VISIBLE: u32 = 1 << 0;
    /// Node receives input.
    pub const ENABLED: u32 = 1 << 1;
    /// Clip rectangle is clamped into the parent's.
    pub const CLIP: u32 = 1 << 2;
    /// Cached paint order is stale.
    pub const PAINT_DIRTY: u32 = 1 << 3;

    /// Flags of a freshly created node.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::ENABLED);

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One node of the widget tree.
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    owner: Option<(NodeId, PartRole)>,
    children: Vec<NodeId>,
    names: HashMap<String, NodeId>,
    parts: Vec<(PartRole, NodeId)>,
    paint_order: Vec<NodeId>,
    local: Rect,
    global: Rect,
    clip: Rect,
    margin: Margin,
    clip_padding: Padding,
    flags: NodeFlags,
    widget: Option<Box<dyn Widget>>,
    subscribers: Subscribers,
}

impl Node {
    fn new(name: &str, widget: Box<dyn Widget>) -> Self {
        Self {
            name: name.to_owned(),
            parent: None,
            owner: None,
            children: Vec::new(),
            names: HashMap::new(),
            parts: Vec::new(),
            paint_order: Vec::new(),
            local: Rect::ZERO,
            global: Rect::ZERO,
            clip: Rect::ZERO,
            margin: Margin::NONE,
            clip_padding: Padding::ZERO,
            flags: NodeFlags::DEFAULT,
            widget: Some(widget),
            subscribers: Subscribers::default(),
        }
    }

    /// Node name (may be empty).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Owning widget and role, if this node is a part.
    #[must_use]
    pub const fn owner(&self) -> Option<(NodeId, PartRole)> {
        self.owner
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parts in registration order.
    #[must_use]
    pub fn parts(&self) -> &[(PartRole, NodeId)] {
        &self.parts
    }

    /// Bounds relative to the parent's clip rectangle.
    #[must_use]
    pub const fn local_bounds(&self) -> Rect {
        self.local
    }

    /// Absolute bounds.
    #[must_use]
    pub const fn global_bounds(&self) -> Rect {
        self.global
    }

    /// Paint and content region.
    #[must_use]
    pub const fn clip_bounds(&self) -> Rect {
        self.clip
    }

    /// Dock edges.
    #[must_use]
    pub const fn margin(&self) -> Margin {
        self.margin
    }

    /// Clip padding as set (before the widget adjusts it).
    #[must_use]
    pub const fn clip_padding(&self) -> Padding {
        self.clip_padding
    }

    /// State flags.
    #[must_use]
    pub const fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Whether the node is painted and hit-tested.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags.has(NodeFlags::VISIBLE)
    }

    /// Whether the node receives input.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.flags.has(NodeFlags::ENABLED)
    }

    /// Whether the clip rectangle is clamped into the parent's.
    #[must_use]
    pub const fn is_clip_enabled(&self) -> bool {
        self.flags.has(NodeFlags::CLIP)
    }

    /// The attached widget.
    ///
    /// Only `None` while one of the widget's own hooks is running.
    #[must_use]
    pub fn widget(&self) -> Option<&dyn Widget> {
        self.widget.as_deref()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("widget", &self.widget.as_ref().map(|w| w.type_name()))
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .field("parts", &self.parts.len())
            .field("global", &self.global)
            .field("clip", &self.clip)
            .finish_non_exhaustive()
    }
}

/// Retained widget tree.
///
/// Owned by the update thread. Finished frames reach the render thread
/// through [`FrameExchange`](crate::frame::FrameExchange).
pub struct UiTree {
    nodes: Pool<Node>,
    root: NodeId,
    config: UiConfig,
    services: Services,
    dispatcher: InputDispatcher,
}

impl UiTree {
    /// Creates a tree with default configuration. The root node covers
    /// `viewport`.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self::with_config(viewport, UiConfig::default())
    }

    /// Creates a tree using `config`; text metrics come from its font.
    #[must_use]
    pub fn with_config(viewport: Rect, config: UiConfig) -> Self {
        let services = Services::with_fonts(MonospaceMetrics::from(config.font));
        Self::with_services(viewport, config, services)
    }

    /// Creates a tree with explicit host services.
    #[must_use]
    pub fn with_services(viewport: Rect, config: UiConfig, services: Services) -> Self {
        let mut nodes = Pool::with_capacity(256);
        let mut root_node = Node::new("root", Box::new(Panel::backdrop()));
        root_node.local = viewport;
        let root = NodeId(nodes.insert(root_node));

        let mut tree = Self {
            nodes,
            root,
            config,
            services,
            dispatcher: InputDispatcher::default(),
        };
        tree.recompute_bounds(root);
        tree
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, parts and detached nodes included.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Toolkit configuration.
    #[must_use]
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Host services.
    #[must_use]
    pub const fn services(&self) -> &Services {
        &self.services
    }

    /// Mutable host services.
    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Resizes the root to `viewport` and recomputes every bound.
    pub fn set_viewport(&mut self, viewport: Rect) {
        let root = self.root;
        if self.set_local_bounds(root, viewport).is_err() {
            tracing::warn!("viewport change ignored: root was disposed");
        }
    }

    // -------------------------------------------------------------------------
    // Creation & lookup
    // -------------------------------------------------------------------------

    /// Creates a detached node with zero bounds.
    pub fn create(&mut self, name: &str, widget: impl Widget) -> NodeId {
        self.create_boxed(name, Box::new(widget))
    }

    /// Creates a detached node from a boxed widget.
    pub fn create_boxed(&mut self, name: &str, widget: Box<dyn Widget>) -> NodeId {
        let type_name = widget.type_name();
        let id = NodeId(self.nodes.insert(Node::new(name, widget)));
        tracing::trace!(node = %id, name, widget = type_name, "node created");
        id
    }

    /// Returns true if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_ref(&self, id: NodeId) -> UiResult<&Node> {
        self.nodes.get(id.0).ok_or(UiError::StaleNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> UiResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(UiError::StaleNode(id))
    }

    /// Node name.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::name)
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Owner of a part.
    #[must_use]
    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::owner).map(|(owner, _)| owner)
    }

    /// Children of `id` in insertion order. Parts are not included.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    /// Number of children. Parts are not counted.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Child at `index` in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn child_at(&self, id: NodeId, index: usize) -> NodeId {
        let children = self.children(id);
        assert!(
            index < children.len(),
            "child index {index} out of range for node {id} with {} children",
            children.len()
        );
        children[index]
    }

    /// Finds a direct child by name.
    #[must_use]
    pub fn child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id)?.names.get(name).copied()
    }

    /// Parts of `id` in registration order.
    #[must_use]
    pub fn parts(&self, id: NodeId) -> &[(PartRole, NodeId)] {
        self.node(id).map(Node::parts).unwrap_or_default()
    }

    /// The part with `role`, if attached.
    #[must_use]
    pub fn part(&self, id: NodeId, role: PartRole) -> Option<NodeId> {
        self.parts(id)
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, part)| *part)
    }

    /// Local bounds of `id`.
    #[must_use]
    pub fn local_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(Node::local_bounds)
    }

    /// Global bounds of `id`.
    #[must_use]
    pub fn global_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(Node::global_bounds)
    }

    /// Clip bounds of `id`.
    #[must_use]
    pub fn clip_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(Node::clip_bounds)
    }

    /// Borrows the widget of `id` as a concrete type.
    #[must_use]
    pub fn widget<T: Widget>(&self, id: NodeId) -> Option<&T> {
        self.node(id)?.widget.as_deref()?.as_any().downcast_ref()
    }

    /// Mutably borrows the widget of `id` as a concrete type. Bounds are not
    /// recomputed; use [`edit_widget`](Self::edit_widget) for changes that
    /// affect layout.
    pub fn widget_mut<T: Widget>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes
            .get_mut(id.0)?
            .widget
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut()
    }

    /// Edits the widget of `id` and recomputes the node's bounds.
    pub fn edit_widget<T: Widget, R>(&mut self, id: NodeId, edit: impl FnOnce(&mut T) -> R) -> Option<R> {
        let result = edit(self.widget_mut::<T>(id)?);
        self.recompute_bounds(id);
        Some(result)
    }

    /// Walks parent and owner links upward from `start` (inclusive).
    fn is_ancestor_or_self(&self, ancestor: NodeId, start: NodeId) -> bool {
        let mut current = Some(start);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent.or(n.owner.map(|(o, _)| o)));
        }
        false
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Appends `child` to `parent`'s child list and recomputes its bounds.
    ///
    /// A child that already has a parent is moved. Re-adding a child to its
    /// current parent moves it to the top of the paint order.
    ///
    /// # Errors
    ///
    /// Fails on stale ids, self-parenting, cycles, parts, or a sibling with
    /// the same non-empty name.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> UiResult<()> {
        let result = self.attach(parent, child);
        if let Err(err) = &result {
            tracing::warn!("add_child rejected: {err}");
        }
        result
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) -> UiResult<()> {
        let parent_node = self.node_ref(parent)?;
        let child_node = self.node_ref(child)?;

        if parent == child {
            return Err(UiError::SelfParent { node: child });
        }
        if child_node.owner.is_some() {
            return Err(UiError::PartConflict(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(UiError::Cycle {
                node: child,
                ancestor: parent,
            });
        }
        let name = child_node.name.clone();
        if !name.is_empty() {
            if let Some(&existing) = parent_node.names.get(&name) {
                if existing != child {
                    return Err(UiError::DuplicateName { parent, name });
                }
            }
        }

        if let Some(old_parent) = child_node.parent {
            self.detach(old_parent, child);
        }

        let parent_node = self.node_mut(parent)?;
        parent_node.children.push(child);
        if !name.is_empty() {
            parent_node.names.insert(name, child);
        }
        parent_node.flags.set(NodeFlags::PAINT_DIRTY);
        self.node_mut(child)?.parent = Some(parent);

        tracing::debug!(%parent, %child, "child added");
        self.recompute_bounds(self.recompute_scope(child));
        Ok(())
    }

    /// Removes `child` from `parent`. The child keeps its own children and
    /// becomes a detached root.
    ///
    /// # Errors
    ///
    /// Fails on stale ids or if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> UiResult<()> {
        self.node_ref(parent)?;
        if self.node_ref(child)?.parent != Some(parent) {
            let err = UiError::NotAChild { parent, child };
            tracing::warn!("remove_child rejected: {err}");
            return Err(err);
        }
        let scope = self.recompute_scope(child);
        self.detach(parent, child);
        tracing::debug!(%parent, %child, "child removed");
        self.recompute_bounds(child);
        if scope != child {
            self.recompute_bounds(scope);
        }
        Ok(())
    }

    /// Unlinks `child` from `parent` without recomputing anything.
    fn detach(&mut self, parent: NodeId, child: NodeId) {
        let Some(child_node) = self.nodes.get_mut(child.0) else {
            return;
        };
        child_node.parent = None;
        let name = std::mem::take(&mut child_node.name);

        if let Some(parent_node) = self.nodes.get_mut(parent.0) {
            parent_node.children.retain(|&c| c != child);
            if parent_node.names.get(&name) == Some(&child) {
                parent_node.names.remove(&name);
            }
            parent_node.flags.set(NodeFlags::PAINT_DIRTY);
        }
        if let Some(child_node) = self.nodes.get_mut(child.0) {
            child_node.name = name;
        }
    }

    /// Renames a node, keeping its parent's name map in sync.
    ///
    /// # Errors
    ///
    /// Fails on a stale id or if a sibling already uses `name`.
    pub fn rename(&mut self, id: NodeId, name: &str) -> UiResult<()> {
        let node = self.node_ref(id)?;
        if node.name == name {
            return Ok(());
        }
        let old = node.name.clone();

        if let Some(parent) = node.parent {
            let parent_node = self.node_mut(parent)?;
            if !name.is_empty() {
                if parent_node.names.contains_key(name) {
                    return Err(UiError::DuplicateName {
                        parent,
                        name: name.to_owned(),
                    });
                }
                parent_node.names.insert(name.to_owned(), id);
            }
            if parent_node.names.get(&old) == Some(&id) {
                parent_node.names.remove(&old);
            }
        }
        self.node_mut(id)?.name = name.to_owned();
        tracing::debug!(node = %id, from = %old, to = name, "renamed");
        Ok(())
    }

    /// Attaches `part` to `owner` under `role`. A part already registered
    /// under the same role is disposed.
    ///
    /// # Errors
    ///
    /// Fails on stale ids, if `part` already has a parent or owner, or if
    /// `part` is `owner` or one of its ancestors.
    pub fn add_part(&mut self, owner: NodeId, role: PartRole, part: NodeId) -> UiResult<()> {
        self.node_ref(owner)?;
        let part_node = self.node_ref(part)?;
        if part == owner {
            return Err(UiError::SelfParent { node: part });
        }
        if part_node.parent.is_some() || part_node.owner.is_some() {
            return Err(UiError::PartConflict(part));
        }
        if self.is_ancestor_or_self(part, owner) {
            return Err(UiError::Cycle {
                node: part,
                ancestor: owner,
            });
        }

        if let Some(previous) = self.part(owner, role) {
            self.dispose(previous)?;
        }
        self.node_mut(owner)?.parts.push((role, part));
        self.node_mut(part)?.owner = Some((owner, role));

        tracing::debug!(%owner, %part, ?role, "part added");
        self.recompute_bounds(owner);
        Ok(())
    }

    /// Frees `id` and its parts. Its children become detached roots.
    ///
    /// # Errors
    ///
    /// Fails if `id` is already disposed.
    pub fn dispose(&mut self, id: NodeId) -> UiResult<()> {
        let node = self.node_ref(id)?;
        let parent = node.parent;
        let owner = node.owner;
        let scope = self.recompute_scope(id);

        if let Some(parent) = parent {
            self.detach(parent, id);
        }
        if let Some((owner, _)) = owner {
            if let Some(owner_node) = self.nodes.get_mut(owner.0) {
                owner_node.parts.retain(|&(_, p)| p != id);
            }
        }
        self.free(id);
        if scope != id {
            self.recompute_bounds(scope);
        }
        Ok(())
    }

    fn free(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(id.0) else {
            return;
        };
        self.dispatcher.forget(id);

        for (_, part) in node.parts {
            self.free(part);
        }
        for child in node.children {
            if let Some(child_node) = self.nodes.get_mut(child.0) {
                child_node.parent = None;
            }
            self.recompute_bounds(child);
        }
        tracing::debug!(node = %id, name = %node.name, "disposed");
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    /// Sets local bounds and recomputes the subtree.
    ///
    /// # Errors
    ///
    /// Fails on a stale id.
    pub fn set_local_bounds(&mut self, id: NodeId, bounds: Rect) -> UiResult<()> {
        self.node_mut(id)?.local = bounds;
        self.recompute_bounds(self.recompute_scope(id));
        Ok(())
    }

    /// Sets dock edges and recomputes the subtree.
    ///
    /// # Errors
    ///
    /// Fails on a stale id.
    pub fn set_margin(&mut self, id: NodeId, margin: Margin) -> UiResult<()> {
        self.node_mut(id)?.margin = margin;
        self.recompute_bounds(self.recompute_scope(id));
        Ok(())
    }

    /// Sets clip padding and recomputes the subtree.
    ///
    /// # Errors
    ///
    /// Fails on a stale id.
    pub fn set_clip_padding(&mut self, id: NodeId, padding: Padding) -> UiResult<()> {
        self.edit_clip_padding(id, |p| *p = padding).map(|_| ())
    }

    /// Applies several clip padding edits with at most one recompute.
    /// Returns whether the padding changed; an unchanged value recomputes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Fails on a stale id.
    pub fn edit_clip_padding(&mut self, id: NodeId, edit: impl FnOnce(&mut Padding)) -> UiResult<bool> {
        let node = self.node_mut(id)?;
        let before = node.clip_padding;
        edit(&mut node.clip_padding);
        let changed = node.clip_padding != before;
        if changed {
            self.recompute_bounds(id);
        }
        Ok(changed)
    }

    /// Enables or disables clamping into the parent's clip rectangle.
    ///
    /// # Errors
    ///
    /// Fails on a stale id.
    pub fn set_clip_enabled(&mut self, id: NodeId, enabled: bool) -> UiResult<()> {
        self.node_mut(id)?.flags.assign(NodeFlags::CLIP, enabled);
        self.recompute_bounds(id);
        Ok(())
    }

    /// Shows or hides a node and its subtree.
    ///
    /// # Errors
    ///
    /// Fails on a stale id.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> UiResult<()> {
        self.node_mut(id)?.flags.assign(NodeFlags::VISIBLE, visible);
        let scope = self.recompute_scope(id);
        if scope != id {
            self.recompute_bounds(scope);
        }
        Ok(())
    }

    /// The node to recompute after `id` changed size or membership: its
    /// parent when the parent's widget tracks content, otherwise `id`.
    pub(crate) fn recompute_scope(&self, id: NodeId) -> NodeId {
        self.parent(id)
            .filter(|&parent| {
                self.node(parent)
                    .and_then(|n| n.widget.as_deref())
                    .is_some_and(|w| w.tracks_content())
            })
            .unwrap_or(id)
    }

    /// Enables or disables input for a node.
    ///
    /// # Errors
    ///
    /// Fails on a stale id.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> UiResult<()> {
        let node = self.node_mut(id)?;
        node.flags.assign(NodeFlags::ENABLED, enabled);
        if let Some(widget) = node.widget.as_mut() {
            widget.set_enabled(enabled);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Subscribers
    // -------------------------------------------------------------------------

    /// Registers `handler` for events of `kind` on `id`. Handlers run after
    /// the widget's own handling, in registration order.
    ///
    /// # Errors
    ///
    /// Fails on a stale id.
    pub fn subscribe(
        &mut self,
        id: NodeId,
        kind: EventKind,
        handler: impl FnMut(&UiEvent) + Send + 'static,
    ) -> UiResult<SubscriptionId> {
        Ok(self.node_mut(id)?.subscribers.subscribe(kind, Box::new(handler)))
    }

    /// Removes a handler. Returns false if it was not registered on `id`.
    pub fn unsubscribe(&mut self, id: NodeId, subscription: SubscriptionId) -> bool {
        self.nodes
            .get_mut(id.0)
            .is_some_and(|node| node.subscribers.unsubscribe(subscription))
    }

    // -------------------------------------------------------------------------
    // Focus & hover
    // -------------------------------------------------------------------------

    /// Node under the pointer as of the last update.
    #[must_use]
    pub fn hovered(&self) -> Option<NodeId> {
        self.dispatcher.hovered()
    }

    /// Node with keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.dispatcher.focused()
    }

    /// Moves keyboard focus, sending Unfocus/Focus events.
    pub fn set_focus(&mut self, target: Option<NodeId>) {
        self.move_focus(target);
    }
}

impl fmt::Debug for UiTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiTree")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
