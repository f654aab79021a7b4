// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: node storage, construction, checked mutation, and queries.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;

use hashbrown::HashSet;
use kurbo::Point;
use tracing::debug;

use crate::content::{Content, KeyboardInteraction, NoKeyboard};
use crate::focus::KeyboardFocus;
use crate::layer::Layer;
use crate::structure::{ChildrenError, structure_preserved};
use crate::types::{InputNode, NodeFlags, NodeId, NodeKind};
use crate::visitor::{Iteration, NodeRef};

/// The scene graph.
///
/// A `Scene` owns every node and is itself the root node: it is created with one
/// container per [`Layer`] and carries the keyboard focus state of the whole tree.
///
/// Nodes are created detached and become part of the tree once they are listed as
/// children of a reachable node, either through a fixed topology built at construction
/// ([`Scene::create_inner`], [`Scene::create_output`]) or through
/// [`Scene::set_children_list`] on a floating inner node.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    layers: [NodeId; Layer::COUNT],
    pub(crate) focus: KeyboardFocus,
    no_keyboard: NoKeyboard,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("root", &self.root)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Node {
    generation: u32,
    pub(crate) is_structure: bool,
    pub(crate) kind: NodeKind,
    pub(crate) flags: NodeFlags,
    parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) content: Option<Box<dyn Content>>,
}

impl Node {
    fn new(
        generation: u32,
        kind: NodeKind,
        is_structure: bool,
        flags: NodeFlags,
        content: Option<Box<dyn Content>>,
    ) -> Self {
        Self {
            generation,
            is_structure,
            kind,
            flags,
            parent: None,
            children: Vec::new(),
            content,
        }
    }
}

impl Scene {
    /// Create a scene with an empty container for every layer.
    ///
    /// The root lists the containers from the highest layer to the lowest, so
    /// traversal, hit testing, and key routing reach higher layers first.
    pub fn new() -> Self {
        let placeholder = NodeId::new(0, 0);
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: placeholder,
            layers: [placeholder; Layer::COUNT],
            focus: KeyboardFocus::default(),
            no_keyboard: NoKeyboard,
        };
        let root = scene.alloc(NodeKind::Inner, true, NodeFlags::empty(), None);
        let layers: [NodeId; Layer::COUNT] = core::array::from_fn(|_| scene.create_floating(true));
        let top_first = Layer::ALL.iter().rev().map(|l| layers[l.index()]).collect();
        scene.set_children_unchecked(root, top_first);
        scene.root = root;
        scene.layers = layers;
        scene
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The container node of `layer`.
    ///
    /// Only the content of a layer may change, through [`Scene::set_children_list`]
    /// on this node; the containers themselves are fixed.
    pub fn layer(&self, layer: Layer) -> NodeId {
        self.layers[layer.index()]
    }

    /// The layer whose container holds `id`, following parent links.
    ///
    /// Returns `None` for the root, for stale ids, and for nodes not attached below
    /// a layer container.
    pub fn layer_of(&self, id: NodeId) -> Option<Layer> {
        if !self.is_alive(id) {
            return None;
        }
        let mut current = id;
        loop {
            if let Some(i) = self.layers.iter().position(|&c| c == current) {
                return Some(Layer::ALL[i]);
            }
            current = self.parent(current)?;
        }
    }

    // --- construction ---

    fn alloc(
        &mut self,
        kind: NodeKind,
        is_structure: bool,
        flags: NodeFlags,
        content: Option<Box<dyn Content>>,
    ) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind, is_structure, flags, content));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes
                .push(Some(Node::new(generation, kind, is_structure, flags, content)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Create an inner node whose children are fixed from now on.
    ///
    /// `children` must be live, detached, and distinct.
    pub fn create_inner(&mut self, is_structure: bool, children: Vec<NodeId>) -> NodeId {
        debug_assert!(
            children
                .iter()
                .all(|&c| self.is_alive(c) && self.parent(c).is_none()),
            "children of a fixed inner node must be live and detached"
        );
        let id = self.alloc(NodeKind::Inner, is_structure, NodeFlags::empty(), None);
        self.set_children_unchecked(id, children);
        id
    }

    /// Create an empty floating inner node.
    pub fn create_floating(&mut self, is_structure: bool) -> NodeId {
        self.alloc(NodeKind::FloatingInner, is_structure, NodeFlags::empty(), None)
    }

    /// Create a view node. Views are never structure nodes.
    pub fn create_view(&mut self, flags: NodeFlags, content: impl Content) -> NodeId {
        self.alloc(NodeKind::View, false, flags, Some(Box::new(content)))
    }

    /// Create a generic leaf node.
    pub fn create_generic(
        &mut self,
        is_structure: bool,
        flags: NodeFlags,
        content: impl Content,
    ) -> NodeId {
        self.alloc(NodeKind::Generic, is_structure, flags, Some(Box::new(content)))
    }

    /// Destroy a detached node and its whole subtree.
    ///
    /// Returns `false` without doing anything if `id` is stale, is the root, or is
    /// still listed as a child; detach it with [`Scene::set_children_list`] first.
    ///
    /// Destroyed nodes that were in the active keyboard set get their leave
    /// notification now, since no later [`Scene::update`] can reach them.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) || id == self.root || self.parent(id).is_some() {
            debug!(?id, "refusing to destroy a stale, root, or attached node");
            return false;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.focus.forget(current) {
                self.keyboard_interaction(current).handle_keyboard_leave();
            }
            let node = self.nodes[current.idx()]
                .take()
                .expect("subtree nodes are live");
            stack.extend(node.children);
            self.free_list.push(current.idx());
        }
        true
    }

    // --- accessors ---

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Kind of a live node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node_opt(id).map(|n| n.kind)
    }

    /// Whether `id` is a structure node. Stale ids are not.
    pub fn is_structure_node(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.is_structure)
    }

    /// Capability flags of a node. Stale ids have none.
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.node_opt(id).map(|n| n.flags).unwrap_or_default()
    }

    /// Replace the capability flags of a node.
    ///
    /// Focus is not recomputed; call [`Scene::update`] when done.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
        }
    }

    /// Parent of a node, if it is attached and the parent is alive.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?
            .parent
            .filter(|&p| self.is_alive(p))
    }

    /// Children of a node in order. Empty for leaves and stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Leaf content of a node.
    pub fn content(&self, id: NodeId) -> Option<&dyn Content> {
        self.node_opt(id)?.content.as_deref()
    }

    /// Mutable leaf content of a node.
    pub fn content_mut(&mut self, id: NodeId) -> Option<&mut dyn Content> {
        self.node_opt_mut(id)?.content.as_deref_mut()
    }

    /// Leaf content downcast to `T`.
    pub fn content_as<T: Content>(&self, id: NodeId) -> Option<&T> {
        let content: &dyn Any = self.content(id)?;
        content.downcast_ref()
    }

    /// Mutable leaf content downcast to `T`.
    pub fn content_as_mut<T: Content>(&mut self, id: NodeId) -> Option<&mut T> {
        let content: &mut dyn Any = self.content_mut(id)?;
        content.downcast_mut()
    }

    /// Keyboard capability of a node.
    ///
    /// Nodes without one, including inner and stale nodes, get a no-op capability.
    pub fn keyboard_interaction(&mut self, id: NodeId) -> &mut dyn KeyboardInteraction {
        let Self {
            nodes, no_keyboard, ..
        } = self;
        let content = nodes
            .get_mut(id.idx())
            .and_then(Option::as_mut)
            .filter(|n| n.generation == id.generation())
            .and_then(|n| n.content.as_deref_mut());
        match content.and_then(|c| c.keyboard_interaction()) {
            Some(keyboard) => keyboard,
            None => no_keyboard,
        }
    }

    /// Every reachable view node, in traversal order.
    pub fn views(&self) -> Vec<NodeId> {
        let mut views = Vec::new();
        let mut collect = |node: NodeRef<'_>| {
            if node.kind() == NodeKind::View {
                views.push(node.id());
            }
            Iteration::All
        };
        self.visit(self.root, &mut collect);
        views
    }

    // --- mutation ---

    /// Replace the children of a floating inner node, preserving structure nodes.
    ///
    /// Returns `false` and leaves the scene untouched if the replacement is rejected.
    /// See [`Scene::try_set_children_list`] for the rules and the reason of a rejection.
    pub fn set_children_list(&mut self, id: NodeId, new_list: Vec<NodeId>) -> bool {
        self.try_set_children_list(id, new_list).is_ok()
    }

    /// Replace the children of a floating inner node, preserving structure nodes.
    ///
    /// The replacement is accepted when `id` is a live floating inner node, every
    /// entry of `new_list` is live, and the structure nodes of `new_list` are exactly
    /// the current structure children in the same order (see
    /// [`structure_preserved`](crate::structure_preserved)).
    /// Non-structure children may be added, removed, and reordered freely.
    ///
    /// On success every entry of `new_list` has its parent set to `id` and former
    /// children missing from `new_list` become detached.
    /// On error nothing changes.
    ///
    /// New children must be detached or already children of `id`; attaching a
    /// node to two parents is not supported.
    pub fn try_set_children_list(
        &mut self,
        id: NodeId,
        new_list: Vec<NodeId>,
    ) -> Result<(), ChildrenError> {
        if let Err(err) = self.check_children_list(id, &new_list) {
            debug!(?id, %err, "rejected children replacement");
            return Err(err);
        }
        self.set_children_unchecked(id, new_list);
        Ok(())
    }

    fn check_children_list(&self, id: NodeId, new_list: &[NodeId]) -> Result<(), ChildrenError> {
        let node = self.node_opt(id).ok_or(ChildrenError::StaleNode(id))?;
        if node.kind != NodeKind::FloatingInner {
            return Err(ChildrenError::NotFloating(id));
        }
        if let Some(&stale) = new_list.iter().find(|&&c| !self.is_alive(c)) {
            return Err(ChildrenError::StaleNode(stale));
        }
        structure_preserved(&node.children, new_list, |c| self.node(c).is_structure)?;
        Ok(())
    }

    /// Replace the children of `id` without checking the structure invariant.
    ///
    /// Reserved for fixed topologies whose shape is guaranteed by construction.
    pub(crate) fn set_children_unchecked(&mut self, id: NodeId, new_list: Vec<NodeId>) {
        let old = core::mem::take(&mut self.node_mut(id).children);
        if !old.is_empty() {
            let kept: HashSet<NodeId> = new_list.iter().copied().collect();
            for child in old.into_iter().filter(|c| !kept.contains(c)) {
                if let Some(n) = self.node_opt_mut(child) {
                    n.parent = None;
                }
            }
        }
        for &child in &new_list {
            debug_assert_ne!(child, id, "a node cannot be its own child");
            let n = self.node_mut(child);
            debug_assert!(
                n.parent.is_none_or(|p| p == id),
                "node is already attached to another parent"
            );
            n.parent = Some(id);
        }
        self.node_mut(id).children = new_list;
    }

    // --- queries ---

    /// Find the first node in the subtree of `id` that accepts `at`.
    ///
    /// Inner nodes ask their children in order and return the first match; leaves
    /// ask their [`Content`]. Returns `None` when nothing matches.
    pub fn find_node_at(&self, id: NodeId, at: Point) -> Option<InputNode> {
        let node = self.node_opt(id)?;
        if node.kind.is_inner() {
            node.children
                .iter()
                .find_map(|&child| self.find_node_at(child, at))
        } else {
            let local = node.content.as_deref()?.find_node_at(at)?;
            Some(InputNode { node: id, local })
        }
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.node_opt(id).expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }
}
