// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visitor protocol for scene traversal.
//!
//! ## Overview
//!
//! [`Scene::visit`](crate::Scene::visit) walks a subtree depth-first in pre-order and hands
//! every node to a [`Visitor`]. The callback picked for a node depends on its
//! [`NodeKind`]: inner nodes go to [`Visitor::inner_node`], views to
//! [`Visitor::view_node`], everything else to [`Visitor::generic_node`].
//! The first two fall through to `generic_node` unless overridden.
//!
//! ## Directives
//!
//! Every callback returns an [`Iteration`]:
//! - [`Iteration::All`] descends into the children, in list order.
//! - [`Iteration::SkipChildren`] leaves this node's children out. Siblings and
//!   ancestors continue as if the node had returned `All`.
//! - [`Iteration::Stop`] ends the traversal. No further callback runs, and every
//!   enclosing level returns `Stop`.
//!
//! ## Example
//!
//! ```
//! use understory_scene::{Iteration, Layer, NodeRef, Scene};
//!
//! let scene = Scene::new();
//!
//! // Closures are visitors too; count the root and its layer containers.
//! let mut count = 0;
//! let mut counter = |_node: NodeRef<'_>| {
//!     count += 1;
//!     Iteration::All
//! };
//! scene.visit(scene.root(), &mut counter);
//! assert_eq!(count, 1 + Layer::COUNT);
//! ```

use core::any::Any;
use core::fmt;

use crate::content::Content;
use crate::scene::Scene;
use crate::types::{NodeFlags, NodeId, NodeKind};

/// Traversal directive returned by visitor callbacks.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Iteration {
    /// Abort the whole traversal.
    Stop,
    /// Visit every child of this node.
    All,
    /// Do not visit the children of this node, but continue elsewhere.
    SkipChildren,
}

/// Read-only view of a node handed to [`Visitor`] callbacks.
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    pub(crate) scene: &'a Scene,
    pub(crate) id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Identifier of the node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The scene the node lives in.
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Kind of the node.
    pub fn kind(&self) -> NodeKind {
        self.scene.node(self.id).kind
    }

    /// Capability flags of the node.
    pub fn flags(&self) -> NodeFlags {
        self.scene.node(self.id).flags
    }

    /// Whether the node is a structure node.
    pub fn is_structure_node(&self) -> bool {
        self.scene.node(self.id).is_structure
    }

    /// Parent of the node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.scene.parent(self.id)
    }

    /// Children of the node, in order. Empty for leaves.
    pub fn children(&self) -> &'a [NodeId] {
        &self.scene.node(self.id).children
    }

    /// Leaf content, if any.
    pub fn content(&self) -> Option<&'a dyn Content> {
        self.scene.node(self.id).content.as_deref()
    }

    /// Leaf content downcast to `T`.
    pub fn content_as<T: Content>(&self) -> Option<&'a T> {
        let content: &dyn Any = self.content()?;
        content.downcast_ref()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

/// Traversal strategy invoked once per visited node.
pub trait Visitor {
    /// Visit an inner node, fixed or floating.
    fn inner_node(&mut self, node: NodeRef<'_>) -> Iteration {
        self.generic_node(node)
    }

    /// Visit a view node.
    fn view_node(&mut self, node: NodeRef<'_>) -> Iteration {
        self.generic_node(node)
    }

    /// Visit a node that is neither inner nor a view, and any kind whose
    /// dedicated callback is not overridden.
    fn generic_node(&mut self, node: NodeRef<'_>) -> Iteration;
}

impl<F> Visitor for F
where
    F: FnMut(NodeRef<'_>) -> Iteration,
{
    fn generic_node(&mut self, node: NodeRef<'_>) -> Iteration {
        self(node)
    }
}

impl Scene {
    /// Traverse the subtree rooted at `id` in pre-order.
    ///
    /// Returns [`Iteration::Stop`] if some callback stopped the traversal and
    /// [`Iteration::All`] otherwise; `SkipChildren` is never returned.
    /// A stale `id` visits nothing and returns `All`.
    pub fn visit<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) -> Iteration {
        if !self.is_alive(id) {
            return Iteration::All;
        }
        self.visit_node(id, visitor)
    }

    fn visit_node<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) -> Iteration {
        let node = self.node(id);
        let node_ref = NodeRef { scene: self, id };
        let proceed = match node.kind {
            NodeKind::Inner | NodeKind::FloatingInner => visitor.inner_node(node_ref),
            NodeKind::View => visitor.view_node(node_ref),
            NodeKind::Generic => visitor.generic_node(node_ref),
        };
        match proceed {
            Iteration::Stop => Iteration::Stop,
            Iteration::All => {
                for &child in &node.children {
                    if self.visit_node(child, visitor) == Iteration::Stop {
                        return Iteration::Stop;
                    }
                }
                Iteration::All
            }
            Iteration::SkipChildren => Iteration::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::content::Content;

    struct Leaf;
    impl Content for Leaf {}

    /// Records the visit order and answers with a fixed directive for one node.
    struct Recorder {
        seen: Vec<NodeId>,
        target: Option<(NodeId, Iteration)>,
    }

    impl Visitor for Recorder {
        fn generic_node(&mut self, node: NodeRef<'_>) -> Iteration {
            self.seen.push(node.id());
            match self.target {
                Some((id, it)) if id == node.id() => it,
                _ => Iteration::All,
            }
        }
    }

    /// Builds `top -> [a -> [a1, a2], b, c -> [c1]]` under a fresh floating node.
    fn sample(scene: &mut Scene) -> [NodeId; 7] {
        let top = scene.create_floating(false);
        let a = scene.create_floating(false);
        let a1 = scene.create_generic(false, NodeFlags::empty(), Leaf);
        let a2 = scene.create_view(NodeFlags::empty(), Leaf);
        let b = scene.create_view(NodeFlags::empty(), Leaf);
        let c = scene.create_floating(false);
        let c1 = scene.create_generic(false, NodeFlags::empty(), Leaf);
        assert!(scene.set_children_list(a, vec![a1, a2]));
        assert!(scene.set_children_list(c, vec![c1]));
        assert!(scene.set_children_list(top, vec![a, b, c]));
        [top, a, a1, a2, b, c, c1]
    }

    #[test]
    fn pre_order() {
        let mut scene = Scene::new();
        let ids = sample(&mut scene);
        let mut rec = Recorder {
            seen: Vec::new(),
            target: None,
        };
        assert_eq!(scene.visit(ids[0], &mut rec), Iteration::All);
        assert_eq!(rec.seen, ids.to_vec());
    }

    #[test]
    fn stop_short_circuits() {
        let mut scene = Scene::new();
        let [top, a, a1, _a2, ..] = sample(&mut scene);
        let mut rec = Recorder {
            seen: Vec::new(),
            target: Some((a1, Iteration::Stop)),
        };
        assert_eq!(scene.visit(top, &mut rec), Iteration::Stop);
        assert_eq!(rec.seen, vec![top, a, a1]);
    }

    #[test]
    fn stop_on_inner_skips_its_children() {
        let mut scene = Scene::new();
        let [top, a, ..] = sample(&mut scene);
        let mut rec = Recorder {
            seen: Vec::new(),
            target: Some((a, Iteration::Stop)),
        };
        assert_eq!(scene.visit(top, &mut rec), Iteration::Stop);
        assert_eq!(rec.seen, vec![top, a]);
    }

    #[test]
    fn skip_children_continues_with_siblings() {
        let mut scene = Scene::new();
        let [top, a, _a1, _a2, b, c, c1] = sample(&mut scene);
        let mut rec = Recorder {
            seen: Vec::new(),
            target: Some((a, Iteration::SkipChildren)),
        };
        assert_eq!(scene.visit(top, &mut rec), Iteration::All);
        assert_eq!(rec.seen, vec![top, a, b, c, c1]);
    }

    #[test]
    fn skip_children_at_the_start_node_reports_all() {
        let mut scene = Scene::new();
        let [top, ..] = sample(&mut scene);
        let mut rec = Recorder {
            seen: Vec::new(),
            target: Some((top, Iteration::SkipChildren)),
        };
        assert_eq!(scene.visit(top, &mut rec), Iteration::All);
        assert_eq!(rec.seen, vec![top]);
    }

    #[test]
    fn kinds_dispatch_to_their_callback() {
        #[derive(Default)]
        struct Kinds {
            inner: usize,
            view: usize,
            generic: usize,
        }
        impl Visitor for Kinds {
            fn inner_node(&mut self, _node: NodeRef<'_>) -> Iteration {
                self.inner += 1;
                Iteration::All
            }
            fn view_node(&mut self, _node: NodeRef<'_>) -> Iteration {
                self.view += 1;
                Iteration::All
            }
            fn generic_node(&mut self, _node: NodeRef<'_>) -> Iteration {
                self.generic += 1;
                Iteration::All
            }
        }

        let mut scene = Scene::new();
        let [top, ..] = sample(&mut scene);
        let mut kinds = Kinds::default();
        scene.visit(top, &mut kinds);
        assert_eq!((kinds.inner, kinds.view, kinds.generic), (3, 2, 2));
    }

    #[test]
    fn stale_start_visits_nothing() {
        let mut scene = Scene::new();
        let leaf = scene.create_view(NodeFlags::empty(), Leaf);
        assert!(scene.destroy(leaf));
        let mut rec = Recorder {
            seen: Vec::new(),
            target: None,
        };
        assert_eq!(scene.visit(leaf, &mut rec), Iteration::All);
        assert!(rec.seen.is_empty());
    }
}
