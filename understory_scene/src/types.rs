// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, kinds, and hit results.

use kurbo::Point;

/// Identifier for a node in the scene.
///
/// This is a small, copyable handle that stays stable while the node lives but becomes
/// invalid when the underlying slot is freed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On [`Scene::destroy`](crate::Scene::destroy), the slot is freed; any existing `NodeId`
///   that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///   The generation saturates at `u32::MAX`; past that point a stale id for the slot
///   can match the live node again.
///
/// A `NodeId` never owns the node it names. Parent back-references are stored as
/// `NodeId`s too, so they can be checked for liveness but never keep a node alive.
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Capability flags of a node.
    ///
    /// Consumers test individual bits, so new capabilities can be added without
    /// changing the meaning of existing ones.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Node is eligible for keyboard focus and receives key events.
        const ACTIVE_KEYBOARD = 0b0000_0001;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// The closed set of node kinds.
///
/// Visitor dispatch is decided by this tag; see [`Visitor`](crate::Visitor).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NodeKind {
    /// Inner node whose children were fixed at construction.
    Inner,
    /// Inner node whose children may be replaced, subject to the structure invariant.
    ///
    /// See [`Scene::set_children_list`](crate::Scene::set_children_list).
    FloatingInner,
    /// A renderable leaf, such as a toplevel window surface.
    View,
    /// Any other leaf.
    Generic,
}

impl NodeKind {
    /// Returns true for both inner kinds.
    pub const fn is_inner(self) -> bool {
        matches!(self, Self::Inner | Self::FloatingInner)
    }
}

/// Result of [`Scene::find_node_at`](crate::Scene::find_node_at).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputNode {
    /// The node that accepted the point.
    pub node: NodeId,
    /// The point in the node's local coordinate space.
    pub local: Point,
}
