// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-output subtrees.

use alloc::vec;

use crate::scene::Scene;
use crate::types::NodeId;

/// Handle to the subtree of one display output.
///
/// The output node has exactly two structure children, in this order:
/// - [`dynamic`](Self::dynamic): the output's content, further subdivided by the embedder.
/// - [`static_`](Self::static_): output-wide overlays.
///
/// The output node is a fixed inner node: its children never change after
/// [`Scene::create_output`]. It is not a structure node, so the layer above can add
/// and remove whole outputs with [`Scene::set_children_list`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OutputNode {
    node: NodeId,
    dynamic: NodeId,
    static_: NodeId,
}

impl OutputNode {
    /// The output node.
    pub fn node(self) -> NodeId {
        self.node
    }

    /// Container for the output's content.
    pub fn dynamic(self) -> NodeId {
        self.dynamic
    }

    /// Container for output-wide overlays.
    pub fn static_(self) -> NodeId {
        self.static_
    }
}

impl Scene {
    /// Create a detached output subtree.
    pub fn create_output(&mut self) -> OutputNode {
        let dynamic = self.create_floating(true);
        let static_ = self.create_floating(true);
        let node = self.create_inner(false, vec![dynamic, static_]);
        OutputNode {
            node,
            dynamic,
            static_,
        }
    }
}
