// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus tracking: the active keyboard set, enter/leave, and key routing.
//!
//! ## Usage
//!
//! 1) Mutate the scene: attach or detach nodes, change [`NodeFlags`].
//! 2) Call [`Scene::update`]. It collects every reachable node flagged
//!    [`NodeFlags::ACTIVE_KEYBOARD`] in traversal order, sends leave to nodes that
//!    dropped out of the set and enter to nodes that joined it.
//! 3) Feed key events to [`Scene::handle_keyboard_key`]. Nodes are offered the
//!    event in traversal order until one consumes it.
//!
//! Nothing is recomputed automatically; a scene that is mutated but not updated
//! keeps routing keys to the previous set.
//!
//! ## Minimal example
//!
//! ```
//! use understory_scene::{Content, KeyboardInteraction, Layer, NodeFlags, Scene};
//!
//! struct Terminal;
//! impl KeyboardInteraction for Terminal {}
//! impl Content for Terminal {
//!     fn keyboard_interaction(&mut self) -> Option<&mut dyn KeyboardInteraction> {
//!         Some(self)
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! let view = scene.create_view(NodeFlags::ACTIVE_KEYBOARD, Terminal);
//! scene.set_children_list(scene.layer(Layer::Workspace), vec![view]);
//!
//! let change = scene.update();
//! assert_eq!(change.entered, vec![view]);
//! assert!(scene.update().is_empty(), "nothing changed");
//! ```

use alloc::vec::Vec;

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::content::{KeyEvent, KeyboardAction};
use crate::scene::Scene;
use crate::types::{NodeFlags, NodeId};
use crate::visitor::{Iteration, NodeRef, Visitor};

/// Focus state owned by the root.
#[derive(Clone, Debug, Default)]
pub(crate) struct KeyboardFocus {
    /// Active keyboard nodes in traversal order, as of the last update.
    active: Vec<NodeId>,
}

impl KeyboardFocus {
    /// Drop `id` from the active set; returns whether it was there.
    pub(crate) fn forget(&mut self, id: NodeId) -> bool {
        let before = self.active.len();
        self.active.retain(|&n| n != id);
        self.active.len() != before
    }
}

/// Changes to the active keyboard set made by one [`Scene::update`].
///
/// Both lists are in the order their notifications were sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusUpdate {
    /// Nodes that got a leave notification.
    pub left: Vec<NodeId>,
    /// Nodes that got an enter notification.
    pub entered: Vec<NodeId>,
}

impl FocusUpdate {
    /// Returns true if no notification was sent.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.entered.is_empty()
    }
}

/// Collects every visited node flagged [`NodeFlags::ACTIVE_KEYBOARD`], whatever its kind.
#[derive(Default)]
struct CollectActiveNodes {
    active: Vec<NodeId>,
}

impl Visitor for CollectActiveNodes {
    fn generic_node(&mut self, node: NodeRef<'_>) -> Iteration {
        if node.flags().contains(NodeFlags::ACTIVE_KEYBOARD) {
            self.active.push(node.id());
        }
        Iteration::All
    }
}

impl Scene {
    /// Recompute the active keyboard set and notify nodes that entered or left it.
    ///
    /// Call this after any change that may affect focus: attaching or detaching
    /// nodes, or changing [`NodeFlags::ACTIVE_KEYBOARD`] on a reachable node.
    /// Leave notifications are sent before enter notifications.
    pub fn update(&mut self) -> FocusUpdate {
        let mut collector = CollectActiveNodes::default();
        self.visit(self.root(), &mut collector);
        let new_active = collector.active;

        let old_set: HashSet<NodeId> = self.focus.active.iter().copied().collect();
        let new_set: HashSet<NodeId> = new_active.iter().copied().collect();
        let left: Vec<NodeId> = self
            .focus
            .active
            .iter()
            .copied()
            .filter(|id| !new_set.contains(id))
            .collect();
        let entered: Vec<NodeId> = new_active
            .iter()
            .copied()
            .filter(|id| !old_set.contains(id))
            .collect();

        for &id in &left {
            trace!(?id, "keyboard leave");
            self.keyboard_interaction(id).handle_keyboard_leave();
        }
        for &id in &entered {
            trace!(?id, "keyboard enter");
            self.keyboard_interaction(id).handle_keyboard_enter();
        }

        self.focus.active = new_active;
        debug!(
            active = self.focus.active.len(),
            left = left.len(),
            entered = entered.len(),
            "keyboard focus updated"
        );
        FocusUpdate { left, entered }
    }

    /// Active keyboard nodes in traversal order, as of the last [`Scene::update`].
    pub fn active_keyboard_nodes(&self) -> &[NodeId] {
        &self.focus.active
    }

    /// Offer a key event to the active keyboard nodes in traversal order.
    ///
    /// Stops at the first node that returns [`KeyboardAction::Consume`] and returns it.
    /// Nodes earlier in traversal order (higher layers first) can shadow later ones.
    pub fn handle_keyboard_key(&mut self, event: KeyEvent) -> Option<NodeId> {
        for i in 0..self.focus.active.len() {
            let id = self.focus.active[i];
            if self.keyboard_interaction(id).handle_keyboard_key(event) == KeyboardAction::Consume
            {
                trace!(?id, keycode = event.keycode, "key consumed");
                return Some(id);
            }
        }
        None
    }
}
