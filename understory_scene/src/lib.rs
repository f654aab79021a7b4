// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scene --heading-base-level=0

//! Understory Scene: the scene graph of a compositor.
//!
//! A [`Scene`] is a tree of nodes: one container per stacking [`Layer`] under the root,
//! per-output subtrees, and leaves that carry embedder-defined [`Content`].
//! It is used for hit testing, for traversal, and for routing keyboard input.
//!
//! - Nodes are stored in an arena and addressed by generational [`NodeId`]s.
//!   Parent links are lookups only; a node lives until it is detached and destroyed.
//! - Structure nodes hold fixed positions among their siblings.
//!   [`Scene::set_children_list`] lets policy code reorder everything else, and
//!   rejects any list that does not keep the structure nodes in place.
//! - [`Scene::visit`] walks a subtree in pre-order with a [`Visitor`] that can stop
//!   the walk or skip a subtree.
//! - [`Scene::update`] recomputes the set of nodes flagged
//!   [`NodeFlags::ACTIVE_KEYBOARD`], sends enter/leave notifications for the
//!   difference, and [`Scene::handle_keyboard_key`] routes keys through that set.
//!
//! ## Not a renderer
//!
//! This crate does not draw, does not own output hardware state, and does no I/O.
//! Geometry and keyboard behavior live in the embedder's [`Content`] implementations;
//! the scene only decides who is asked, and in which order.
//!
//! ## API overview
//!
//! - [`Scene`]: the arena, its root, the layer containers, and the focus state.
//! - [`NodeKind`]: inner (fixed or floating), view, or generic.
//! - [`NodeFlags`]: capability bits.
//! - [`OutputNode`]: handle to a per-output subtree built by [`Scene::create_output`].
//! - [`Visitor`], [`Iteration`], [`NodeRef`]: the traversal protocol.
//! - [`Content`], [`KeyboardInteraction`]: leaf behavior.
//! - [`structure_preserved`]: the structure invariant as a standalone check.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_scene::{Content, Layer, NodeFlags, Scene};
//! use kurbo::{Point, Rect, Vec2};
//!
//! struct Window(Rect);
//! impl Content for Window {
//!     fn find_node_at(&self, at: Point) -> Option<Point> {
//!         self.0.contains(at).then(|| at - Vec2::new(self.0.x0, self.0.y0))
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! let output = scene.create_output();
//! assert!(scene.set_children_list(scene.layer(Layer::Workspace), vec![output.node()]));
//!
//! let window = scene.create_view(
//!     NodeFlags::ACTIVE_KEYBOARD,
//!     Window(Rect::new(100.0, 100.0, 500.0, 400.0)),
//! );
//! assert!(scene.set_children_list(output.dynamic(), vec![window]));
//!
//! // Hit test from the root.
//! let hit = scene.find_node_at(scene.root(), Point::new(150.0, 120.0)).unwrap();
//! assert_eq!(hit.node, window);
//! assert_eq!(hit.local, Point::new(50.0, 20.0));
//! assert_eq!(scene.layer_of(window), Some(Layer::Workspace));
//!
//! // An output's two slots are fixed.
//! assert!(!scene.set_children_list(output.node(), vec![output.dynamic()]));
//!
//! // Recompute keyboard focus.
//! assert_eq!(scene.update().entered, vec![window]);
//! ```
//!
//! ## Diagnostics
//!
//! The crate emits [`tracing`] events: `debug` for rejected children replacements,
//! refused destroys, and focus updates; `trace` for every enter/leave and consumed key.
//! No subscriber is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod content;
mod focus;
mod layer;
mod output;
mod scene;
mod structure;
mod types;
mod visitor;

pub use content::{Content, KeyEvent, KeyState, KeyboardAction, KeyboardInteraction, NoKeyboard};
pub use focus::FocusUpdate;
pub use layer::Layer;
pub use output::OutputNode;
pub use scene::Scene;
pub use structure::{ChildrenError, StructureMismatch, structure_preserved};
pub use types::{InputNode, NodeFlags, NodeId, NodeKind};
pub use visitor::{Iteration, NodeRef, Visitor};
