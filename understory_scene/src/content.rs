// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf behavior supplied by the embedder: hit-testing and keyboard interaction.
//!
//! The scene only knows the structure of the tree. What a leaf looks like, where it is,
//! and what it does with keys is decided by the [`Content`] attached to it.

use core::any::Any;

use kurbo::Point;

/// Key press state, as reported by the input device.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyState {
    /// The key went down.
    Pressed,
    /// The key went up.
    Released,
}

/// A raw keyboard key event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyEvent {
    /// Event timestamp in milliseconds.
    pub time_msec: u32,
    /// Evdev keycode.
    pub keycode: u32,
    /// Whether the key was pressed or released.
    pub state: KeyState,
}

/// What a node did with a key event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum KeyboardAction {
    /// The event was handled; nodes later in focus order do not see it.
    Consume,
    /// The event was not handled and continues to the next focused node.
    #[default]
    Ignore,
}

/// Keyboard capability of a node.
///
/// Every method has a no-op default, so an implementation only overrides what it needs.
pub trait KeyboardInteraction {
    /// The node became part of the active keyboard set.
    fn handle_keyboard_enter(&mut self) {}

    /// The node left the active keyboard set.
    fn handle_keyboard_leave(&mut self) {}

    /// A key event is offered to the node.
    fn handle_keyboard_key(&mut self, event: KeyEvent) -> KeyboardAction {
        let _ = event;
        KeyboardAction::Ignore
    }
}

/// Keyboard capability of nodes that have none.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoKeyboard;

impl KeyboardInteraction for NoKeyboard {}

/// Behavior of a leaf node.
///
/// Attach content with [`Scene::create_view`](crate::Scene::create_view) or
/// [`Scene::create_generic`](crate::Scene::create_generic).
/// Use [`Scene::content_as`](crate::Scene::content_as) to get the concrete type back.
pub trait Content: Any {
    /// Test whether `at` lies inside this leaf.
    ///
    /// On a hit, return the point converted to the leaf's local coordinates.
    fn find_node_at(&self, at: Point) -> Option<Point> {
        let _ = at;
        None
    }

    /// Keyboard capability of this leaf, if it has one.
    fn keyboard_interaction(&mut self) -> Option<&mut dyn KeyboardInteraction> {
        None
    }
}
