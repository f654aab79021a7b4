// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus tracking.
//!
//! A window gains focus, a lock screen appears above it and shadows it, then the
//! lock screen goes away again. Each step prints the enter/leave notifications
//! and where a key press ends up.
//!
//! Run:
//! - `cargo run -p understory_examples --example scene_focus`

use understory_scene::{
    Content, KeyEvent, KeyState, KeyboardAction, KeyboardInteraction, Layer, NodeFlags, Scene,
};

struct Client {
    name: &'static str,
}

impl KeyboardInteraction for Client {
    fn handle_keyboard_enter(&mut self) {
        println!("    enter {}", self.name);
    }

    fn handle_keyboard_leave(&mut self) {
        println!("    leave {}", self.name);
    }

    fn handle_keyboard_key(&mut self, event: KeyEvent) -> KeyboardAction {
        println!("    {} got key {}", self.name, event.keycode);
        KeyboardAction::Consume
    }
}

impl Content for Client {
    fn keyboard_interaction(&mut self) -> Option<&mut dyn KeyboardInteraction> {
        Some(self)
    }
}

fn press(scene: &mut Scene, keycode: u32) {
    let event = KeyEvent {
        time_msec: 0,
        keycode,
        state: KeyState::Pressed,
    };
    if scene.handle_keyboard_key(event).is_none() {
        println!("    key {keycode} not consumed");
    }
}

fn main() {
    let mut scene = Scene::new();
    let workspace = scene.layer(Layer::Workspace);
    let lock_layer = scene.layer(Layer::Lock);

    let browser = scene.create_view(NodeFlags::ACTIVE_KEYBOARD, Client { name: "browser" });
    let lock = scene.create_view(NodeFlags::ACTIVE_KEYBOARD, Client { name: "lock" });

    println!("== Map browser ==");
    assert!(scene.set_children_list(workspace, vec![browser]));
    let _ = scene.update();
    press(&mut scene, 30);

    println!("== Lock screen ==");
    assert!(scene.set_children_list(lock_layer, vec![lock]));
    let _ = scene.update();
    press(&mut scene, 31);

    println!("== Unlock ==");
    assert!(scene.set_children_list(lock_layer, vec![]));
    let change = scene.update();
    println!("    {change:?}");
    press(&mut scene, 32);
    assert!(scene.destroy(lock));

    println!("== Browser stops accepting keys ==");
    scene.set_flags(browser, NodeFlags::empty());
    let _ = scene.update();
    press(&mut scene, 33);
}
