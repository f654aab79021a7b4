// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene basics.
//!
//! Builds a scene with one output, places two windows and a panel, hit-tests a few
//! points, and shows that structure nodes cannot be dropped from a children list.
//!
//! Run:
//! - `cargo run -p understory_examples --example scene_basics`

use kurbo::{Point, Rect, Vec2};
use understory_scene::{Content, Iteration, Layer, NodeFlags, NodeRef, Scene};

struct Window {
    title: &'static str,
    rect: Rect,
}

impl Content for Window {
    fn find_node_at(&self, at: Point) -> Option<Point> {
        self.rect
            .contains(at)
            .then(|| at - Vec2::new(self.rect.x0, self.rect.y0))
    }
}

fn window(scene: &mut Scene, title: &'static str, rect: Rect) -> understory_scene::NodeId {
    scene.create_view(NodeFlags::empty(), Window { title, rect })
}

fn main() {
    let mut scene = Scene::new();

    let output = scene.create_output();
    assert!(scene.set_children_list(scene.layer(Layer::Workspace), vec![output.node()]));

    let editor = window(&mut scene, "editor", Rect::new(0.0, 0.0, 800.0, 600.0));
    let terminal = window(&mut scene, "terminal", Rect::new(400.0, 300.0, 1200.0, 900.0));
    let panel = window(&mut scene, "panel", Rect::new(0.0, 0.0, 1920.0, 32.0));

    // The first child is searched first, so it is the topmost window.
    assert!(scene.set_children_list(output.dynamic(), vec![terminal, editor]));
    assert!(scene.set_children_list(scene.layer(Layer::Top), vec![panel]));

    println!("== Hit tests ==");
    for pt in [
        Point::new(10.0, 10.0),
        Point::new(100.0, 100.0),
        Point::new(500.0, 400.0),
        Point::new(1500.0, 1000.0),
    ] {
        match scene.find_node_at(scene.root(), pt) {
            Some(hit) => {
                let title = scene.content_as::<Window>(hit.node).map_or("?", |w| w.title);
                let layer = scene.layer_of(hit.node).map_or("none", |l| l.name());
                println!("  {pt:?} -> {title} in {layer}, local {:?}", hit.local);
            }
            None => println!("  {pt:?} -> nothing"),
        }
    }

    println!("== Tree ==");
    let mut print = |node: NodeRef<'_>| {
        let mut depth = 0;
        let mut cursor = node.parent();
        while let Some(p) = cursor {
            depth += 1;
            cursor = node.scene().parent(p);
        }
        let scene = node.scene();
        let layer = (node.parent() == Some(scene.root()))
            .then(|| scene.layer_of(node.id()))
            .flatten();
        let label = node
            .content_as::<Window>()
            .map(|w| w.title)
            .or(layer.map(Layer::name))
            .unwrap_or("");
        println!(
            "  {:indent$}{:?}{} {}",
            "",
            node.kind(),
            if node.is_structure_node() { " [structure]" } else { "" },
            label,
            indent = depth * 2
        );
        // Minimized windows are not shown.
        if layer == Some(Layer::Minimized) {
            Iteration::SkipChildren
        } else {
            Iteration::All
        }
    };
    scene.visit(scene.root(), &mut print);

    println!("== Checked mutation ==");
    let dropped = scene.try_set_children_list(output.node(), vec![output.dynamic()]);
    println!("  drop the static slot of a fixed output: {dropped:?}");
    let raised = scene.set_children_list(output.dynamic(), vec![editor, terminal]);
    println!("  raise editor: {raised}");
}
