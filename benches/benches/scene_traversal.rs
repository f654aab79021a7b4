// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_scene::{Content, Iteration, Layer, NodeFlags, NodeId, NodeRef, Scene};

struct Tile(Rect);

impl Content for Tile {
    fn find_node_at(&self, at: Point) -> Option<Point> {
        self.0.contains(at).then_some(at)
    }
}

/// Builds `outputs` outputs in the workspace layer, each holding `per_output` tiles.
/// Every other tile is keyboard-active.
fn gen_scene(outputs: usize, per_output: usize, cell: f64) -> (Scene, Vec<NodeId>) {
    let mut scene = Scene::new();
    let mut tiles = Vec::with_capacity(outputs * per_output);
    let mut output_nodes = Vec::with_capacity(outputs);
    for o in 0..outputs {
        let output = scene.create_output();
        let mut children = Vec::with_capacity(per_output);
        for i in 0..per_output {
            let x0 = i as f64 * cell;
            let y0 = o as f64 * cell;
            let flags = if i % 2 == 0 {
                NodeFlags::ACTIVE_KEYBOARD
            } else {
                NodeFlags::empty()
            };
            let id = scene.create_view(flags, Tile(Rect::new(x0, y0, x0 + cell, y0 + cell)));
            children.push(id);
            tiles.push(id);
        }
        assert!(scene.set_children_list(output.dynamic(), children));
        output_nodes.push(output.node());
    }
    assert!(scene.set_children_list(scene.layer(Layer::Workspace), output_nodes));
    (scene, tiles)
}

fn bench_visit(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit");
    for &n in &[16usize, 64, 256] {
        let (scene, _) = gen_scene(4, n, 10.0);
        group.throughput(Throughput::Elements((4 * n) as u64));
        group.bench_function(format!("count_all_n{}", n), |b| {
            b.iter(|| {
                let mut count = 0_usize;
                let mut counter = |_node: NodeRef<'_>| {
                    count += 1;
                    Iteration::All
                };
                scene.visit(scene.root(), &mut counter);
                black_box(count)
            });
        });
    }
    group.finish();
}

fn bench_find_node_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_node_at");
    let (scene, _) = gen_scene(4, 256, 10.0);
    group.bench_function("last_tile", |b| {
        b.iter(|| black_box(scene.find_node_at(scene.root(), Point::new(2555.0, 35.0))));
    });
    group.bench_function("miss", |b| {
        b.iter(|| black_box(scene.find_node_at(scene.root(), Point::new(-1.0, -1.0))));
    });
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("focus_update");
    for &n in &[16usize, 64, 256] {
        group.throughput(Throughput::Elements((4 * n) as u64));
        group.bench_function(format!("unchanged_n{}", n), |b| {
            let (mut scene, _) = gen_scene(4, n, 10.0);
            let _ = scene.update();
            b.iter(|| black_box(scene.update()));
        });
        group.bench_function(format!("flip_all_flags_n{}", n), |b| {
            b.iter_batched(
                || {
                    let (mut scene, tiles) = gen_scene(4, n, 10.0);
                    let _ = scene.update();
                    (scene, tiles)
                },
                |(mut scene, tiles)| {
                    for id in tiles {
                        let flipped = scene.flags(id) ^ NodeFlags::ACTIVE_KEYBOARD;
                        scene.set_flags(id, flipped);
                    }
                    black_box(scene.update())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_visit, bench_find_node_at, bench_update);
criterion_main!(benches);
