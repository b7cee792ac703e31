//! # Tree Benchmark
//!
//! Measures the two per-frame hot paths of the widget tree: a full bounds
//! recompute from the root and pointer hit testing, plus rendering a frame
//! into batches.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gantry_ui::{Button, Label, Margin, Panel, Point, Rect, UIRenderer, UiTree, Window};

/// Builds `windows` windows, each holding a docked panel with a column of
/// labels and buttons.
fn build(windows: i32) -> UiTree {
    let mut tree = UiTree::new(Rect::new(0, 0, 1920, 1080));
    for w in 0..windows {
        let window = Window::spawn(&mut tree, &format!("window{w}"), "Window").unwrap();
        let origin = (w * 37) % 1600;
        tree.set_local_bounds(window, Rect::new(origin, origin / 2, 300, 400)).unwrap();
        tree.add_child(tree.root(), window).unwrap();

        let body = tree.create("body", Panel::new());
        tree.set_margin(body, Margin::fill(4)).unwrap();
        tree.add_child(window, body).unwrap();

        for row in 0..16 {
            let id = if row % 2 == 0 {
                tree.create(&format!("label{row}"), Label::new("value"))
            } else {
                tree.create(&format!("button{row}"), Button::new("apply"))
            };
            tree.set_local_bounds(id, Rect::new(4, row * 22, 200, 20)).unwrap();
            tree.add_child(body, id).unwrap();
        }
    }
    tree
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute_bounds");

    for windows in [4, 32] {
        let mut tree = build(windows);
        group.bench_with_input(BenchmarkId::from_parameter(windows), &windows, |b, _| {
            b.iter(|| {
                let root = tree.root();
                tree.recompute_bounds(black_box(root));
            });
        });
    }

    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let tree = build(32);
    let points: Vec<Point> = (0..64).map(|i| Point::new(i * 29 % 1920, i * 17 % 1080)).collect();

    c.bench_function("hit_test_32_windows", |b| {
        b.iter(|| {
            for &point in &points {
                black_box(tree.hit_test(tree.root(), point));
            }
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let mut tree = build(32);
    let mut renderer = UIRenderer::new();

    c.bench_function("render_32_windows", |b| {
        b.iter(|| {
            renderer.begin_frame();
            tree.render(&mut renderer);
            black_box(renderer.end_frame().len())
        });
    });
}

criterion_group!(benches, bench_recompute, bench_hit_test, bench_render);
criterion_main!(benches);
