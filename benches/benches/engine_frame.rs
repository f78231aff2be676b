// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame cost of the engine: gesture handling, a tick and a cull.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use seatscape::{Bounds, Engine, Item, Region, Scene};

/// A 100 × 100 seat block per region, 4 × 3 regions (120 000 seats).
fn venue() -> Scene {
    let mut scene = Scene::new("frame", 4_000.0, 3_000.0).with_scale_bounds(0.1, 10.0);
    let mut next_id = 0_u64;
    for r in 0..12_usize {
        let rx = (r % 4) as f64 * 1_000.0;
        let ry = (r / 4) as f64 * 1_000.0;
        let mut region = Region::new(r as u64, format!("R{r}"), Bounds::new(rx, ry, 1_000.0, 1_000.0));
        for i in 0..10_000_usize {
            let x = rx + (i % 100) as f64 * 10.0;
            let y = ry + (i / 100) as f64 * 10.0;
            region = region.with_item(Item::new(next_id, Bounds::new(x + 1.0, y + 1.0, 8.0, 8.0)));
            next_id += 1;
        }
        scene = scene.with_region(region);
    }
    scene
}

fn bound_engine(scene: Scene) -> Engine {
    let mut engine = Engine::default();
    engine.set_viewport(Size::new(1280.0, 800.0));
    engine.bind_scene(scene).unwrap();
    engine
}

fn bench_fling_frames(c: &mut Criterion) {
    let scene = venue();
    c.bench_function("fling_60_frames", |b| {
        b.iter_batched(
            || {
                let mut engine = bound_engine(scene.clone());
                engine.on_wheel(-800.0, Point::new(640.0, 400.0));
                engine.on_pointer_down(0, Point::new(900.0, 400.0), 0);
                for i in 1..=5_u64 {
                    engine.on_pointer_move(0, Point::new(900.0 - 60.0 * i as f64, 400.0), i * 16);
                }
                engine.on_pointer_up(0, Point::new(540.0, 400.0), 96);
                engine
            },
            |mut engine| {
                let mut drawn = 0_usize;
                for _ in 0..60 {
                    engine.tick(16.0);
                    drawn += engine.cull().map_or(0, |r| r.item_total());
                }
                black_box(drawn)
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_pinch_moves(c: &mut Criterion) {
    let mut engine = bound_engine(venue());
    c.bench_function("pinch_move", |b| {
        let mut t = 0_u64;
        b.iter(|| {
            t += 1_000;
            engine.on_pointer_down(0, Point::new(500.0, 400.0), t);
            engine.on_pointer_down(1, Point::new(700.0, 400.0), t);
            for i in 1..=20_u64 {
                let spread = 200.0 + 10.0 * i as f64;
                engine.on_pointer_move(1, Point::new(500.0 + spread, 400.0), t + i * 16);
            }
            engine.on_pointer_up(1, Point::new(900.0, 400.0), t + 500);
            engine.on_pointer_up(0, Point::new(500.0, 400.0), t + 500);
            engine.reset_to_fit_screen();
            while engine.tick(50.0) {}
            black_box(engine.take_events().len())
        });
    });
}

criterion_group!(benches, bench_fling_frames, bench_pinch_moves);
criterion_main!(benches);
