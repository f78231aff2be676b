// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use seatscape_index::QuadTreeConfig;
use seatscape_scene::{
    Bounds, Culler, HitTester, IndexConfig, Item, LodThresholds, Region, Scene, SceneIndex,
    SpatialIndexMode,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

const REGION_SIDE: f64 = 1000.0;
const SEAT_PITCH: f64 = 50.0;
const SEAT_SIZE: f64 = 40.0;

/// `cols × rows` regions, each a square block of 18 × 18 seats.
fn venue(cols: usize, rows: usize) -> Scene {
    let seats_per_side = ((REGION_SIDE - SEAT_PITCH) / SEAT_PITCH) as usize;
    let mut scene = Scene::new(
        "bench",
        cols as f64 * REGION_SIDE,
        rows as f64 * REGION_SIDE,
    )
    .with_scale_bounds(0.02, 8.0);
    let mut next_id = 0_u64;
    for r in 0..cols * rows {
        let rx = (r % cols) as f64 * REGION_SIDE;
        let ry = (r / cols) as f64 * REGION_SIDE;
        let mut region = Region::new(
            r as u64,
            format!("block {r}"),
            Bounds::new(rx, ry, REGION_SIDE, REGION_SIDE),
        );
        for sy in 0..seats_per_side {
            for sx in 0..seats_per_side {
                region = region.with_item(Item::new(
                    next_id,
                    Bounds::new(
                        rx + SEAT_PITCH * 0.5 + sx as f64 * SEAT_PITCH,
                        ry + SEAT_PITCH * 0.5 + sy as f64 * SEAT_PITCH,
                        SEAT_SIZE,
                        SEAT_SIZE,
                    ),
                ));
                next_id += 1;
            }
        }
        scene = scene.with_region(region);
    }
    scene
}

fn culler(scene: &Scene, mode: SpatialIndexMode) -> Culler {
    let mut culler = Culler::new(
        LodThresholds::default(),
        IndexConfig {
            mode,
            ..IndexConfig::default()
        },
    );
    culler.prepare(scene);
    culler
}

/// Visible scene rectangles for a 1280×800 viewport at `scale`, scattered
/// over the venue.
fn views(scene: &Scene, scale: f64, count: usize) -> Vec<Rect> {
    let (w, h) = (1280.0 / scale, 800.0 / scale);
    let mut rng = Rng::new(0x5eed);
    (0..count)
        .map(|_| {
            let x = rng.range(0.0, (scene.width() - w).max(0.0));
            let y = rng.range(0.0, (scene.height() - h).max(0.0));
            Rect::new(x, y, x + w, y + h)
        })
        .collect()
}

fn bench_cull(c: &mut Criterion) {
    let scene = venue(20, 16);
    let linear = culler(&scene, SpatialIndexMode::Never);
    let indexed = culler(&scene, SpatialIndexMode::Always);

    let mut group = c.benchmark_group("cull");
    group.throughput(Throughput::Elements(scene.item_count() as u64));
    for &scale in &[0.5_f64, 1.0, 2.5] {
        let rects = views(&scene, scale, 64);
        for (name, culler) in [("linear", &linear), ("quadtree", &indexed)] {
            group.bench_with_input(BenchmarkId::new(name, scale), &rects, |b, rects| {
                b.iter(|| {
                    let mut total = 0_usize;
                    for &rect in rects {
                        total += culler.cull(&scene, black_box(rect), scale).item_total();
                    }
                    total
                });
            });
        }
    }
    group.finish();
}

fn bench_hit(c: &mut Criterion) {
    let scene = venue(20, 16);
    let index = SceneIndex::build(&scene, QuadTreeConfig::default());
    let mut rng = Rng::new(7);
    let points: Vec<Point> = (0..1_000)
        .map(|_| Point::new(rng.range(0.0, scene.width()), rng.range(0.0, scene.height())))
        .collect();

    let mut group = c.benchmark_group("hit");
    group.throughput(Throughput::Elements(points.len() as u64));
    for (name, tester) in [
        ("linear", HitTester::new(&scene, None)),
        ("quadtree", HitTester::new(&scene, Some(&index))),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                points
                    .iter()
                    .filter(|&&pt| tester.find_item_at(black_box(pt)).is_some())
                    .count()
            });
        });
    }
    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for &(cols, rows) in &[(5_usize, 4_usize), (10, 8), (20, 16)] {
        let scene = venue(cols, rows);
        group.throughput(Throughput::Elements(scene.item_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(scene.item_count()),
            &scene,
            |b, scene| b.iter(|| SceneIndex::build(scene, QuadTreeConfig::default()).len()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_cull, bench_hit, bench_index_build);
criterion_main!(benches);
