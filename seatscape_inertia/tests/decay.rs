// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `seatscape_inertia` crate.
//!
//! These check that both models terminate in a bounded number of ticks and
//! that the motion they produce matches the closed-form friction integral.

use kurbo::{Point, Vec2};
use seatscape_inertia::{
    PanInertia, PanInertiaConfig, ScaleHistory, ScaleInertia, ScaleInertiaConfig,
};

const DT_MS: f64 = 1000.0 / 60.0;

#[test]
fn fling_displacement_matches_integral() {
    let cfg = PanInertiaConfig::default();
    let kf = cfg.friction * cfg.tick_rate_hz;
    let v0 = Vec2::new(2000.0, -1000.0);

    let mut fling = PanInertia::new(cfg);
    assert!(fling.start(v0));
    let mut total = Vec2::ZERO;
    let mut ticks = 0_u32;
    while let Some(delta) = fling.tick(DT_MS) {
        total += delta;
        ticks += 1;
        assert!(ticks < 1_000, "fling never settled");
    }

    let t = f64::from(ticks) * DT_MS / 1000.0;
    let expected = v0 * ((1.0 - (-kf * t).exp()) / kf);
    let rel_x = (total.x - expected.x).abs() / expected.x.abs();
    let rel_y = (total.y - expected.y).abs() / expected.y.abs();
    assert!(rel_x < 0.05, "x off by {rel_x}");
    assert!(rel_y < 0.05, "y off by {rel_y}");
    assert!(total.x > 0.0 && total.y < 0.0, "fling keeps release direction");
}

#[test]
fn fling_stops_when_expected() {
    let cfg = PanInertiaConfig::default();
    let kf = cfg.friction * cfg.tick_rate_hz;
    let mut fling = PanInertia::new(cfg);
    fling.start(Vec2::new(0.0, 4000.0));
    let mut ticks = 0_u32;
    while fling.tick(DT_MS).is_some() {
        ticks += 1;
    }
    let expected = (4000.0_f64 / cfg.min_velocity).ln() / kf * 60.0;
    assert!(
        (f64::from(ticks) - expected).abs() <= 1.0,
        "{ticks} ticks, expected about {expected}"
    );
}

#[test]
fn scale_inertia_stops_within_bound() {
    let cfg = ScaleInertiaConfig::default();
    let kf = cfg.friction * cfg.tick_rate_hz;
    let mut inertia = ScaleInertia::new(cfg);
    assert!(inertia.start(3.0, Point::new(250.0, 200.0)));

    let mut ticks = 0_u32;
    let mut total_log = 0.0;
    while let Some(step) = inertia.tick(DT_MS) {
        total_log += step.factor.ln();
        ticks += 1;
        assert!(ticks < 1_000, "scale inertia never settled");
    }
    let bound_secs = (3.0_f64 / cfg.stop_velocity).ln() / kf;
    let elapsed_secs = f64::from(ticks) * DT_MS / 1000.0;
    assert!(
        (elapsed_secs - bound_secs).abs() <= DT_MS / 1000.0,
        "stopped after {elapsed_secs}s, bound {bound_secs}s"
    );

    // Explicit per-tick stepping overshoots the integral by roughly k·f·dt/2.
    let expected_log = 3.0 * (1.0 - (-kf * elapsed_secs).exp()) / kf;
    let rel = (total_log - expected_log).abs() / expected_log;
    assert!(rel < 0.08, "log-scale off by {rel}");
}

#[test]
fn pinch_history_feeds_scale_inertia() {
    let mut history = ScaleHistory::default();
    for i in 0..6_u64 {
        history.record(1_000 + i * 16, 1.03, Point::new(40.0, 50.0));
    }
    let mut inertia = ScaleInertia::default();
    assert!(inertia.start_from(&history));
    assert!(inertia.velocity() > 0.0);
    let step = inertia.tick(DT_MS).unwrap();
    assert_eq!(step.focus, Point::new(40.0, 50.0));
}

#[cfg(feature = "serde")]
#[test]
fn configs_deserialize_with_defaults() {
    let pan: PanInertiaConfig = serde_json::from_str(r#"{ "friction": 0.08 }"#).unwrap();
    assert_eq!(pan.friction, 0.08);
    assert_eq!(pan.min_velocity, 50.0);

    let scale: ScaleInertiaConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(scale, ScaleInertiaConfig::default());
}
