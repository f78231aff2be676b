// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use tracing::debug;

use crate::{decay, secs};

/// Tuning for [`PanInertia`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanInertiaConfig {
    /// Friction constant `k`.
    pub friction: f64,
    /// Nominal tick rate `f` in Hz.
    pub tick_rate_hz: f64,
    /// Speed (px/s, per axis) below which the fling stops.
    pub min_velocity: f64,
}

impl Default for PanInertiaConfig {
    fn default() -> Self {
        Self {
            friction: 0.06,
            tick_rate_hz: 60.0,
            min_velocity: 50.0,
        }
    }
}

/// A decaying fling in screen space.
#[derive(Clone, Debug)]
pub struct PanInertia {
    config: PanInertiaConfig,
    initial: Vec2,
    velocity: Vec2,
    elapsed_secs: f64,
    active: bool,
}

impl PanInertia {
    /// Creates an idle fling model.
    #[must_use]
    pub fn new(config: PanInertiaConfig) -> Self {
        Self {
            config,
            initial: Vec2::ZERO,
            velocity: Vec2::ZERO,
            elapsed_secs: 0.0,
            active: false,
        }
    }

    /// The model's configuration.
    #[must_use]
    pub fn config(&self) -> &PanInertiaConfig {
        &self.config
    }

    /// Returns `true` while the fling is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current velocity in px/s (zero when idle).
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Starts a fling with release velocity `v0` (px/s), replacing any
    /// running one.
    ///
    /// Returns `false` and stays idle when `v0` is non-finite or both
    /// components are already below the stop speed.
    pub fn start(&mut self, v0: Vec2) -> bool {
        self.stop();
        if !v0.is_finite() || self.below_floor(v0) {
            return false;
        }
        debug!(vx = v0.x, vy = v0.y, "fling start");
        self.initial = v0;
        self.velocity = v0;
        self.elapsed_secs = 0.0;
        self.active = true;
        true
    }

    /// Cancels the fling. Returns `true` if one was running.
    pub fn stop(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.velocity = Vec2::ZERO;
        was_active
    }

    /// Advances by `dt_ms` and returns this tick's displacement `v(t)·dt`.
    ///
    /// Returns `None` once idle. The tick on which the velocity drops below
    /// the stop speed still returns its displacement.
    pub fn tick(&mut self, dt_ms: f64) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let dt = secs(dt_ms);
        let delta = self.velocity * dt;
        self.elapsed_secs += dt;
        self.velocity = self.initial
            * decay(
                self.config.friction,
                self.config.tick_rate_hz,
                self.elapsed_secs,
            );
        if self.below_floor(self.velocity) {
            debug!(elapsed_secs = self.elapsed_secs, "fling settled");
            self.stop();
        }
        Some(delta)
    }

    fn below_floor(&self, v: Vec2) -> bool {
        v.x.abs() < self.config.min_velocity && v.y.abs() < self.config.min_velocity
    }
}

impl Default for PanInertia {
    fn default() -> Self {
        Self::new(PanInertiaConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::{PanInertia, PanInertiaConfig};

    #[test]
    fn slow_or_bad_release_does_not_start() {
        let mut fling = PanInertia::default();
        assert!(!fling.start(Vec2::new(49.0, -49.0)));
        assert!(!fling.start(Vec2::new(f64::NAN, 500.0)));
        assert!(!fling.start(Vec2::new(f64::INFINITY, 0.0)));
        assert!(!fling.is_active());
        assert_eq!(fling.tick(16.0), None);
    }

    #[test]
    fn velocity_decays_monotonically() {
        let mut fling = PanInertia::new(PanInertiaConfig::default());
        assert!(fling.start(Vec2::new(0.0, -3000.0)));
        let mut last = fling.velocity().y.abs();
        while fling.tick(1000.0 / 60.0).is_some() {
            let now = fling.velocity().y.abs();
            assert!(now < last || now == 0.0);
            last = now;
        }
    }

    #[test]
    fn one_axis_above_floor_keeps_running() {
        let mut fling = PanInertia::default();
        assert!(fling.start(Vec2::new(10.0, 400.0)));
        assert!(fling.tick(16.0).is_some());
        assert!(fling.is_active());
    }

    #[test]
    fn restart_replaces_running_fling() {
        let mut fling = PanInertia::default();
        fling.start(Vec2::new(1000.0, 0.0));
        fling.tick(100.0);
        assert!(fling.start(Vec2::new(0.0, 1000.0)));
        assert_eq!(fling.velocity(), Vec2::new(0.0, 1000.0));
        assert!(fling.stop());
        assert!(!fling.stop());
    }
}
