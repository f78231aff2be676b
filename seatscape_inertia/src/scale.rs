// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::VecDeque;

use kurbo::Point;
use tracing::debug;

use crate::{decay, secs};

/// Tuning for [`ScaleInertia`] and its [`ScaleHistory`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScaleInertiaConfig {
    /// Friction constant `k`; larger than the pan constant so zoom settles sooner.
    pub friction: f64,
    /// Nominal tick rate `f` in Hz.
    pub tick_rate_hz: f64,
    /// Minimum `|v|` (ln-scale per second) needed to start.
    pub start_velocity: f64,
    /// `|v|` below which a running model stops.
    pub stop_velocity: f64,
    /// Velocity estimates below this magnitude are reported as zero.
    pub noise_floor: f64,
    /// Velocity estimates are clamped to `±max_velocity`.
    pub max_velocity: f64,
    /// Samples older than this (relative to the newest) are dropped.
    pub history_window_ms: u64,
    /// Ring capacity.
    pub history_capacity: usize,
    /// Number of most recent samples used for the velocity estimate.
    pub velocity_samples: usize,
    /// The estimate is zero unless the recent samples hold at least
    /// `min_samples - 1` pairs with distinct timestamps.
    pub min_samples: usize,
}

impl Default for ScaleInertiaConfig {
    fn default() -> Self {
        Self {
            friction: 0.1,
            tick_rate_hz: 60.0,
            start_velocity: 0.1,
            stop_velocity: 0.02,
            noise_floor: 0.05,
            max_velocity: 5.0,
            history_window_ms: 150,
            history_capacity: 10,
            velocity_samples: 5,
            min_samples: 3,
        }
    }
}

/// One pinch observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    /// Milliseconds, on the caller's clock.
    pub timestamp_ms: u64,
    /// Product of every scale factor applied since the pinch started.
    pub cumulative_scale: f64,
    /// Pinch focus in screen coordinates.
    pub focus: Point,
}

/// Bounded, time-windowed ring of [`GestureSample`]s for one pinch.
#[derive(Clone, Debug)]
pub struct ScaleHistory {
    config: ScaleInertiaConfig,
    cumulative: f64,
    samples: VecDeque<GestureSample>,
}

impl ScaleHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new(config: ScaleInertiaConfig) -> Self {
        Self {
            config,
            cumulative: 1.0,
            samples: VecDeque::with_capacity(config.history_capacity),
        }
    }

    /// Drops all samples and resets the accumulator.
    pub fn clear(&mut self) {
        self.cumulative = 1.0;
        self.samples.clear();
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Product of all factors recorded since the last clear.
    #[must_use]
    pub fn cumulative_scale(&self) -> f64 {
        self.cumulative
    }

    /// The newest sample.
    #[must_use]
    pub fn last(&self) -> Option<&GestureSample> {
        self.samples.back()
    }

    /// Retained samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GestureSample> + '_ {
        self.samples.iter()
    }

    /// Folds an applied scale `factor` into the accumulator and records a sample.
    ///
    /// Non-positive or non-finite factors are ignored. Samples older than the
    /// window relative to `timestamp_ms` are dropped, then the ring is capped.
    pub fn record(&mut self, timestamp_ms: u64, factor: f64, focus: Point) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.cumulative *= factor;
        self.samples.push_back(GestureSample {
            timestamp_ms,
            cumulative_scale: self.cumulative,
            focus,
        });
        let horizon = timestamp_ms.saturating_sub(self.config.history_window_ms);
        while self
            .samples
            .front()
            .is_some_and(|s| s.timestamp_ms < horizon)
        {
            self.samples.pop_front();
        }
        while self.samples.len() > self.config.history_capacity {
            self.samples.pop_front();
        }
    }

    /// Logarithmic scale velocity in `ln(scale)` per second.
    ///
    /// Mean of `ln(s_i / s_(i-1)) / Δt_i` over the most recent samples, skipping
    /// pairs with `Δt = 0`. Zero when fewer than `min_samples - 1` timed pairs
    /// remain or below the noise floor; clamped to the configured maximum.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        let cfg = &self.config;
        let skip = self.samples.len().saturating_sub(cfg.velocity_samples);
        let recent: Vec<&GestureSample> = self.samples.iter().skip(skip).collect();
        let mut sum = 0.0;
        let mut count = 0_u32;
        for pair in recent.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let dt = b.timestamp_ms.saturating_sub(a.timestamp_ms);
            if dt == 0 {
                continue;
            }
            sum += (b.cumulative_scale / a.cumulative_scale).ln() / (dt as f64 / 1000.0);
            count += 1;
        }
        let needed = cfg.min_samples.saturating_sub(1).max(1);
        if (count as usize) < needed {
            return 0.0;
        }
        let v = (sum / f64::from(count)).clamp(-cfg.max_velocity, cfg.max_velocity);
        if v.abs() < cfg.noise_floor { 0.0 } else { v }
    }
}

impl Default for ScaleHistory {
    fn default() -> Self {
        Self::new(ScaleInertiaConfig::default())
    }
}

/// Scale change to apply for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleStep {
    /// Multiplicative factor `e^(v(t)·dt)`.
    pub factor: f64,
    /// Screen-space focus to zoom about.
    pub focus: Point,
}

/// A decaying logarithmic zoom.
#[derive(Clone, Debug)]
pub struct ScaleInertia {
    config: ScaleInertiaConfig,
    initial: f64,
    velocity: f64,
    focus: Point,
    elapsed_secs: f64,
    active: bool,
}

impl ScaleInertia {
    /// Creates an idle model.
    #[must_use]
    pub fn new(config: ScaleInertiaConfig) -> Self {
        Self {
            config,
            initial: 0.0,
            velocity: 0.0,
            focus: Point::ORIGIN,
            elapsed_secs: 0.0,
            active: false,
        }
    }

    /// The model's configuration.
    #[must_use]
    pub fn config(&self) -> &ScaleInertiaConfig {
        &self.config
    }

    /// Returns `true` while running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current velocity in `ln(scale)` per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Starts zooming at `v0` about `focus`, replacing any running model.
    ///
    /// Returns `false` when `|v0|` is below the start threshold.
    pub fn start(&mut self, v0: f64, focus: Point) -> bool {
        self.stop();
        if !v0.is_finite() || v0.abs() < self.config.start_velocity {
            return false;
        }
        debug!(v0, "scale inertia start");
        self.initial = v0;
        self.velocity = v0;
        self.focus = focus;
        self.elapsed_secs = 0.0;
        self.active = true;
        true
    }

    /// Starts from the velocity estimated by `history`, at its newest focus.
    pub fn start_from(&mut self, history: &ScaleHistory) -> bool {
        match history.last() {
            Some(last) => self.start(history.velocity(), last.focus),
            None => {
                self.stop();
                false
            }
        }
    }

    /// Cancels the model. Returns `true` if it was running.
    pub fn stop(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.velocity = 0.0;
        was_active
    }

    /// Advances by `dt_ms` and returns this tick's scale step.
    pub fn tick(&mut self, dt_ms: f64) -> Option<ScaleStep> {
        if !self.active {
            return None;
        }
        let dt = secs(dt_ms);
        let step = ScaleStep {
            factor: (self.velocity * dt).exp(),
            focus: self.focus,
        };
        self.elapsed_secs += dt;
        self.velocity = self.initial
            * decay(
                self.config.friction,
                self.config.tick_rate_hz,
                self.elapsed_secs,
            );
        if self.velocity.abs() < self.config.stop_velocity {
            debug!(elapsed_secs = self.elapsed_secs, "scale inertia settled");
            self.stop();
        }
        Some(step)
    }
}

impl Default for ScaleInertia {
    fn default() -> Self {
        Self::new(ScaleInertiaConfig::default())
    }
}
