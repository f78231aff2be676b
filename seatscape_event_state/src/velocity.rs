// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release velocity estimation over a short trailing window.
//!
//! [`VelocityTracker`] keeps timestamped positions no older than `window_ms`
//! relative to the newest sample. The velocity is the displacement across the
//! window divided by its duration, with the magnitude capped at `max_speed`.

use alloc::collections::VecDeque;

use kurbo::{Point, Vec2};

/// Trailing-window pointer velocity in px/s.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    window_ms: u64,
    max_speed: f64,
    samples: VecDeque<(u64, Point)>,
}

impl VelocityTracker {
    /// Creates a tracker with the given window and speed cap.
    #[must_use]
    pub fn new(window_ms: u64, max_speed: f64) -> Self {
        Self {
            window_ms,
            max_speed,
            samples: VecDeque::new(),
        }
    }

    /// Records a position at `timestamp_ms`.
    ///
    /// Timestamps going backwards restart the window.
    pub fn push(&mut self, timestamp_ms: u64, pos: Point) {
        if self
            .samples
            .back()
            .is_some_and(|&(t, _)| t > timestamp_ms)
        {
            self.samples.clear();
        }
        self.samples.push_back((timestamp_ms, pos));
        let horizon = timestamp_ms.saturating_sub(self.window_ms);
        while self.samples.front().is_some_and(|&(t, _)| t < horizon) {
            self.samples.pop_front();
        }
    }

    /// Forgets all samples.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Number of samples inside the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` with no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Estimated velocity in px/s; zero with fewer than two distinct timestamps.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back())
        else {
            return Vec2::ZERO;
        };
        if t1 <= t0 {
            return Vec2::ZERO;
        }
        let dt = (t1 - t0) as f64 / 1000.0;
        let v = (p1 - p0) / dt;
        let speed = v.hypot();
        if speed > self.max_speed && speed > 0.0 {
            v * (self.max_speed / speed)
        } else {
            v
        }
    }
}
