// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::transform::Transform;

/// Cubic ease-out: fast start, gentle landing. `p` is clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(p: f64) -> f64 {
    let inv = 1.0 - p.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// An in-flight interpolation between two transforms.
///
/// Time is injected: [`Animation::advance`] takes the elapsed milliseconds
/// since the previous call, so playback is deterministic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    from: Transform,
    to: Transform,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl Animation {
    /// Creates an animation from `from` to `to` over `duration_ms`.
    #[must_use]
    pub fn new(from: Transform, to: Transform, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
        }
    }

    /// Target transform.
    #[must_use]
    pub fn target(&self) -> Transform {
        self.to
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).min(1.0)
        }
    }

    /// Returns `true` once the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advances by `dt_ms` and returns the eased transform for the new time.
    pub fn advance(&mut self, dt_ms: f64) -> Transform {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms += dt_ms;
        }
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(&self.to, ease_out_cubic(self.progress()))
    }
}
