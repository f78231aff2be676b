// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seatscape Inertia: motion that continues after a gesture is released.
//!
//! Two pure models live here:
//! - [`PanInertia`]: a fling with linear velocity in screen pixels per second.
//! - [`ScaleInertia`]: a logarithmic zoom velocity (units of `ln(scale)` per
//!   second), fed by a [`ScaleHistory`] of pinch samples.
//!
//! Both decay with the same friction law,
//!
//! ```text
//! v(t) = v0 · e^(−k·f·t)
//! ```
//!
//! where `k` is a per-model friction constant, `f` is the nominal tick rate
//! the constant was tuned at, and `t` is seconds since release. Time is
//! injected: each `tick(dt_ms)` advances the model by the given elapsed
//! milliseconds and returns what to apply this frame. The models never touch
//! a transform themselves; the caller applies the returned delta or factor.
//!
//! ```rust
//! use kurbo::Vec2;
//! use seatscape_inertia::{PanInertia, PanInertiaConfig};
//!
//! let mut fling = PanInertia::new(PanInertiaConfig::default());
//! assert!(fling.start(Vec2::new(1200.0, 0.0)));
//!
//! let mut travelled = 0.0;
//! while let Some(delta) = fling.tick(1000.0 / 60.0) {
//!     travelled += delta.x;
//! }
//! assert!(!fling.is_active());
//! assert!(travelled > 300.0);
//! ```

mod pan;
mod scale;

pub use pan::{PanInertia, PanInertiaConfig};
pub use scale::{GestureSample, ScaleHistory, ScaleInertia, ScaleInertiaConfig, ScaleStep};

/// Decay multiplier `e^(−k·f·t)` for `t` seconds.
fn decay(friction: f64, tick_rate_hz: f64, t_secs: f64) -> f64 {
    (-friction * tick_rate_hz * t_secs).exp()
}

/// Milliseconds to seconds, treating negative or non-finite input as zero.
fn secs(dt_ms: f64) -> f64 {
    if dt_ms.is_finite() && dt_ms > 0.0 {
        dt_ms / 1000.0
    } else {
        0.0
    }
}
