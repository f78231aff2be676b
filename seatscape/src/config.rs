// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use seatscape_inertia::{PanInertiaConfig, ScaleInertiaConfig};
use seatscape_scene::{IndexConfig, LodThresholds};
use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Every section falls back to its defaults when absent, so a host can
/// deserialize a partial document:
///
/// ```rust
/// # use seatscape::Config;
/// let config: Config = serde_json::from_str(r#"{ "gesture": { "tap_slop_px": 12.0 } }"#)?;
/// assert_eq!(config.gesture.tap_slop_px, 12.0);
/// assert_eq!(config.gesture.double_tap_timeout_ms, 300);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture recognition and animation timings.
    pub gesture: GestureConfig,
    /// Fling friction.
    pub pan_inertia: PanInertiaConfig,
    /// Zoom inertia friction and velocity estimation.
    pub scale_inertia: ScaleInertiaConfig,
    /// Level-of-detail thresholds.
    pub lod: LodThresholds,
    /// When and how to build the spatial index.
    pub index: IndexConfig,
}

/// Gesture recognition settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Travel (px) beyond which a press becomes a pan.
    pub tap_slop_px: f64,
    /// Maximum gap between the taps of a double tap.
    pub double_tap_timeout_ms: u64,
    /// Maximum distance (px) between the taps of a double tap.
    pub double_tap_slop_px: f64,
    /// Scale a double tap zooms to.
    pub double_tap_scale: f64,
    /// Duration of the double-tap zoom animation.
    pub double_tap_duration_ms: f64,
    /// Duration of the snap-back into scale bounds.
    pub bounce_duration_ms: f64,
    /// Duration of the fit-to-screen animation.
    pub fit_duration_ms: f64,
    /// A pinch sample must be at most this old at release to start zoom inertia.
    pub scale_inertia_recency_ms: u64,
    /// Trailing window for release velocity.
    pub velocity_window_ms: u64,
    /// Fling speed cap in px/s.
    pub max_fling_velocity: f64,
    /// Wheel zoom factor is `e^(-delta * rate)`.
    pub wheel_zoom_rate: f64,
    /// Pinches with a smaller finger span (px) are ignored.
    pub min_pinch_span_px: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop_px: 8.0,
            double_tap_timeout_ms: 300,
            double_tap_slop_px: 100.0,
            double_tap_scale: 3.0,
            double_tap_duration_ms: 400.0,
            bounce_duration_ms: 200.0,
            fit_duration_ms: 300.0,
            scale_inertia_recency_ms: 200,
            velocity_window_ms: 100,
            max_fling_velocity: 8_000.0,
            wheel_zoom_rate: 0.002,
            min_pinch_span_px: 10.0,
        }
    }
}
