// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seatscape View: the transform engine behind pan and zoom.
//!
//! This crate owns the mapping between *scene* coordinates (the venue plan)
//! and *screen* coordinates (device pixels). The mapping is a uniform scale
//! followed by a translation:
//!
//! ```text
//! screen = scene * scale + translate
//! ```
//!
//! [`TransformEngine`] is the single owner of that state. It provides:
//! - Scale bounds and focus-preserving zoom ([`TransformEngine::apply_scale`]).
//! - Panning with content clamping ([`TransformEngine::apply_translation`]).
//! - Eased animation between transform states, advanced by an explicit
//!   [`TransformEngine::tick`] with injected elapsed time.
//! - Fit-to-screen and snap-back helpers.
//! - Coordinate conversion in both directions.
//!
//! It does **not** interpret pointer input or simulate inertia; those live in
//! higher-level crates that drive the engine.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use seatscape_view::TransformEngine;
//!
//! let mut view = TransformEngine::new();
//! view.set_viewport(Size::new(500.0, 400.0));
//! view.set_content_size(Size::new(1000.0, 800.0));
//! view.set_scale_bounds(0.5, 5.0);
//!
//! // Jump straight to the fitted transform.
//! if let Some(fit) = view.fit_transform() {
//!     view.set_transform(fit);
//! }
//! assert_eq!(view.scale(), 0.5);
//!
//! // Zoom in around a screen point; the scene point under it stays put.
//! let focus = Point::new(100.0, 100.0);
//! let before = view.screen_to_scene(focus).unwrap();
//! view.apply_scale(2.0, focus);
//! let after = view.screen_to_scene(focus).unwrap();
//! assert!((before - after).hypot() < 1e-9);
//! ```
//!
//! ## Clamping
//!
//! Translation is clamped per axis after every change. When the scaled
//! content is larger than the viewport, the content may not reveal anything
//! outside the scene: `translate ∈ [viewport - content, 0]`. When it is
//! smaller, it is pinned to the centered position
//! `(viewport - content) / 2` and cannot be dragged off-center.
//!
//! Scale is clamped to `[min_scale, max_scale]` by gesture operations.
//! [`TransformEngine::set_scale_bounds`] does not reclamp; call
//! [`TransformEngine::constrain_and_bounce_if_needed`] to animate back into
//! range.

mod animation;
mod engine;
mod error;
mod transform;

pub use animation::{Animation, ease_out_cubic};
pub use engine::{ScaleChanged, TransformEngine, TransformEngineDebugInfo};
pub use error::TransformError;
pub use transform::Transform;

/// Relative scale change below which [`TransformEngine::apply_scale`] is a no-op.
pub const SCALE_EPSILON: f64 = 0.001;

/// Smallest scale the engine will ever hold; keeps the transform invertible.
pub const MIN_SCALE_FLOOR: f64 = 1e-6;
