// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};
use tracing::{debug, trace, warn};

use crate::animation::Animation;
use crate::error::TransformError;
use crate::transform::Transform;
use crate::{MIN_SCALE_FLOOR, SCALE_EPSILON};

/// Notification that the scale (or its bounds) changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleChanged {
    /// Current scale.
    pub scale: f64,
    /// Current lower bound.
    pub min_scale: f64,
    /// Current upper bound.
    pub max_scale: f64,
}

/// Owner of the scene → screen transform.
///
/// `TransformEngine` tracks the viewport size, the scene (content) size, the
/// scale bounds, and the current [`Transform`]. Every mutation rebuilds the
/// cached matrices and re-applies translation clamping. It can be used to:
/// - Convert points and rectangles between scene and screen coordinates.
/// - Zoom around a screen-space focus point and pan by screen deltas.
/// - Animate to a target transform with an ease-out curve.
/// - Fit the whole scene into the viewport.
///
/// While no content size is set (or it is degenerate), translation clamping
/// and fitting are skipped.
#[derive(Clone, Debug)]
pub struct TransformEngine {
    transform: Transform,
    min_scale: f64,
    max_scale: f64,
    viewport: Size,
    content: Size,
    animation: Option<Animation>,
    scene_to_screen: Affine,
    screen_to_scene: Affine,
    reported: ScaleChanged,
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformEngine {
    /// Creates an engine with the identity transform.
    ///
    /// - No viewport or content size.
    /// - Scale is clamped to the range `[1e-3, 1e3]` by default.
    #[must_use]
    pub fn new() -> Self {
        let mut engine = Self {
            transform: Transform::IDENTITY,
            min_scale: 1e-3,
            max_scale: 1e3,
            viewport: Size::ZERO,
            content: Size::ZERO,
            animation: None,
            scene_to_screen: Affine::IDENTITY,
            screen_to_scene: Affine::IDENTITY,
            reported: ScaleChanged {
                scale: 1.0,
                min_scale: 1e-3,
                max_scale: 1e3,
            },
        };
        engine.rebuild_matrices();
        engine
    }

    /// The current transform. Fetch it every frame rather than caching it.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Current scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// Current `(min_scale, max_scale)`.
    #[must_use]
    pub fn scale_bounds(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Scene → screen matrix.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.scene_to_screen
    }

    /// Screen → scene matrix.
    #[must_use]
    pub fn inverse_matrix(&self) -> Affine {
        self.screen_to_scene
    }

    /// Viewport size in screen pixels.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Content (scene) size in scene units.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content
    }

    /// Returns `true` while an animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Target of the in-flight animation, if any.
    #[must_use]
    pub fn animation_target(&self) -> Option<Transform> {
        self.animation.map(|a| a.target())
    }

    /// Returns `true` if the scale lies within the configured bounds.
    #[must_use]
    pub fn scale_in_bounds(&self) -> bool {
        let s = self.transform.scale;
        s >= self.min_scale && s <= self.max_scale
    }

    /// Sets the viewport size and re-clamps translation.
    pub fn set_viewport(&mut self, size: Size) {
        if self.viewport == size {
            return;
        }
        self.viewport = size;
        self.clamp_translation();
        self.rebuild_matrices();
    }

    /// Sets the content (scene) size and re-clamps translation.
    pub fn set_content_size(&mut self, size: Size) {
        if self.content == size {
            return;
        }
        self.content = size;
        self.clamp_translation();
        self.rebuild_matrices();
    }

    /// Sets the scale bounds.
    ///
    /// The range is normalized so that `min <= max`, and the lower bound is
    /// floored at [`MIN_SCALE_FLOOR`]. The current scale is *not* reclamped;
    /// that happens on the next gesture or
    /// [`TransformEngine::constrain_and_bounce_if_needed`].
    pub fn set_scale_bounds(&mut self, min_scale: f64, max_scale: f64) {
        if !min_scale.is_finite() || !max_scale.is_finite() {
            warn!(min_scale, max_scale, "ignoring non-finite scale bounds");
            return;
        }
        let (lo, hi) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = lo.max(MIN_SCALE_FLOOR);
        self.max_scale = hi.max(self.min_scale);
    }

    /// Replaces the transform immediately, clamping scale and translation.
    ///
    /// Cancels any in-flight animation.
    pub fn set_transform(&mut self, transform: Transform) {
        self.animation = None;
        let scale = if transform.scale.is_finite() {
            self.clamp_scale(transform.scale)
        } else {
            self.min_scale
        };
        self.transform = Transform::new(scale, transform.translate_x, transform.translate_y);
        self.clamp_translation();
        self.rebuild_matrices();
    }

    /// Multiplies the scale by `factor` around a screen-space focus point.
    ///
    /// The new scale is clamped into bounds and the translation adjusted so
    /// the scene point under `focus` stays under `focus`:
    /// `translate' = focus - (focus - translate) * (new / old)`.
    ///
    /// No-op (returning `false`) when the relative change is below
    /// [`SCALE_EPSILON`] or `factor` is not a positive finite number. Cancels
    /// any in-flight animation.
    pub fn apply_scale(&mut self, factor: f64, focus: Point) -> bool {
        self.animation = None;
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let old = self.transform.scale;
        let new = self.clamp_scale(old * factor);
        if ((new / old) - 1.0).abs() < SCALE_EPSILON {
            return false;
        }
        let ratio = new / old;
        self.transform = Transform::new(
            new,
            focus.x - (focus.x - self.transform.translate_x) * ratio,
            focus.y - (focus.y - self.transform.translate_y) * ratio,
        );
        self.clamp_translation();
        self.rebuild_matrices();
        true
    }

    /// Pans by a screen-space delta, then clamps. Cancels any in-flight animation.
    ///
    /// Returns `true` if the translation actually changed.
    pub fn apply_translation(&mut self, delta: Vec2) -> bool {
        self.animation = None;
        if delta == Vec2::ZERO || !delta.is_finite() {
            return false;
        }
        let before = self.transform.translation();
        self.transform.translate_x += delta.x;
        self.transform.translate_y += delta.y;
        self.clamp_translation();
        self.rebuild_matrices();
        self.transform.translation() != before
    }

    /// Starts an eased animation to `target`, replacing any in-flight one.
    ///
    /// A zero duration applies the target immediately. Targets with a
    /// non-positive or non-finite scale are ignored.
    pub fn animate_to(&mut self, target: Transform, duration_ms: f64) {
        if !target.is_invertible() || target.scale < 0.0 {
            warn!(?target, "ignoring animation to a non-invertible transform");
            return;
        }
        debug!(?target, duration_ms, "animate_to");
        let anim = Animation::new(self.transform, target, duration_ms);
        if anim.is_finished() {
            self.animation = None;
            self.transform = target;
            self.clamp_translation();
            self.rebuild_matrices();
        } else {
            self.animation = Some(anim);
        }
    }

    /// Cancels the in-flight animation, leaving the transform where it is.
    ///
    /// Returns `true` if an animation was running.
    pub fn cancel_animation(&mut self) -> bool {
        self.animation.take().is_some()
    }

    /// Advances the in-flight animation by `dt_ms`.
    ///
    /// Returns `true` while the animation still needs ticks.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let Some(anim) = self.animation.as_mut() else {
            return false;
        };
        self.transform = anim.advance(dt_ms);
        let finished = anim.is_finished();
        trace!(progress = anim.progress(), scale = self.transform.scale, "animation tick");
        if finished {
            self.animation = None;
        }
        self.clamp_translation();
        self.rebuild_matrices();
        !finished
    }

    /// The transform that fits the whole scene into the viewport, centered.
    ///
    /// The fit scale is `min(viewport_w / scene_w, viewport_h / scene_h)`,
    /// clamped into bounds. Returns `None` when the scene or the viewport is
    /// degenerate.
    #[must_use]
    pub fn fit_transform(&self) -> Option<Transform> {
        if !has_area(self.content) || !has_area(self.viewport) {
            return None;
        }
        let sx = self.viewport.width / self.content.width;
        let sy = self.viewport.height / self.content.height;
        let scale = self.clamp_scale(sx.min(sy));
        Some(Transform::new(
            scale,
            (self.viewport.width - self.content.width * scale) * 0.5,
            (self.viewport.height - self.content.height * scale) * 0.5,
        ))
    }

    /// Animates to [`TransformEngine::fit_transform`].
    ///
    /// No-op (returning `false`) for a degenerate scene or viewport; the scale
    /// stays at its last valid value.
    pub fn reset_to_fit_screen(&mut self, duration_ms: f64) -> bool {
        match self.fit_transform() {
            Some(fit) => {
                self.animate_to(fit, duration_ms);
                true
            }
            None => false,
        }
    }

    /// Target transform for zooming to `scale` anchored at a screen point.
    ///
    /// The scale is clamped into bounds and the translation clamped for the
    /// target scale, so animating to the result ends in a settled state.
    #[must_use]
    pub fn zoom_target(&self, scale: f64, focus: Point) -> Transform {
        let target = self.clamp_scale(scale);
        let ratio = target / self.transform.scale;
        let t = Vec2::new(
            focus.x - (focus.x - self.transform.translate_x) * ratio,
            focus.y - (focus.y - self.transform.translate_y) * ratio,
        );
        let t = self.clamped_translation_for(target, t);
        Transform::new(target, t.x, t.y)
    }

    /// If the scale is out of bounds, animates to the nearest bound.
    ///
    /// The snap-back is anchored at the viewport center. Returns `true` if an
    /// animation was started.
    pub fn constrain_and_bounce_if_needed(&mut self, duration_ms: f64) -> bool {
        if self.scale_in_bounds() {
            return false;
        }
        let center = Point::new(self.viewport.width * 0.5, self.viewport.height * 0.5);
        let target = self.zoom_target(self.transform.scale, center);
        debug!(from = self.transform.scale, to = target.scale, "bouncing scale back into bounds");
        self.animate_to(target, duration_ms);
        true
    }

    /// Restores an invertible transform after an invariant violation.
    ///
    /// Clamps the scale back to `min_scale` and cancels any animation.
    pub fn repair(&mut self) {
        warn!(scale = self.transform.scale, "repairing non-invertible transform");
        self.animation = None;
        self.transform.scale = self.min_scale;
        self.clamp_translation();
        self.rebuild_matrices();
    }

    /// Converts a screen point into the scene.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] if the scale ever reached zero.
    pub fn screen_to_scene(&self, pt: Point) -> Result<Point, TransformError> {
        if !self.transform.is_invertible() {
            return Err(TransformError::NonInvertible {
                scale: self.transform.scale,
            });
        }
        Ok(self.screen_to_scene * pt)
    }

    /// Converts a scene point to the screen.
    #[must_use]
    pub fn scene_to_screen(&self, pt: Point) -> Point {
        self.scene_to_screen * pt
    }

    /// The scene-space rectangle currently visible through the viewport.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] if the scale ever reached zero.
    pub fn visible_scene_rect(&self) -> Result<Rect, TransformError> {
        self.transform
            .screen_rect_to_scene(Rect::from_origin_size(Point::ORIGIN, self.viewport))
    }

    /// Takes the pending scale notification, if the scale or its bounds moved
    /// since the last call.
    pub fn take_scale_change(&mut self) -> Option<ScaleChanged> {
        let current = ScaleChanged {
            scale: self.transform.scale,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
        };
        if current == self.reported {
            return None;
        }
        self.reported = current;
        Some(current)
    }

    /// Snapshot of the current engine state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> TransformEngineDebugInfo {
        TransformEngineDebugInfo {
            transform: self.transform,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            viewport: self.viewport,
            content: self.content,
            visible_scene_rect: self.visible_scene_rect().ok(),
            animation: self.animation,
        }
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    fn clamped_translation_for(&self, scale: f64, t: Vec2) -> Vec2 {
        if !has_area(self.content) {
            return t;
        }
        Vec2::new(
            clamp_axis(t.x, self.viewport.width, self.content.width * scale),
            clamp_axis(t.y, self.viewport.height, self.content.height * scale),
        )
    }

    fn clamp_translation(&mut self) {
        let t = self.clamped_translation_for(self.transform.scale, self.transform.translation());
        self.transform.translate_x = t.x;
        self.transform.translate_y = t.y;
    }

    fn rebuild_matrices(&mut self) {
        self.scene_to_screen = self.transform.to_affine();
        if self.transform.is_invertible() {
            self.screen_to_scene = self.scene_to_screen.inverse();
        }
    }
}

/// Clamps one translation axis.
///
/// Oversized content may not reveal area outside the scene; undersized
/// content is pinned to the centered position.
fn clamp_axis(translate: f64, viewport: f64, content: f64) -> f64 {
    if content > viewport {
        translate.clamp(viewport - content, 0.0)
    } else {
        (viewport - content) * 0.5
    }
}

fn has_area(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0 && size.is_finite()
}

/// Debug snapshot of a [`TransformEngine`] state.
#[derive(Clone, Copy, Debug)]
pub struct TransformEngineDebugInfo {
    /// Current transform.
    pub transform: Transform,
    /// Minimum scale.
    pub min_scale: f64,
    /// Maximum scale.
    pub max_scale: f64,
    /// Viewport size in screen pixels.
    pub viewport: Size,
    /// Content size in scene units.
    pub content: Size,
    /// Scene-space rectangle visible through the viewport, if invertible.
    pub visible_scene_rect: Option<Rect>,
    /// In-flight animation, if any.
    pub animation: Option<Animation>,
}
