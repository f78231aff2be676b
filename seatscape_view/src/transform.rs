// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

use crate::error::TransformError;

/// Uniform scale plus translation mapping scene coordinates to screen coordinates.
///
/// `screen = scene * scale + translate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Horizontal translation in screen pixels.
    pub translate_x: f64,
    /// Vertical translation in screen pixels.
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Scale 1, no translation.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0);

    /// Creates a transform from its components.
    #[must_use]
    pub const fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// Translation as a vector.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    /// Returns `true` if the transform can be inverted.
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        self.scale.is_finite() && self.scale != 0.0
    }

    /// The scene → screen matrix, for renderers.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation()) * Affine::scale(self.scale)
    }

    /// Maps a scene point to the screen.
    #[must_use]
    pub fn scene_to_screen(&self, pt: Point) -> Point {
        Point::new(
            pt.x * self.scale + self.translate_x,
            pt.y * self.scale + self.translate_y,
        )
    }

    /// Maps a screen point into the scene.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] when the scale is zero or not finite.
    pub fn screen_to_scene(&self, pt: Point) -> Result<Point, TransformError> {
        if !self.is_invertible() {
            return Err(TransformError::NonInvertible { scale: self.scale });
        }
        Ok(Point::new(
            (pt.x - self.translate_x) / self.scale,
            (pt.y - self.translate_y) / self.scale,
        ))
    }

    /// Maps a screen rectangle into the scene.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] when the scale is zero or not finite.
    pub fn screen_rect_to_scene(&self, rect: Rect) -> Result<Rect, TransformError> {
        let p0 = self.screen_to_scene(Point::new(rect.x0, rect.y0))?;
        let p1 = self.screen_to_scene(Point::new(rect.x1, rect.y1))?;
        Ok(Rect::from_points(p0, p1))
    }

    /// Linear interpolation between two transforms.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.scale + (other.scale - self.scale) * t,
            self.translate_x + (other.translate_x - self.translate_x) * t,
            self.translate_y + (other.translate_y - self.translate_y) * t,
        )
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::Transform;
    use crate::TransformError;

    #[test]
    fn affine_agrees_with_point_mapping() {
        let t = Transform::new(2.5, 30.0, -12.0);
        let p = Point::new(7.0, 11.0);
        let a = t.to_affine() * p;
        let b = t.scene_to_screen(p);
        assert!((a - b).hypot() < 1e-12);
    }

    #[test]
    fn zero_scale_is_not_invertible() {
        let t = Transform::new(0.0, 1.0, 1.0);
        assert_eq!(
            t.screen_to_scene(Point::ORIGIN),
            Err(TransformError::NonInvertible { scale: 0.0 })
        );
    }

    #[test]
    fn screen_rect_maps_to_scene_rect() {
        let t = Transform::new(0.5, 10.0, 20.0);
        let r = t
            .screen_rect_to_scene(Rect::new(10.0, 20.0, 510.0, 420.0))
            .unwrap();
        assert_eq!(r, Rect::new(0.0, 0.0, 1000.0, 800.0));
    }
}
