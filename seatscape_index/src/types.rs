// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Axis-aligned bounding box with `f64` coordinates.
///
/// Boxes are stored as min/max corners. A box whose max is not greater than
/// its min on either axis is *empty*. Empty boxes still contain their boundary
/// points, and a zero-size box strictly inside another box intersects it; one
/// lying on the other box's edge does not.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb2D {
    /// Left edge.
    pub min_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Right edge.
    pub max_x: f64,
    /// Bottom edge.
    pub max_y: f64,
}

impl Aabb2D {
    /// Creates a box from its min and max corners.
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a box from an origin and a size.
    #[must_use]
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Width of the box (may be zero or negative for degenerate input).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box (may be zero or negative for degenerate input).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns `true` if the box has no interior.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.max_x > self.min_x && self.max_y > self.min_y)
    }

    /// Strict intersection test.
    ///
    /// `a.left < b.right && b.left < a.right && a.top < b.bottom && b.top < a.bottom`.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Closed overlap test: like [`Aabb2D::intersects`] but touching edges count.
    #[must_use]
    pub fn touches(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Closed point containment: `x ∈ [min_x, max_x] && y ∈ [min_y, max_y]`.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Returns `true` if `other` lies entirely within `self` (edges included).
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Returns one of the four quadrants of this box.
    ///
    /// Quadrants are numbered row-major: 0 = top-left, 1 = top-right,
    /// 2 = bottom-left, 3 = bottom-right.
    #[must_use]
    pub fn quadrant(&self, index: usize) -> Self {
        let (cx, cy) = self.center();
        match index & 3 {
            0 => Self::new(self.min_x, self.min_y, cx, cy),
            1 => Self::new(cx, self.min_y, self.max_x, cy),
            2 => Self::new(self.min_x, cy, cx, self.max_y),
            _ => Self::new(cx, cy, self.max_x, self.max_y),
        }
    }

    /// Smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2D;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Aabb2D::from_xywh(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.touches(&b));
    }

    #[test]
    fn overlapping_boxes_intersect_symmetrically() {
        let a = Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Aabb2D::from_xywh(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn point_containment_is_closed() {
        let a = Aabb2D::from_xywh(10.0, 10.0, 20.0, 20.0);
        assert!(a.contains_point(10.0, 10.0));
        assert!(a.contains_point(30.0, 30.0));
        assert!(a.contains_point(20.0, 20.0));
        assert!(!a.contains_point(30.000_001, 20.0));
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let a = Aabb2D::from_xywh(0.0, 0.0, 100.0, 50.0);
        let q = [a.quadrant(0), a.quadrant(1), a.quadrant(2), a.quadrant(3)];
        assert_eq!(q[0], Aabb2D::new(0.0, 0.0, 50.0, 25.0));
        assert_eq!(q[3], Aabb2D::new(50.0, 25.0, 100.0, 50.0));
        let joined = q.iter().fold(q[0], |acc, b| acc.union(b));
        assert_eq!(joined, a);
    }

    #[test]
    fn empty_box_intersects_only_from_the_interior() {
        let outer = Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0);
        let inside = Aabb2D::from_xywh(5.0, 5.0, 0.0, 0.0);
        assert!(inside.is_empty());
        assert!(inside.contains_point(5.0, 5.0));
        assert!(inside.intersects(&outer));
        assert!(outer.intersects(&inside));

        let on_edge = Aabb2D::from_xywh(10.0, 5.0, 0.0, 0.0);
        assert!(!on_edge.intersects(&outer));
        assert!(!outer.intersects(&on_edge));
        assert!(on_edge.touches(&outer));
    }
}
