// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active pointer set with two-finger pinch geometry.
//!
//! Pointers are kept in the order they went down. Pinch geometry (span and
//! midpoint) always uses the two oldest pointers, so a third finger landing
//! mid-pinch does not disturb it.

use kurbo::Point;
use smallvec::SmallVec;

/// Host-assigned pointer identifier.
pub type PointerId = u64;

/// Pointers currently in contact, oldest first.
#[derive(Clone, Debug, Default)]
pub struct PointerSet {
    active: SmallVec<[(PointerId, Point); 4]>,
}

impl PointerSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pointer going down, returning the new count.
    ///
    /// A repeated `down` for a known id just moves it.
    pub fn down(&mut self, id: PointerId, pos: Point) -> usize {
        if !self.move_to(id, pos) {
            self.active.push((id, pos));
        }
        self.active.len()
    }

    /// Updates a known pointer's position. Returns `false` for unknown ids.
    pub fn move_to(&mut self, id: PointerId, pos: Point) -> bool {
        match self.active.iter_mut().find(|(p, _)| *p == id) {
            Some(entry) => {
                entry.1 = pos;
                true
            }
            None => false,
        }
    }

    /// Removes a pointer, returning its last position.
    pub fn up(&mut self, id: PointerId) -> Option<Point> {
        let idx = self.active.iter().position(|(p, _)| *p == id)?;
        Some(self.active.remove(idx).1)
    }

    /// Forgets every pointer.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Number of pointers down.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns `true` when no pointer is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Positions of the two oldest pointers.
    #[must_use]
    pub fn pair(&self) -> Option<(Point, Point)> {
        match self.active.as_slice() {
            [(_, a), (_, b), ..] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Distance between the two oldest pointers.
    #[must_use]
    pub fn span(&self) -> Option<f64> {
        self.pair().map(|(a, b)| (b - a).hypot())
    }

    /// Midpoint of the two oldest pointers.
    #[must_use]
    pub fn midpoint(&self) -> Option<Point> {
        self.pair().map(|(a, b)| a.midpoint(b))
    }
}
