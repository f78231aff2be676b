// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait shared by the spatial indexing implementations.

use alloc::vec::Vec;

use crate::types::Aabb2D;

/// Spatial backend abstraction.
///
/// Slots are dense caller-chosen keys. Inserting an already occupied slot
/// replaces its box.
pub trait Backend {
    /// Insert (or replace) the box stored for `slot`.
    fn insert(&mut self, slot: usize, aabb: Aabb2D);

    /// Remove a slot. Removing an unknown slot is a no-op.
    fn remove(&mut self, slot: usize);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit slots whose box contains the point (closed containment).
    ///
    /// Visiting order is backend-specific.
    fn visit_point<F: FnMut(usize)>(&self, x: f64, y: f64, f: F);

    /// Visit slots whose box strictly intersects the rectangle.
    ///
    /// Visiting order is backend-specific.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D, f: F);

    /// Slots whose box contains the point, sorted ascending.
    fn query_point(&self, x: f64, y: f64) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_point(x, y, |i| out.push(i));
        out.sort_unstable();
        out
    }

    /// Slots whose box intersects the rectangle, sorted ascending.
    fn query_rect(&self, rect: Aabb2D) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_rect(rect, |i| out.push(i));
        out.sort_unstable();
        out
    }

    /// Lowest slot whose box contains the point, if any.
    ///
    /// This is the deterministic tie-break used for overlapping boxes.
    fn first_at_point(&self, x: f64, y: f64) -> Option<usize> {
        let mut best: Option<usize> = None;
        self.visit_point(x, y, |i| {
            if best.is_none_or(|b| i < b) {
                best = Some(i);
            }
        });
        best
    }
}
