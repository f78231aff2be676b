// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
///
/// Visits slots in ascending order, so the first visited match is also the
/// lowest slot.
#[derive(Clone, Default)]
pub struct FlatVec {
    entries: Vec<Option<Aabb2D>>,
    len: usize,
}

impl FlatVec {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty backend with room for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            len: 0,
        }
    }
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("total_slots", &self.entries.len())
            .field("alive", &self.len)
            .finish_non_exhaustive()
    }
}

impl Backend for FlatVec {
    fn insert(&mut self, slot: usize, aabb: Aabb2D) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        if self.entries[slot].replace(aabb).is_none() {
            self.len += 1;
        }
    }

    fn remove(&mut self, slot: usize) {
        if let Some(e) = self.entries.get_mut(slot)
            && e.take().is_some()
        {
            self.len -= 1;
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn visit_point<F: FnMut(usize)>(&self, x: f64, y: f64, mut f: F) {
        for (i, slot) in self.entries.iter().enumerate() {
            if let Some(a) = slot.as_ref()
                && a.contains_point(x, y)
            {
                f(i);
            }
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D, mut f: F) {
        for (i, slot) in self.entries.iter().enumerate() {
            if let Some(a) = slot.as_ref()
                && a.intersects(&rect)
            {
                f(i);
            }
        }
    }

    fn first_at_point(&self, x: f64, y: f64) -> Option<usize> {
        self.entries
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|a| a.contains_point(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replace_and_remove_track_len() {
        let mut v = FlatVec::new();
        v.insert(3, Aabb2D::from_xywh(0.0, 0.0, 1.0, 1.0));
        v.insert(3, Aabb2D::from_xywh(5.0, 5.0, 1.0, 1.0));
        assert_eq!(v.len(), 1);
        assert_eq!(v.query_point(5.5, 5.5), [3]);
        assert!(v.query_point(0.5, 0.5).is_empty());

        v.remove(3);
        v.remove(3);
        assert!(v.is_empty());
    }

    #[test]
    fn first_at_point_prefers_lowest_slot() {
        let mut v = FlatVec::new();
        v.insert(2, Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0));
        v.insert(1, Aabb2D::from_xywh(5.0, 5.0, 10.0, 10.0));
        assert_eq!(v.first_at_point(7.0, 7.0), Some(1));
        assert_eq!(v.first_at_point(1.0, 1.0), Some(2));
        assert_eq!(v.first_at_point(100.0, 1.0), None);
    }
}
