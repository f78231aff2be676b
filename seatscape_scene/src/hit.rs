// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit testing against item bounds.
//!
//! Containment is closed, so a point on an edge shared by two items hits both;
//! the tie is broken by the lowest [`ItemKey`] (region order, then item order).
//! Region bounds are not used for pruning since they are only hints.

use kurbo::Point;

use crate::index::SceneIndex;
use crate::model::{ItemKey, ItemStatus, Scene};

/// Outcome of a hit test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// A selectable item.
    Selectable(ItemKey),
    /// An item that exists but cannot be selected.
    Unavailable(ItemKey, ItemStatus),
    /// No item under the point.
    Miss,
}

/// Hit tester over a scene, using the spatial index when one is available.
#[derive(Clone, Copy, Debug)]
pub struct HitTester<'a> {
    scene: &'a Scene,
    index: Option<&'a SceneIndex>,
}

impl<'a> HitTester<'a> {
    /// Creates a hit tester.
    #[must_use]
    pub fn new(scene: &'a Scene, index: Option<&'a SceneIndex>) -> Self {
        Self { scene, index }
    }

    /// The first item (in key order) whose bounds contain `pt`.
    #[must_use]
    pub fn find_item_at(&self, pt: Point) -> Option<ItemKey> {
        if let Some(index) = self.index {
            return index.first_at(pt);
        }
        self.scene
            .items()
            .find(|(_, item)| item.bounds.contains(pt))
            .map(|(key, _)| key)
    }

    /// Classifies the item under `pt`.
    #[must_use]
    pub fn hit(&self, pt: Point) -> Hit {
        let Some(key) = self.find_item_at(pt) else {
            return Hit::Miss;
        };
        match self.scene.item(key).map(|item| item.status) {
            Some(ItemStatus::Selectable) => Hit::Selectable(key),
            Some(status) => Hit::Unavailable(key, status),
            None => Hit::Miss,
        }
    }
}
