// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional quad-tree over every item of a scene.

use kurbo::{Point, Rect};
use seatscape_index::{Aabb2D, Backend, QuadTree, QuadTreeConfig, QuadTreeStats};
use tracing::debug;

use crate::model::{ItemKey, Scene};

/// When to build a [`SceneIndex`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpatialIndexMode {
    /// Always scan linearly.
    Never,
    /// Always build the index.
    Always,
    /// Build the index once the scene holds at least the threshold number of items.
    #[default]
    Auto,
}

/// Spatial index settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// When to build.
    pub mode: SpatialIndexMode,
    /// Item count at which [`SpatialIndexMode::Auto`] builds the index.
    pub auto_threshold: usize,
    /// Quad-tree tuning.
    pub quadtree: QuadTreeConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            mode: SpatialIndexMode::Auto,
            auto_threshold: 20_000,
            quadtree: QuadTreeConfig::default(),
        }
    }
}

impl IndexConfig {
    /// Returns `true` if a scene with `item_count` items should be indexed.
    #[must_use]
    pub fn wants_index(&self, item_count: usize) -> bool {
        match self.mode {
            SpatialIndexMode::Never => false,
            SpatialIndexMode::Always => true,
            SpatialIndexMode::Auto => item_count >= self.auto_threshold,
        }
    }
}

/// Quad-tree of item bounds, addressed by slot.
///
/// Slots are assigned in region-then-item order, so ascending slot order is
/// the same as ascending [`ItemKey`] order.
#[derive(Clone, Debug)]
pub struct SceneIndex {
    tree: QuadTree,
    keys: Vec<ItemKey>,
}

impl SceneIndex {
    /// Indexes every item of `scene`.
    #[must_use]
    pub fn build(scene: &Scene, config: QuadTreeConfig) -> Self {
        let world = Aabb2D::from_xywh(0.0, 0.0, scene.width(), scene.height());
        let mut tree = QuadTree::new(world, config);
        let mut keys = Vec::with_capacity(scene.item_count());
        for (key, item) in scene.items() {
            tree.insert(keys.len(), item.bounds.to_aabb());
            keys.push(key);
        }
        let stats = tree.stats();
        debug!(
            items = keys.len(),
            nodes = stats.nodes,
            depth = stats.depth,
            "built scene index"
        );
        Self { tree, keys }
    }

    /// Builds an index if `config` asks for one at this scene size.
    #[must_use]
    pub fn build_for(scene: &Scene, config: &IndexConfig) -> Option<Self> {
        config
            .wants_index(scene.item_count())
            .then(|| Self::build(scene, config.quadtree))
    }

    /// Number of indexed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Tree shape, for diagnostics.
    #[must_use]
    pub fn stats(&self) -> QuadTreeStats {
        self.tree.stats()
    }

    /// Keys of items strictly intersecting `rect`, in ascending key order.
    #[must_use]
    pub fn query_rect(&self, rect: Rect) -> Vec<ItemKey> {
        let aabb = Aabb2D::new(rect.x0, rect.y0, rect.x1, rect.y1);
        self.tree
            .query_rect(aabb)
            .into_iter()
            .filter_map(|slot| self.keys.get(slot).copied())
            .collect()
    }

    /// Lowest key whose item contains `pt` (closed containment).
    #[must_use]
    pub fn first_at(&self, pt: Point) -> Option<ItemKey> {
        self.tree
            .first_at_point(pt.x, pt.y)
            .and_then(|slot| self.keys.get(slot).copied())
    }
}
