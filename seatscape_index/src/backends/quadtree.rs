// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad-tree backend stored as an arena of nodes addressed by index.
//!
//! Each node covers a rectangle of the tree bounds. A box is stored at the
//! deepest node whose rectangle fully contains it; boxes that straddle a
//! quadrant boundary stay in the parent. A leaf splits into four children once
//! it holds more than [`QuadTreeConfig::max_objects`] boxes, unless it already
//! sits at [`QuadTreeConfig::max_depth`].
//!
//! Boxes lying (partly) outside the tree bounds are kept at the root, whose
//! contents are tested on every query, so queries stay exact for any input.

use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Tuning knobs for [`QuadTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuadTreeConfig {
    /// Number of boxes a leaf holds before it splits.
    pub max_objects: usize,
    /// Maximum node depth; the root is depth 0.
    pub max_depth: u8,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_objects: 16,
            max_depth: 10,
        }
    }
}

/// Shape statistics for a [`QuadTree`], mostly for debugging and benchmarks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuadTreeStats {
    /// Number of nodes in the arena.
    pub nodes: usize,
    /// Number of leaf nodes.
    pub leaves: usize,
    /// Deepest node depth in use.
    pub depth: u8,
    /// Largest number of boxes stored in a single node.
    pub max_node_len: usize,
}

const NO_CHILDREN: u32 = u32::MAX;

#[derive(Clone, Debug)]
struct Node {
    bounds: Aabb2D,
    depth: u8,
    /// Index of the first of four contiguous children, or `NO_CHILDREN`.
    first_child: u32,
    slots: SmallVec<[usize; 8]>,
}

impl Node {
    fn new(bounds: Aabb2D, depth: u8) -> Self {
        Self {
            bounds,
            depth,
            first_child: NO_CHILDREN,
            slots: SmallVec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.first_child == NO_CHILDREN
    }
}

/// Arena quad-tree backend.
#[derive(Clone)]
pub struct QuadTree {
    config: QuadTreeConfig,
    nodes: Vec<Node>,
    entries: Vec<Option<Aabb2D>>,
    len: usize,
}

impl Debug for QuadTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.bounds())
            .field("config", &self.config)
            .field("nodes", &self.nodes.len())
            .field("alive", &self.len)
            .finish_non_exhaustive()
    }
}

impl QuadTree {
    /// Creates an empty tree covering `bounds`.
    #[must_use]
    pub fn new(bounds: Aabb2D, config: QuadTreeConfig) -> Self {
        let config = QuadTreeConfig {
            max_objects: config.max_objects.max(1),
            max_depth: config.max_depth,
        };
        let mut nodes = Vec::new();
        nodes.push(Node::new(bounds, 0));
        Self {
            config,
            nodes,
            entries: Vec::new(),
            len: 0,
        }
    }

    /// Bounds covered by the root node.
    #[must_use]
    pub fn bounds(&self) -> Aabb2D {
        self.nodes[0].bounds
    }

    /// The configuration this tree was built with.
    #[must_use]
    pub fn config(&self) -> QuadTreeConfig {
        self.config
    }

    /// Computes shape statistics.
    #[must_use]
    pub fn stats(&self) -> QuadTreeStats {
        let mut stats = QuadTreeStats {
            nodes: self.nodes.len(),
            ..QuadTreeStats::default()
        };
        for node in &self.nodes {
            if node.is_leaf() {
                stats.leaves += 1;
            }
            stats.depth = stats.depth.max(node.depth);
            stats.max_node_len = stats.max_node_len.max(node.slots.len());
        }
        stats
    }

    /// Follows the containment path for `aabb` and returns the node that holds it.
    fn home_node(&self, aabb: &Aabb2D) -> usize {
        let mut idx = 0;
        if !self.nodes[0].bounds.contains(aabb) {
            return idx;
        }
        loop {
            let node = &self.nodes[idx];
            if node.is_leaf() {
                return idx;
            }
            let first = node.first_child as usize;
            match (first..first + 4).find(|&c| self.nodes[c].bounds.contains(aabb)) {
                Some(child) => idx = child,
                None => return idx,
            }
        }
    }

    fn split(&mut self, idx: usize) {
        let bounds = self.nodes[idx].bounds;
        let depth = self.nodes[idx].depth + 1;
        let Ok(first) = u32::try_from(self.nodes.len()) else {
            return;
        };
        for q in 0..4 {
            self.nodes.push(Node::new(bounds.quadrant(q), depth));
        }
        self.nodes[idx].first_child = first;

        let slots = core::mem::take(&mut self.nodes[idx].slots);
        let first = first as usize;
        for slot in slots {
            let Some(aabb) = self.entries.get(slot).copied().flatten() else {
                continue;
            };
            let target = (first..first + 4)
                .find(|&c| self.nodes[c].bounds.contains(&aabb))
                .unwrap_or(idx);
            self.nodes[target].slots.push(slot);
        }

        for child in first..first + 4 {
            self.maybe_split(child);
        }
    }

    fn maybe_split(&mut self, idx: usize) {
        let node = &self.nodes[idx];
        if node.is_leaf()
            && node.slots.len() > self.config.max_objects
            && node.depth < self.config.max_depth
            && !node.bounds.is_empty()
        {
            self.split(idx);
        }
    }

    /// Visits nodes that may hold matches, using `prune` to reject subtrees.
    fn visit_nodes<P, F>(&self, prune: P, mut f: F)
    where
        P: Fn(&Aabb2D) -> bool,
        F: FnMut(&Node),
    {
        let mut stack: SmallVec<[usize; 32]> = SmallVec::new();
        stack.push(0);
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            // The root may hold out-of-bounds boxes, so it is never pruned.
            if idx != 0 && prune(&node.bounds) {
                continue;
            }
            f(node);
            if !node.is_leaf() {
                let first = node.first_child as usize;
                stack.extend(first..first + 4);
            }
        }
    }
}

impl Backend for QuadTree {
    fn insert(&mut self, slot: usize, aabb: Aabb2D) {
        if self.entries.get(slot).is_some_and(Option::is_some) {
            self.remove(slot);
        }
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot] = Some(aabb);
        self.len += 1;

        let home = self.home_node(&aabb);
        self.nodes[home].slots.push(slot);
        self.maybe_split(home);
    }

    fn remove(&mut self, slot: usize) {
        let Some(aabb) = self.entries.get_mut(slot).and_then(Option::take) else {
            return;
        };
        let home = self.home_node(&aabb);
        self.nodes[home].slots.retain(|s| *s != slot);
        self.len -= 1;
    }

    fn clear(&mut self) {
        let bounds = self.bounds();
        self.nodes.clear();
        self.nodes.push(Node::new(bounds, 0));
        self.entries.clear();
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn visit_point<F: FnMut(usize)>(&self, x: f64, y: f64, mut f: F) {
        self.visit_nodes(
            |b| !b.contains_point(x, y),
            |node| {
                for &slot in &node.slots {
                    if let Some(a) = self.entries[slot]
                        && a.contains_point(x, y)
                    {
                        f(slot);
                    }
                }
            },
        );
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D, mut f: F) {
        self.visit_nodes(
            |b| !b.touches(&rect),
            |node| {
                for &slot in &node.slots {
                    if let Some(a) = self.entries[slot]
                        && a.intersects(&rect)
                    {
                        f(slot);
                    }
                }
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(tree: &mut QuadTree, n: usize, cell: f64) {
        for y in 0..n {
            for x in 0..n {
                let slot = y * n + x;
                tree.insert(
                    slot,
                    Aabb2D::from_xywh(x as f64 * cell + 1.0, y as f64 * cell + 1.0, 8.0, 8.0),
                );
            }
        }
    }

    #[test]
    fn splits_once_capacity_is_exceeded() {
        let config = QuadTreeConfig {
            max_objects: 4,
            max_depth: 6,
        };
        let mut tree = QuadTree::new(Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0), config);
        grid(&mut tree, 10, 10.0);

        let stats = tree.stats();
        assert!(stats.nodes > 1, "tree should have split: {stats:?}");
        assert!(stats.depth <= 6);
        assert_eq!(tree.len(), 100);
    }

    #[test]
    fn depth_limit_is_respected_for_stacked_boxes() {
        let config = QuadTreeConfig {
            max_objects: 1,
            max_depth: 3,
        };
        let mut tree = QuadTree::new(Aabb2D::from_xywh(0.0, 0.0, 64.0, 64.0), config);
        for slot in 0..50 {
            tree.insert(slot, Aabb2D::from_xywh(1.0, 1.0, 2.0, 2.0));
        }
        let stats = tree.stats();
        assert_eq!(stats.depth, 3);
        assert_eq!(tree.query_point(2.0, 2.0).len(), 50);
    }

    #[test]
    fn straddling_boxes_stay_in_parent_and_are_reported_once() {
        let config = QuadTreeConfig {
            max_objects: 1,
            max_depth: 4,
        };
        let mut tree = QuadTree::new(Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0), config);
        tree.insert(0, Aabb2D::from_xywh(45.0, 45.0, 10.0, 10.0));
        tree.insert(1, Aabb2D::from_xywh(1.0, 1.0, 2.0, 2.0));
        tree.insert(2, Aabb2D::from_xywh(60.0, 60.0, 2.0, 2.0));

        let hits = tree.query_rect(Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0));
        assert_eq!(hits, [0, 1, 2]);
        assert_eq!(tree.query_point(50.0, 50.0), [0]);
    }

    #[test]
    fn out_of_bounds_boxes_remain_queryable() {
        let mut tree = QuadTree::new(
            Aabb2D::from_xywh(0.0, 0.0, 10.0, 10.0),
            QuadTreeConfig::default(),
        );
        tree.insert(7, Aabb2D::from_xywh(500.0, 500.0, 5.0, 5.0));
        assert_eq!(tree.query_point(502.0, 502.0), [7]);
        assert_eq!(
            tree.query_rect(Aabb2D::from_xywh(490.0, 490.0, 20.0, 20.0)),
            [7]
        );
    }

    #[test]
    fn remove_and_reinsert_move_a_slot() {
        let mut tree = QuadTree::new(
            Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0),
            QuadTreeConfig {
                max_objects: 2,
                max_depth: 5,
            },
        );
        grid(&mut tree, 5, 20.0);
        tree.insert(0, Aabb2D::from_xywh(90.0, 90.0, 5.0, 5.0));
        assert_eq!(tree.len(), 25);
        assert!(tree.query_point(2.0, 2.0).is_empty());
        assert!(tree.query_point(92.0, 92.0).contains(&0));

        tree.remove(0);
        assert_eq!(tree.len(), 24);
        assert!(!tree.query_point(92.0, 92.0).contains(&0));
    }

    #[test]
    fn clear_keeps_bounds() {
        let bounds = Aabb2D::from_xywh(0.0, 0.0, 100.0, 100.0);
        let mut tree = QuadTree::new(bounds, QuadTreeConfig::default());
        grid(&mut tree, 8, 10.0);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.bounds(), bounds);
        assert_eq!(tree.stats().nodes, 1);
    }
}
