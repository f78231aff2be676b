// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seatscape Index: axis-aligned bounding box index with point and rectangle queries.
//!
//! The index stores one [`Aabb2D`] per caller-chosen *slot* (a dense `usize`
//! key, typically the position of an item in some flattened order) and answers
//! two questions quickly:
//! - Which slots contain a point? (hit testing)
//! - Which slots intersect a rectangle? (viewport culling)
//!
//! Two backends implement the [`Backend`] trait:
//! - [`FlatVec`]: a linear scan. Tiny, obviously correct, and a good reference.
//! - [`QuadTree`]: an arena of nodes addressed by index with a fixed branching
//!   factor of four, a maximum number of objects per node and a maximum depth.
//!
//! Both backends return *exactly* the slots whose boxes satisfy the query,
//! independent of insertion order. The `query_*` helpers sort their output by
//! slot so callers get a deterministic order as well.
//!
//! ## Minimal example
//!
//! ```rust
//! use seatscape_index::{Aabb2D, Backend, QuadTree, QuadTreeConfig};
//!
//! let world = Aabb2D::from_xywh(0.0, 0.0, 1000.0, 800.0);
//! let mut tree = QuadTree::new(world, QuadTreeConfig::default());
//!
//! tree.insert(0, Aabb2D::from_xywh(10.0, 10.0, 20.0, 20.0));
//! tree.insert(1, Aabb2D::from_xywh(500.0, 400.0, 20.0, 20.0));
//!
//! assert_eq!(tree.query_point(20.0, 20.0), vec![0]);
//! assert_eq!(tree.query_rect(Aabb2D::from_xywh(0.0, 0.0, 1000.0, 800.0)), vec![0, 1]);
//! ```
//!
//! Intersection tests are strict (boxes that merely touch along an edge do not
//! intersect) while point containment is closed (points on the boundary are
//! inside). See [`Aabb2D::intersects`] and [`Aabb2D::contains_point`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
mod backends;
mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::quadtree::{QuadTree, QuadTreeConfig, QuadTreeStats};
pub use types::Aabb2D;
