// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seatscape Scene: the plane, its regions and items, and the queries run over them.
//!
//! - [`Scene`]: regions of [`Item`]s inside `[0, width] × [0, height]`, plus an
//!   optional [`FocalFeature`]. Serializable with `serde`, checked with
//!   [`Scene::validate`].
//! - [`Culler`]: picks a [`DetailTier`] from the scale and returns the regions
//!   and items intersecting the visible rectangle.
//! - [`HitTester`]: finds the item under a scene-space point.
//!
//! Both queries can run over a linear scan or over a [`SceneIndex`] (a
//! quad-tree from `seatscape_index`); the two paths return identical results.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use seatscape_scene::{Bounds, Culler, Hit, HitTester, Item, ItemKey, Region, Scene};
//!
//! let scene = Scene::new("hall", 1000.0, 800.0).with_region(
//!     Region::new(1, "Stalls", Bounds::new(0.0, 0.0, 500.0, 400.0))
//!         .with_item(Item::new(1, Bounds::new(10.0, 10.0, 20.0, 20.0))),
//! );
//! scene.validate().unwrap();
//!
//! let hits = HitTester::new(&scene, None);
//! assert_eq!(hits.hit(Point::new(20.0, 20.0)), Hit::Selectable(ItemKey::new(0, 0)));
//!
//! let culled = Culler::default().cull(&scene, Rect::new(0.0, 0.0, 100.0, 100.0), 1.0);
//! assert_eq!(culled.item_total(), 1);
//! ```

mod cull;
mod error;
mod hit;
mod index;
mod model;

pub use cull::{CullResult, Culler, DetailTier, LodThresholds, VisibleRegion};
pub use error::SceneError;
pub use hit::{Hit, HitTester};
pub use index::{IndexConfig, SceneIndex, SpatialIndexMode};
pub use model::{
    Bounds, FocalFeature, Item, ItemId, ItemKey, ItemStatus, Region, RegionId, Scene,
};
