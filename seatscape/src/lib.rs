// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seatscape: a headless interaction engine for very large 2D scenes.
//!
//! [`Engine`] ties the pieces together:
//! - a [`TransformEngine`] holding the scene ↔ screen mapping,
//! - a gesture router turning pointer and wheel input into pan, pinch zoom,
//!   taps and double taps,
//! - pan fling and zoom inertia from `seatscape_inertia`,
//! - culling, level of detail and hit testing from `seatscape_scene`.
//!
//! The host owns the clock and the frame loop. It forwards input with
//! millisecond timestamps, calls [`Engine::tick`] once per frame, draws what
//! [`Engine::cull`] returns under [`Engine::transform`], and drains
//! [`Engine::take_events`] for selection and scale notifications.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use seatscape::{Bounds, Engine, EngineEvent, Item, ItemId, Region, Scene};
//!
//! let scene = Scene::new("hall", 1000.0, 800.0)
//!     .with_scale_bounds(0.5, 5.0)
//!     .with_region(
//!         Region::new(1, "Stalls", Bounds::new(0.0, 0.0, 1000.0, 800.0))
//!             .with_item(Item::new(1, Bounds::new(10.0, 10.0, 20.0, 20.0))),
//!     );
//!
//! let mut engine = Engine::default();
//! engine.set_viewport(Size::new(500.0, 400.0));
//! engine.bind_scene(scene)?;
//! assert_eq!(engine.transform().scale, 0.5);
//!
//! // Tap the item: (10, 10) on screen is (20, 20) in the scene.
//! engine.on_pointer_down(0, Point::new(10.0, 10.0), 1_000);
//! engine.on_pointer_up(0, Point::new(10.0, 10.0), 1_050);
//! let selected = engine.take_events().into_iter().any(|e| {
//!     matches!(e, EngineEvent::SelectionChanged { id: ItemId(1), selected: true, .. })
//! });
//! assert!(selected);
//! # Ok::<(), seatscape::SceneError>(())
//! ```

mod config;
mod engine;
mod event;
mod router;

pub use config::{Config, GestureConfig};
pub use engine::{Engine, GesturePhase};
pub use event::EngineEvent;

pub use seatscape_event_state::pointers::PointerId;
pub use seatscape_scene::{
    Bounds, CullResult, DetailTier, FocalFeature, Hit, IndexConfig, Item, ItemId, ItemKey,
    ItemStatus, LodThresholds, Region, RegionId, Scene, SceneError, SpatialIndexMode,
    VisibleRegion,
};
pub use seatscape_view::{Transform, TransformEngine};
