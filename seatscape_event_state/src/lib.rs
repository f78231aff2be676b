// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seatscape Event State: pointer bookkeeping for gesture recognition.
//!
//! This crate provides small, focused state holders that a gesture router
//! composes. Each tracks just enough state across pointer events to answer one
//! question:
//!
//! - [`drag`]: How far has the pointer moved since the last event, and how far
//!   did it ever stray from where it went down?
//! - [`pointers`]: Which pointers are down, and what are the span and midpoint
//!   of a two-finger pinch?
//! - [`velocity`]: How fast was the pointer moving when it was released?
//! - [`tap`]: Is this tap the second half of a double tap?
//!
//! None of them interpret gestures or touch a transform. Timestamps are
//! milliseconds on the caller's clock, so every state holder is deterministic
//! under test.
//!
//! ## Usage Patterns
//!
//! ### Drag and tap slop
//!
//! ```rust
//! use kurbo::Point;
//! use seatscape_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 10.0));
//!
//! // Wiggle within an 8 px slop: still a tap candidate.
//! drag.update(Point::new(14.0, 13.0));
//! assert!(!drag.exceeded(8.0));
//!
//! // Travel beyond the slop: now it is a pan.
//! let delta = drag.update(Point::new(30.0, 13.0)).unwrap();
//! assert_eq!(delta.x, 16.0);
//! assert!(drag.exceeded(8.0));
//! ```
//!
//! ### Pinch geometry
//!
//! ```rust
//! use kurbo::Point;
//! use seatscape_event_state::pointers::PointerSet;
//!
//! let mut pointers = PointerSet::new();
//! pointers.down(1, Point::new(100.0, 100.0));
//! pointers.down(2, Point::new(200.0, 100.0));
//! assert_eq!(pointers.span(), Some(100.0));
//! assert_eq!(pointers.midpoint(), Some(Point::new(150.0, 100.0)));
//! ```
//!
//! ### Release velocity
//!
//! ```rust
//! use kurbo::Point;
//! use seatscape_event_state::velocity::VelocityTracker;
//!
//! let mut tracker = VelocityTracker::new(100, 8_000.0);
//! tracker.push(0, Point::new(0.0, 0.0));
//! tracker.push(50, Point::new(50.0, 0.0));
//! assert_eq!(tracker.velocity().x, 1000.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` float math.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod drag;
pub mod pointers;
pub mod tap;
pub mod velocity;
