// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: movement deltas, total offset, and maximum travel.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] when the pointer goes down.
//! 2) On each move, call [`DragState::update`] to get the delta since the last position.
//! 3) Use [`DragState::exceeded`] to decide whether the gesture left the tap slop.
//!    Travel is the farthest distance from the start seen so far, so moving out
//!    and back does not turn a pan back into a tap.
//! 4) Call [`DragState::end`] when the pointer lifts.

use kurbo::{Point, Vec2};

/// Tracks one pointer's drag across move events.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragState {
    origin: Option<Point>,
    last: Option<Point>,
    max_travel: f64,
}

impl DragState {
    /// Start tracking a new drag from `pos`, discarding any previous one.
    pub fn start(&mut self, pos: Point) {
        self.origin = Some(pos);
        self.last = Some(pos);
        self.max_travel = 0.0;
    }

    /// Record a new position, returning the delta since the previous one.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let origin = self.origin?;
        let last = self.last.replace(pos)?;
        self.max_travel = self.max_travel.max((pos - origin).hypot());
        Some(pos - last)
    }

    /// Offset of `current` from the drag start.
    #[must_use]
    pub fn total_offset(&self, current: Point) -> Option<Vec2> {
        self.origin.map(|origin| current - origin)
    }

    /// Farthest distance from the start seen so far.
    #[must_use]
    pub fn travel(&self) -> f64 {
        self.max_travel
    }

    /// Returns `true` once travel has gone beyond `slop`.
    #[must_use]
    pub fn exceeded(&self, slop: f64) -> bool {
        self.max_travel > slop
    }

    /// Where the drag started.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// Last recorded position.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.last
    }

    /// End the drag and reset state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle() {
        let mut drag = DragState::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.total_offset(Point::ORIGIN), None);
        assert_eq!(drag.travel(), 0.0);
    }

    #[test]
    fn updates_track_incremental_deltas() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));
        assert_eq!(drag.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(drag.update(Point::new(6.0, 7.0)), Some(Vec2::new(-2.0, 0.0)));
        assert_eq!(
            drag.total_offset(Point::new(6.0, 7.0)),
            Some(Vec2::new(6.0, 7.0))
        );
    }

    #[test]
    fn travel_remembers_farthest_excursion() {
        let mut drag = DragState::default();
        drag.start(Point::new(100.0, 100.0));
        drag.update(Point::new(112.0, 100.0));
        drag.update(Point::new(101.0, 100.0));
        assert_eq!(drag.travel(), 12.0);
        assert!(drag.exceeded(8.0));
        assert!(!drag.exceeded(12.0));
    }

    #[test]
    fn start_overwrites_previous_drag() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));
        drag.update(Point::new(30.0, 0.0));

        drag.start(Point::new(50.0, 60.0));
        assert_eq!(drag.travel(), 0.0);
        assert_eq!(drag.origin(), Some(Point::new(50.0, 60.0)));
        assert_eq!(drag.last(), Some(Point::new(50.0, 60.0)));
    }

    #[test]
    fn end_resets_state() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 20.0));
        drag.update(Point::new(15.0, 25.0));
        drag.end();
        assert_eq!(drag, DragState::default());
    }
}
