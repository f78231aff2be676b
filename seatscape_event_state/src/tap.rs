// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single versus double tap recognition.
//!
//! A tap is "double" when it lands within `timeout_ms` and `slop_px` of the
//! previous single tap. A recognized double tap consumes the pair, so a third
//! quick tap starts a fresh sequence.

use kurbo::Point;

/// Kind of tap just recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapKind {
    /// First tap of a potential sequence.
    Single,
    /// Second tap completing a double tap.
    Double,
}

/// Remembers the last single tap.
#[derive(Clone, Copy, Debug)]
pub struct TapState {
    timeout_ms: u64,
    slop_px: f64,
    last: Option<(u64, Point)>,
}

impl TapState {
    /// Creates a recognizer with the given time and distance windows.
    #[must_use]
    pub fn new(timeout_ms: u64, slop_px: f64) -> Self {
        Self {
            timeout_ms,
            slop_px,
            last: None,
        }
    }

    /// Classifies a tap at `pos` and `timestamp_ms`.
    pub fn register(&mut self, timestamp_ms: u64, pos: Point) -> TapKind {
        let is_double = self.last.is_some_and(|(t, p)| {
            timestamp_ms >= t
                && timestamp_ms - t <= self.timeout_ms
                && (pos - p).hypot() <= self.slop_px
        });
        if is_double {
            self.last = None;
            TapKind::Double
        } else {
            self.last = Some((timestamp_ms, pos));
            TapKind::Single
        }
    }

    /// Forgets the pending single tap.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{TapKind, TapState};

    #[test]
    fn quick_nearby_second_tap_is_double() {
        let mut taps = TapState::new(300, 100.0);
        assert_eq!(taps.register(1_000, Point::new(10.0, 10.0)), TapKind::Single);
        assert_eq!(taps.register(1_250, Point::new(60.0, 10.0)), TapKind::Double);
        assert_eq!(taps.register(1_300, Point::new(60.0, 10.0)), TapKind::Single);
    }

    #[test]
    fn slow_or_distant_second_tap_is_single() {
        let mut taps = TapState::new(300, 100.0);
        taps.register(0, Point::ORIGIN);
        assert_eq!(taps.register(301, Point::ORIGIN), TapKind::Single);
        assert_eq!(taps.register(400, Point::new(101.0, 0.0)), TapKind::Single);
        taps.reset();
        assert_eq!(taps.register(450, Point::new(101.0, 0.0)), TapKind::Single);
    }
}
