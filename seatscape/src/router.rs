// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture routing: pointer and wheel input in, transform changes and events out.
//!
//! ```text
//! Idle ──down──▶ Pressed ──travel > slop──▶ Panning ──up──▶ Idle (+ fling)
//!                   │  └──up──▶ Idle (tap / double tap)
//!                   └──second down──▶ Scaling ──up──▶ PinchReleased ──all up──▶ Idle
//!                                         (bounce or zoom inertia on release)
//! ```
//!
//! A pointer going down always stops inertia and animation first, so direct
//! manipulation wins over automatic motion.

use kurbo::{Point, Vec2};
use seatscape_event_state::pointers::PointerId;
use seatscape_event_state::tap::TapKind;
use seatscape_scene::{Hit, HitTester};
use seatscape_view::SCALE_EPSILON;
use tracing::{debug, trace};

use crate::engine::{Engine, GesturePhase};
use crate::event::EngineEvent;

/// Gesture state with the data each phase needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GestureState {
    Idle,
    Pressed {
        pointer: PointerId,
    },
    Panning {
        pointer: PointerId,
    },
    Scaling {
        /// Finger span when scale was last applied; `None` until the span is usable.
        last_span: Option<f64>,
    },
    PinchReleased,
    Animating,
}

impl GestureState {
    pub(crate) fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::Pressed { .. } => GesturePhase::Pressed,
            Self::Panning { .. } => GesturePhase::Panning,
            Self::Scaling { .. } => GesturePhase::Scaling,
            Self::PinchReleased => GesturePhase::PinchReleased,
            Self::Animating => GesturePhase::Animating,
        }
    }
}

impl Engine {
    /// A pointer went down at screen position `pos`.
    pub fn on_pointer_down(&mut self, id: PointerId, pos: Point, timestamp_ms: u64) {
        if self.scene.is_none() {
            return;
        }
        self.stop_motion();
        match self.pointers.down(id, pos) {
            1 => {
                self.drag.start(pos);
                self.velocity.reset();
                self.velocity.push(timestamp_ms, pos);
                self.state = GestureState::Pressed { pointer: id };
            }
            2 => self.begin_pinch(),
            // Extra fingers neither start nor disturb a gesture.
            _ => {}
        }
    }

    /// A pointer moved.
    pub fn on_pointer_move(&mut self, id: PointerId, pos: Point, timestamp_ms: u64) {
        if self.scene.is_none() || !self.pointers.move_to(id, pos) {
            return;
        }
        match self.state {
            GestureState::Pressed { pointer } if pointer == id => {
                self.drag.update(pos);
                self.velocity.push(timestamp_ms, pos);
                if self.drag.exceeded(self.config.gesture.tap_slop_px) {
                    trace!(travel = self.drag.travel(), "press became a pan");
                    self.state = GestureState::Panning { pointer: id };
                    // Catch up on the travel absorbed by the slop.
                    if let Some(offset) = self.drag.total_offset(pos) {
                        self.pan_by(offset);
                    }
                }
            }
            GestureState::Panning { pointer } if pointer == id => {
                self.velocity.push(timestamp_ms, pos);
                if let Some(delta) = self.drag.update(pos) {
                    self.pan_by(delta);
                }
            }
            GestureState::Scaling { last_span } => self.pinch_move(last_span, timestamp_ms),
            _ => {}
        }
    }

    /// A pointer lifted.
    pub fn on_pointer_up(&mut self, id: PointerId, pos: Point, timestamp_ms: u64) {
        if self.scene.is_none() || self.pointers.up(id).is_none() {
            return;
        }
        let remaining = self.pointers.len();
        match self.state {
            GestureState::Pressed { pointer } if pointer == id => {
                self.drag.end();
                self.velocity.reset();
                self.state = GestureState::Idle;
                self.on_tap(pos, timestamp_ms);
            }
            GestureState::Panning { pointer } if pointer == id => {
                self.velocity.push(timestamp_ms, pos);
                let release = self.velocity.velocity();
                self.drag.end();
                self.velocity.reset();
                self.state = GestureState::Idle;
                if self.fling.start(release) {
                    self.view.cancel_animation();
                }
            }
            GestureState::Scaling { .. } if remaining >= 2 => {
                // A spare finger lifted, or the pair changed: re-anchor the span.
                self.state = GestureState::Scaling {
                    last_span: self.usable_span(),
                };
            }
            GestureState::Scaling { .. } => {
                self.state = if remaining > 0 {
                    GestureState::PinchReleased
                } else {
                    GestureState::Idle
                };
                self.end_pinch(timestamp_ms);
            }
            _ => self.settle_if_released(remaining),
        }
    }

    /// The host cancelled a pointer (for example, the OS took over the touch).
    ///
    /// The gesture is abandoned: no tap, no fling, no zoom inertia.
    pub fn on_pointer_cancel(&mut self, id: PointerId) {
        if self.scene.is_none() || self.pointers.up(id).is_none() {
            return;
        }
        let remaining = self.pointers.len();
        match self.state {
            GestureState::Pressed { pointer } | GestureState::Panning { pointer }
                if pointer == id =>
            {
                self.drag.end();
                self.velocity.reset();
                self.state = GestureState::Idle;
            }
            GestureState::Scaling { .. } if remaining >= 2 => {
                self.state = GestureState::Scaling {
                    last_span: self.usable_span(),
                };
            }
            GestureState::Scaling { .. } => {
                self.history.clear();
                self.state = if remaining > 0 {
                    GestureState::PinchReleased
                } else {
                    GestureState::Idle
                };
                if self
                    .view
                    .constrain_and_bounce_if_needed(self.config.gesture.bounce_duration_ms)
                {
                    self.enter_animating();
                }
            }
            _ => self.settle_if_released(remaining),
        }
    }

    /// Once every pointer is up, fall back to `Idle` (or `Animating`).
    fn settle_if_released(&mut self, remaining: usize) {
        if remaining == 0 && self.state != GestureState::Animating {
            self.state = GestureState::Idle;
            self.enter_animating();
        }
    }

    /// Mouse wheel (or trackpad scroll) zoom anchored at `focus`.
    ///
    /// Positive `delta_y` zooms out.
    pub fn on_wheel(&mut self, delta_y: f64, focus: Point) {
        if self.scene.is_none() || !delta_y.is_finite() {
            return;
        }
        self.stop_motion();
        let factor = (-delta_y * self.config.gesture.wheel_zoom_rate).exp();
        if self.view.apply_scale(factor, focus) {
            self.request_redraw();
            self.flush_scale_change();
        }
    }

    fn pan_by(&mut self, delta: Vec2) {
        if self.view.apply_translation(delta) {
            self.request_redraw();
        }
    }

    fn begin_pinch(&mut self) {
        self.drag.end();
        self.velocity.reset();
        self.history.clear();
        let last_span = self.usable_span();
        debug!(span = ?last_span, "pinch start");
        self.state = GestureState::Scaling { last_span };
    }

    fn usable_span(&self) -> Option<f64> {
        self.pointers
            .span()
            .filter(|s| s.is_finite() && *s >= self.config.gesture.min_pinch_span_px)
    }

    fn pinch_move(&mut self, last_span: Option<f64>, timestamp_ms: u64) {
        let (Some(span), Some(focus)) = (self.usable_span(), self.pointers.midpoint()) else {
            return;
        };
        let Some(last) = last_span else {
            self.state = GestureState::Scaling {
                last_span: Some(span),
            };
            return;
        };
        let factor = span / last;
        // Tiny steps accumulate against the stale span until they count.
        if (factor - 1.0).abs() < SCALE_EPSILON {
            return;
        }
        self.state = GestureState::Scaling {
            last_span: Some(span),
        };
        let before = self.view.scale();
        if self.view.apply_scale(factor, focus) {
            self.history
                .record(timestamp_ms, self.view.scale() / before, focus);
            self.request_redraw();
            self.flush_scale_change();
        }
    }

    fn end_pinch(&mut self, timestamp_ms: u64) {
        let g = self.config.gesture;
        if !self.view.scale_in_bounds() {
            if self.view.constrain_and_bounce_if_needed(g.bounce_duration_ms) {
                self.enter_animating();
            }
        } else if self
            .history
            .last()
            .is_some_and(|s| timestamp_ms.saturating_sub(s.timestamp_ms) <= g.scale_inertia_recency_ms)
        {
            self.zoom_inertia.start_from(&self.history);
        }
        self.history.clear();
    }

    fn on_tap(&mut self, pos: Point, timestamp_ms: u64) {
        match self.taps.register(timestamp_ms, pos) {
            TapKind::Single => self.toggle_at(pos),
            TapKind::Double => self.double_tap_zoom(pos),
        }
    }

    fn toggle_at(&mut self, pos: Point) {
        let Some(scene_pt) = self.to_scene(pos) else {
            return;
        };
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let hit = HitTester::new(scene, self.culler.index()).hit(scene_pt);
        trace!(?pos, ?scene_pt, ?hit, "tap");
        match hit {
            Hit::Selectable(key) => {
                let Some(item) = scene.item(key) else {
                    return;
                };
                let (id, selected) = (item.id, !item.selected);
                scene.set_selected(key, selected);
                self.push_event(EngineEvent::SelectionChanged { id, key, selected });
                self.request_redraw();
            }
            Hit::Unavailable(key, status) => {
                self.push_event(EngineEvent::TapUnavailable { key, status });
            }
            Hit::Miss => {}
        }
    }

    /// Toggles between the zoomed scale and the minimum scale, anchored at `pos`.
    fn double_tap_zoom(&mut self, pos: Point) {
        let g = self.config.gesture;
        let (min_scale, max_scale) = self.view.scale_bounds();
        let zoomed = g.double_tap_scale.clamp(min_scale, max_scale);
        let scale = self.view.scale();
        let target_scale = if scale < zoomed * (1.0 - SCALE_EPSILON) {
            zoomed
        } else {
            min_scale
        };
        debug!(from = scale, to = target_scale, "double tap zoom");
        let target = self.view.zoom_target(target_scale, pos);
        self.view.animate_to(target, g.double_tap_duration_ms);
        self.enter_animating();
        self.request_redraw();
    }
}
