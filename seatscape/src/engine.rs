// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};
use seatscape_event_state::drag::DragState;
use seatscape_event_state::pointers::PointerSet;
use seatscape_event_state::tap::TapState;
use seatscape_event_state::velocity::VelocityTracker;
use seatscape_inertia::{PanInertia, ScaleHistory, ScaleInertia};
use seatscape_scene::{CullResult, Culler, Hit, HitTester, Scene, SceneError};
use seatscape_view::{Transform, TransformEngine};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::event::EngineEvent;
use crate::router::GestureState;

/// Coarse gesture state, for hosts and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// Nothing in progress.
    Idle,
    /// One pointer down, still a tap candidate.
    Pressed,
    /// One pointer dragging the view.
    Panning,
    /// Two pointers pinching.
    Scaling,
    /// A pinch ended but pointers remain down; panning stays suppressed.
    PinchReleased,
    /// An automatic animation (fit, bounce, double-tap zoom) is running.
    Animating,
}

/// The interaction engine: one scene, one view, and the gestures driving it.
///
/// All input is injected. Pointer events carry millisecond timestamps from the
/// host's clock, and [`Engine::tick`] advances animation and inertia by the
/// elapsed milliseconds since the previous frame. Nothing happens until a
/// scene is bound; until then every gesture and tick is a no-op.
#[derive(Debug)]
pub struct Engine {
    pub(crate) config: Config,
    pub(crate) view: TransformEngine,
    pub(crate) scene: Option<Scene>,
    pub(crate) culler: Culler,
    pub(crate) fling: PanInertia,
    pub(crate) zoom_inertia: ScaleInertia,
    pub(crate) history: ScaleHistory,
    /// Zoom inertia steps too small to apply on their own, multiplied up.
    pub(crate) pending_factor: f64,
    pub(crate) pointers: PointerSet,
    pub(crate) drag: DragState,
    pub(crate) velocity: VelocityTracker,
    pub(crate) taps: TapState,
    pub(crate) state: GestureState,
    needs_fit: bool,
    redraw_pending: bool,
    events: Vec<EngineEvent>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Engine {
    /// Creates an engine with no scene bound.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let g = &config.gesture;
        Self {
            view: TransformEngine::new(),
            scene: None,
            culler: Culler::new(config.lod, config.index),
            fling: PanInertia::new(config.pan_inertia),
            zoom_inertia: ScaleInertia::new(config.scale_inertia),
            history: ScaleHistory::new(config.scale_inertia),
            pending_factor: 1.0,
            pointers: PointerSet::new(),
            drag: DragState::default(),
            velocity: VelocityTracker::new(g.velocity_window_ms, g.max_fling_velocity),
            taps: TapState::new(g.double_tap_timeout_ms, g.double_tap_slop_px),
            state: GestureState::Idle,
            needs_fit: false,
            redraw_pending: false,
            events: Vec::new(),
            config,
        }
    }

    /// The configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The transform engine, for coordinate conversion and inspection.
    #[must_use]
    pub fn view(&self) -> &TransformEngine {
        &self.view
    }

    /// The current transform. Renderers fetch this every frame.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.view.transform()
    }

    /// The bound scene.
    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Current gesture phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.state.phase()
    }

    /// Returns `true` while a fling is running.
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        self.fling.is_active()
    }

    /// Returns `true` while zoom inertia is running.
    #[must_use]
    pub fn is_zoom_coasting(&self) -> bool {
        self.zoom_inertia.is_active()
    }

    /// Sets the viewport size in screen pixels.
    ///
    /// If a scene was bound while the viewport was still empty, the fit
    /// transform is applied now.
    pub fn set_viewport(&mut self, size: Size) {
        self.view.set_viewport(size);
        if self.scene.is_some() {
            if self.needs_fit {
                self.apply_fit();
            }
            self.request_redraw();
            self.flush_scale_change();
        }
    }

    /// Binds a scene, replacing (and returning) the previous one.
    ///
    /// The scene is validated first. On success all motion stops, the scene's
    /// scale bounds are applied, the spatial index is (re)built if configured,
    /// and the view jumps to fit-to-screen.
    ///
    /// # Errors
    ///
    /// Returns the [`SceneError`] from [`Scene::validate`]; the engine is left
    /// untouched in that case.
    pub fn bind_scene(&mut self, scene: Scene) -> Result<Option<Scene>, SceneError> {
        scene.validate()?;
        self.stop_motion();
        self.abandon_gesture();
        self.taps.reset();

        let (min_scale, max_scale) = scene.scale_bounds();
        self.view
            .set_content_size(Size::new(scene.width(), scene.height()));
        self.view.set_scale_bounds(min_scale, max_scale);
        self.culler.prepare(&scene);
        info!(
            scene = scene.id(),
            items = scene.item_count(),
            indexed = self.culler.index().is_some(),
            "scene bound"
        );
        let previous = self.scene.replace(scene);
        self.apply_fit();
        self.request_redraw();
        self.flush_scale_change();
        Ok(previous)
    }

    /// Unbinds and returns the scene. The engine goes quiet until the next bind.
    pub fn unbind_scene(&mut self) -> Option<Scene> {
        let scene = self.scene.take()?;
        self.stop_motion();
        self.abandon_gesture();
        self.taps.reset();
        self.culler.reset();
        self.view.set_content_size(Size::ZERO);
        self.needs_fit = false;
        info!(scene = scene.id(), "scene unbound");
        Some(scene)
    }

    /// Advances animation and inertia by `dt_ms`.
    ///
    /// Returns `true` while anything is still moving, so the host knows to
    /// schedule another frame.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        if self.scene.is_none() {
            return false;
        }
        let mut changed = false;

        if self.view.is_animating() {
            self.view.tick(dt_ms);
            changed = true;
        }

        if let Some(delta) = self.fling.tick(dt_ms) {
            if self.view.apply_translation(delta) {
                changed = true;
            } else if delta != Vec2::ZERO {
                debug!("fling reached the content edge");
                self.fling.stop();
            }
        }

        if let Some(step) = self.zoom_inertia.tick(dt_ms) {
            if self.at_bound_toward(step.factor) {
                debug!(scale = self.view.scale(), "zoom inertia reached a scale bound");
                self.zoom_inertia.stop();
                self.pending_factor = 1.0;
            } else {
                self.pending_factor *= step.factor;
                if self.view.apply_scale(self.pending_factor, step.focus) {
                    self.pending_factor = 1.0;
                    changed = true;
                }
            }
        }
        if !self.zoom_inertia.is_active() {
            self.pending_factor = 1.0;
        }

        if self.state == GestureState::Animating && !self.view.is_animating() {
            self.state = GestureState::Idle;
        }
        if changed {
            self.request_redraw();
        }
        self.flush_scale_change();
        self.view.is_animating() || self.fling.is_active() || self.zoom_inertia.is_active()
    }

    /// Animates to fit the whole scene in the viewport.
    ///
    /// Returns `false` without a scene or with a degenerate scene or viewport.
    pub fn reset_to_fit_screen(&mut self) -> bool {
        if self.scene.is_none() {
            return false;
        }
        self.stop_inertia();
        let started = self
            .view
            .reset_to_fit_screen(self.config.gesture.fit_duration_ms);
        if started {
            self.enter_animating();
            self.request_redraw();
        }
        started
    }

    /// Returns `true` once the scale exceeds the fit scale by `threshold`
    /// (a ratio, such as `1.1`), for showing a "reset view" affordance.
    #[must_use]
    pub fn should_show_reset(&self, threshold: f64) -> bool {
        match self.view.fit_transform() {
            Some(fit) if self.scene.is_some() => self.view.scale() > fit.scale * threshold,
            _ => false,
        }
    }

    /// Visible regions and items for the current frame.
    ///
    /// Returns `None` without a scene or if the transform cannot be inverted.
    #[must_use]
    pub fn cull(&self) -> Option<CullResult> {
        let scene = self.scene.as_ref()?;
        match self
            .culler
            .cull_view(scene, &self.view.transform(), self.view.viewport())
        {
            Ok(result) => Some(result),
            Err(err) => {
                warn!(%err, "cannot cull");
                None
            }
        }
    }

    /// Hit tests a screen point without touching the selection.
    ///
    /// Takes `&mut self` because a non-invertible transform is repaired on the way.
    pub fn hit_test(&mut self, screen: Point) -> Hit {
        let Some(scene_pt) = self.to_scene(screen) else {
            return Hit::Miss;
        };
        match &self.scene {
            Some(scene) => HitTester::new(scene, self.culler.index()).hit(scene_pt),
            None => Hit::Miss,
        }
    }

    /// Clears every selection, returning how many items were selected.
    pub fn clear_selection(&mut self) -> usize {
        let Some(scene) = self.scene.as_mut() else {
            return 0;
        };
        let count = scene.clear_selection().len();
        if count > 0 {
            self.events.push(EngineEvent::SelectionCleared { count });
            self.request_redraw();
        }
        count
    }

    /// Drains pending events in the order they occurred.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        self.redraw_pending = false;
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    pub(crate) fn request_redraw(&mut self) {
        if !self.redraw_pending {
            self.redraw_pending = true;
            self.events.push(EngineEvent::NeedsRedraw);
        }
    }

    pub(crate) fn flush_scale_change(&mut self) {
        if let Some(change) = self.view.take_scale_change() {
            self.events.push(EngineEvent::ScaleChanged {
                scale: change.scale,
                min_scale: change.min_scale,
                max_scale: change.max_scale,
            });
        }
    }

    /// Screen → scene, repairing the view if the transform went bad.
    pub(crate) fn to_scene(&mut self, screen: Point) -> Option<Point> {
        match self.view.screen_to_scene(screen) {
            Ok(pt) => Some(pt),
            Err(err) => {
                warn!(%err, "screen_to_scene failed");
                self.view.repair();
                None
            }
        }
    }

    pub(crate) fn stop_inertia(&mut self) {
        self.fling.stop();
        self.zoom_inertia.stop();
        self.pending_factor = 1.0;
    }

    /// Stops every motion driver: both inertias and any animation.
    pub(crate) fn stop_motion(&mut self) {
        self.stop_inertia();
        self.view.cancel_animation();
        if self.state == GestureState::Animating {
            self.state = GestureState::Idle;
        }
    }

    /// Drops pointer bookkeeping without producing taps or inertia.
    pub(crate) fn abandon_gesture(&mut self) {
        self.pointers.clear();
        self.drag.end();
        self.velocity.reset();
        self.history.clear();
        self.state = GestureState::Idle;
    }

    pub(crate) fn enter_animating(&mut self) {
        if self.pointers.is_empty() && self.view.is_animating() {
            self.state = GestureState::Animating;
        }
    }

    fn at_bound_toward(&self, factor: f64) -> bool {
        let (min_scale, max_scale) = self.view.scale_bounds();
        let scale = self.view.scale();
        (factor > 1.0 && scale >= max_scale) || (factor < 1.0 && scale <= min_scale)
    }

    fn apply_fit(&mut self) {
        match self.view.fit_transform() {
            Some(fit) => {
                self.view.set_transform(fit);
                self.needs_fit = false;
            }
            None => {
                let (min_scale, _) = self.view.scale_bounds();
                self.view.set_transform(Transform::new(min_scale, 0.0, 0.0));
                self.needs_fit = true;
            }
        }
    }
}
